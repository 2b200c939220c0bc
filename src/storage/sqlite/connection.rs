use rusqlite::types::ValueRef;
use rusqlite::{Connection, Row};
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::domain::{FeedItem, ItemSource};
use crate::errors::{FeedError, FeedResult};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS public_repos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    description TEXT,
    url TEXT NOT NULL,
    language TEXT,
    stars INTEGER NOT NULL DEFAULT 0,
    timestamp TEXT
);

CREATE INDEX IF NOT EXISTS idx_public_repos_timestamp ON public_repos(timestamp);

CREATE TABLE IF NOT EXISTS blogs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    url TEXT NOT NULL UNIQUE,
    image_url TEXT,
    timestamp TEXT DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_blogs_timestamp ON blogs(timestamp);

CREATE TABLE IF NOT EXISTS cache_meta (
    key TEXT PRIMARY KEY,
    value INTEGER NOT NULL
);
"#;

#[derive(Clone)]
pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> FeedResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn in_memory() -> FeedResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn connection(&self) -> Result<std::sync::MutexGuard<'_, Connection>, FeedError> {
        self.conn
            .lock()
            .map_err(|_| FeedError::StoreUnavailable("connection lock poisoned".to_string()))
    }
}

/// Convert every column of a row into a field of a `FeedItem`
pub(crate) fn row_to_item(row: &Row<'_>, source: ItemSource) -> rusqlite::Result<FeedItem> {
    let stmt: &rusqlite::Statement<'_> = row.as_ref();
    let mut fields = Map::new();

    for (i, name) in stmt.column_names().into_iter().enumerate() {
        let value = match row.get_ref(i)? {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(n) => Value::from(n),
            ValueRef::Real(f) => Value::from(f),
            ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
            ValueRef::Blob(bytes) => blob_to_value(bytes),
        };
        fields.insert(name.to_string(), value);
    }

    Ok(FeedItem { source, fields })
}

/// UTF-8 blobs read as text; anything else stays a non-null byte array
fn blob_to_value(bytes: &[u8]) -> Value {
    match std::str::from_utf8(bytes) {
        Ok(text) => Value::String(text.to_string()),
        Err(_) => Value::Array(bytes.iter().map(|b| Value::from(*b)).collect()),
    }
}
