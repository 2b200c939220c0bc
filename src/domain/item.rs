use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field holding an item's `"YYYY-MM-DD HH:MM:SS"` timestamp
pub const TIMESTAMP_FIELD: &str = "timestamp";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemSource {
    Repo,
    Blog,
}

impl ItemSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemSource::Repo => "repo",
            ItemSource::Blog => "blog",
        }
    }
}

impl std::fmt::Display for ItemSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A read-only snapshot of one stored row, kept as a generic field map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    pub source: ItemSource,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl FeedItem {
    pub fn new(source: ItemSource) -> Self {
        Self {
            source,
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn with_timestamp(self, timestamp: Option<&str>) -> Self {
        let value = timestamp.map_or(Value::Null, |t| Value::String(t.to_string()));
        self.with_field(TIMESTAMP_FIELD, value)
    }

    /// String value of a field, if present and a string
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// Raw timestamp field; `None` when absent
    pub fn raw_timestamp(&self) -> Option<&Value> {
        self.fields.get(TIMESTAMP_FIELD)
    }

    /// Best human-readable label: repo name or blog title
    pub fn label(&self) -> &str {
        let key = match self.source {
            ItemSource::Repo => "name",
            ItemSource::Blog => "title",
        };
        self.get_str(key).unwrap_or("(untitled)")
    }
}
