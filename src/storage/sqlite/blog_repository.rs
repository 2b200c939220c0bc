use crate::domain::{FeedItem, ItemSource, NewBlog};
use crate::errors::FeedResult;
use crate::storage::sqlite::connection::row_to_item;
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::BlogRepository;

pub struct SqliteBlogRepository {
    storage: SqliteStorage,
}

impl SqliteBlogRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }
}

impl BlogRepository for SqliteBlogRepository {
    fn list_blogs(&self) -> FeedResult<Vec<FeedItem>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, description, url, image_url, timestamp FROM blogs ORDER BY timestamp DESC, id DESC"
        )?;

        let blogs = stmt.query_map([], |row| row_to_item(row, ItemSource::Blog))?;
        let blogs = blogs.collect::<Result<Vec<_>, _>>()?;
        Ok(blogs)
    }

    fn insert_blog(&self, blog: &NewBlog) -> FeedResult<i64> {
        let conn = self.storage.connection()?;
        conn.execute(
            "INSERT INTO blogs (title, description, url, image_url, timestamp) VALUES (?1, ?2, ?3, ?4, CURRENT_TIMESTAMP)",
            (&blog.title, &blog.description, &blog.url, &blog.image_url),
        )?;

        Ok(conn.last_insert_rowid())
    }
}
