pub mod traits;
pub mod sqlite;

pub use traits::{BlogRepository, PublicRepoRepository};
pub use sqlite::{SqliteBlogRepository, SqlitePublicRepoRepository, SqliteStorage};
