mod connection;
mod repo_repository;
mod blog_repository;

pub use connection::SqliteStorage;
pub use repo_repository::SqlitePublicRepoRepository;
pub use blog_repository::SqliteBlogRepository;
