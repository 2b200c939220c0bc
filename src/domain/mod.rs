pub mod item;
pub mod blog;
pub mod repo;
pub mod timestamp;
pub mod cache;

pub use item::{FeedItem, ItemSource};
pub use blog::NewBlog;
pub use repo::RepoRecord;
pub use timestamp::{max_index, parse_timestamp, Moment};
pub use cache::{should_refresh, CacheState, RefreshCheck, RefreshStatus};
