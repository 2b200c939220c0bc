pub mod merge;
pub mod feed_service;

pub use merge::top_k;
pub use feed_service::{FeedService, FeedSnapshot};
