use crate::domain::{FeedItem, NewBlog, RepoRecord};
use crate::errors::FeedResult;

#[cfg_attr(test, mockall::automock)]
pub trait PublicRepoRepository: Send + Sync {
    /// Cached repositories, most recent first
    fn list_public_repos(&self) -> FeedResult<Vec<FeedItem>>;
    fn replace_all(&self, repos: &[RepoRecord]) -> FeedResult<()>;
    fn last_refreshed(&self) -> FeedResult<Option<i64>>;
    fn mark_refreshed(&self, at: i64) -> FeedResult<()>;
}

#[cfg_attr(test, mockall::automock)]
pub trait BlogRepository: Send + Sync {
    /// Blog posts, most recent first
    fn list_blogs(&self) -> FeedResult<Vec<FeedItem>>;
    fn insert_blog(&self, blog: &NewBlog) -> FeedResult<i64>;
}
