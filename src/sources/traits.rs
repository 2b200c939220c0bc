use crate::errors::FeedResult;

/// Pulls the current list of public repositories into the store.
#[cfg_attr(test, mockall::automock)]
pub trait RepoRefresher: Send + Sync {
    fn refresh_public_repos(&self) -> FeedResult<()>;
}
