use chrono::Utc;

use crate::domain::cache::format_refresh_time;
use crate::domain::{CacheState, FeedItem, NewBlog, RefreshCheck, RefreshStatus};
use crate::errors::{FeedError, FeedResult};
use crate::services::merge::top_k;
use crate::sources::traits::RepoRefresher;
use crate::storage::traits::{BlogRepository, PublicRepoRepository};

/// Items read from the store plus what the refresh gate did on the way.
#[derive(Debug)]
pub struct FeedSnapshot {
    pub items: Vec<FeedItem>,
    /// Local time the repo cache was last known fresh, before this call
    pub last_refreshed: String,
    /// Set when a due refresh failed; `items` then holds the stale cache
    pub refresh_error: Option<FeedError>,
}

pub struct FeedService<R: PublicRepoRepository, B: BlogRepository, F: RepoRefresher> {
    repos: R,
    blogs: B,
    refresher: F,
}

impl<R: PublicRepoRepository, B: BlogRepository, F: RepoRefresher> FeedService<R, B, F> {
    pub fn new(repos: R, blogs: B, refresher: F) -> Self {
        Self {
            repos,
            blogs,
            refresher,
        }
    }

    /// Initial cache state from the persisted refresh marker
    pub fn load_cache_state(&self, interval_secs: i64) -> FeedResult<CacheState> {
        let last = self.repos.last_refreshed()?.unwrap_or(0);
        Ok(CacheState::new(last, interval_secs))
    }

    /// Public repos, refreshed first if the cache is stale
    pub fn get_public_repos_with_cache_info(&self, cache: &CacheState) -> FeedResult<FeedSnapshot> {
        self.get_public_repos_with_cache_info_at(cache, Utc::now().timestamp())
    }

    pub fn get_public_repos_with_cache_info_at(
        &self,
        cache: &CacheState,
        now: i64,
    ) -> FeedResult<FeedSnapshot> {
        let check = cache.refresh_if_stale(now, || self.refresh(now))?;
        self.snapshot(check)
    }

    /// Refresh regardless of the cache age
    pub fn force_refresh(&self, cache: &CacheState) -> FeedResult<FeedSnapshot> {
        let now = Utc::now().timestamp();
        let check = cache.force_refresh(now, || self.refresh(now))?;
        self.snapshot(check)
    }

    /// The `k` most recent repos and blog posts, newest first
    pub fn get_top_k(&self, cache: &CacheState, k: usize) -> FeedResult<FeedSnapshot> {
        self.get_top_k_at(cache, k, Utc::now().timestamp())
    }

    pub fn get_top_k_at(&self, cache: &CacheState, k: usize, now: i64) -> FeedResult<FeedSnapshot> {
        let repos = self.get_public_repos_with_cache_info_at(cache, now)?;
        let blogs = self.blogs.list_blogs()?;

        Ok(FeedSnapshot {
            items: top_k(&repos.items, &blogs, k)?,
            ..repos
        })
    }

    pub fn list_blogs(&self) -> FeedResult<Vec<FeedItem>> {
        self.blogs.list_blogs()
    }

    /// Validate and store a blog post, returning its row id
    pub fn add_blog(&self, blog: &NewBlog) -> FeedResult<i64> {
        blog.validate()?;
        let id = self.blogs.insert_blog(blog)?;
        log::debug!("Stored blog {} as id {}", blog.url, id);
        Ok(id)
    }

    fn refresh(&self, now: i64) -> FeedResult<()> {
        log::info!("Repository cache is stale, refreshing");
        self.refresher.refresh_public_repos()?;
        self.repos.mark_refreshed(now)
    }

    fn snapshot(&self, check: RefreshCheck) -> FeedResult<FeedSnapshot> {
        let last_refreshed = format_refresh_time(check.previous);

        if matches!(check.status, RefreshStatus::Refreshed) {
            log::info!("Repository cache refreshed");
        }

        let refresh_error = check.into_error();
        if let Some(e) = &refresh_error {
            log::warn!("Repository refresh failed, serving cached data: {}", e);
        }

        Ok(FeedSnapshot {
            items: self.repos.list_public_repos()?,
            last_refreshed,
            refresh_error,
        })
    }
}
