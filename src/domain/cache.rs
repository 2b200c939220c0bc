use std::sync::Mutex;

use chrono::{Local, TimeZone};

use crate::domain::timestamp::TIMESTAMP_FORMAT;
use crate::errors::{FeedError, FeedResult};

/// Repositories are refreshed at most once every 15 minutes
pub const DEFAULT_REFRESH_INTERVAL_SECS: i64 = 15 * 60;

/// True once more than `interval_secs` have passed since `last_refresh`.
pub fn should_refresh(last_refresh: i64, now: i64, interval_secs: i64) -> bool {
    now - last_refresh > interval_secs
}

/// Format epoch seconds as local `"YYYY-MM-DD HH:MM:SS"`
pub fn format_refresh_time(epoch_secs: i64) -> String {
    Local
        .timestamp_opt(epoch_secs, 0)
        .single()
        .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[derive(Debug)]
pub enum RefreshStatus {
    Fresh,
    Refreshed,
    Failed(FeedError),
}

/// Outcome of one pass through the gate.
#[derive(Debug)]
pub struct RefreshCheck {
    /// `last_refresh` as it was before this check
    pub previous: i64,
    pub status: RefreshStatus,
}

impl RefreshCheck {
    pub fn into_error(self) -> Option<FeedError> {
        match self.status {
            RefreshStatus::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Tracks when the repository cache was last refreshed.
///
/// The lock is held across check, refresh and update, so concurrent callers
/// never refresh the same stale cache twice.
#[derive(Debug)]
pub struct CacheState {
    last_refresh: Mutex<i64>,
    interval_secs: i64,
}

impl CacheState {
    pub fn new(last_refresh: i64, interval_secs: i64) -> Self {
        Self {
            last_refresh: Mutex::new(last_refresh),
            interval_secs,
        }
    }

    pub fn with_default_interval(last_refresh: i64) -> Self {
        Self::new(last_refresh, DEFAULT_REFRESH_INTERVAL_SECS)
    }

    pub fn last_refresh(&self) -> FeedResult<i64> {
        Ok(*self.lock()?)
    }

    /// Run `refresh` if the cache is stale at `now`.
    ///
    /// A failed refresh leaves `last_refresh` untouched and is returned in
    /// the status, not as an `Err`.
    pub fn refresh_if_stale<F>(&self, now: i64, refresh: F) -> FeedResult<RefreshCheck>
    where
        F: FnOnce() -> FeedResult<()>,
    {
        let mut last_refresh = self.lock()?;
        let previous = *last_refresh;

        if !should_refresh(previous, now, self.interval_secs) {
            return Ok(RefreshCheck {
                previous,
                status: RefreshStatus::Fresh,
            });
        }

        let status = Self::run(&mut last_refresh, now, refresh);
        Ok(RefreshCheck { previous, status })
    }

    /// Run `refresh` unconditionally, with the same bookkeeping
    pub fn force_refresh<F>(&self, now: i64, refresh: F) -> FeedResult<RefreshCheck>
    where
        F: FnOnce() -> FeedResult<()>,
    {
        let mut last_refresh = self.lock()?;
        let previous = *last_refresh;
        let status = Self::run(&mut last_refresh, now, refresh);
        Ok(RefreshCheck { previous, status })
    }

    fn run<F>(last_refresh: &mut i64, now: i64, refresh: F) -> RefreshStatus
    where
        F: FnOnce() -> FeedResult<()>,
    {
        match refresh() {
            Ok(()) => {
                *last_refresh = now;
                RefreshStatus::Refreshed
            }
            Err(e) => RefreshStatus::Failed(e),
        }
    }

    fn lock(&self) -> FeedResult<std::sync::MutexGuard<'_, i64>> {
        self.last_refresh
            .lock()
            .map_err(|_| FeedError::CacheState("refresh lock poisoned".to_string()))
    }
}
