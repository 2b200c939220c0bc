use std::time::Duration;

use chrono::DateTime;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, LINK, USER_AGENT};
use serde::Deserialize;

use crate::config::Config;
use crate::domain::timestamp::TIMESTAMP_FORMAT;
use crate::domain::RepoRecord;
use crate::errors::{FeedError, FeedResult};
use crate::sources::traits::RepoRefresher;
use crate::storage::traits::PublicRepoRepository;

/// GitHub caps `per_page` at 100
const PAGE_SIZE: usize = 100;
const MAX_PAGES: usize = 20;

#[derive(Debug, Deserialize)]
struct GitHubRepo {
    name: String,
    description: Option<String>,
    html_url: String,
    language: Option<String>,
    #[serde(default)]
    stargazers_count: i64,
    #[serde(default)]
    fork: bool,
    pushed_at: Option<String>,
}

impl GitHubRepo {
    fn into_record(self) -> FeedResult<RepoRecord> {
        let timestamp = self.pushed_at.as_deref().map(to_feed_timestamp).transpose()?;

        Ok(RepoRecord::new(self.name, self.html_url)
            .with_description(self.description)
            .with_language(self.language)
            .with_stars(self.stargazers_count)
            .with_timestamp(timestamp))
    }
}

/// Target of the `rel="next"` entry in a GitHub `Link` header
fn next_page_url(link: &str) -> Option<String> {
    link.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        if !parts.any(|p| p.trim() == r#"rel="next""#) {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}

/// RFC 3339 (`2024-01-03T10:00:00Z`) to `"YYYY-MM-DD HH:MM:SS"` UTC
fn to_feed_timestamp(raw: &str) -> FeedResult<String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc().format(TIMESTAMP_FORMAT).to_string())
        .map_err(|_| FeedError::MalformedTimestamp(raw.to_string()))
}

pub struct GitHubRefresher<R: PublicRepoRepository> {
    client: Client,
    api_url: String,
    user: String,
    token: Option<String>,
    repository: R,
}

impl<R: PublicRepoRepository> GitHubRefresher<R> {
    pub fn new(config: &Config, repository: R) -> FeedResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: config.github_api_url.trim_end_matches('/').to_string(),
            user: config.github_user.clone(),
            token: config.github_token.clone(),
            repository,
        })
    }

    fn repos_url(&self) -> String {
        format!(
            "{}/users/{}/repos?type=owner&sort=pushed&per_page={}",
            self.api_url, self.user, PAGE_SIZE
        )
    }

    fn fetch_repos(&self) -> FeedResult<Vec<RepoRecord>> {
        let mut records = Vec::new();
        let mut next = Some(self.repos_url());
        let mut pages = 0;

        while let Some(url) = next.take() {
            if pages == MAX_PAGES {
                log::warn!(
                    "Stopped after {} pages of repositories for {}",
                    MAX_PAGES, self.user
                );
                break;
            }

            let mut request = self
                .client
                .get(&url)
                .header(USER_AGENT, concat!("feedmerge/", env!("CARGO_PKG_VERSION")))
                .header(ACCEPT, "application/vnd.github+json");

            if let Some(token) = &self.token {
                request = request.bearer_auth(token);
            }

            let response = request.send()?.error_for_status()?;
            next = response
                .headers()
                .get(LINK)
                .and_then(|v| v.to_str().ok())
                .and_then(next_page_url);

            let bytes = response.bytes()?;
            records.extend(Self::records_from_json(&bytes)?);
            pages += 1;
        }

        Ok(records)
    }

    /// Decode a `/users/{user}/repos` payload, dropping forks
    fn records_from_json(bytes: &[u8]) -> FeedResult<Vec<RepoRecord>> {
        let repos: Vec<GitHubRepo> = serde_json::from_slice(bytes)?;

        repos
            .into_iter()
            .filter(|r| !r.fork)
            .map(GitHubRepo::into_record)
            .collect()
    }
}

impl<R: PublicRepoRepository> RepoRefresher for GitHubRefresher<R> {
    fn refresh_public_repos(&self) -> FeedResult<()> {
        let records = self.fetch_repos().map_err(|e| match e {
            FeedError::MalformedTimestamp(_) => e,
            other => FeedError::Refresh(format!("{}: {}", self.user, other)),
        })?;

        log::info!("Fetched {} public repositories for {}", records.len(), self.user);
        self.repository.replace_all(&records)
    }
}
