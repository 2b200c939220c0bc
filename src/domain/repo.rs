use serde::{Deserialize, Serialize};

/// One public repository as written into the cache table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRecord {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub language: Option<String>,
    pub stars: i64,
    pub timestamp: Option<String>,
}

impl RepoRecord {
    pub fn new(name: String, url: String) -> Self {
        Self {
            name,
            description: None,
            url,
            language: None,
            stars: 0,
            timestamp: None,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    pub fn with_stars(mut self, stars: i64) -> Self {
        self.stars = stars;
        self
    }

    pub fn with_timestamp(mut self, timestamp: Option<String>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
