use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::{FeedError, FeedResult};

/// Payload for a new blog post; the store stamps the insert time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBlog {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: Option<String>,
}

impl NewBlog {
    pub fn new(title: String, description: String, url: String) -> Self {
        Self {
            title,
            description,
            url,
            image_url: None,
        }
    }

    pub fn with_image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = image_url;
        self
    }

    /// Reject empty titles and non-http(s) links before they reach the store
    pub fn validate(&self) -> FeedResult<()> {
        if self.title.trim().is_empty() {
            return Err(FeedError::InvalidInput("Blog title is empty".to_string()));
        }

        check_http_url(&self.url)?;
        if let Some(image_url) = &self.image_url {
            check_http_url(image_url)?;
        }

        Ok(())
    }
}

fn check_http_url(raw: &str) -> FeedResult<()> {
    let parsed = Url::parse(raw)
        .map_err(|e| FeedError::InvalidInput(format!("{}: {}", raw, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(FeedError::InvalidInput(format!(
            "{}: unsupported scheme {}",
            raw, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blog(url: &str) -> NewBlog {
        NewBlog::new(
            "Post".to_string(),
            "Description".to_string(),
            url.to_string(),
        )
    }

    #[test]
    fn test_valid_blog() {
        let post = blog("https://example.com/post")
            .with_image_url(Some("https://example.com/cover.png".to_string()));
        assert!(post.validate().is_ok());
    }

    #[test]
    fn test_relative_url_rejected() {
        assert!(matches!(
            blog("/posts/1").validate(),
            Err(FeedError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        assert!(matches!(
            blog("ftp://example.com/post").validate(),
            Err(FeedError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_blank_title_rejected() {
        let mut post = blog("https://example.com/post");
        post.title = "   ".to_string();
        assert!(matches!(post.validate(), Err(FeedError::InvalidInput(_))));
    }
}
