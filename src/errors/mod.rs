use rusqlite::ffi::ErrorCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    // User input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Data integrity errors
    #[error("Malformed timestamp: {0:?}")]
    MalformedTimestamp(String),

    // Repository refresh errors
    #[error("Repository refresh failed: {0}")]
    Refresh(String),

    #[error("Cache state unavailable: {0}")]
    CacheState(String),

    // Storage errors
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Database error: {0}")]
    Database(rusqlite::Error),

    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for FeedError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::QueryReturnedNoRows => FeedError::NotFound(err.to_string()),
            rusqlite::Error::SqliteFailure(failure, _) => match failure.code {
                ErrorCode::ConstraintViolation => FeedError::ConstraintViolation(err.to_string()),
                ErrorCode::CannotOpen
                | ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked
                | ErrorCode::NotADatabase => FeedError::StoreUnavailable(err.to_string()),
                _ => FeedError::Database(err),
            },
            _ => FeedError::Database(err),
        }
    }
}

pub type FeedResult<T> = Result<T, FeedError>;
