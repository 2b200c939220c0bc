use chrono::NaiveDateTime;
use serde_json::Value;

use crate::domain::FeedItem;
use crate::errors::{FeedError, FeedResult};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A comparable point in time, read as naive wall-clock time.
///
/// `Unset` orders before every real moment, so items without a timestamp
/// always lose against dated ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Moment {
    Unset,
    At(NaiveDateTime),
}

impl Moment {
    /// Read the `timestamp` field of an item
    pub fn of(item: &FeedItem) -> FeedResult<Self> {
        match item.raw_timestamp() {
            None | Some(Value::Null) => Ok(Moment::Unset),
            Some(Value::String(s)) => parse_timestamp(Some(s.as_str())),
            Some(other) => Err(FeedError::MalformedTimestamp(other.to_string())),
        }
    }
}

/// Parse a `"YYYY-MM-DD HH:MM:SS"` string; `None` is the earliest moment.
///
/// Padding is rejected: stores order rows by the raw text, so a padded value
/// would sort apart from the moment it names.
pub fn parse_timestamp(raw: Option<&str>) -> FeedResult<Moment> {
    let Some(raw) = raw else {
        return Ok(Moment::Unset);
    };

    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map(Moment::At)
        .map_err(|_| FeedError::MalformedTimestamp(raw.to_string()))
}

/// Index of the latest moment. Equal moments resolve to the lowest index.
pub fn max_index(moments: &[Moment]) -> Option<usize> {
    let mut best: Option<(usize, &Moment)> = None;

    for (i, moment) in moments.iter().enumerate() {
        match best {
            Some((_, current)) if moment <= current => {}
            _ => best = Some((i, moment)),
        }
    }

    best.map(|(i, _)| i)
}
