use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A movie the user has rated and added to the persisted watch-list.
///
/// Uniqueness: no two entries in a list share an `imdb_id`. Every rewatch
/// bumps `rewatch_count` and appends exactly one entry to
/// `rewatch_comments`, so `rewatch_count == rewatch_comments.len()` holds
/// after every mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedMovie {
    pub imdb_id: String,
    pub title: String,
    pub year: Option<String>,
    pub poster_url: Option<String>,
    pub imdb_rating: f32,
    pub runtime_minutes: u32,
    pub user_rating: u8,
    #[serde(default)]
    pub rewatch_count: u32,
    #[serde(default)]
    pub rewatch_comments: Vec<String>,
    pub date_added: DateTime<Utc>,
}
