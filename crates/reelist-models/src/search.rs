use serde::{Deserialize, Serialize};

/// One row of a search response. Ephemeral: re-fetched per query, never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub imdb_id: String,
    pub title: String,
    pub year: Option<String>,
    pub poster_url: Option<String>,
}
