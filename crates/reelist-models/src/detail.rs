use serde::{Deserialize, Serialize};

/// Full per-title record fetched when the user selects a search result.
/// Ephemeral, like [`crate::SearchResult`].
///
/// `runtime_minutes` and `imdb_rating` are `None` when the collaborator
/// returned "N/A" or an unparseable value for them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    pub imdb_id: String,
    pub title: String,
    pub year: Option<String>,
    pub poster_url: Option<String>,
    pub runtime_minutes: Option<u32>,
    pub imdb_rating: Option<f32>,
    pub plot: Option<String>,
    pub released: Option<String>,
    pub actors: Option<String>,
    pub director: Option<String>,
    pub genre: Option<String>,
}
