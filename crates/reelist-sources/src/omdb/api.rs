use crate::error::SourceError;
use reelist_models::{MovieDetail, SearchResult};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Search")]
    search: Option<Vec<OmdbSearchItem>>,
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbDetailResponse {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Runtime")]
    runtime: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "Plot")]
    plot: Option<String>,
    #[serde(rename = "Released")]
    released: Option<String>,
    #[serde(rename = "Actors")]
    actors: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
}

/// OMDB uses the literal string "N/A" for absent fields.
fn non_na(value: Option<String>) -> Option<String> {
    value.filter(|v| v != "N/A" && !v.is_empty())
}

/// Parse OMDB's `Runtime` field ("148 min") into whole minutes. Returns
/// `None` for "N/A" or anything that does not lead with an integer.
pub fn parse_runtime_minutes(runtime: &str) -> Option<u32> {
    runtime.split_whitespace().next()?.parse().ok()
}

fn parse_imdb_rating(rating: Option<String>) -> Option<f32> {
    non_na(rating)?.parse().ok()
}

/// Search titles by free-text query.
pub async fn search_titles(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
) -> Result<Vec<SearchResult>, SourceError> {
    debug!("OMDB search: {:?}", query);

    let response = client
        .get(base_url)
        .query(&[("apikey", api_key), ("s", query)])
        .send()
        .await?
        .error_for_status()?;

    let body: OmdbSearchResponse = response.json().await?;

    // Response: "False" is the collaborator's well-formed "no match" shape
    // (it also covers "Too many results." and bad-key responses).
    if body.response != "True" {
        debug!("OMDB search miss: {:?}", body.error);
        return Err(SourceError::NotFound);
    }

    let items = body.search.unwrap_or_default();
    debug!("OMDB search hit: {} results", items.len());

    Ok(items
        .into_iter()
        .map(|item| SearchResult {
            imdb_id: item.imdb_id,
            title: item.title,
            year: non_na(item.year),
            poster_url: non_na(item.poster),
        })
        .collect())
}

/// Fetch the full detail record for one IMDB id.
pub async fn fetch_detail(
    client: &Client,
    base_url: &str,
    api_key: &str,
    imdb_id: &str,
) -> Result<MovieDetail, SourceError> {
    debug!("OMDB detail: {}", imdb_id);

    let response = client
        .get(base_url)
        .query(&[("apikey", api_key), ("i", imdb_id)])
        .send()
        .await?
        .error_for_status()?;

    let body: OmdbDetailResponse = response.json().await?;

    if body.response != "True" {
        debug!("OMDB detail miss for {}: {:?}", imdb_id, body.error);
        return Err(SourceError::NotFound);
    }

    let runtime_minutes = match non_na(body.runtime) {
        Some(raw) => {
            let parsed = parse_runtime_minutes(&raw);
            if parsed.is_none() {
                warn!("OMDB returned unparseable runtime {:?} for {}", raw, imdb_id);
            }
            parsed
        }
        None => None,
    };

    let title = body.title.ok_or_else(|| SourceError::Decode {
        source_name: "omdb",
        message: format!("detail record for {} has no title", imdb_id),
    })?;

    Ok(MovieDetail {
        imdb_id: body.imdb_id.unwrap_or_else(|| imdb_id.to_string()),
        title,
        year: non_na(body.year),
        poster_url: non_na(body.poster),
        runtime_minutes,
        imdb_rating: parse_imdb_rating(body.imdb_rating),
        plot: non_na(body.plot),
        released: non_na(body.released),
        actors: non_na(body.actors),
        director: non_na(body.director),
        genre: non_na(body.genre),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_runtime_minutes() {
        assert_eq!(parse_runtime_minutes("148 min"), Some(148));
        assert_eq!(parse_runtime_minutes("90 min"), Some(90));
        assert_eq!(parse_runtime_minutes("N/A"), None);
        assert_eq!(parse_runtime_minutes(""), None);
        assert_eq!(parse_runtime_minutes("min 90"), None);
    }

    #[test]
    fn test_non_na_filters_placeholder() {
        assert_eq!(non_na(Some("N/A".to_string())), None);
        assert_eq!(non_na(Some("".to_string())), None);
        assert_eq!(non_na(Some("2010".to_string())), Some("2010".to_string()));
        assert_eq!(non_na(None), None);
    }

    #[test]
    fn test_search_response_decodes_wire_names() {
        let raw = r#"{
            "Search": [
                {"Title": "Batman Begins", "Year": "2005", "imdbID": "tt0372784", "Poster": "https://img/bb.jpg"},
                {"Title": "The Batman", "Year": "2022", "imdbID": "tt1877830", "Poster": "N/A"}
            ],
            "totalResults": "2",
            "Response": "True"
        }"#;

        let body: OmdbSearchResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(body.response, "True");
        let items = body.search.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].imdb_id, "tt0372784");
        assert_eq!(items[1].title, "The Batman");
    }

    #[test]
    fn test_not_found_response_decodes() {
        let raw = r#"{"Response": "False", "Error": "Movie not found!"}"#;
        let body: OmdbSearchResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(body.response, "False");
        assert_eq!(body.error.as_deref(), Some("Movie not found!"));
        assert!(body.search.is_none());
    }

    #[test]
    fn test_detail_response_decodes_wire_names() {
        let raw = r#"{
            "Title": "Inception",
            "Year": "2010",
            "Released": "16 Jul 2010",
            "Runtime": "148 min",
            "Genre": "Action, Adventure, Sci-Fi",
            "Director": "Christopher Nolan",
            "Actors": "Leonardo DiCaprio, Joseph Gordon-Levitt",
            "Plot": "A thief who steals corporate secrets.",
            "Poster": "https://img/inception.jpg",
            "imdbRating": "8.8",
            "imdbID": "tt1375666",
            "Response": "True"
        }"#;

        let body: OmdbDetailResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(body.response, "True");
        assert_eq!(body.imdb_id.as_deref(), Some("tt1375666"));
        assert_eq!(parse_runtime_minutes(body.runtime.as_deref().unwrap()), Some(148));
        assert_eq!(parse_imdb_rating(body.imdb_rating), Some(8.8));
    }
}
