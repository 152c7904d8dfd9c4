use crate::error::SourceError;
use crate::omdb::api;
use crate::traits::MetadataSource;
use async_trait::async_trait;
use reelist_models::{MovieDetail, SearchResult};
use reqwest::Client;

/// OMDB metadata client. The API key is injected at construction; there is
/// no other authentication.
#[derive(Clone)]
pub struct OmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, api::DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a different endpoint (used by tests against a
    /// local stub server).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }
}

#[async_trait]
impl MetadataSource for OmdbClient {
    fn source_name(&self) -> &str {
        "omdb"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError> {
        api::search_titles(&self.client, &self.base_url, &self.api_key, query).await
    }

    async fn detail(&self, imdb_id: &str) -> Result<MovieDetail, SourceError> {
        api::fetch_detail(&self.client, &self.base_url, &self.api_key, imdb_id).await
    }
}
