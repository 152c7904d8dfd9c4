use crate::error::SourceError;
use async_trait::async_trait;
use reelist_models::{MovieDetail, SearchResult};

/// Read-only remote movie metadata collaborator.
///
/// Two operations: free-text title search and per-title detail lookup.
/// Implementations must treat a well-formed "no match" response as
/// [`SourceError::NotFound`] rather than a transport failure.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    fn source_name(&self) -> &str;

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError>;

    async fn detail(&self, imdb_id: &str) -> Result<MovieDetail, SourceError>;
}
