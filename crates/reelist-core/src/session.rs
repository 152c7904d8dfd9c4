use futures::future::{AbortHandle, Abortable, Aborted};
use reelist_models::SearchResult;
use reelist_sources::MetadataSource;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing::debug;

/// Observable state of the search session. Published through a watch
/// channel; the presentation layer subscribes and re-renders on change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub loading: bool,
    pub error: Option<String>,
}

struct Inner {
    generation: u64,
    current: Option<AbortHandle>,
}

/// Manages at most one in-flight search against the metadata source.
///
/// Setting a new query supersedes the previous request: its abort handle is
/// invalidated before the new request is issued, and a generation counter
/// guarantees that a completion from a superseded request can never
/// overwrite newer state, whatever the scheduling. Superseded results and
/// errors are discarded silently.
pub struct SearchSession<S> {
    source: Arc<S>,
    min_query_len: usize,
    tx: Arc<watch::Sender<SearchState>>,
    inner: Arc<Mutex<Inner>>,
}

impl<S> SearchSession<S>
where
    S: MetadataSource + 'static,
{
    pub fn new(source: Arc<S>, min_query_len: usize) -> Self {
        let (tx, _rx) = watch::channel(SearchState::default());
        Self {
            source,
            min_query_len,
            tx: Arc::new(tx),
            inner: Arc::new(Mutex::new(Inner {
                generation: 0,
                current: None,
            })),
        }
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.tx.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SearchState {
        self.tx.borrow().clone()
    }

    /// React to a query change. Queries shorter than the minimum clear the
    /// results and error and issue no request.
    pub fn set_query(&self, query: &str) {
        let query = query.to_string();
        let mut inner = self.inner.lock().unwrap();
        inner.generation += 1;
        if let Some(handle) = inner.current.take() {
            debug!("superseding in-flight search");
            handle.abort();
        }

        if query.chars().count() < self.min_query_len {
            self.tx.send_replace(SearchState {
                query,
                ..SearchState::default()
            });
            return;
        }

        let generation = inner.generation;
        let (handle, registration) = AbortHandle::new_pair();
        inner.current = Some(handle);
        drop(inner);

        self.tx.send_replace(SearchState {
            query: query.clone(),
            results: Vec::new(),
            loading: true,
            error: None,
        });

        let source = Arc::clone(&self.source);
        let tx = Arc::clone(&self.tx);
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let outcome = Abortable::new(source.search(&query), registration).await;

            // Publish under the lock so a stale completion can never win
            // against a newer query's state.
            let mut guard = inner.lock().unwrap();
            if guard.generation != generation {
                return;
            }
            guard.current = None;

            let state = match outcome {
                Err(Aborted) => return,
                Ok(Err(e)) if e.is_cancelled() => return,
                Ok(Ok(results)) => {
                    debug!("search {:?}: {} results", query, results.len());
                    SearchState {
                        query,
                        results,
                        loading: false,
                        error: None,
                    }
                }
                Ok(Err(e)) => {
                    debug!("search {:?} failed: {}", query, e);
                    SearchState {
                        query,
                        results: Vec::new(),
                        loading: false,
                        error: Some(e.to_string()),
                    }
                }
            };
            tx.send_replace(state);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reelist_models::MovieDetail;
    use reelist_sources::SourceError;
    use std::collections::HashMap;
    use std::time::Duration;

    #[derive(Clone)]
    enum Scripted {
        Hits(Vec<SearchResult>),
        NoMatch,
        Broken,
    }

    struct FakeSource {
        // query -> (delay in ms, response)
        scripts: HashMap<String, (u64, Scripted)>,
    }

    impl FakeSource {
        fn new() -> Self {
            Self {
                scripts: HashMap::new(),
            }
        }

        fn script(mut self, query: &str, delay_ms: u64, response: Scripted) -> Self {
            self.scripts.insert(query.to_string(), (delay_ms, response));
            self
        }
    }

    #[async_trait]
    impl MetadataSource for FakeSource {
        fn source_name(&self) -> &str {
            "fake"
        }

        async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError> {
            let (delay_ms, response) = self
                .scripts
                .get(query)
                .cloned()
                .unwrap_or((0, Scripted::NoMatch));
            if delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
            match response {
                Scripted::Hits(results) => Ok(results),
                Scripted::NoMatch => Err(SourceError::NotFound),
                Scripted::Broken => Err(SourceError::Decode {
                    source_name: "fake",
                    message: "connection reset".to_string(),
                }),
            }
        }

        async fn detail(&self, _imdb_id: &str) -> Result<MovieDetail, SourceError> {
            Err(SourceError::NotFound)
        }
    }

    fn create_result(imdb_id: &str, title: &str) -> SearchResult {
        SearchResult {
            imdb_id: imdb_id.to_string(),
            title: title.to_string(),
            year: Some("2005".to_string()),
            poster_url: None,
        }
    }

    fn bat_hits() -> Vec<SearchResult> {
        vec![
            create_result("tt0372784", "Batman Begins"),
            create_result("tt1877830", "The Batman"),
        ]
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_item_search_scenario() {
        let source = FakeSource::new().script("bat", 0, Scripted::Hits(bat_hits()));
        let session = SearchSession::new(Arc::new(source), 3);
        let mut rx = session.subscribe();

        session.set_query("bat");
        // loading is set synchronously, before the request resolves
        assert!(session.state().loading);

        let state = rx.wait_for(|s| !s.loading).await.unwrap().clone();
        assert_eq!(state.results.len(), 2);
        assert_eq!(state.results[0].imdb_id, "tt0372784");
        assert_eq!(state.error, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_query_clears_state_without_request() {
        let source = FakeSource::new().script("bat", 0, Scripted::Hits(bat_hits()));
        let session = SearchSession::new(Arc::new(source), 3);
        let mut rx = session.subscribe();

        session.set_query("bat");
        rx.wait_for(|s| !s.loading && !s.results.is_empty())
            .await
            .unwrap();

        session.set_query("ba");
        let state = session.state();
        assert_eq!(state.query, "ba");
        assert!(state.results.is_empty());
        assert_eq!(state.error, None);
        assert!(!state.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_match_sets_domain_error() {
        let source = FakeSource::new().script("zzznomatch", 0, Scripted::NoMatch);
        let session = SearchSession::new(Arc::new(source), 3);
        let mut rx = session.subscribe();

        session.set_query("zzznomatch");
        let state = rx.wait_for(|s| !s.loading).await.unwrap().clone();
        assert_eq!(state.error.as_deref(), Some("Movie not found"));
        assert!(state.results.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_failure_sets_descriptive_error() {
        let source = FakeSource::new().script("batman", 0, Scripted::Broken);
        let session = SearchSession::new(Arc::new(source), 3);
        let mut rx = session.subscribe();

        session.set_query("batman");
        let state = rx.wait_for(|s| !s.loading).await.unwrap().clone();
        let error = state.error.unwrap();
        assert!(error.contains("connection reset"), "got: {}", error);
        assert_ne!(error, "Movie not found");
        assert!(state.results.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_request_never_overwrites_newer_state() {
        let source = FakeSource::new()
            .script("batman", 5_000, Scripted::Hits(vec![create_result("tt0096895", "Batman")]))
            .script("inception", 0, Scripted::Hits(vec![create_result("tt1375666", "Inception")]));
        let session = SearchSession::new(Arc::new(source), 3);
        let mut rx = session.subscribe();

        session.set_query("batman");
        assert!(session.state().loading);
        session.set_query("inception");

        let state = rx.wait_for(|s| !s.loading).await.unwrap().clone();
        assert_eq!(state.query, "inception");
        assert_eq!(state.results[0].imdb_id, "tt1375666");

        // Even after the slow request's deadline has long passed, the state
        // still belongs to the last-submitted query.
        tokio::time::sleep(Duration::from_millis(10_000)).await;
        let state = session.state();
        assert_eq!(state.query, "inception");
        assert_eq!(state.results[0].imdb_id, "tt1375666");
        assert_eq!(state.error, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_supersede_with_error_result_is_silent() {
        // The superseded request would have failed; its error must never
        // surface in the newer query's state.
        let source = FakeSource::new()
            .script("badone", 5_000, Scripted::Broken)
            .script("inception", 0, Scripted::Hits(vec![create_result("tt1375666", "Inception")]));
        let session = SearchSession::new(Arc::new(source), 3);
        let mut rx = session.subscribe();

        session.set_query("badone");
        session.set_query("inception");

        let state = rx.wait_for(|s| !s.loading).await.unwrap().clone();
        assert_eq!(state.error, None);

        tokio::time::sleep(Duration::from_millis(10_000)).await;
        assert_eq!(session.state().error, None);
    }
}
