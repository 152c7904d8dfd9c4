pub mod detail;
pub mod search;
pub mod summary;
pub mod watched;

pub use detail::MovieDetail;
pub use search::SearchResult;
pub use summary::WatchlistSummary;
pub use watched::WatchedMovie;
