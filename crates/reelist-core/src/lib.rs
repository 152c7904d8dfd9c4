pub mod selection;
pub mod session;
pub mod store;
pub mod watchlist;

pub use selection::Selection;
pub use session::{SearchSession, SearchState};
pub use store::WatchlistStore;
