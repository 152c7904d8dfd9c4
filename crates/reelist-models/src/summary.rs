use serde::{Deserialize, Serialize};

/// Display-ready aggregate over a watch-list: ratings rounded to two
/// decimals, runtime to the nearest whole minute. All means are 0 for an
/// empty list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WatchlistSummary {
    pub count: usize,
    pub avg_imdb_rating: f64,
    pub avg_user_rating: f64,
    pub avg_runtime_minutes: u32,
}
