// Pure transformations over the watch-list. The CLI owns the list value and
// feeds every transition back through the store.

use chrono::Utc;
use reelist_models::{MovieDetail, WatchedMovie, WatchlistSummary};
use tracing::warn;

/// Build a watch-list entry from a detail record plus the user's rating.
/// A detail record without a parseable runtime persists 0 minutes rather
/// than propagating a non-numeric value.
pub fn entry_from_detail(detail: &MovieDetail, user_rating: u8) -> WatchedMovie {
    if detail.runtime_minutes.is_none() {
        warn!("no runtime for {}, persisting 0 minutes", detail.imdb_id);
    }

    WatchedMovie {
        imdb_id: detail.imdb_id.clone(),
        title: detail.title.clone(),
        year: detail.year.clone(),
        poster_url: detail.poster_url.clone(),
        imdb_rating: detail.imdb_rating.unwrap_or(0.0),
        runtime_minutes: detail.runtime_minutes.unwrap_or(0),
        user_rating,
        rewatch_count: 0,
        rewatch_comments: Vec::new(),
        date_added: Utc::now(),
    }
}

/// Append a movie. The caller guarantees `movie.imdb_id` is not already
/// present; no dedup is enforced here.
pub fn add(mut list: Vec<WatchedMovie>, movie: WatchedMovie) -> Vec<WatchedMovie> {
    list.push(movie);
    list
}

/// Remove every entry with the matching id (at most one, given the
/// uniqueness invariant). Removing an absent id is a no-op.
pub fn remove(list: Vec<WatchedMovie>, imdb_id: &str) -> Vec<WatchedMovie> {
    list.into_iter().filter(|m| m.imdb_id != imdb_id).collect()
}

/// Record a repeat viewing: bump the matching entry's count and append the
/// comment, leaving every other entry untouched. No-op when no entry
/// matches.
pub fn rewatch(list: Vec<WatchedMovie>, imdb_id: &str, comment: &str) -> Vec<WatchedMovie> {
    list.into_iter()
        .map(|mut m| {
            if m.imdb_id == imdb_id {
                m.rewatch_count += 1;
                m.rewatch_comments.push(comment.to_string());
            }
            m
        })
        .collect()
}

pub fn find<'a>(list: &'a [WatchedMovie], imdb_id: &str) -> Option<&'a WatchedMovie> {
    list.iter().find(|m| m.imdb_id == imdb_id)
}

pub fn contains(list: &[WatchedMovie], imdb_id: &str) -> bool {
    find(list, imdb_id).is_some()
}

/// Display-ready aggregates. Every mean is 0 for the empty list; the n == 0
/// guard keeps NaN out of the summary.
pub fn summary(list: &[WatchedMovie]) -> WatchlistSummary {
    let count = list.len();
    if count == 0 {
        return WatchlistSummary {
            count: 0,
            avg_imdb_rating: 0.0,
            avg_user_rating: 0.0,
            avg_runtime_minutes: 0,
        };
    }

    let n = count as f64;
    let avg_imdb = list.iter().map(|m| m.imdb_rating as f64).sum::<f64>() / n;
    let avg_user = list.iter().map(|m| m.user_rating as f64).sum::<f64>() / n;
    let avg_runtime = list.iter().map(|m| m.runtime_minutes as f64).sum::<f64>() / n;

    WatchlistSummary {
        count,
        avg_imdb_rating: round2(avg_imdb),
        avg_user_rating: round2(avg_user),
        avg_runtime_minutes: avg_runtime.round() as u32,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_watched(imdb_id: &str, user_rating: u8) -> WatchedMovie {
        WatchedMovie {
            imdb_id: imdb_id.to_string(),
            title: format!("Movie {}", imdb_id),
            year: Some("2020".to_string()),
            poster_url: None,
            imdb_rating: 7.5,
            runtime_minutes: 120,
            user_rating,
            rewatch_count: 0,
            rewatch_comments: Vec::new(),
            date_added: Utc::now(),
        }
    }

    #[test]
    fn test_add_appends() {
        let list = add(Vec::new(), create_watched("tt1", 8));
        let list = add(list, create_watched("tt2", 6));
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].imdb_id, "tt1");
        assert_eq!(list[1].imdb_id, "tt2");
    }

    #[test]
    fn test_remove_is_idempotent() {
        let list = vec![create_watched("tt1", 8), create_watched("tt2", 6)];

        let list = remove(list, "tt1");
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].imdb_id, "tt2");

        // Second removal of the same id changes nothing
        let list = remove(list, "tt1");
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].imdb_id, "tt2");
    }

    #[test]
    fn test_rewatch_bumps_count_and_comment_together() {
        let list = vec![create_watched("tt1", 8), create_watched("tt2", 6)];

        let list = rewatch(list, "tt1", "great again");
        let entry = find(&list, "tt1").unwrap();
        assert_eq!(entry.rewatch_count, 1);
        assert_eq!(entry.rewatch_comments, vec!["great again"]);

        // Other entries untouched
        let other = find(&list, "tt2").unwrap();
        assert_eq!(other.rewatch_count, 0);
        assert!(other.rewatch_comments.is_empty());
    }

    #[test]
    fn test_rewatch_twice_keeps_submission_order() {
        let list = vec![create_watched("tt1", 8)];
        let list = rewatch(list, "tt1", "first");
        let list = rewatch(list, "tt1", "second");

        let entry = find(&list, "tt1").unwrap();
        assert_eq!(entry.rewatch_count, 2);
        assert_eq!(entry.rewatch_comments, vec!["first", "second"]);
        assert_eq!(entry.rewatch_count as usize, entry.rewatch_comments.len());
    }

    #[test]
    fn test_rewatch_unknown_id_is_noop() {
        let list = vec![create_watched("tt1", 8)];
        let list = rewatch(list, "tt9", "nope");
        let entry = find(&list, "tt1").unwrap();
        assert_eq!(entry.rewatch_count, 0);
        assert!(entry.rewatch_comments.is_empty());
    }

    #[test]
    fn test_summary_empty_list_is_all_zero() {
        let summary = summary(&[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.avg_imdb_rating, 0.0);
        assert_eq!(summary.avg_user_rating, 0.0);
        assert_eq!(summary.avg_runtime_minutes, 0);
    }

    #[test]
    fn test_summary_single_entry_equals_its_values() {
        let mut movie = create_watched("tt1", 8);
        movie.imdb_rating = 8.8;
        movie.runtime_minutes = 148;

        let s = summary(&[movie]);
        assert_eq!(s.count, 1);
        assert_eq!(s.avg_imdb_rating, 8.8);
        assert_eq!(s.avg_user_rating, 8.0);
        assert_eq!(s.avg_runtime_minutes, 148);
    }

    #[test]
    fn test_summary_rounds_for_display() {
        let mut a = create_watched("tt1", 7);
        a.imdb_rating = 7.0;
        a.runtime_minutes = 100;
        let mut b = create_watched("tt2", 8);
        b.imdb_rating = 8.5;
        b.runtime_minutes = 101;
        let mut c = create_watched("tt3", 9);
        c.imdb_rating = 8.5;
        c.runtime_minutes = 101;

        let s = summary(&[a, b, c]);
        assert_eq!(s.avg_imdb_rating, 8.0);
        assert_eq!(s.avg_user_rating, 8.0);
        // 302/3 = 100.67 rounds to nearest whole minute
        assert_eq!(s.avg_runtime_minutes, 101);
    }

    #[test]
    fn test_entry_from_detail_defaults_missing_runtime() {
        let detail = MovieDetail {
            imdb_id: "tt1".to_string(),
            title: "Movie".to_string(),
            year: Some("2020".to_string()),
            poster_url: None,
            runtime_minutes: None,
            imdb_rating: None,
            plot: None,
            released: None,
            actors: None,
            director: None,
            genre: None,
        };

        let entry = entry_from_detail(&detail, 7);
        assert_eq!(entry.runtime_minutes, 0);
        assert_eq!(entry.imdb_rating, 0.0);
        assert_eq!(entry.user_rating, 7);
        assert_eq!(entry.rewatch_count, 0);
        assert!(entry.rewatch_comments.is_empty());
    }
}
