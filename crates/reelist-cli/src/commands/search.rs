use super::{config, fetch_spinner};
use crate::output::Output;
use color_eyre::Result;
use comfy_table::Table;
use reelist_core::SearchSession;
use reelist_models::SearchResult;
use serde_json::json;
use std::sync::Arc;

pub async fn run_search(query: String, output: &Output) -> Result<()> {
    let setup = config::load_setup(output)?;
    let min_len = setup.config.search.min_query_len;

    if query.chars().count() < min_len {
        output.warn(format!("Query must be at least {} characters", min_len));
        return Ok(());
    }

    let session = SearchSession::new(Arc::new(setup.client), min_len);
    let mut rx = session.subscribe();

    let spinner = fetch_spinner(output, &format!("Searching for {:?}...", query));
    session.set_query(&query);
    let state = rx.wait_for(|s| !s.loading).await?.clone();
    spinner.finish_and_clear();

    if let Some(error) = state.error {
        // Shown inline; re-run with a different query to retry
        output.error(error);
        return Ok(());
    }

    print_results(&query, &state.results, output);
    Ok(())
}

pub fn print_results(query: &str, results: &[SearchResult], output: &Output) {
    let payload = json!({
        "query": query,
        "count": results.len(),
        "results": results,
    });

    output.data(&payload, || {
        println!("Found {} results", results.len());
        if results.is_empty() {
            return;
        }

        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
        table.set_header(vec!["#", "Title", "Year", "IMDB ID"]);
        for (i, movie) in results.iter().enumerate() {
            table.add_row(vec![
                (i + 1).to_string(),
                movie.title.clone(),
                movie.year.clone().unwrap_or_default(),
                movie.imdb_id.clone(),
            ]);
        }
        println!("{}", table);
    });
}
