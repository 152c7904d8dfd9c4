use super::{config, fetch_spinner, search, show, watched};
use crate::output::Output;
use color_eyre::Result;
use reelist_core::{watchlist, SearchSession, SearchState, Selection, WatchlistStore};
use reelist_models::{MovieDetail, WatchedMovie};
use reelist_sources::{MetadataSource, OmdbClient};
use std::io::BufRead;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

/// Interactive session. Every input line is an intent: free text re-drives
/// the search session (superseding an in-flight request), a number selects
/// a result (selecting the open one closes it), and the remaining commands
/// act on the open detail panel.
pub async fn run_browse(output: &Output) -> Result<()> {
    let setup = config::load_setup(output)?;
    let store = WatchlistStore::new(setup.paths.watchlist_file())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to open watch-list store: {}", e))?;
    let mut list = store.load();
    info!("browse session started with {} watched movies", list.len());

    let client = Arc::new(setup.client);
    let session = SearchSession::new(Arc::clone(&client), setup.config.search.min_query_len);
    let mut rx = session.subscribe();

    let mut selection = Selection::Idle;
    let mut detail: Option<MovieDetail> = None;

    // Blocking stdin reader feeding the select loop
    let (line_tx, mut line_rx) = mpsc::unbounded_channel::<String>();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    print_help(output);
    watched::print_watchlist(&list, output);

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = rx.borrow_and_update().clone();
                render_search(&state, output);
            }
            line = line_rx.recv() => {
                let Some(line) = line else { break };
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }

                match parse_intent(&line, &session.state()) {
                    Intent::Quit => break,
                    Intent::Help => print_help(output),
                    Intent::List => watched::print_watchlist(&list, output),
                    Intent::Close => {
                        selection = selection.close();
                        detail = None;
                        watched::print_watchlist(&list, output);
                    }
                    Intent::Select(imdb_id) => {
                        selection = selection.select(&imdb_id);
                        if selection == Selection::Idle {
                            // Toggled the open movie closed
                            detail = None;
                            watched::print_watchlist(&list, output);
                        } else {
                            match open_detail(&*client, &imdb_id, output).await {
                                Some(fetched) => {
                                    selection = selection.loaded(&imdb_id);
                                    show::print_detail(&fetched, watchlist::find(&list, &imdb_id), output);
                                    detail = Some(fetched);
                                }
                                None => {
                                    selection = selection.close();
                                    detail = None;
                                }
                            }
                        }
                    }
                    Intent::Rate(rating) => {
                        list = rate_open_movie(&list, detail.as_ref(), rating, &store, output)?;
                    }
                    Intent::Rewatch(comment) => {
                        list = rewatch_open_movie(&list, selection.selected_id(), &comment, &store, output)?;
                    }
                    Intent::Remove => {
                        if let Some(imdb_id) = selection.selected_id() {
                            let imdb_id = imdb_id.to_string();
                            list = watchlist::remove(list, &imdb_id);
                            store.save(&list)
                                .map_err(|e| color_eyre::eyre::eyre!("Failed to save watch-list: {}", e))?;
                            output.success(format!("Removed {}", imdb_id));
                            selection = selection.close();
                            detail = None;
                        } else {
                            output.warn("No movie open; select one first");
                        }
                    }
                    Intent::Query(query) => {
                        session.set_query(&query);
                    }
                }
            }
        }
    }

    info!("browse session ended");
    Ok(())
}

enum Intent {
    Query(String),
    Select(String),
    Rate(u8),
    Rewatch(String),
    Remove,
    Close,
    List,
    Help,
    Quit,
}

fn parse_intent(line: &str, state: &SearchState) -> Intent {
    match line {
        "q" | "quit" | "exit" => return Intent::Quit,
        "help" | "?" => return Intent::Help,
        "list" => return Intent::List,
        "close" => return Intent::Close,
        "rm" => return Intent::Remove,
        "rewatch" => return Intent::Rewatch(String::new()),
        _ => {}
    }

    if let Some(rest) = line.strip_prefix("rate ") {
        if let Ok(rating) = rest.trim().parse::<u8>() {
            return Intent::Rate(rating);
        }
    }
    if let Some(rest) = line.strip_prefix("rewatch ") {
        return Intent::Rewatch(rest.trim().to_string());
    }

    // A bare number picks a search result (1-based)
    if let Ok(index) = line.parse::<usize>() {
        if index >= 1 && index <= state.results.len() {
            return Intent::Select(state.results[index - 1].imdb_id.clone());
        }
    }

    Intent::Query(line.to_string())
}

fn render_search(state: &SearchState, output: &Output) {
    if state.loading {
        output.println(format!("Searching for {:?}...", state.query));
        return;
    }
    if let Some(error) = &state.error {
        output.error(error);
        return;
    }
    if state.query.is_empty() && state.results.is_empty() {
        return;
    }
    search::print_results(&state.query, &state.results, output);
    if !state.results.is_empty() {
        output.println("Type a result number to open it");
    }
}

async fn open_detail(client: &OmdbClient, imdb_id: &str, output: &Output) -> Option<MovieDetail> {
    let spinner = fetch_spinner(output, &format!("Fetching {}...", imdb_id));
    let detail = client.detail(imdb_id).await;
    spinner.finish_and_clear();

    match detail {
        Ok(detail) => Some(detail),
        Err(e) => {
            output.error(e.to_string());
            None
        }
    }
}

fn rate_open_movie(
    list: &[WatchedMovie],
    detail: Option<&MovieDetail>,
    rating: u8,
    store: &WatchlistStore,
    output: &Output,
) -> Result<Vec<WatchedMovie>> {
    let mut list = list.to_vec();

    let Some(detail) = detail else {
        output.warn("No movie open; select one first");
        return Ok(list);
    };
    if !(1..=10).contains(&rating) {
        output.warn("Rating must be between 1 and 10");
        return Ok(list);
    }
    if watchlist::contains(&list, &detail.imdb_id) {
        output.warn(format!("{} is already on your watch-list (use 'rewatch <comment>')", detail.title));
        return Ok(list);
    }

    let entry = watchlist::entry_from_detail(detail, rating);
    let title = entry.title.clone();
    list = watchlist::add(list, entry);
    store
        .save(&list)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save watch-list: {}", e))?;
    output.success(format!("Added {} (rated {}/10)", title, rating));
    Ok(list)
}

fn rewatch_open_movie(
    list: &[WatchedMovie],
    selected_id: Option<&str>,
    comment: &str,
    store: &WatchlistStore,
    output: &Output,
) -> Result<Vec<WatchedMovie>> {
    let mut list = list.to_vec();

    let Some(imdb_id) = selected_id else {
        output.warn("No movie open; select one first");
        return Ok(list);
    };
    if !watchlist::contains(&list, imdb_id) {
        output.warn("Rate the movie first to put it on your watch-list");
        return Ok(list);
    }
    if comment.is_empty() {
        output.warn("Usage: rewatch <your thoughts on this rewatch>");
        return Ok(list);
    }

    list = watchlist::rewatch(list, imdb_id, comment);
    store
        .save(&list)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save watch-list: {}", e))?;
    let count = watchlist::find(&list, imdb_id)
        .map(|m| m.rewatch_count)
        .unwrap_or_default();
    output.success(format!("Recorded rewatch #{}", count));
    Ok(list)
}

fn print_help(output: &Output) {
    output.println("🍿 reelist browse — type to search, then:");
    output.println("  <number>           open/close a search result");
    output.println("  rate <1-10>        rate the open movie and add it");
    output.println("  rewatch <comment>  record a rewatch of the open movie");
    output.println("  rm                 remove the open movie from the list");
    output.println("  close | list | help | quit");
}
