use super::{config, fetch_spinner};
use crate::output::Output;
use color_eyre::Result;
use owo_colors::OwoColorize;
use reelist_core::{watchlist, WatchlistStore};
use reelist_models::{MovieDetail, WatchedMovie};
use reelist_sources::MetadataSource;
use serde_json::json;

pub async fn run_show(imdb_id: String, output: &Output) -> Result<()> {
    let setup = config::load_setup(output)?;
    let store = WatchlistStore::new(setup.paths.watchlist_file())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to open watch-list store: {}", e))?;
    let list = store.load();

    let spinner = fetch_spinner(output, &format!("Fetching {}...", imdb_id));
    let detail = setup.client.detail(&imdb_id).await;
    spinner.finish_and_clear();

    let detail = match detail {
        Ok(detail) => detail,
        Err(e) => {
            output.error(e.to_string());
            return Ok(());
        }
    };

    let watched = watchlist::find(&list, &imdb_id);
    print_detail(&detail, watched, output);
    Ok(())
}

pub fn print_detail(detail: &MovieDetail, watched: Option<&WatchedMovie>, output: &Output) {
    let payload = json!({
        "detail": detail,
        "watched": watched,
    });

    output.data(&payload, || {
        println!();
        println!("{}", detail.title.bold());
        let mut line = Vec::new();
        if let Some(released) = &detail.released {
            line.push(released.clone());
        }
        if let Some(runtime) = detail.runtime_minutes {
            line.push(format!("{} min", runtime));
        }
        if !line.is_empty() {
            println!("{}", line.join(" • "));
        }
        if let Some(genre) = &detail.genre {
            println!("{}", genre);
        }
        if let Some(rating) = detail.imdb_rating {
            println!("⭐ {} IMDB rating", rating);
        }
        if let Some(plot) = &detail.plot {
            println!("\n{}", plot.italic());
        }
        if let Some(actors) = &detail.actors {
            println!("Starring {}", actors);
        }
        if let Some(director) = &detail.director {
            println!("Directed by {}", director);
        }

        match watched {
            Some(entry) => {
                println!();
                println!("You rated this movie {} 🌟", entry.user_rating);
                println!("Rewatched {} time(s)", entry.rewatch_count);
                for (i, comment) in entry.rewatch_comments.iter().enumerate() {
                    println!("  Rewatch {}: {}", i + 1, comment);
                }
            }
            None => {
                println!();
                println!("Not on your watch-list (add with 'reelist add {} --rating N')", detail.imdb_id);
            }
        }
        println!();
    });
}
