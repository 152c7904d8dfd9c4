use super::{config, fetch_spinner, prompts};
use crate::output::Output;
use color_eyre::Result;
use comfy_table::Table;
use reelist_core::{watchlist, WatchlistStore};
use reelist_models::WatchedMovie;
use reelist_sources::MetadataSource;
use serde_json::json;

fn open_store() -> Result<(WatchlistStore, Vec<WatchedMovie>)> {
    let paths = reelist_config::PathManager::default();
    let store = WatchlistStore::new(paths.watchlist_file())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to open watch-list store: {}", e))?;
    let list = store.load();
    Ok((store, list))
}

pub async fn run_add(imdb_id: String, rating: Option<u8>, output: &Output) -> Result<()> {
    let setup = config::load_setup(output)?;
    let store = WatchlistStore::new(setup.paths.watchlist_file())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to open watch-list store: {}", e))?;
    let list = store.load();

    if watchlist::contains(&list, &imdb_id) {
        output.warn(format!("{} is already on your watch-list", imdb_id));
        return Ok(());
    }

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

    let rating = match rating {
        Some(rating) => rating,
        None => prompts::prompt_rating(&format!("Rate {}", detail.title))?,
    };

    let entry = watchlist::entry_from_detail(&detail, rating);
    let title = entry.title.clone();
    let list = watchlist::add(list, entry);
    store
        .save(&list)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save watch-list: {}", e))?;

    output.success(format!("Added {} (rated {}/10)", title, rating));
    Ok(())
}

pub async fn run_remove(imdb_id: String, output: &Output) -> Result<()> {
    let (store, list) = open_store()?;

    if !watchlist::contains(&list, &imdb_id) {
        output.warn(format!("{} is not on your watch-list", imdb_id));
        return Ok(());
    }

    let list = watchlist::remove(list, &imdb_id);
    store
        .save(&list)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save watch-list: {}", e))?;

    output.success(format!("Removed {}", imdb_id));
    Ok(())
}

pub async fn run_rewatch(imdb_id: String, comment: Option<String>, output: &Output) -> Result<()> {
    let (store, list) = open_store()?;

    let Some(entry) = watchlist::find(&list, &imdb_id) else {
        output.warn(format!("{} is not on your watch-list", imdb_id));
        return Ok(());
    };
    let title = entry.title.clone();

    let comment = match comment {
        Some(comment) => comment,
        None => prompts::prompt_string("What are your thoughts about the movie on this rewatch?")?,
    };

    let list = watchlist::rewatch(list, &imdb_id, &comment);
    store
        .save(&list)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save watch-list: {}", e))?;

    let count = watchlist::find(&list, &imdb_id)
        .map(|m| m.rewatch_count)
        .unwrap_or_default();
    output.success(format!("Recorded rewatch #{} of {}", count, title));
    Ok(())
}

pub async fn run_list(output: &Output) -> Result<()> {
    let (_store, list) = open_store()?;
    print_watchlist(&list, output);
    Ok(())
}

pub fn print_watchlist(list: &[WatchedMovie], output: &Output) {
    let summary = watchlist::summary(list);

    let payload = json!({
        "summary": summary,
        "watched": list,
    });

    output.data(&payload, || {
        println!("Movies you watched");
        println!(
            "  #️⃣ {} movies   ⭐ {}   🌟 {}   ⏳ {} min",
            summary.count, summary.avg_imdb_rating, summary.avg_user_rating, summary.avg_runtime_minutes
        );

        if list.is_empty() {
            return;
        }

        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
        table.set_header(vec!["Title", "Year", "⭐ IMDB", "🌟 Yours", "⏳ Runtime", "🔂 Rewatches", "IMDB ID"]);
        for movie in list {
            table.add_row(vec![
                movie.title.clone(),
                movie.year.clone().unwrap_or_default(),
                format!("{}", movie.imdb_rating),
                format!("{}", movie.user_rating),
                format!("{} min", movie.runtime_minutes),
                format!("{}", movie.rewatch_count),
                movie.imdb_id.clone(),
            ]);
        }
        println!("{}", table);
    });
}
