use super::prompts;
use crate::output::Output;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use reelist_config::{Config, CredentialStore, PathManager};
use reelist_sources::OmdbClient;
use serde_json::json;

/// Everything a data command needs: parsed config, resolved paths, and a
/// ready metadata client (API key injected from the credential store).
pub struct Setup {
    pub config: Config,
    pub paths: PathManager,
    pub client: OmdbClient,
}

pub fn load_setup(output: &Output) -> Result<Setup> {
    let paths = PathManager::default();
    let config = Config::load_or_default(&paths.config_file())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config: {}", e))?;
    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid config: {}", e))?;

    let mut creds = CredentialStore::new(paths.credentials_file());
    creds
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials: {}", e))?;

    let api_key = match creds.get_omdb_api_key() {
        Some(key) if !key.is_empty() => key.clone(),
        _ => {
            output.error("No OMDB API key configured");
            output.info("Run 'reelist config key' to set one (free keys at https://www.omdbapi.com/apikey.aspx)");
            return Err(color_eyre::eyre::eyre!("missing OMDB API key"));
        }
    };

    let client = OmdbClient::with_base_url(api_key, config.omdb.base_url.clone());

    Ok(Setup {
        config,
        paths,
        client,
    })
}

pub async fn run_config(cmd: crate::ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show { full } => show_config(full, output),
        crate::ConfigCommands::Key { api_key } => set_key(api_key, output),
    }
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config = Config::load_or_default(&paths.config_file())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config: {}", e))?;

    let mut creds = CredentialStore::new(paths.credentials_file());
    creds.load().map_err(|e| color_eyre::eyre::eyre!(e))?;
    let key_display = match creds.get_omdb_api_key() {
        Some(key) if full => key.clone(),
        Some(_) => "********".to_string(),
        None => "(not set)".to_string(),
    };

    let payload = json!({
        "config_file": paths.config_file().display().to_string(),
        "watchlist_file": paths.watchlist_file().display().to_string(),
        "omdb_base_url": config.omdb.base_url,
        "min_query_len": config.search.min_query_len,
        "api_key": key_display,
    });

    output.data(&payload, || {
        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
        table.add_row(vec![Cell::new("Config file"), Cell::new(paths.config_file().display())]);
        table.add_row(vec![
            Cell::new("Watch-list file"),
            Cell::new(paths.watchlist_file().display()),
        ]);
        table.add_row(vec![Cell::new("OMDB base URL"), Cell::new(&config.omdb.base_url)]);
        table.add_row(vec![
            Cell::new("Min query length"),
            Cell::new(config.search.min_query_len),
        ]);
        table.add_row(vec![Cell::new("API key"), Cell::new(&key_display)]);
        println!("{}", table);
    });

    Ok(())
}

fn set_key(api_key: Option<String>, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    paths
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!(e))?;

    let api_key = match api_key {
        Some(key) => key,
        None => prompts::prompt_secret("OMDB API key")?,
    };
    if api_key.trim().is_empty() {
        return Err(color_eyre::eyre::eyre!("API key cannot be empty"));
    }

    let mut creds = CredentialStore::new(paths.credentials_file());
    creds.load().map_err(|e| color_eyre::eyre::eyre!(e))?;
    creds.set_omdb_api_key(api_key.trim().to_string());
    creds
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials: {}", e))?;

    // Write the config file too so defaults become visible and editable
    let config = Config::load_or_default(&paths.config_file())
        .map_err(|e| color_eyre::eyre::eyre!(e))?;
    config
        .save_to_file(&paths.config_file())
        .map_err(|e| color_eyre::eyre::eyre!(e))?;

    output.success("OMDB API key saved");
    Ok(())
}
