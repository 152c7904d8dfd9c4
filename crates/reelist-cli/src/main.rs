use clap::{ArgAction, Parser, Subcommand};
use commands::{browse, config, search, show, watched};
use reelist_config::PathManager;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "reelist")]
#[command(about = "reelist - look up movies and keep a rated watch-list")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search movies by title
    #[command(long_about = "Search the movie database by free-text query. Queries shorter than the configured minimum (3 characters by default) issue no request.")]
    Search {
        /// Free-text title query
        query: String,
    },
    /// Show the detail panel for one movie
    #[command(long_about = "Fetch and display the full record for an IMDB id, including your rating and rewatch notes when the movie is on your watch-list.")]
    Show {
        /// IMDB id, e.g. tt1375666
        imdb_id: String,
    },
    /// Rate a movie and add it to your watch-list
    Add {
        /// IMDB id, e.g. tt1375666
        imdb_id: String,

        /// Your rating, 1-10 (prompts when not given)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
        rating: Option<u8>,
    },
    /// Remove a movie from your watch-list
    Remove {
        /// IMDB id to remove
        imdb_id: String,
    },
    /// Record a rewatch with a free-text note
    #[command(long_about = "Record a repeat viewing of a watch-listed movie. Bumps the rewatch counter and appends your comment; prompts for the comment when --comment is not given.")]
    Rewatch {
        /// IMDB id of a watch-listed movie
        imdb_id: String,

        /// Your thoughts on this rewatch
        #[arg(long)]
        comment: Option<String>,
    },
    /// Show your watch-list and its summary statistics
    List,
    /// Interactive search-and-track session
    #[command(long_about = "Start an interactive session: type to search (new input supersedes an in-flight search), pick results by number, rate, rewatch, and remove movies without leaving the prompt.")]
    Browse,
    /// Configure credentials and settings
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Set the OMDB API key
    #[command(long_about = "Store the OMDB API key in the credentials file. Prompts with masked input when --api-key is not given. Free keys at https://www.omdbapi.com/apikey.aspx")]
    Key {
        /// API key (if not provided, will prompt)
        #[arg(long)]
        api_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // The browse session logs to a file so log lines don't tear the prompt
    let log_file = matches!(cli.command, Commands::Browse)
        .then(|| PathManager::default().log_file());
    logging::init_logging(cli.verbose, cli.quiet, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Search { query } => search::run_search(query, &output).await,
        Commands::Show { imdb_id } => show::run_show(imdb_id, &output).await,
        Commands::Add { imdb_id, rating } => watched::run_add(imdb_id, rating, &output).await,
        Commands::Remove { imdb_id } => watched::run_remove(imdb_id, &output).await,
        Commands::Rewatch { imdb_id, comment } => {
            watched::run_rewatch(imdb_id, comment, &output).await
        }
        Commands::List => watched::run_list(&output).await,
        Commands::Browse => browse::run_browse(&output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &output).await
        }
    }
}
