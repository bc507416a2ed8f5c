use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "shoppies")]
#[command(about = "Search OMDb, nominate up to five movies and share your picks")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// OMDb endpoint
    #[arg(long, global = true)]
    pub api_endpoint: Option<String>,

    /// OMDb API key
    #[arg(long, env = "OMDB_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Directory holding the persisted nominations
    #[arg(long, global = true)]
    pub storage_path: Option<String>,

    /// Base URL used when generating share links
    #[arg(long, global = true)]
    pub share_base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Search movies by title
    Search {
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
    },
    /// Nominate a movie by its IMDb id
    Nominate { imdb_id: String },
    /// Remove a nominated movie
    Remove { imdb_id: String },
    /// Show the current nominations
    List,
    /// Print a share link for the current nominations
    Share,
    /// Load nominations from a share link, replacing the stored ones
    Open { link: String },
    /// Interactive mode
    Shell,
}
