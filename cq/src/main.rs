//! cq: Criteria Query - CLI for decoding and normalizing record criteria URLs.

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod commands;

/// Environment variable holding the log filter (e.g. `debug`, `criteria=trace`).
const LOG_VAR: &str = "CQ_LOG";

#[derive(Parser)]
#[command(name = "cq")]
#[command(about = "Criteria Query - decode and normalize record criteria URLs")]
#[command(version)]
struct Cli {
    /// Config directory (default: $CQ_CONFIG_DIR, then the platform config dir)
    #[arg(long = "config-dir", global = true)]
    config_dir: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Which criteria grammar to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    Metadata,
    Response,
    Suggestion,
    Sort,
    Page,
    Status,
    Search,
    Similarity,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode one criteria value and print it as JSON
    #[command(visible_alias = "d")]
    Decode {
        /// Criteria grammar
        #[arg(value_enum)]
        kind: Kind,

        /// Raw criteria (e.g. content_class.score.ge0.le0.24~relevant.value.values.Yes)
        raw: String,

        /// Page in bulk mode (page~many) instead of focus mode
        #[arg(short = 'b', long = "bulk")]
        bulk: bool,
    },

    /// Decode one criteria value and print its canonical encoding
    #[command(visible_alias = "n")]
    Normalize {
        /// Criteria grammar
        #[arg(value_enum)]
        kind: Kind,

        /// Raw criteria
        raw: String,

        /// Page in bulk mode (page~many) instead of focus mode
        #[arg(short = 'b', long = "bulk")]
        bulk: bool,
    },

    /// Decode a full query string into canonical params and a search request
    Url {
        /// Query string (e.g. "_page=2~20&_metadata=split.train")
        query: String,

        /// Page in bulk mode (page~many) instead of focus mode
        #[arg(short = 'b', long = "bulk")]
        bulk: bool,
    },

    /// Print the effective configuration
    Config,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = commands::load_config(cli.config_dir.as_deref()).and_then(|config| {
        match cli.command {
            Commands::Decode { kind, raw, bulk } => commands::decode(&config, kind, &raw, bulk),
            Commands::Normalize { kind, raw, bulk } => commands::normalize(&config, kind, &raw, bulk),
            Commands::Url { query, bulk } => commands::url(&config, &query, bulk),
            Commands::Config => commands::show_config(&config),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
