//! `bento-import` CLI - parse profile exports and preview imports

mod cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bento_import::Config;

#[derive(Parser)]
#[command(name = "bento-import")]
#[command(about = "Import link-in-bio profile exports into a block grid")]
#[command(version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: ~/.config/bento-import/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an export file and print the normalized result as JSON
    Parse {
        /// Export file (.zip or .json)
        file: PathBuf,

        /// Declared MIME type (e.g. application/zip)
        #[arg(long)]
        mime: Option<String>,

        /// Reject files larger than this many bytes
        #[arg(long)]
        max_bytes: Option<u64>,

        /// Print compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Check that a JSON export has a recognizable shape
    Validate {
        /// JSON export file
        file: PathBuf,
    },

    /// Detect the platform and title of a URL
    Classify {
        /// URL to classify
        url: String,

        /// Section the URL appears in (e.g. "Social Media")
        #[arg(short, long, default_value = "")]
        section: String,
    },

    /// Show the blocks and profile update an import would write
    Plan {
        /// Export file (.zip or .json)
        file: PathBuf,

        /// Maximum block width/height in grid cells
        #[arg(long)]
        columns: Option<i64>,

        /// Declared MIME type (e.g. application/zip)
        #[arg(long)]
        mime: Option<String>,

        /// Print compact JSON
        #[arg(long)]
        compact: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging (stderr keeps stdout clean for JSON)
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Parse {
            file,
            mime,
            max_bytes,
            compact,
        } => {
            let mut options = config.import_options();
            options.mime = mime;
            if max_bytes.is_some() {
                options.max_file_bytes = max_bytes;
            }
            cmd::cmd_parse(&file, &options, config.pretty && !compact).await?;
        }
        Commands::Validate { file } => {
            cmd::cmd_validate(&file).await?;
        }
        Commands::Classify { url, section } => {
            cmd::cmd_classify(&url, &section);
        }
        Commands::Plan {
            file,
            columns,
            mime,
            compact,
        } => {
            let mut options = config.import_options();
            options.mime = mime;
            let columns = columns.unwrap_or(config.grid_columns);
            cmd::cmd_plan(&file, &options, columns, config.pretty && !compact).await?;
        }
    }

    Ok(())
}
