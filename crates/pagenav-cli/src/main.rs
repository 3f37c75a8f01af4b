mod commands;

#[cfg(feature = "watch")]
mod watch;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pagenav")]
#[command(version, about = "pagenav - folder-based navigation for Python UI apps", long_about = None)]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Where the page tree and settings come from
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Pages root directory (overrides routing.app_dir)
    #[arg(short, long, global = true)]
    app_dir: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, global = true, default_value = "pagenav.toml")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the discovered routes
    List,

    /// Write the navigation as JSON for the host framework
    Export {
        /// Pretty-print the JSON
        #[arg(short, long)]
        pretty: bool,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Rebuild and print the routes whenever pages change
    Watch,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            commands::list::execute(&cli.source)?;
        }
        Commands::Export { pretty, output } => {
            commands::export::execute(&cli.source, pretty, output.as_deref())?;
        }
        Commands::Watch => {
            commands::watch::execute(&cli.source)?;
        }
    }

    Ok(())
}
