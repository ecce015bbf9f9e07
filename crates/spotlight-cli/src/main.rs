//! spotlight CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod console;
mod theme;

#[derive(Parser)]
#[command(
    name = "spotlight",
    version,
    about = "Classroom presentation randomizer and attendance logger"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive draw/review session
    Session {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Export the attendance log as a dated report
    Export {
        /// Output directory (defaults to export_dir from the config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: csv, json
        #[arg(long, default_value = "csv")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show present/absent counts and progress through the roster
    Summary {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List saved attendance records
    Log {
        /// Show only the most recent N records
        #[arg(long)]
        limit: Option<usize>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter spotlight.toml
    Init,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // The interactive console shares the terminal with stderr.
    let default_directive = match cli.command {
        Commands::Session { .. } => "spotlight=warn",
        _ => "spotlight=info",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive)),
        )
        .init();

    let result = match cli.command {
        Commands::Session { config } => commands::session::execute(config).await,
        Commands::Export {
            output,
            format,
            config,
        } => commands::export::execute(output, format, config).await,
        Commands::Summary { json, config } => commands::summary::execute(json, config).await,
        Commands::Log { limit, config } => commands::log::execute(limit, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
