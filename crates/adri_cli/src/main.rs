mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "adri")]
#[command(version, about = "Agent Data Readiness Index CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a dataset against a quality standard
    Assess {
        /// Path to the standard file (YAML or TOML)
        #[arg(short, long)]
        standard: String,

        /// Path to the data file (JSON array of records)
        #[arg(short, long)]
        data: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Write the JSON report to this file
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Check a standard definition without assessing data
    Check {
        /// Path to the standard file (YAML or TOML)
        standard: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Explain how each dimension was scored for a dataset
    Explain {
        /// Path to the standard file (YAML or TOML)
        #[arg(short, long)]
        standard: String,

        /// Path to the data file (JSON array of records)
        #[arg(short, long)]
        data: String,

        /// Only explain this dimension
        #[arg(long)]
        dimension: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    // Execute command
    match cli.command {
        Commands::Assess {
            standard,
            data,
            format,
            output,
        } => commands::assess::execute(&standard, &data, &format, output.as_deref()),

        Commands::Check { standard, format } => commands::check::execute(&standard, &format),

        Commands::Explain {
            standard,
            data,
            dimension,
        } => commands::explain::execute(&standard, &data, dimension.as_deref()),
    }
}
