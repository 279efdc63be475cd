//! CLI definitions using clap.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::commands;
use crate::config::DATA_PATH_ENV;


/// Cycledash - CLI for bike-share rental analytics and dashboards
#[derive(Parser)]
#[command(name = "cyd")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}


#[derive(Subcommand)]
enum Commands {
    /// Show interactive dashboard with rental charts
    Dashboard {
        /// Path to the rentals CSV file
        #[arg(long, env = DATA_PATH_ENV)]
        data: Option<PathBuf>,
    },

    /// Show rental totals and breakdowns as a report
    Summary {
        /// Path to the rentals CSV file
        #[arg(long, env = DATA_PATH_ENV)]
        data: Option<PathBuf>,

        /// Range start, inclusive (YYYY-MM-DD, default: first record)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Range end, inclusive (YYYY-MM-DD, default: last record)
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export a rental chart as PNG or SVG
    Export {
        /// Path to the rentals CSV file
        #[arg(long, env = DATA_PATH_ENV)]
        data: Option<PathBuf>,

        /// Chart to export: daily, weekday, season, month, year
        #[arg(long, default_value = "daily")]
        by: String,

        /// Export as SVG instead of PNG
        #[arg(long)]
        svg: bool,

        /// Open file after export
        #[arg(long)]
        open: bool,

        /// Range start, inclusive (YYYY-MM-DD, default: first record)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Range end, inclusive (YYYY-MM-DD, default: last record)
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Output file path
        #[arg(short, long)]
        output: Option<String>,
    },
}


/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Dashboard { data }) => {
            commands::dashboard::run(data)?;
        }
        Some(Commands::Summary { data, start, end, json }) => {
            commands::summary::run(data, start, end, json)?;
        }
        Some(Commands::Export { data, by, svg, open, start, end, output }) => {
            commands::export::run(data, by, svg, open, start, end, output)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
        }
    }

    Ok(())
}
