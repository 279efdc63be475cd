//! Cycledash CLI - bike-share rental analytics.
//!
//! Terminal dashboards, summaries and chart exports for the daily
//! rentals dataset.

mod aggregation;
mod cli;
mod commands;
mod config;
mod data;
mod models;
mod visualization;


fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
