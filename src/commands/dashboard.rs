//! Dashboard command - interactive terminal charts.

use std::path::PathBuf;

use anyhow::Result;

use crate::config::resolve_data_path;
use crate::data::load_rentals;
use crate::visualization::run_dashboard;


/// Run the dashboard command.
pub fn run(data: Option<PathBuf>) -> Result<()> {
    let path = resolve_data_path(data)?;
    let rentals = load_rentals(&path)?;

    if rentals.is_empty() {
        println!("No rental records in {}.", path.display());
        return Ok(());
    }

    run_dashboard(rentals)
}
