//! Export command for rental chart generation.

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;

use crate::aggregation::{
    daily_totals, filter_range, totals_by_month, totals_by_season, totals_by_weekday,
    totals_by_year,
};
use crate::config::resolve_data_path;
use crate::data::load_rentals;
use crate::visualization::{
    export_daily_png, export_daily_svg, export_groups_png, export_groups_svg, open_file,
};


/// Chart kinds available.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ChartKind {
    Daily,
    Weekday,
    Season,
    Month,
    Year,
}

impl ChartKind {
    fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "daily" => Some(Self::Daily),
            "weekday" => Some(Self::Weekday),
            "season" => Some(Self::Season),
            "month" => Some(Self::Month),
            "year" => Some(Self::Year),
            _ => None,
        }
    }

    fn slug(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekday => "weekday",
            Self::Season => "season",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Daily => "Daily Total Renter",
            Self::Weekday => "Rentals by Weekday",
            Self::Season => "Rentals by Season",
            Self::Month => "Rentals by Month",
            Self::Year => "Rentals by Year",
        }
    }
}


/// Run the export command.
pub fn run(
    data: Option<PathBuf>,
    by: String,
    svg: bool,
    should_open: bool,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    output: Option<String>,
) -> Result<()> {
    let Some(kind) = ChartKind::from_str(&by) else {
        anyhow::bail!(
            "Unknown chart '{}'. Expected daily, weekday, season, month or year.",
            by
        );
    };

    let path = resolve_data_path(data)?;
    let rentals = load_rentals(&path)?;

    let (Some(min_date), Some(max_date)) = (rentals.min_date(), rentals.max_date()) else {
        println!("No rental records in {}.", path.display());
        return Ok(());
    };

    let start = start.unwrap_or(min_date);
    let end = end.unwrap_or(max_date);
    let records = filter_range(rentals.records(), start, end);

    if records.is_empty() {
        println!("No rentals between {} and {}; nothing to export.", start, end);
        return Ok(());
    }

    // Determine format and output path
    let format_type = if svg { "svg" } else { "png" };
    let output_path = match output {
        Some(path) => PathBuf::from(path),
        None => PathBuf::from(format!("rentals-{}.{}", kind.slug(), format_type)),
    };

    // Export
    println!("Exporting to {}...", format_type.to_uppercase());

    match kind {
        ChartKind::Daily => {
            let rows = daily_totals(&records);
            if svg {
                export_daily_svg(&rows, &output_path, kind.title())?;
            } else {
                export_daily_png(&rows, &output_path, kind.title())?;
            }
        }
        ChartKind::Weekday | ChartKind::Season | ChartKind::Month | ChartKind::Year => {
            let rows = match kind {
                ChartKind::Weekday => totals_by_weekday(&records),
                ChartKind::Season => totals_by_season(&records),
                ChartKind::Month => totals_by_month(&records),
                _ => totals_by_year(&records),
            };
            if svg {
                export_groups_svg(&rows, &output_path, kind.title())?;
            } else {
                export_groups_png(&rows, &output_path, kind.title())?;
            }
        }
    }

    println!("\x1b[32m+ Exported to: {}\x1b[0m", output_path.display());

    // Open if requested
    if should_open {
        println!("Opening {}...", format_type.to_uppercase());
        open_file(&output_path)?;
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_kind_from_str() {
        assert_eq!(ChartKind::from_str("daily"), Some(ChartKind::Daily));
        assert_eq!(ChartKind::from_str("SEASON"), Some(ChartKind::Season));
        assert_eq!(ChartKind::from_str("hourly"), None);
    }

    #[test]
    fn test_chart_kind_slug_round_trip() {
        for kind in [
            ChartKind::Daily,
            ChartKind::Weekday,
            ChartKind::Season,
            ChartKind::Month,
            ChartKind::Year,
        ] {
            assert_eq!(ChartKind::from_str(kind.slug()), Some(kind));
        }
    }
}
