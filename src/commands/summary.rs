//! Summary command - rental statistics as a text report or JSON.

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;

use crate::aggregation::{
    daily_totals, filter_range, range_totals, sorted_desc, totals_by_month, totals_by_season,
    totals_by_weekday, totals_by_year, GroupTotal, Measure,
};
use crate::config::resolve_data_path;
use crate::data::load_rentals;
use crate::models::RentalRecord;


/// Run the summary command.
///
/// The range defaults to the full dataset. A range that matches no records
/// still produces a report, just with zero totals and empty sections.
pub fn run(
    data: Option<PathBuf>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    let path = resolve_data_path(data)?;
    let rentals = load_rentals(&path)?;

    let (Some(min_date), Some(max_date)) = (rentals.min_date(), rentals.max_date()) else {
        println!("No rental records in {}.", path.display());
        return Ok(());
    };

    let start = start.unwrap_or(min_date);
    let end = end.unwrap_or(max_date);
    let records = filter_range(rentals.records(), start, end);

    if json {
        print_json(&records, start, end)
    } else {
        print_report(&records, start, end);
        Ok(())
    }
}


/// Print the full report as pretty JSON.
fn print_json(records: &[RentalRecord], start: NaiveDate, end: NaiveDate) -> Result<()> {
    let report = serde_json::json!({
        "range": { "start": start, "end": end },
        "totals": range_totals(records),
        "daily": daily_totals(records),
        "by_weekday": totals_by_weekday(records),
        "by_season": totals_by_season(records),
        "by_month": totals_by_month(records),
        "by_year": totals_by_year(records),
    });

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}


/// Print the report as formatted text sections.
fn print_report(records: &[RentalRecord], start: NaiveDate, end: NaiveDate) {
    let totals = range_totals(records);
    let days = daily_totals(records).len() as i64;

    // Header
    println!("\n{}", "=".repeat(60));
    println!("{:^60}", "Bike Rental Summary");
    println!("{}\n", "=".repeat(60));

    println!("RANGE");
    println!("{}", "-".repeat(40));
    println!("  From:                {:>15}", start.to_string());
    println!("  To:                  {:>15}", end.to_string());
    println!("  Days with Rentals:   {:>15}", format_number(days));

    println!("\nTOTALS");
    println!("{}", "-".repeat(40));
    println!("  Casual Renter:       {:>15}", format_number(totals.casual));
    println!("  Registered Renter:   {:>15}", format_number(totals.registered));
    println!("  Total Renter:        {:>15}", format_number(totals.total));

    // Averages
    println!("\nAVERAGES");
    println!("{}", "-".repeat(40));
    let avg_casual = if days > 0 { totals.casual / days } else { 0 };
    let avg_registered = if days > 0 { totals.registered / days } else { 0 };
    let avg_total = if days > 0 { totals.total / days } else { 0 };
    println!("  Casual per Day:      {:>15}", format_number(avg_casual));
    println!("  Registered per Day:  {:>15}", format_number(avg_registered));
    println!("  Total per Day:       {:>15}", format_number(avg_total));

    print_group_section("BY WEEKDAY", &totals_by_weekday(records), totals.total);
    print_group_section("BY SEASON", &totals_by_season(records), totals.total);
    print_group_section("BY MONTH", &totals_by_month(records), totals.total);
    print_group_section("BY YEAR", &totals_by_year(records), totals.total);
}


/// Print one grouping as a ranked table with share-of-total percentages.
fn print_group_section(heading: &str, rows: &[GroupTotal], overall_total: i64) {
    println!("\n{}", heading);
    println!("{}", "-".repeat(60));

    if rows.is_empty() {
        println!("  (no rentals in range)");
        return;
    }

    println!("  {:12} {:>12} {:>12} {:>12}", "", "Casual", "Registered", "Total");
    for row in sorted_desc(rows, Measure::Total) {
        let percentage = if overall_total > 0 {
            (row.total as f64 / overall_total as f64) * 100.0
        } else {
            0.0
        };
        println!(
            "  {:12} {:>12} {:>12} {:>12} ({:5.1}%)",
            row.label,
            format_number(row.casual),
            format_number(row.registered),
            format_number(row.total),
            percentage
        );
    }
}


/// Format a number with commas.
fn format_number(n: i64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}
