//! CSV loader for the daily bike-share dataset.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::{Month, RentalData, RentalRecord, Season, Weekday, YearCode};


/// Row shape of the source CSV. Columns not listed here are ignored.
#[derive(Debug, Deserialize)]
struct RawRow {
    dteday: String,
    season: u8,
    yr: u8,
    mnth: u8,
    weekday: u8,
    casual: i64,
    registered: i64,
    cnt: i64,
}


/// Load rental records from a daily-totals CSV file.
///
/// Every row must parse. A malformed row aborts the load with the file path
/// and line number in the error chain, so a corrupt dataset never produces
/// partial results.
pub fn load_rentals(path: &Path) -> Result<RentalData> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open dataset: {}", path.display()))?;

    let mut records = Vec::new();

    for (idx, row) in reader.deserialize::<RawRow>().enumerate() {
        // The header occupies line 1.
        let line = idx + 2;

        let raw: RawRow = row
            .with_context(|| format!("{}:{}: malformed rental row", path.display(), line))?;

        let record = convert_row(&raw)
            .with_context(|| format!("{}:{}: invalid rental row", path.display(), line))?;

        records.push(record);
    }

    Ok(RentalData::new(records))
}


/// Convert one raw CSV row into a typed record.
fn convert_row(raw: &RawRow) -> Result<RentalRecord> {
    let date = NaiveDate::parse_from_str(&raw.dteday, "%Y-%m-%d")
        .with_context(|| format!("bad date: {}", raw.dteday))?;

    Ok(RentalRecord {
        date,
        weekday: Weekday::from_code(raw.weekday)?,
        season: Season::from_code(raw.season)?,
        month: Month::from_code(raw.mnth)?,
        year: YearCode::from_code(raw.yr)?,
        casual: raw.casual,
        registered: raw.registered,
        total: raw.cnt,
    })
}
