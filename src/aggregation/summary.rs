//! Aggregation of rental records into daily and categorical totals.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::RentalRecord;


/// Rental counts for a single calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub casual: i64,
    pub registered: i64,
    pub total: i64,
}


/// Rental counts summed over one category value (a weekday, season, month
/// or year), carrying its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupTotal {
    pub label: &'static str,
    pub casual: i64,
    pub registered: i64,
    pub total: i64,
}


/// Rental counts summed across an entire date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RangeTotals {
    pub casual: i64,
    pub registered: i64,
    pub total: i64,
}


/// Which of the three rider counts a chart or table is ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Casual,
    Registered,
    Total,
}


impl Measure {
    pub const ALL: [Measure; 3] = [Measure::Casual, Measure::Registered, Measure::Total];

    /// Column heading used on cards and chart panels.
    pub fn title(self) -> &'static str {
        match self {
            Measure::Casual => "Casual Renter",
            Measure::Registered => "Registered Renter",
            Measure::Total => "Total Renter",
        }
    }
}


impl GroupTotal {
    pub fn value(&self, measure: Measure) -> i64 {
        match measure {
            Measure::Casual => self.casual,
            Measure::Registered => self.registered,
            Measure::Total => self.total,
        }
    }
}


/// Keep only records dated within `[start, end]`, both ends inclusive.
///
/// An inverted range (start after end) matches nothing. Filtering happens
/// before any aggregation so every view reports the same window.
pub fn filter_range(records: &[RentalRecord], start: NaiveDate, end: NaiveDate) -> Vec<RentalRecord> {
    records
        .iter()
        .filter(|r| r.date >= start && r.date <= end)
        .copied()
        .collect()
}


/// Sum rentals per calendar date, ordered by date ascending.
///
/// The source file normally holds one row per day, but duplicate dates are
/// folded together rather than rejected.
pub fn daily_totals(records: &[RentalRecord]) -> Vec<DailyTotal> {
    let mut by_date: BTreeMap<NaiveDate, (i64, i64, i64)> = BTreeMap::new();

    for record in records {
        let entry = by_date.entry(record.date).or_default();
        entry.0 += record.casual;
        entry.1 += record.registered;
        entry.2 += record.total;
    }

    by_date
        .into_iter()
        .map(|(date, (casual, registered, total))| DailyTotal {
            date,
            casual,
            registered,
            total,
        })
        .collect()
}


/// Sum rentals per weekday, Sunday through Saturday.
pub fn totals_by_weekday(records: &[RentalRecord]) -> Vec<GroupTotal> {
    group_totals(records, |r| r.weekday, |w| w.label())
}


/// Sum rentals per season, Spring through Winter.
pub fn totals_by_season(records: &[RentalRecord]) -> Vec<GroupTotal> {
    group_totals(records, |r| r.season, |s| s.label())
}


/// Sum rentals per calendar month, Jan through Dec.
pub fn totals_by_month(records: &[RentalRecord]) -> Vec<GroupTotal> {
    group_totals(records, |r| r.month, |m| m.label())
}


/// Sum rentals per dataset year.
pub fn totals_by_year(records: &[RentalRecord]) -> Vec<GroupTotal> {
    group_totals(records, |r| r.year, |y| y.label())
}


/// Sum all three counts across the given records.
pub fn range_totals(records: &[RentalRecord]) -> RangeTotals {
    let mut totals = RangeTotals::default();

    for record in records {
        totals.casual += record.casual;
        totals.registered += record.registered;
        totals.total += record.total;
    }

    totals
}


/// Rows reordered by one measure, largest first. Ties keep their incoming
/// order, so repeated sorts are stable.
pub fn sorted_desc(rows: &[GroupTotal], measure: Measure) -> Vec<GroupTotal> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| b.value(measure).cmp(&a.value(measure)));
    sorted
}


/// Fold records into per-category totals, emitted in category code order.
/// Only categories present in the records appear.
fn group_totals<K>(
    records: &[RentalRecord],
    key: impl Fn(&RentalRecord) -> K,
    label: impl Fn(K) -> &'static str,
) -> Vec<GroupTotal>
where
    K: Ord + Copy,
{
    let mut by_key: BTreeMap<K, (i64, i64, i64)> = BTreeMap::new();

    for record in records {
        let entry = by_key.entry(key(record)).or_default();
        entry.0 += record.casual;
        entry.1 += record.registered;
        entry.2 += record.total;
    }

    by_key
        .into_iter()
        .map(|(k, (casual, registered, total))| GroupTotal {
            label: label(k),
            casual,
            registered,
            total,
        })
        .collect()
}
