//! Aggregation layer for rental analytics.

mod summary;

#[allow(unused_imports)]
pub use summary::{
    DailyTotal,
    GroupTotal,
    Measure,
    RangeTotals,
    daily_totals,
    filter_range,
    range_totals,
    sorted_desc,
    totals_by_month,
    totals_by_season,
    totals_by_weekday,
    totals_by_year,
};
