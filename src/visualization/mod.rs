//! Visualization layer for the dashboard and chart exports.

mod dashboard;
mod export;

pub use dashboard::run_dashboard;
pub use export::{
    export_daily_png, export_daily_svg, export_groups_png, export_groups_svg, open_file,
};
