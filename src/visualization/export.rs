//! Export functionality for rental charts.

use std::path::Path;

use anyhow::{Context, Result};

use crate::aggregation::{sorted_desc, DailyTotal, GroupTotal, Measure};


// Chart color scheme
const HIGHLIGHT: &str = "#90CAF9";
const MUTED: &str = "#D3D3D3";
const CHART_BG: &str = "#FFFFFF";
const CHART_TEXT: &str = "#31333F";
const CHART_TEXT_SECONDARY: &str = "#808495";
const CHART_GRID: &str = "#E6E6E6";

// Bar panel dimensions
const MARGIN: i32 = 20;
const HEADER_SPACE: i32 = 56;
const PANEL_WIDTH: i32 = 300;
const PANEL_GAP: i32 = 24;
const LABEL_WIDTH: i32 = 76;
const BAR_MAX_WIDTH: i32 = PANEL_WIDTH - LABEL_WIDTH - 56;
const BAR_HEIGHT: i32 = 18;
const BAR_SLOT: i32 = BAR_HEIGHT + 6;
const TITLE_SPACE: i32 = 16;

// Daily line chart dimensions
const DAILY_WIDTH: i32 = 900;
const DAILY_HEIGHT: i32 = 360;
const PLOT_LEFT: i32 = 70;
const PLOT_RIGHT: i32 = 30;
const PLOT_TOP: i32 = 56;
const PLOT_BOTTOM: i32 = 40;


/// Export grouped totals as an SVG with one bar panel per measure.
pub fn export_groups_svg(rows: &[GroupTotal], output_path: &Path, title: &str) -> Result<()> {
    let svg_content = generate_groups_svg(rows, title);

    std::fs::write(output_path, svg_content)
        .with_context(|| format!("Failed to write SVG to {}", output_path.display()))?;

    Ok(())
}


/// Export grouped totals as a PNG.
pub fn export_groups_png(rows: &[GroupTotal], output_path: &Path, title: &str) -> Result<()> {
    let svg_content = generate_groups_svg(rows, title);
    render_png(&svg_content, output_path)
}


/// Export daily totals as an SVG line chart.
pub fn export_daily_svg(rows: &[DailyTotal], output_path: &Path, title: &str) -> Result<()> {
    let svg_content = generate_daily_svg(rows, title);

    std::fs::write(output_path, svg_content)
        .with_context(|| format!("Failed to write SVG to {}", output_path.display()))?;

    Ok(())
}


/// Export daily totals as a PNG.
pub fn export_daily_png(rows: &[DailyTotal], output_path: &Path, title: &str) -> Result<()> {
    let svg_content = generate_daily_svg(rows, title);
    render_png(&svg_content, output_path)
}


/// Render SVG content to a PNG file.
fn render_png(svg_content: &str, output_path: &Path) -> Result<()> {
    let mut options = resvg::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    // Parse SVG
    let tree = resvg::usvg::Tree::from_str(svg_content, &options)
        .context("Failed to parse SVG")?;

    // Render to pixmap
    let size = tree.size();
    let width = size.width() as u32;
    let height = size.height() as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .context("Failed to create pixmap")?;

    // Fill with background color
    let bg = hex_to_rgb(CHART_BG);
    pixmap.fill(tiny_skia::Color::from_rgba8(bg.0, bg.1, bg.2, 255));

    // Render SVG
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    // Save as PNG
    pixmap.save_png(output_path)
        .with_context(|| format!("Failed to save PNG to {}", output_path.display()))?;

    Ok(())
}


/// Generate SVG content with three ranked bar panels, one per measure.
fn generate_groups_svg(rows: &[GroupTotal], title: &str) -> String {
    let bar_count = rows.len() as i32;
    let width = 2 * MARGIN + 3 * PANEL_WIDTH + 2 * PANEL_GAP;
    let height = HEADER_SPACE + TITLE_SPACE + bar_count * BAR_SLOT + MARGIN;

    let mut svg_parts = vec![
        format!(r#"<svg width="{}" height="{}" xmlns="http://www.w3.org/2000/svg">"#, width, height),
        "<style>".to_string(),
        format!("  .title {{ fill: {}; font: bold 18px -apple-system, sans-serif; }}", CHART_TEXT),
        format!("  .panel-title {{ fill: {}; font: bold 13px -apple-system, sans-serif; }}", CHART_TEXT),
        format!("  .bar-label {{ fill: {}; font: 11px -apple-system, sans-serif; }}", CHART_TEXT_SECONDARY),
        format!("  .bar-value {{ fill: {}; font: 11px -apple-system, sans-serif; }}", CHART_TEXT),
        "</style>".to_string(),
        format!(r#"<rect width="{}" height="{}" fill="{}"/>"#, width, height, CHART_BG),
        format!(r#"<text x="{}" y="30" class="title">{}</text>"#, MARGIN, title),
    ];

    for (panel_idx, measure) in Measure::ALL.iter().enumerate() {
        let panel_x = MARGIN + panel_idx as i32 * (PANEL_WIDTH + PANEL_GAP);
        svg_parts.push(generate_measure_panel(rows, *measure, panel_x, HEADER_SPACE));
    }

    svg_parts.push("</svg>".to_string());

    svg_parts.join("\n")
}


/// Generate one bar panel, ranked by the given measure, leader highlighted.
fn generate_measure_panel(rows: &[GroupTotal], measure: Measure, x: i32, y: i32) -> String {
    let ranked = sorted_desc(rows, measure);
    let max_value = ranked.first().map(|r| r.value(measure)).unwrap_or(0).max(1);

    let mut parts = vec![format!(
        r#"<text x="{}" y="{}" class="panel-title">{}</text>"#,
        x,
        y,
        measure.title()
    )];

    let bar_x = x + LABEL_WIDTH;
    for (i, row) in ranked.iter().enumerate() {
        let bar_y = y + TITLE_SPACE + i as i32 * BAR_SLOT;
        let value = row.value(measure);
        let bar_w = ((value.max(0) as f64 / max_value as f64) * BAR_MAX_WIDTH as f64) as i32;
        let fill = if i == 0 { HIGHLIGHT } else { MUTED };

        parts.push(format!(
            r#"<text x="{}" y="{}" class="bar-label" text-anchor="end">{}</text>"#,
            bar_x - 6,
            bar_y + BAR_HEIGHT - 5,
            row.label
        ));
        parts.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"><title>{}: {}</title></rect>"#,
            bar_x,
            bar_y,
            bar_w.max(1),
            BAR_HEIGHT,
            fill,
            row.label,
            value
        ));
        parts.push(format!(
            r#"<text x="{}" y="{}" class="bar-value">{}</text>"#,
            bar_x + bar_w.max(1) + 6,
            bar_y + BAR_HEIGHT - 5,
            format_number(value)
        ));
    }

    parts.join("\n")
}


/// Generate SVG content for the daily rentals line chart.
fn generate_daily_svg(rows: &[DailyTotal], title: &str) -> String {
    let max_total = rows.iter().map(|r| r.total).max().unwrap_or(0).max(1);

    let plot_w = DAILY_WIDTH - PLOT_LEFT - PLOT_RIGHT;
    let plot_h = DAILY_HEIGHT - PLOT_TOP - PLOT_BOTTOM;
    let baseline = PLOT_TOP + plot_h;

    let scale_x = |i: usize| -> f64 {
        if rows.len() <= 1 {
            (PLOT_LEFT + plot_w / 2) as f64
        } else {
            PLOT_LEFT as f64 + i as f64 / (rows.len() - 1) as f64 * plot_w as f64
        }
    };
    let scale_y =
        |v: i64| -> f64 { baseline as f64 - (v as f64 / max_total as f64) * plot_h as f64 };

    let mut svg_parts = vec![
        format!(
            r#"<svg width="{}" height="{}" xmlns="http://www.w3.org/2000/svg">"#,
            DAILY_WIDTH, DAILY_HEIGHT
        ),
        "<style>".to_string(),
        format!("  .title {{ fill: {}; font: bold 18px -apple-system, sans-serif; }}", CHART_TEXT),
        format!("  .axis-label {{ fill: {}; font: 11px -apple-system, sans-serif; }}", CHART_TEXT_SECONDARY),
        "</style>".to_string(),
        format!(r#"<rect width="{}" height="{}" fill="{}"/>"#, DAILY_WIDTH, DAILY_HEIGHT, CHART_BG),
        format!(r#"<text x="{}" y="30" class="title">{}</text>"#, MARGIN, title),
    ];

    // Horizontal gridlines with value labels
    for step in 0..=4 {
        let value = max_total * step / 4;
        let y = scale_y(value);
        svg_parts.push(format!(
            r#"<line x1="{}" y1="{:.1}" x2="{}" y2="{:.1}" stroke="{}" stroke-width="1"/>"#,
            PLOT_LEFT,
            y,
            PLOT_LEFT + plot_w,
            y,
            CHART_GRID
        ));
        svg_parts.push(format!(
            r#"<text x="{}" y="{:.1}" class="axis-label" text-anchor="end">{}</text>"#,
            PLOT_LEFT - 8,
            y + 4.0,
            format_number(value)
        ));
    }

    if !rows.is_empty() {
        // Date labels for the first, middle and last point
        for i in [0, rows.len() / 2, rows.len() - 1] {
            svg_parts.push(format!(
                r#"<text x="{:.1}" y="{}" class="axis-label" text-anchor="middle">{}</text>"#,
                scale_x(i),
                baseline + 20,
                rows[i].date
            ));
        }

        // Rental line
        let points: Vec<String> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| format!("{:.1},{:.1}", scale_x(i), scale_y(row.total)))
            .collect();
        svg_parts.push(format!(
            r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
            points.join(" "),
            HIGHLIGHT
        ));

        // Per-day markers carrying the tooltip
        for (i, row) in rows.iter().enumerate() {
            svg_parts.push(format!(
                r#"<circle cx="{:.1}" cy="{:.1}" r="2" fill="{}"><title>{}: {}</title></circle>"#,
                scale_x(i),
                scale_y(row.total),
                HIGHLIGHT,
                row.date,
                row.total
            ));
        }
    }

    svg_parts.push("</svg>".to_string());

    svg_parts.join("\n")
}


/// Convert hex color to RGB tuple.
fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    let hex = hex.trim_start_matches('#');
    let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
    let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
    let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
    (r, g, b)
}


/// Format number with suffix.
fn format_number(num: i64) -> String {
    if num >= 1_000_000_000 {
        format!("{:.1}B", num as f64 / 1_000_000_000.0)
    } else if num >= 1_000_000 {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    } else if num >= 1_000 {
        format!("{:.1}K", num as f64 / 1_000.0)
    } else {
        format!("{}", num)
    }
}


/// Open file with default application.
pub fn open_file(path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(path)
            .spawn()
            .context("Failed to open file")?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", &path.to_string_lossy()])
            .spawn()
            .context("Failed to open file")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(path)
            .spawn()
            .context("Failed to open file")?;
    }

    Ok(())
}
