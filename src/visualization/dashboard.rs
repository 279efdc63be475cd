//! Interactive terminal dashboard for rental analytics.

use std::io;
use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, BorderType, Borders, Chart, Dataset, GraphType,
        Paragraph, Tabs,
    },
};

use crate::aggregation::{
    daily_totals, filter_range, range_totals, sorted_desc, totals_by_month, totals_by_season,
    totals_by_weekday, totals_by_year, DailyTotal, GroupTotal, Measure,
};
use crate::config::EVENT_POLL_MS;
use crate::models::{RentalData, RentalRecord};


struct Theme {
    highlight: Color,
    muted: Color,
    dim: Color,
    text: Color,
}

const THEME: Theme = Theme {
    highlight: Color::LightBlue, // Top-ranked bar, totals, app title
    muted: Color::Gray,
    dim: Color::DarkGray,
    text: Color::White,
};


/// Which aggregation the main panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Daily,
    Weekday,
    Season,
    Month,
    Year,
}


impl View {
    const ALL: [View; 5] = [View::Daily, View::Weekday, View::Season, View::Month, View::Year];

    fn title(self) -> &'static str {
        match self {
            View::Daily => "Daily",
            View::Weekday => "By Weekday",
            View::Season => "By Season",
            View::Month => "By Month",
            View::Year => "By Year",
        }
    }
}


/// Which end of the date range the arrow keys move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RangeEnd {
    Start,
    End,
}


struct App {
    data: RentalData,
    view: View,
    start: NaiveDate,
    end: NaiveDate,
    min_date: NaiveDate,
    max_date: NaiveDate,
    active: RangeEnd,
}


impl App {
    fn new(data: RentalData, min_date: NaiveDate, max_date: NaiveDate) -> Self {
        Self {
            data,
            view: View::Daily,
            start: min_date,
            end: max_date,
            min_date,
            max_date,
            active: RangeEnd::Start,
        }
    }

    fn next_view(&mut self) {
        let idx = View::ALL.iter().position(|v| *v == self.view).unwrap_or(0);
        self.view = View::ALL[(idx + 1) % View::ALL.len()];
    }

    fn previous_view(&mut self) {
        let idx = View::ALL.iter().position(|v| *v == self.view).unwrap_or(0);
        self.view = View::ALL[(idx + View::ALL.len() - 1) % View::ALL.len()];
    }

    /// Move the active endpoint by `days`, keeping `start <= end` and both
    /// endpoints inside the dataset bounds.
    fn shift_active(&mut self, days: i64) {
        match self.active {
            RangeEnd::Start => {
                let moved = self
                    .start
                    .checked_add_signed(chrono::Duration::days(days))
                    .unwrap_or(self.start);
                self.start = moved.clamp(self.min_date, self.end);
            }
            RangeEnd::End => {
                let moved = self
                    .end
                    .checked_add_signed(chrono::Duration::days(days))
                    .unwrap_or(self.end);
                self.end = moved.clamp(self.start, self.max_date);
            }
        }
    }

    fn snap_start(&mut self) {
        self.start = self.min_date;
    }

    fn snap_end(&mut self) {
        self.end = self.max_date;
    }

    fn reset_range(&mut self) {
        self.start = self.min_date;
        self.end = self.max_date;
    }
}


/// Run the interactive dashboard until the user quits.
pub fn run_dashboard(data: RentalData) -> Result<()> {
    let (Some(min_date), Some(max_date)) = (data.min_date(), data.max_date()) else {
        println!("No rental records found.");
        return Ok(());
    };

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(data, min_date, max_date);

    // Main loop
    loop {
        terminal.draw(|f| ui(f, &app))?;

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Tab => app.next_view(),
                        KeyCode::BackTab => app.previous_view(),
                        KeyCode::Char('1') => app.view = View::Daily,
                        KeyCode::Char('2') => app.view = View::Weekday,
                        KeyCode::Char('3') => app.view = View::Season,
                        KeyCode::Char('4') => app.view = View::Month,
                        KeyCode::Char('5') => app.view = View::Year,
                        KeyCode::Char('s') => app.active = RangeEnd::Start,
                        KeyCode::Char('e') => app.active = RangeEnd::End,
                        KeyCode::Left => app.shift_active(-1),
                        KeyCode::Right => app.shift_active(1),
                        KeyCode::Up => app.shift_active(7),
                        KeyCode::Down => app.shift_active(-7),
                        KeyCode::Home => app.snap_start(),
                        KeyCode::End => app.snap_end(),
                        KeyCode::Char('r') => app.reset_range(),
                        _ => {}
                    }
                }
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}


fn ui(frame: &mut Frame, app: &App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header / view tabs / range selector
            Constraint::Min(10),   // Charts
            Constraint::Length(1), // Help line
        ])
        .split(frame.area());

    draw_header(frame, app, main_layout[0]);

    let records = filter_range(app.data.records(), app.start, app.end);
    if records.is_empty() {
        let empty = Paragraph::new("No rentals in the selected date range.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(THEME.muted));
        frame.render_widget(empty, main_layout[1]);
    } else {
        match app.view {
            View::Daily => draw_daily(frame, &records, main_layout[1]),
            View::Weekday => draw_group_panels(frame, &totals_by_weekday(&records), main_layout[1]),
            View::Season => draw_group_panels(frame, &totals_by_season(&records), main_layout[1]),
            View::Month => draw_group_panels(frame, &totals_by_month(&records), main_layout[1]),
            View::Year => draw_group_panels(frame, &totals_by_year(&records), main_layout[1]),
        }
    }

    draw_footer(frame, main_layout[2]);
}


fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let header_block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(THEME.dim));

    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12), // App title
            Constraint::Min(30),    // View tabs
            Constraint::Length(26), // Range selector
        ])
        .split(area);

    let app_title = Paragraph::new(Span::styled(
        "CYCLEDASH",
        Style::default().fg(THEME.highlight).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(app_title, header_layout[0]);

    let selected = View::ALL.iter().position(|v| *v == app.view).unwrap_or(0);
    let titles: Vec<&str> = View::ALL.iter().map(|v| v.title()).collect();
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(THEME.muted))
        .highlight_style(Style::default().fg(THEME.text).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, header_layout[1]);

    let nav = Paragraph::new(range_line(app)).alignment(Alignment::Right);
    frame.render_widget(nav, header_layout[2]);

    frame.render_widget(header_block, area);
}


/// Date range with the endpoint the arrow keys currently move in bold.
fn range_line(app: &App) -> Line<'static> {
    let endpoint = |end: RangeEnd, date: NaiveDate| {
        let style = if app.active == end {
            Style::default().fg(THEME.text).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(THEME.muted)
        };
        Span::styled(date.format("%Y-%m-%d").to_string(), style)
    };

    Line::from(vec![
        endpoint(RangeEnd::Start, app.start),
        Span::styled(" .. ", Style::default().fg(THEME.dim)),
        endpoint(RangeEnd::End, app.end),
    ])
}


fn draw_daily(frame: &mut Frame, records: &[RentalRecord], area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Totals cards
            Constraint::Min(5),    // Daily line chart
        ])
        .split(area);

    draw_total_cards(frame, records, chunks[0]);
    draw_daily_chart(frame, &daily_totals(records), chunks[1]);
}


fn draw_total_cards(frame: &mut Frame, records: &[RentalRecord], area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let totals = range_totals(records);
    let values = [totals.casual, totals.registered, totals.total];

    for ((measure, value), chunk) in Measure::ALL.iter().zip(values).zip(chunks.iter()) {
        let card = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                format_number(value),
                Style::default().fg(THEME.highlight).add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(THEME.dim))
                .title(card_title(*measure)),
        );
        frame.render_widget(card, *chunk);
    }
}


/// KPI card heading. The total card already says Total, so it keeps the
/// plain measure name.
fn card_title(measure: Measure) -> &'static str {
    match measure {
        Measure::Casual => " Total Casual Renter ",
        Measure::Registered => " Total Registered Renter ",
        Measure::Total => " Total Renter ",
    }
}


fn draw_daily_chart(frame: &mut Frame, rows: &[DailyTotal], area: Rect) {
    if rows.is_empty() {
        return;
    }

    let points: Vec<(f64, f64)> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| (i as f64, row.total as f64))
        .collect();

    let max_total = rows.iter().map(|r| r.total).max().unwrap_or(0).max(1);
    let x_max = rows.len().saturating_sub(1).max(1) as f64;

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(THEME.highlight))
        .data(&points);

    let x_labels = vec![
        Span::styled(rows[0].date.to_string(), Style::default().fg(THEME.muted)),
        Span::styled(rows[rows.len() / 2].date.to_string(), Style::default().fg(THEME.muted)),
        Span::styled(rows[rows.len() - 1].date.to_string(), Style::default().fg(THEME.muted)),
    ];
    let y_labels = vec![
        Span::styled("0", Style::default().fg(THEME.muted)),
        Span::styled(format_number(max_total / 2), Style::default().fg(THEME.muted)),
        Span::styled(format_number(max_total), Style::default().fg(THEME.muted)),
    ];

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(THEME.dim))
                .title(" Total Renter "),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(THEME.dim))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(THEME.dim))
                .bounds([0.0, max_total as f64])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}


/// One bar chart per measure, side by side, each ranked by its own measure.
fn draw_group_panels(frame: &mut Frame, rows: &[GroupTotal], area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for (measure, chunk) in Measure::ALL.iter().zip(chunks.iter()) {
        draw_measure_panel(frame, rows, *measure, *chunk);
    }
}


fn draw_measure_panel(frame: &mut Frame, rows: &[GroupTotal], measure: Measure, area: Rect) {
    let ranked = sorted_desc(rows, measure);

    let bars: Vec<Bar> = ranked
        .iter()
        .enumerate()
        .map(|(i, row)| {
            // The leader gets the highlight color, everyone else stays muted.
            let color = if i == 0 { THEME.highlight } else { THEME.muted };
            Bar::default()
                .label(Line::from(row.label))
                .value(row.value(measure).max(0) as u64)
                .text_value(format_number(row.value(measure)))
                .style(Style::default().fg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(THEME.dim))
                .title(format!(" {} ", measure.title())),
        )
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}


fn draw_footer(frame: &mut Frame, area: Rect) {
    let help = Line::from(vec![
        Span::styled("VIEW: ", Style::default().fg(THEME.dim)),
        Span::styled("1-5/Tab", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("ENDPOINT: ", Style::default().fg(THEME.dim)),
        Span::styled("s/e", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("MOVE: ", Style::default().fg(THEME.dim)),
        Span::styled("←/→ 1d ↑/↓ 7d", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("FULL: ", Style::default().fg(THEME.dim)),
        Span::styled("Home/End/r", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("QUIT: ", Style::default().fg(THEME.dim)),
        Span::styled("q", Style::default().fg(THEME.text)),
    ]);
    let footer = Paragraph::new(help).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}


/// Format number with suffix.
fn format_number(num: i64) -> String {
    if num >= 1_000_000_000 {
        format!("{:.1}bn", num as f64 / 1_000_000_000.0)
    } else if num >= 1_000_000 {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    } else if num >= 1_000 {
        format!("{:.1}K", num as f64 / 1_000.0)
    } else {
        format!("{}", num)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Month, Season, Weekday, YearCode};

    fn app_over(dates: &[&str]) -> App {
        let records: Vec<RentalRecord> = dates
            .iter()
            .map(|d| RentalRecord {
                date: d.parse().unwrap(),
                weekday: Weekday::Monday,
                season: Season::Spring,
                month: Month::Jan,
                year: YearCode::Y2011,
                casual: 1,
                registered: 1,
                total: 2,
            })
            .collect();
        let data = RentalData::new(records);
        let min = data.min_date().unwrap();
        let max = data.max_date().unwrap();
        App::new(data, min, max)
    }

    #[test]
    fn test_start_never_crosses_end() {
        let mut app = app_over(&["2011-01-01", "2011-01-05"]);

        app.active = RangeEnd::Start;
        app.shift_active(30);
        assert_eq!(app.start, app.end);

        app.shift_active(1);
        assert_eq!(app.start, app.end);
    }

    #[test]
    fn test_end_stays_inside_dataset() {
        let mut app = app_over(&["2011-01-01", "2011-01-05"]);

        app.active = RangeEnd::End;
        app.shift_active(-30);
        assert_eq!(app.end, app.start);

        app.shift_active(7);
        assert_eq!(app.end, "2011-01-05".parse().unwrap());
    }

    #[test]
    fn test_view_cycle_wraps() {
        let mut app = app_over(&["2011-01-01"]);

        for _ in 0..View::ALL.len() {
            app.next_view();
        }
        assert_eq!(app.view, View::Daily);

        app.previous_view();
        assert_eq!(app.view, View::Year);
    }

    #[test]
    fn test_reset_restores_full_range() {
        let mut app = app_over(&["2011-01-01", "2011-01-31"]);

        app.active = RangeEnd::Start;
        app.shift_active(10);
        app.active = RangeEnd::End;
        app.shift_active(-10);
        app.reset_range();

        assert_eq!(app.start, app.min_date);
        assert_eq!(app.end, app.max_date);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(985), "985");
        assert_eq!(format_number(3_131), "3.1K");
        assert_eq!(format_number(2_500_000), "2.5M");
    }
}
