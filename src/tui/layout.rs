//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, Gauge, Paragraph};

use super::controls;
use super::runtime::App;
use super::style;
use crate::sim::accounting::StrategyTotals;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // header
            Constraint::Min(10),    // chart
            Constraint::Length(3),  // progress
            Constraint::Length(11), // totals
            Constraint::Length(1),  // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_chart(frame, app, chunks[1]);
    render_progress(frame, app, chunks[2]);
    render_totals(frame, app, chunks[3]);
    render_footer(frame, chunks[4]);
}

/// Header bar: preset, weather, clock, speed, run state.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let (state_icon, state_label) = if app.is_finished() {
        ("■", "DONE")
    } else if app.paused {
        ("‖", "PAUSED")
    } else {
        ("▶", "RUNNING")
    };

    let clock = app
        .last_result()
        .map_or_else(|| app.config().start_time().to_string(), |r| r.timestamp.to_string());

    let header = Line::from(vec![
        Span::styled(
            " SOLAR-CHARGE ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            &app.preset_name,
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " │ {} │ {} │ every {} min │ {}ms │ {} {} ",
            app.config().weather(),
            clock,
            app.config().control_interval_min(),
            app.tick_interval_ms(),
            state_icon,
            state_label,
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Solar production and both charging rates over the recent window.
fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let point = |r: &crate::sim::types::StepResult, y: f64| (r.elapsed_min as f64, y);
    let solar: Vec<(f64, f64)> = app.history.iter().map(|r| point(r, r.solar_kw)).collect();
    let interval: Vec<(f64, f64)> = app
        .history
        .iter()
        .map(|r| point(r, r.interval_charge_kw))
        .collect();
    let realtime: Vec<(f64, f64)> = app
        .history
        .iter()
        .map(|r| point(r, r.realtime_charge_kw))
        .collect();

    let y_hi = style::y_upper_bound(&[solar.as_slice(), interval.as_slice(), realtime.as_slice()]);
    let x_lo = solar.first().map_or(0.0, |p| p.0);
    let x_hi = solar.last().map_or(1.0, |p| p.0).max(x_lo + 1.0);

    let x_label_lo = app.history.front().map_or_else(String::new, |r| r.timestamp.to_string());
    let x_label_hi = app.history.back().map_or_else(String::new, |r| r.timestamp.to_string());

    let datasets = vec![
        Dataset::default()
            .name("Solar")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(style::SOLAR_COLOR))
            .data(&solar),
        Dataset::default()
            .name("Interval")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(style::INTERVAL_COLOR))
            .data(&interval),
        Dataset::default()
            .name("Real-time")
            .marker(symbols::Marker::Dot)
            .style(Style::default().fg(style::REALTIME_COLOR))
            .data(&realtime),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(" Solar Production vs Charging Rate ")
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("time")
                .bounds([x_lo, x_hi])
                .labels(vec![x_label_lo, x_label_hi]),
        )
        .y_axis(
            Axis::default()
                .title("kW")
                .bounds([0.0, y_hi])
                .labels(vec!["0".to_string(), format!("{y_hi:.0}")]),
        );

    frame.render_widget(chart, area);
}

/// Fraction of the run completed.
fn render_progress(frame: &mut Frame, app: &App, area: Rect) {
    let ratio = if app.total_steps == 0 {
        1.0
    } else {
        app.elapsed as f64 / app.total_steps as f64
    };
    let gauge = Gauge::default()
        .block(Block::default().title(" Progress ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(style::SOLAR_COLOR))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!("{}/{} min", app.elapsed, app.total_steps));
    frame.render_widget(gauge, area);
}

/// Side-by-side running totals, cheaper strategy highlighted.
fn render_totals(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let interval = app.interval_totals();
    let realtime = app.realtime_totals();
    let realtime_cheaper = realtime.total_cost() < interval.total_cost();

    render_strategy(frame, chunks[0], " Interval ", interval, !realtime_cheaper && app.elapsed > 0);
    render_strategy(frame, chunks[1], " Real-time ", realtime, realtime_cheaper);
}

fn render_strategy(frame: &mut Frame, area: Rect, title: &str, t: &StrategyTotals, winner: bool) {
    let lines = vec![
        Line::from(format!("  solar used   {:>8.2} kWh", t.total_solar_energy_kwh)),
        Line::from(format!("  grid used    {:>8.2} kWh", t.total_grid_energy_kwh)),
        Line::from(format!("  exported     {:>8.2} kWh", t.exported_energy_kwh)),
        Line::from(format!("  charged      {:>8.2} kWh", t.total_charged_kwh)),
        Line::from(format!("  solar cost   {:>8.2}", t.solar_cost)),
        Line::from(format!("  grid cost    {:>8.2}", t.grid_cost)),
        Line::from(format!("  earnings     {:>8.2}", t.export_earnings)),
        Line::from(Span::styled(
            format!(
                "  total {:>8.2}  ({:.3}/kWh)",
                t.total_cost(),
                t.effective_cost_per_kwh()
            ),
            if winner {
                Style::default().fg(style::WINNER_FG).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            },
        )),
    ];
    let block = Block::default().title(title.to_string()).borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        controls::footer_hint(),
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
