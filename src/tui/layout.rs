//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Rectangle};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use super::runtime::App;
use super::style;
use crate::catalog::{self, ROW_DEPTH_FT, SITE_MAX_WIDTH_FT};
use crate::site::accounting::{format_currency, format_energy};

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(8),    // body
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(44), Constraint::Min(30)])
        .split(rows[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(5)])
        .split(body[1]);

    render_header(frame, app, rows[0]);
    render_devices(frame, app, body[0]);
    render_summary(frame, app, right[0]);
    render_floor_plan(frame, app, right[1]);
    render_footer(frame, rows[2]);
}

/// Header bar: site name and unit count.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let header = Line::from(vec![
        Span::styled(
            " SITE PLANNER ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(&app.site_name, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!(" │ {} units placed ", app.layout.items.len())),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Selectable devices with their current quantities.
fn render_devices(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = catalog::selectable()
        .map(|d| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        format!("{:<12}", d.name),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!("qty {:>3}", app.config.quantity_of(d.id))),
                ]),
                Line::from(format!(
                    "  {}x{}ft · {} MWh · {}",
                    d.width,
                    d.depth,
                    d.energy,
                    format_currency(d.cost)
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Battery Selection ")
                .borders(Borders::ALL),
        )
        .highlight_style(Style::default().bg(style::SELECTED_BG))
        .highlight_symbol("▶ ");

    let mut state = ListState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

/// Energy, cost, transformer count, and land size.
fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let s = &app.summary;
    let value = Style::default()
        .fg(style::VALUE_FG)
        .add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(vec![
            Span::raw("  Energy "),
            Span::styled(format_energy(s.total_energy), value),
            Span::raw("   Cost "),
            Span::styled(format_currency(s.total_cost), value),
        ]),
        Line::from(vec![
            Span::raw("  Transformers "),
            Span::styled(s.transformers.to_string(), value),
            Span::raw("   Land "),
            Span::styled(s.land_size(), value),
        ]),
    ];

    let block = Block::default().title(" Site Summary ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Floor plan with one rectangle per placed unit, top row first.
fn render_floor_plan(frame: &mut Frame, app: &App, area: Rect) {
    let width = f64::from(app.layout.total_width.max(SITE_MAX_WIDTH_FT));
    let depth = f64::from(app.layout.total_depth.max(ROW_DEPTH_FT));

    let canvas = Canvas::default()
        .block(
            Block::default()
                .title(format!(" Site Layout ({} ft max width) ", SITE_MAX_WIDTH_FT))
                .borders(Borders::ALL),
        )
        .x_bounds([0.0, width])
        .y_bounds([0.0, depth])
        .paint(|ctx| {
            for unit in &app.layout.items {
                // Canvas y grows upward; plan y grows downward.
                let bottom = depth - f64::from(unit.y + unit.depth);
                ctx.draw(&Rectangle {
                    x: f64::from(unit.x),
                    y: bottom,
                    width: f64::from(unit.width),
                    height: f64::from(unit.depth),
                    color: style::device_color(&unit.device_id),
                });
            }
            ctx.layer();
            for unit in &app.layout.items {
                let bottom = depth - f64::from(unit.y + unit.depth);
                ctx.print(
                    f64::from(unit.x) + 1.0,
                    bottom + f64::from(unit.depth) / 2.0,
                    Span::styled(
                        style::short_label(&unit.device_id),
                        Style::default().fg(style::device_color(&unit.device_id)),
                    ),
                );
            }
        });

    frame.render_widget(canvas, area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  ↑/↓:Select  +/-:Quantity  0:Remove  c:Clear all",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
