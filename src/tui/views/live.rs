use std::time::Duration;

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};

use crate::model::LiveView;
use crate::tui::theme::Theme;
use crate::tui::widgets::{format_rate, per_second};

/// Render the live ranking table.
///
/// Columns: PID | Process | Up | Down. The footer carries the active process
/// count and the summed rates.
pub fn render(frame: &mut Frame, area: Rect, view: &LiveView, interval: Duration, theme: &Theme) {
    let header_style = theme.header_style();
    let header = Row::new(vec![
        Cell::from(Span::styled("PID", header_style)),
        Cell::from(Span::styled("Process", header_style)),
        Cell::from(Span::styled("Up", header_style)),
        Cell::from(Span::styled("Down", header_style)),
    ]);

    let rows: Vec<Row> = view
        .rows
        .iter()
        .map(|r| {
            let up = per_second(r.tx_rate, interval);
            let down = per_second(r.rx_rate, interval);
            Row::new(vec![
                Cell::from(r.pid.to_string()),
                Cell::from(r.name.clone()),
                Cell::from(Span::styled(
                    format_rate(up),
                    Style::default().fg(theme.rate_color(up)),
                )),
                Cell::from(Span::styled(
                    format_rate(down),
                    Style::default().fg(theme.rate_color(down)),
                )),
            ])
            .style(theme.normal_style())
        })
        .collect();

    let footer = Row::new(vec![
        Cell::from(""),
        Cell::from(format!("{} active", view.active_count)),
        Cell::from(format_rate(per_second(view.total_tx_rate, interval))),
        Cell::from(format_rate(per_second(view.total_rx_rate, interval))),
    ])
    .style(theme.footer_style());

    let widths = [
        Constraint::Length(8),  // PID
        Constraint::Min(12),    // Process
        Constraint::Length(12), // Up
        Constraint::Length(12), // Down
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .footer(footer)
        .block(Block::default().borders(Borders::ALL).title(" Live "));

    frame.render_widget(table, area);
}
