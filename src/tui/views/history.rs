use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};

use crate::model::HistoryView;
use crate::tui::theme::Theme;
use crate::tui::widgets::format_bytes;

/// Render the historical ranking: cumulative bytes per process name,
/// including processes that have exited.
pub fn render(frame: &mut Frame, area: Rect, view: &HistoryView, theme: &Theme) {
    let header_style = theme.header_style();
    let header = Row::new(vec![
        Cell::from(Span::styled("Process", header_style)),
        Cell::from(Span::styled("Sent", header_style)),
        Cell::from(Span::styled("Received", header_style)),
    ]);

    let rows: Vec<Row> = view
        .rows
        .iter()
        .map(|r| {
            Row::new(vec![
                Cell::from(r.name.clone()),
                Cell::from(format_bytes(r.tx_total)),
                Cell::from(format_bytes(r.rx_total)),
            ])
            .style(theme.normal_style())
        })
        .collect();

    let footer = Row::new(vec![
        Cell::from(format!("{} processes", view.group_count)),
        Cell::from(format_bytes(view.grand_tx_total)),
        Cell::from(format_bytes(view.grand_rx_total)),
    ])
    .style(theme.footer_style());

    let widths = [
        Constraint::Min(12),
        Constraint::Length(11),
        Constraint::Length(11),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .footer(footer)
        .block(Block::default().borders(Borders::ALL).title(" History "));

    frame.render_widget(table, area);
}
