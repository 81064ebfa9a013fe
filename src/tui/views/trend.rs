use std::time::Duration;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::widgets::{format_rate, per_second, sparkline_rows};

/// One direction of the global trend.
pub struct TrendChart<'a> {
    pub label: &'a str,
    pub samples: &'a [u64],
    pub peak: u64,
    pub color: Color,
}

impl TrendChart<'_> {
    /// Block title: label, current rate and window peak.
    pub fn title(&self, interval: Duration) -> String {
        let current = self.samples.last().copied().unwrap_or(0);
        format!(
            " {}: {}  (peak {}) ",
            self.label,
            format_rate(per_second(current, interval)),
            format_rate(per_second(self.peak, interval)),
        )
    }
}

/// Render a filled sparkline chart of the trend window.
pub fn render(frame: &mut Frame, area: Rect, chart: &TrendChart<'_>, interval: Duration) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(chart.title(interval));
    let inner = block.inner(area);

    let lines: Vec<Line> = sparkline_rows(
        chart.samples,
        inner.width as usize,
        inner.height as usize,
    )
    .into_iter()
    .map(Line::from)
    .collect();

    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(chart.color))
        .block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_shows_current_and_peak() {
        let chart = TrendChart {
            label: "Upload",
            samples: &[0, 4096, 1024],
            peak: 4096,
            color: Color::Reset,
        };
        assert_eq!(
            chart.title(Duration::from_secs(1)),
            " Upload: 1.0 KB/s  (peak 4.0 KB/s) "
        );
    }

    #[test]
    fn title_scales_by_interval() {
        let chart = TrendChart {
            label: "Download",
            samples: &[512],
            peak: 512,
            color: Color::Reset,
        };
        assert_eq!(
            chart.title(Duration::from_millis(500)),
            " Download: 1.0 KB/s  (peak 1.0 KB/s) "
        );
    }

    #[test]
    fn empty_window_is_zero() {
        let chart = TrendChart {
            label: "Upload",
            samples: &[],
            peak: 0,
            color: Color::Reset,
        };
        assert_eq!(
            chart.title(Duration::from_secs(1)),
            " Upload: 0 B/s  (peak 0 B/s) "
        );
    }
}
