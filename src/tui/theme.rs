use ratatui::style::{Color, Modifier, Style};

/// Color theme for TUI rendering.
///
/// Respects the NO_COLOR convention: when `no_color` is true, all color
/// methods return `Color::Reset` / unstyled values.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub no_color: bool,
}

impl Theme {
    pub fn new(no_color: bool) -> Self {
        Self { no_color }
    }

    /// Returns a color representing the severity of a network rate.
    ///
    /// - Green  when `bytes_per_sec` < 1 KiB/s
    /// - Yellow up to 100 KiB/s
    /// - Red    above that
    pub fn rate_color(&self, bytes_per_sec: f64) -> Color {
        if self.no_color {
            return Color::Reset;
        }
        if bytes_per_sec < 1024.0 {
            Color::Green
        } else if bytes_per_sec <= 102_400.0 {
            Color::Yellow
        } else {
            Color::Red
        }
    }

    /// Upload chart color.
    pub fn upload_color(&self) -> Color {
        if self.no_color { Color::Reset } else { Color::Magenta }
    }

    /// Download chart color.
    pub fn download_color(&self) -> Color {
        if self.no_color { Color::Reset } else { Color::Cyan }
    }

    /// Style for table/column headers: bold, yellow foreground.
    pub fn header_style(&self) -> Style {
        if self.no_color {
            return Style::default().add_modifier(Modifier::BOLD);
        }
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for table footers carrying totals.
    pub fn footer_style(&self) -> Style {
        if self.no_color {
            return Style::default().add_modifier(Modifier::BOLD);
        }
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    /// Normal row style.
    pub fn normal_style(&self) -> Style {
        if self.no_color {
            return Style::default();
        }
        Style::default().fg(Color::Gray)
    }

    /// Dimmed text (hints, placeholders).
    pub fn dim_style(&self) -> Style {
        if self.no_color {
            return Style::default();
        }
        Style::default().fg(Color::DarkGray)
    }
}
