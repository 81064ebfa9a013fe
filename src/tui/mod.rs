pub mod event;
pub mod theme;
pub mod views;
pub mod widgets;

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crossbeam_channel::{select, tick};
use crossterm::ExecutableCommand;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::capture::CounterSnapshotSource;
use crate::engine::Monitor;
use crate::error::NetmonError;
use crate::model::Dashboard;
use crate::process::ProcessNameOracle;

use self::event::{Event, EventHandler};
use self::theme::Theme;
use self::views::trend::TrendChart;

const MIN_COLS: u16 = 80;
const MIN_ROWS: u16 = 24;

/// Upper bound on how long the loop waits before re-checking for shutdown.
const SHUTDOWN_POLL: Duration = Duration::from_millis(250);

/// TUI application state.
pub struct App {
    pub dashboard: Dashboard,
    pub interval: Duration,
    pub theme: Theme,
    pub should_quit: bool,
    pub show_help: bool,
}

impl App {
    pub fn new(interval: Duration, no_color: bool) -> Self {
        let no_color = no_color || std::env::var_os("NO_COLOR").is_some();
        Self {
            dashboard: Dashboard::default(),
            interval,
            theme: Theme::new(no_color),
            should_quit: false,
            show_help: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            // Esc closes help first, quits otherwise
            KeyCode::Esc => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Char('?') => self.show_help = !self.show_help,
            _ => {}
        }
    }
}

/// Run the interactive TUI until the user quits or `shutdown` is raised.
///
/// Owns the tick loop: every `interval` the monitor reads one snapshot from
/// `source` and the screen is redrawn from the resulting dashboard.
pub fn run_tui(
    monitor: &mut Monitor,
    source: &mut dyn CounterSnapshotSource,
    oracle: &dyn ProcessNameOracle,
    interval: Duration,
    no_color: bool,
    shutdown: &AtomicBool,
) -> Result<(), NetmonError> {
    // Check terminal size before entering alternate screen.
    let (cols, rows) = crossterm::terminal::size().map_err(|e| {
        NetmonError::Tui(io::Error::other(format!("cannot query terminal size: {e}")))
    })?;
    if cols < MIN_COLS || rows < MIN_ROWS {
        return Err(NetmonError::Tui(io::Error::other(format!(
            "terminal too small ({cols}x{rows}), minimum {MIN_COLS}x{MIN_ROWS}"
        ))));
    }

    enable_raw_mode().map_err(NetmonError::Tui)?;
    if let Err(e) = io::stdout().execute(EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(NetmonError::Tui(e));
    }

    log::info!("monitor loop started, interval {interval:?}");
    let result = draw_loop(monitor, source, oracle, interval, no_color, shutdown);

    // Restore terminal regardless of success/failure.
    restore_terminal();
    log::info!("monitor loop stopped after {} ticks", monitor.ticks());

    result
}

fn draw_loop(
    monitor: &mut Monitor,
    source: &mut dyn CounterSnapshotSource,
    oracle: &dyn ProcessNameOracle,
    interval: Duration,
    no_color: bool,
    shutdown: &AtomicBool,
) -> Result<(), NetmonError> {
    let backend = ratatui::backend::CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).map_err(NetmonError::Tui)?;
    let mut app = App::new(interval, no_color);
    let events = EventHandler::new()?;
    run_event_loop(
        &mut terminal,
        &mut app,
        &events,
        monitor,
        source,
        oracle,
        shutdown,
    )
}

/// Leave raw mode and the alternate screen. Safe to call more than once.
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = io::stdout().execute(LeaveAlternateScreen);
}

fn run_event_loop(
    terminal: &mut Terminal<ratatui::backend::CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
    monitor: &mut Monitor,
    source: &mut dyn CounterSnapshotSource,
    oracle: &dyn ProcessNameOracle,
    shutdown: &AtomicBool,
) -> Result<(), NetmonError> {
    let ticker = tick(app.interval);
    app.dashboard = monitor.tick(source, oracle, Instant::now());

    loop {
        terminal
            .draw(|frame| render(frame, app))
            .map_err(NetmonError::Tui)?;

        if app.should_quit || shutdown.load(Ordering::Relaxed) {
            return Ok(());
        }

        select! {
            recv(ticker) -> at => {
                let now = at.unwrap_or_else(|_| Instant::now());
                app.dashboard = monitor.tick(source, oracle, now);
            }
            recv(events.receiver()) -> ev => match ev {
                Ok(Event::Key(key)) => app.handle_key(key),
                // ratatui picks up the new size on the next draw.
                Ok(Event::Resize(_, _)) => {}
                Err(_) => {
                    log::warn!("input thread disconnected");
                    app.should_quit = true;
                }
            },
            default(SHUTDOWN_POLL) => {}
        }
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let size = frame.area();

    if size.width < MIN_COLS || size.height < MIN_ROWS {
        let msg = format!(
            "Terminal too small ({0}x{1}). Minimum: {MIN_COLS}x{MIN_ROWS}. Please resize.",
            size.width, size.height
        );
        let paragraph = Paragraph::new(msg)
            .style(Style::default().fg(Color::Red))
            .block(Block::default().borders(Borders::ALL).title(" netmon "));
        frame.render_widget(paragraph, size);
        return;
    }

    let [tables, charts] = split(
        Direction::Vertical,
        [Constraint::Percentage(65), Constraint::Percentage(35)],
        size,
    );
    let [live_area, history_area] = split(
        Direction::Horizontal,
        [Constraint::Percentage(55), Constraint::Percentage(45)],
        tables,
    );
    let [up_area, down_area] = split(
        Direction::Vertical,
        [Constraint::Percentage(50), Constraint::Percentage(50)],
        charts,
    );

    let d = &app.dashboard;
    views::live::render(frame, live_area, &d.live, app.interval, &app.theme);
    views::history::render(frame, history_area, &d.history, &app.theme);
    views::trend::render(
        frame,
        up_area,
        &TrendChart {
            label: "Upload",
            samples: &d.trend.tx,
            peak: d.trend.tx_peak,
            color: app.theme.upload_color(),
        },
        app.interval,
    );
    views::trend::render(
        frame,
        down_area,
        &TrendChart {
            label: "Download",
            samples: &d.trend.rx,
            peak: d.trend.rx_peak,
            color: app.theme.download_color(),
        },
        app.interval,
    );

    if app.show_help {
        render_help_overlay(frame, size, &app.theme);
    }
}

fn split<const N: usize>(direction: Direction, constraints: [Constraint; N], area: Rect) -> [Rect; N] {
    let chunks = Layout::default()
        .direction(direction)
        .constraints(constraints)
        .split(area);
    std::array::from_fn(|i| chunks[i])
}

fn render_help_overlay(frame: &mut ratatui::Frame, area: Rect, theme: &Theme) {
    let help_width = 44u16.min(area.width.saturating_sub(4));
    let help_height = 11u16.min(area.height.saturating_sub(4));
    let x = (area.width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            theme.header_style().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("  q / Ctrl-C    Quit"),
        Line::from("  Esc           Close help / quit"),
        Line::from("  ?             Toggle this help"),
        Line::from(""),
        Line::from("  Live: bytes per second, last tick"),
        Line::from("  History: totals since start"),
        Line::from(Span::styled("Press ? or Esc to close", theme.dim_style())),
    ];

    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .style(if theme.no_color {
                Style::default()
            } else {
                Style::default().bg(Color::Black)
            }),
    );

    frame.render_widget(Clear, help_area);
    frame.render_widget(help, help_area);
}
