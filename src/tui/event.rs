use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, unbounded};
use crossterm::event::{self, KeyEvent, KeyEventKind};

use crate::error::NetmonError;

/// How long the input thread blocks in `poll` before re-checking for stop.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Terminal input events forwarded to the main loop.
#[derive(Debug)]
pub enum Event {
    /// A key press from crossterm.
    Key(KeyEvent),
    /// Terminal window was resized to (columns, rows).
    Resize(u16, u16),
}

/// Background terminal input reader.
///
/// Polls crossterm on its own thread and forwards key and resize events over
/// a crossbeam channel, so the main loop can `select!` over input and the
/// tick timer. The thread exits when the handler is dropped.
pub struct EventHandler {
    rx: Receiver<Event>,
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl EventHandler {
    pub fn new() -> Result<Self, NetmonError> {
        let (tx, rx) = unbounded();
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name("netmon-input".into())
            .spawn(move || input_loop(&tx, &thread_stop))
            .map_err(|e| NetmonError::Tui(io::Error::other(e.to_string())))?;

        Ok(Self {
            rx,
            stop,
            handle: Some(handle),
        })
    }

    /// Receiving side, for use in `select!`.
    pub fn receiver(&self) -> &Receiver<Event> {
        &self.rx
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn input_loop(tx: &Sender<Event>, stop: &AtomicBool) {
    while !stop.load(Ordering::Relaxed) {
        if !event::poll(POLL_TIMEOUT).unwrap_or(false) {
            continue;
        }
        let forwarded = match event::read() {
            // Key release/repeat events are reported on some platforms; only
            // presses are actions.
            Ok(event::Event::Key(key)) if key.kind == KeyEventKind::Press => {
                tx.send(Event::Key(key))
            }
            Ok(event::Event::Resize(w, h)) => tx.send(Event::Resize(w, h)),
            // Ignore mouse, focus, and paste events
            Ok(_) => Ok(()),
            Err(e) => {
                log::debug!("terminal read failed: {e}");
                Ok(())
            }
        };
        if forwarded.is_err() {
            // Receiver dropped
            return;
        }
    }
}
