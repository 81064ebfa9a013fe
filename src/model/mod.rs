pub mod timeseries;

use std::time::Instant;

use serde::Serialize;

use crate::engine::rate::DirectionCounter;

/// Where an entity's display name came from, ordered by trust.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NameSource {
    /// No name chosen yet (or only the "unknown" marker).
    Unresolved,
    /// Picked from kernel-observed thread names.
    Candidate,
    /// Reported by the operating system; final.
    Oracle,
}

/// Long-lived accounting record for one process ID.
///
/// Created the first time a PID shows up in a snapshot and never removed.
/// `is_alive` is optimistic: it is set on every observation and nothing in
/// the pipeline clears it.
#[derive(Clone, Debug)]
pub struct ProcessEntity {
    pub pid: u32,
    pub name: String,
    pub name_source: NameSource,
    pub is_alive: bool,
    pub last_seen: Instant,
    pub tx: DirectionCounter,
    pub rx: DirectionCounter,
}

impl ProcessEntity {
    pub fn new(pid: u32, now: Instant) -> Self {
        Self {
            pid,
            name: String::new(),
            name_source: NameSource::Unresolved,
            is_alive: true,
            last_seen: now,
            tx: DirectionCounter::default(),
            rx: DirectionCounter::default(),
        }
    }

    pub fn tx_rate(&self) -> u64 {
        self.tx.rate
    }

    pub fn rx_rate(&self) -> u64 {
        self.rx.rate
    }

    pub fn tx_total(&self) -> u64 {
        self.tx.total
    }

    pub fn rx_total(&self) -> u64 {
        self.rx.total
    }

    /// Combined tx+rx bytes for the latest interval.
    pub fn combined_rate(&self) -> u64 {
        self.tx.rate.saturating_add(self.rx.rate)
    }

    /// True when the entity moved any bytes during the latest interval.
    pub fn is_active(&self) -> bool {
        self.tx.rate > 0 || self.rx.rate > 0
    }
}

/// One row of the realtime ranking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LiveRow {
    pub pid: u32,
    pub name: String,
    pub tx_rate: u64,
    pub rx_rate: u64,
}

/// Active processes ranked by combined rate, with global rate totals.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LiveView {
    pub rows: Vec<LiveRow>,
    pub active_count: usize,
    pub total_tx_rate: u64,
    pub total_rx_rate: u64,
}

/// Cumulative totals for every incarnation sharing one display name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HistoryRow {
    pub name: String,
    pub tx_total: u64,
    pub rx_total: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct HistoryView {
    pub rows: Vec<HistoryRow>,
    pub group_count: usize,
    pub grand_tx_total: u64,
    pub grand_rx_total: u64,
}

/// Global rate samples, oldest first, plus the peak of each window.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TrendView {
    pub tx: Vec<u64>,
    pub rx: Vec<u64>,
    pub tx_peak: u64,
    pub rx_peak: u64,
}

/// Everything the presentation layer needs after one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub live: LiveView,
    pub history: HistoryView,
    pub trend: TrendView,
}
