// Traffic aggregation and process accounting.
//
// One tick: read snapshot -> fold threads into processes -> merge into the
// registry (names + rates) -> compile ranked views and trend history.

pub mod aggregate;
pub mod names;
pub mod rate;
pub mod registry;
pub mod summary;

use std::time::Instant;

use crate::capture::CounterSnapshotSource;
use crate::model::Dashboard;
use crate::process::ProcessNameOracle;

use self::aggregate::aggregate;
use self::registry::ProcessRegistry;
use self::summary::{TrafficHistory, compile_history, compile_live};

/// Single-writer tick driver owning all long-lived pipeline state.
#[derive(Debug, Default)]
pub struct Monitor {
    registry: ProcessRegistry,
    history: TrafficHistory,
    ticks: u64,
}

impl Monitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one read-aggregate-update-summarize cycle.
    ///
    /// A failing source is treated as an empty snapshot: the registry is not
    /// touched and the views are rebuilt from the existing state.
    pub fn tick<S, O>(&mut self, source: &mut S, oracle: &O, now: Instant) -> Dashboard
    where
        S: CounterSnapshotSource + ?Sized,
        O: ProcessNameOracle + ?Sized,
    {
        self.ticks += 1;
        match source.snapshot() {
            Ok(rows) => {
                let agg = aggregate(rows);
                self.registry.apply(&agg, oracle, now);
            }
            Err(e) => log::warn!("tick {}: counter snapshot failed: {e}", self.ticks),
        }
        self.summarize()
    }

    fn summarize(&mut self) -> Dashboard {
        let live = compile_live(&self.registry);
        self.history.record(live.total_tx_rate, live.total_rx_rate);
        Dashboard {
            history: compile_history(&self.registry),
            trend: self.history.view(),
            live,
        }
    }

    pub fn registry(&self) -> &ProcessRegistry {
        &self.registry
    }

    pub fn history(&self) -> &TrafficHistory {
        &self.history
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
