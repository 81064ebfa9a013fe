use std::collections::HashMap;

use crate::engine::registry::ProcessRegistry;
use crate::model::timeseries::HistoryBuffer;
use crate::model::{HistoryRow, HistoryView, LiveRow, LiveView, TrendView};

/// Suffix marking a dead incarnation; stripped before historical grouping.
pub const DEAD_SUFFIX: &str = " (dead)";

/// Name used to group an entity in the historical ranking.
pub fn normalize_name(name: &str) -> &str {
    name.strip_suffix(DEAD_SUFFIX).unwrap_or(name)
}

/// Sliding windows of global tx/rx totals, one sample per tick.
#[derive(Clone, Debug, Default)]
pub struct TrafficHistory {
    tx: HistoryBuffer,
    rx: HistoryBuffer,
}

impl TrafficHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, total_tx_rate: u64, total_rx_rate: u64) {
        self.tx.push(total_tx_rate);
        self.rx.push(total_rx_rate);
    }

    pub fn tx(&self) -> &HistoryBuffer {
        &self.tx
    }

    pub fn rx(&self) -> &HistoryBuffer {
        &self.rx
    }

    pub fn view(&self) -> TrendView {
        TrendView {
            tx: self.tx.to_vec(),
            rx: self.rx.to_vec(),
            tx_peak: self.tx.peak(),
            rx_peak: self.rx.peak(),
        }
    }
}

/// Rank processes that moved bytes in the latest interval.
///
/// Order: combined rate descending, then PID ascending.
pub fn compile_live(registry: &ProcessRegistry) -> LiveView {
    let mut active: Vec<_> = registry.iter().filter(|e| e.is_active()).collect();
    active.sort_by(|a, b| {
        b.combined_rate()
            .cmp(&a.combined_rate())
            .then(a.pid.cmp(&b.pid))
    });

    let mut view = LiveView {
        active_count: active.len(),
        ..LiveView::default()
    };
    for e in active {
        view.total_tx_rate = view.total_tx_rate.saturating_add(e.tx_rate());
        view.total_rx_rate = view.total_rx_rate.saturating_add(e.rx_rate());
        view.rows.push(LiveRow {
            pid: e.pid,
            name: e.name.clone(),
            tx_rate: e.tx_rate(),
            rx_rate: e.rx_rate(),
        });
    }
    view
}

/// Group every known entity (alive or not) by normalized name and rank the
/// groups by combined total, then name.
pub fn compile_history(registry: &ProcessRegistry) -> HistoryView {
    let mut groups: HashMap<&str, (u64, u64)> = HashMap::new();
    for e in registry.iter() {
        let slot = groups.entry(normalize_name(&e.name)).or_default();
        slot.0 = slot.0.saturating_add(e.tx_total());
        slot.1 = slot.1.saturating_add(e.rx_total());
    }

    let mut rows: Vec<HistoryRow> = groups
        .into_iter()
        .map(|(name, (tx_total, rx_total))| HistoryRow {
            name: name.to_string(),
            tx_total,
            rx_total,
        })
        .collect();
    rows.sort_by(|a, b| {
        let total_a = a.tx_total.saturating_add(a.rx_total);
        let total_b = b.tx_total.saturating_add(b.rx_total);
        total_b.cmp(&total_a).then_with(|| a.name.cmp(&b.name))
    });

    HistoryView {
        group_count: rows.len(),
        grand_tx_total: rows.iter().fold(0u64, |acc, r| acc.saturating_add(r.tx_total)),
        grand_rx_total: rows.iter().fold(0u64, |acc, r| acc.saturating_add(r.rx_total)),
        rows,
    }
}
