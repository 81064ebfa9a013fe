use rustc_hash::FxHashMap;

use crate::capture::RawCounterRow;

/// Per-process fold of one snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProcessSample {
    /// Sum of the cumulative tx counters of every row for this PID.
    pub tx_bytes: u64,
    /// Sum of the cumulative rx counters of every row for this PID.
    pub rx_bytes: u64,
    /// Distinct non-empty thread names, in first-seen order.
    pub candidates: Vec<String>,
}

/// PID -> sample for the current tick.
pub type TickAggregate = FxHashMap<u32, ProcessSample>;

/// Fold per-thread rows into per-process totals.
///
/// Each row carries its own independently accumulated counters, so the
/// process total is the plain sum. Rows with an empty thread name still
/// contribute bytes.
pub fn aggregate<I>(rows: I) -> TickAggregate
where
    I: IntoIterator<Item = RawCounterRow>,
{
    let mut out = TickAggregate::default();
    for row in rows {
        let sample = out.entry(row.pid).or_default();
        sample.tx_bytes = sample.tx_bytes.saturating_add(row.tx_bytes);
        sample.rx_bytes = sample.rx_bytes.saturating_add(row.rx_bytes);
        if !row.thread_name.is_empty() && !sample.candidates.contains(&row.thread_name) {
            sample.candidates.push(row.thread_name);
        }
    }
    out
}
