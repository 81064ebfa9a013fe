/// Bytes accrued between two cumulative readings.
///
/// A reading lower than the previous one means the kernel counter restarted
/// (program reattached, map entry recreated, wraparound), so the whole new
/// value counts as fresh traffic.
pub fn interval_delta(current: u64, previous: u64) -> u64 {
    if current >= previous {
        current - previous
    } else {
        current
    }
}

/// Cumulative total and per-tick rate for one traffic direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirectionCounter {
    /// Latest cumulative reading.
    pub total: u64,
    /// Reading from the previous observation; only used for the delta.
    pub prev_total: u64,
    /// Bytes attributed to the most recent interval.
    pub rate: u64,
}

impl DirectionCounter {
    pub fn observe(&mut self, total: u64) {
        self.rate = interval_delta(total, self.prev_total);
        self.prev_total = total;
        self.total = total;
    }
}
