use std::time::Instant;

use rustc_hash::FxHashMap;

use crate::engine::aggregate::TickAggregate;
use crate::engine::names;
use crate::model::ProcessEntity;
use crate::process::ProcessNameOracle;

/// Every process ever observed, keyed by PID.
///
/// Owned by the tick driver and only mutated inside a tick. Entities are
/// never removed, so totals of exited processes stay visible in the
/// historical ranking.
#[derive(Debug, Default)]
pub struct ProcessRegistry {
    entities: FxHashMap<u32, ProcessEntity>,
}

impl ProcessRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one tick's aggregate into the registry.
    ///
    /// PIDs missing from `aggregate` are left exactly as they were,
    /// including their last rate.
    pub fn apply<O>(&mut self, aggregate: &TickAggregate, oracle: &O, now: Instant)
    where
        O: ProcessNameOracle + ?Sized,
    {
        for (&pid, sample) in aggregate {
            let entity = self.entities.entry(pid).or_insert_with(|| {
                log::debug!("new process {pid}");
                ProcessEntity::new(pid, now)
            });

            names::resolve(entity, &sample.candidates, oracle);

            entity.tx.observe(sample.tx_bytes);
            entity.rx.observe(sample.rx_bytes);
            entity.last_seen = now;
            entity.is_alive = true;
        }
    }

    pub fn get(&self, pid: u32) -> Option<&ProcessEntity> {
        self.entities.get(&pid)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProcessEntity> {
        self.entities.values()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::RawCounterRow;
    use crate::engine::aggregate::aggregate;
    use crate::model::NameSource;

    struct NoOracle;

    impl ProcessNameOracle for NoOracle {
        fn lookup(&self, _pid: u32) -> Option<String> {
            None
        }
    }

    fn tick(reg: &mut ProcessRegistry, rows: Vec<RawCounterRow>) {
        reg.apply(&aggregate(rows), &NoOracle, Instant::now());
    }

    #[test]
    fn first_sighting_creates_entity() {
        let mut reg = ProcessRegistry::new();
        tick(&mut reg, vec![RawCounterRow::new(100, "A", 1000, 0)]);
        let e = reg.get(100).unwrap();
        assert!(e.is_alive);
        assert_eq!(e.name, "A");
        assert_eq!(e.name_source, NameSource::Candidate);
        assert_eq!(e.tx_total(), 1000);
        assert_eq!(e.tx_rate(), 1000);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn second_tick_yields_deltas() {
        let mut reg = ProcessRegistry::new();
        tick(&mut reg, vec![RawCounterRow::new(100, "A", 1000, 0)]);
        tick(&mut reg, vec![RawCounterRow::new(100, "A", 1500, 200)]);
        let e = reg.get(100).unwrap();
        assert_eq!((e.tx_rate(), e.rx_rate()), (500, 200));
        assert_eq!((e.tx_total(), e.rx_total()), (1500, 200));
    }

    #[test]
    fn absent_process_is_left_untouched() {
        let mut reg = ProcessRegistry::new();
        tick(&mut reg, vec![RawCounterRow::new(1, "a", 10, 10)]);
        let before = reg.get(1).unwrap().clone();
        tick(&mut reg, vec![RawCounterRow::new(2, "b", 5, 5)]);
        let after = reg.get(1).unwrap();
        assert_eq!(after.tx, before.tx);
        assert_eq!(after.rx, before.rx);
        assert_eq!(after.last_seen, before.last_seen);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn vanished_thread_counts_as_reset() {
        let mut reg = ProcessRegistry::new();
        tick(
            &mut reg,
            vec![
                RawCounterRow::new(9, "main", 100, 0),
                RawCounterRow::new(9, "worker", 900, 0),
            ],
        );
        // "worker" exited and its row is gone: the sum drops below the
        // previous total, which is handled as a reset.
        tick(&mut reg, vec![RawCounterRow::new(9, "main", 150, 0)]);
        let e = reg.get(9).unwrap();
        assert_eq!(e.tx_rate(), 150);
        assert_eq!(e.tx_total(), 150);
    }

    #[test]
    fn empty_tick_changes_nothing() {
        let mut reg = ProcessRegistry::new();
        tick(&mut reg, Vec::new());
        assert!(reg.is_empty());
    }
}
