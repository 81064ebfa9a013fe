//! End-to-end tick pipeline tests against scripted counter snapshots.

use std::collections::HashMap;
use std::time::Instant;

use netmon::capture::{CounterSnapshotSource, RawCounterRow};
use netmon::engine::Monitor;
use netmon::error::NetmonError;
use netmon::model::timeseries::HISTORY_SIZE;
use netmon::model::{Dashboard, NameSource};
use netmon::process::ProcessNameOracle;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Replays one prepared snapshot per tick; empty once exhausted.
struct Scripted {
    ticks: std::vec::IntoIter<Vec<RawCounterRow>>,
}

impl Scripted {
    fn new(ticks: Vec<Vec<RawCounterRow>>) -> Self {
        Self {
            ticks: ticks.into_iter(),
        }
    }
}

impl CounterSnapshotSource for Scripted {
    fn snapshot(&mut self) -> Result<Vec<RawCounterRow>, NetmonError> {
        Ok(self.ticks.next().unwrap_or_default())
    }
}

#[derive(Default)]
struct FixedOracle(HashMap<u32, String>);

impl FixedOracle {
    fn with(pid: u32, name: &str) -> Self {
        let mut m = HashMap::new();
        m.insert(pid, name.to_string());
        Self(m)
    }
}

impl ProcessNameOracle for FixedOracle {
    fn lookup(&self, pid: u32) -> Option<String> {
        self.0.get(&pid).cloned()
    }
}

fn row(pid: u32, name: &str, tx: u64, rx: u64) -> RawCounterRow {
    RawCounterRow::new(pid, name, tx, rx)
}

fn run(ticks: Vec<Vec<RawCounterRow>>, oracle: &FixedOracle) -> (Monitor, Dashboard) {
    let n = ticks.len();
    let mut source = Scripted::new(ticks);
    let mut monitor = Monitor::new();
    let mut dash = Dashboard::default();
    for _ in 0..n {
        dash = monitor.tick(&mut source, oracle, Instant::now());
    }
    (monitor, dash)
}

// ---------------------------------------------------------------------------
// Rates and totals
// ---------------------------------------------------------------------------

#[test]
fn two_ticks_report_interval_delta() {
    let (monitor, dash) = run(
        vec![
            vec![row(100, "A", 1000, 0)],
            vec![row(100, "A", 1500, 200)],
        ],
        &FixedOracle::default(),
    );
    let e = monitor.registry().get(100).unwrap();
    assert_eq!((e.tx_rate(), e.rx_rate()), (500, 200));
    assert_eq!((e.tx_total(), e.rx_total()), (1500, 200));

    assert_eq!(dash.live.rows.len(), 1);
    assert_eq!(dash.live.rows[0].tx_rate, 500);
    assert_eq!(dash.history.rows[0].tx_total, 1500);
    assert_eq!(dash.trend.tx, vec![1000, 500]);
    assert_eq!(dash.trend.rx, vec![0, 200]);
}

#[test]
fn repeated_snapshot_is_idle() {
    let snap = vec![row(1, "a", 10, 20), row(2, "b", 5, 0)];
    let (_, dash) = run(vec![snap.clone(), snap], &FixedOracle::default());
    assert!(dash.live.rows.is_empty());
    assert_eq!(dash.live.active_count, 0);
    assert_eq!(dash.history.grand_tx_total, 15);
    assert_eq!(dash.history.grand_rx_total, 20);
}

#[test]
fn counter_reset_restarts_delta() {
    let (monitor, _) = run(
        vec![
            vec![row(7, "x", 100, 100)],
            vec![row(7, "x", 300, 100)],
            vec![row(7, "x", 50, 10)],
            vec![row(7, "x", 80, 10)],
        ],
        &FixedOracle::default(),
    );
    let e = monitor.registry().get(7).unwrap();
    assert_eq!(e.tx_rate(), 30);
    assert_eq!(e.tx_total(), 80);
}

#[test]
fn threads_are_merged_into_process() {
    let (monitor, dash) = run(
        vec![vec![
            row(42, "main", 100, 10),
            row(42, "worker-1", 200, 20),
            row(42, "worker-2", 300, 30),
        ]],
        &FixedOracle::default(),
    );
    assert_eq!(monitor.registry().len(), 1);
    let e = monitor.registry().get(42).unwrap();
    assert_eq!((e.tx_total(), e.rx_total()), (600, 60));
    assert_eq!(e.name, "main");
    assert_eq!(dash.live.rows[0].tx_rate, 600);
}

#[test]
fn absent_process_keeps_its_state() {
    let (monitor, dash) = run(
        vec![vec![row(1, "gone", 500, 0)], vec![row(2, "new", 10, 0)]],
        &FixedOracle::default(),
    );
    let e = monitor.registry().get(1).unwrap();
    assert!(e.is_alive);
    assert_eq!(e.tx_total(), 500);
    assert_eq!(dash.history.group_count, 2);
}

// ---------------------------------------------------------------------------
// Names
// ---------------------------------------------------------------------------

#[test]
fn oracle_name_wins_and_sticks() {
    let mut source = Scripted::new(vec![
        vec![row(9, "Socket Thread", 1, 0)],
        vec![row(9, "other", 2, 0)],
    ]);
    let mut monitor = Monitor::new();
    monitor.tick(&mut source, &FixedOracle::with(9, "firefox"), Instant::now());
    // Oracle no longer knows the pid; the trusted name stays.
    monitor.tick(&mut source, &FixedOracle::default(), Instant::now());

    let e = monitor.registry().get(9).unwrap();
    assert_eq!(e.name, "firefox");
    assert_eq!(e.name_source, NameSource::Oracle);
}

#[test]
fn low_information_name_is_replaced_later() {
    let (monitor, _) = run(
        vec![
            vec![row(5, "DNS Resolver #3", 1, 0)],
            vec![row(5, "DNS Resolver #3", 2, 0), row(5, "curl", 3, 0)],
        ],
        &FixedOracle::default(),
    );
    assert_eq!(monitor.registry().get(5).unwrap().name, "curl");
}

#[test]
fn nameless_process_is_unknown() {
    let (_, dash) = run(vec![vec![row(3, "", 10, 0)]], &FixedOracle::default());
    assert_eq!(dash.live.rows[0].name, "unknown");
}

// ---------------------------------------------------------------------------
// Rankings and history
// ---------------------------------------------------------------------------

#[test]
fn live_ranking_is_deterministic() {
    let snap = vec![
        row(30, "c", 100, 0),
        row(10, "a", 50, 50),
        row(20, "b", 0, 100),
        row(40, "d", 500, 0),
    ];
    let (_, first) = run(vec![snap.clone()], &FixedOracle::default());
    let (_, second) = run(vec![snap], &FixedOracle::default());
    let pids: Vec<u32> = first.live.rows.iter().map(|r| r.pid).collect();
    assert_eq!(pids, vec![40, 10, 20, 30]);
    assert_eq!(first.live, second.live);
    assert_eq!(first.history, second.history);
}

#[test]
fn history_groups_by_name_and_dead_suffix() {
    let (_, dash) = run(
        vec![vec![
            row(1, "curl", 100, 0),
            row(2, "curl (dead)", 50, 0),
            row(3, "wget", 10, 0),
        ]],
        &FixedOracle::default(),
    );
    assert_eq!(dash.history.group_count, 2);
    assert_eq!(dash.history.rows[0].name, "curl");
    assert_eq!(dash.history.rows[0].tx_total, 150);
    assert_eq!(dash.history.rows[1].name, "wget");
}

#[test]
fn trend_window_is_bounded() {
    let ticks: Vec<Vec<RawCounterRow>> = (1..=(HISTORY_SIZE as u64 + 10))
        .map(|i| vec![row(1, "a", i * 10, 0)])
        .collect();
    let (monitor, dash) = run(ticks, &FixedOracle::default());
    assert_eq!(monitor.ticks(), HISTORY_SIZE as u64 + 10);
    assert_eq!(dash.trend.tx.len(), HISTORY_SIZE);
    // First tick (rate 10) has been evicted; the rest are all 10 too.
    assert!(dash.trend.tx.iter().all(|&v| v == 10));
    assert_eq!(dash.trend.tx_peak, 10);
}

#[test]
fn peak_tracks_current_window() {
    let mut ticks = vec![vec![row(1, "a", 1_000_000, 0)]];
    let mut total = 1_000_000;
    for _ in 0..HISTORY_SIZE {
        total += 1;
        ticks.push(vec![row(1, "a", total, 0)]);
    }
    let (_, dash) = run(ticks, &FixedOracle::default());
    // The 1 MB burst has slid out of the window.
    assert_eq!(dash.trend.tx_peak, 1);
}
