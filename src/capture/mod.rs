// Counter snapshot reading.
//
// The kernel program keeps one cumulative (tx, rx) counter pair per
// (pid, thread name). Each tick the monitor reads the whole table through a
// `CounterSnapshotSource`; the eBPF-backed source lives in `ebpf.rs`.

pub mod ebpf;

use netmon_ebpf_common::COMM_LEN;

use crate::error::NetmonError;

/// One entry of the kernel counter table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawCounterRow {
    pub pid: u32,
    /// Thread name at the time of the send/recv; empty when unreadable.
    pub thread_name: String,
    pub tx_bytes: u64,
    pub rx_bytes: u64,
}

impl RawCounterRow {
    pub fn new(pid: u32, thread_name: impl Into<String>, tx_bytes: u64, rx_bytes: u64) -> Self {
        Self {
            pid,
            thread_name: thread_name.into(),
            tx_bytes,
            rx_bytes,
        }
    }
}

/// Source of per-tick counter snapshots.
///
/// An empty result is valid (nothing recorded yet). Implementations must not
/// block for longer than a single table walk.
pub trait CounterSnapshotSource {
    fn snapshot(&mut self) -> Result<Vec<RawCounterRow>, NetmonError>;
}

/// Decode a kernel `comm` buffer.
///
/// Takes bytes up to the first NUL. A buffer without a terminator, or one
/// that is not UTF-8, is treated as an empty name.
pub fn parse_comm(comm: &[u8; COMM_LEN]) -> String {
    let Some(end) = comm.iter().position(|&b| b == 0) else {
        return String::new();
    };
    match std::str::from_utf8(&comm[..end]) {
        Ok(s) => s.to_string(),
        Err(_) => String::new(),
    }
}
