//! Shared data structures between the netmon kprobe program and userspace.
//!
//! These types must be `#[repr(C)]` so that both sides agree on the exact
//! byte layout of map keys and values.

#![no_std]

/// Length of the kernel `comm` buffer (TASK_COMM_LEN), including the NUL.
pub const COMM_LEN: usize = 16;

/// Key for the per-(process, thread name) traffic accumulator map.
///
/// `comm` is the name of the thread that issued the send/recv call, so one
/// process can own several keys (one per thread name that touched a socket).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProcessKey {
    /// Process ID (kernel tgid).
    pub pid: u32,
    /// NUL-terminated thread name from `bpf_get_current_comm`.
    pub comm: [u8; COMM_LEN],
}

/// Cumulative byte counters since the program was loaded.
///
/// Userspace derives per-tick rates by diffing consecutive snapshots.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrafficStats {
    pub tx_bytes: u64,
    pub rx_bytes: u64,
}

/// Name of the traffic accumulator map in the object file.
pub const PROC_STATS_MAP: &str = "PROC_STATS";

/// Name of the udp_recvmsg entry/return correlation map.
pub const ACTIVE_UDP_READS_MAP: &str = "ACTIVE_UDP_READS";

/// Capacity of both maps.
pub const MAP_MAX_ENTRIES: u32 = 10240;

const _: () = assert!(core::mem::size_of::<ProcessKey>() == 20);
const _: () = assert!(core::mem::size_of::<TrafficStats>() == 16);

#[cfg(feature = "user")]
unsafe impl aya::Pod for ProcessKey {}

#[cfg(feature = "user")]
unsafe impl aya::Pod for TrafficStats {}
