//! netmon eBPF kernel program: per-(process, thread) TCP/UDP byte counters.
//!
//! Attaches to the transport-layer send/receive paths and accumulates
//! cumulative tx/rx bytes keyed by (tgid, comm). Loopback destinations
//! (127.0.0.0/8) are skipped so local IPC does not drown real traffic.
//!
//! This program is read-only with respect to kernel state: it reads the
//! process context, the destination address and the byte counts.
//!
//! Build requirements:
//! - Rust nightly toolchain
//! - Target: bpfel-unknown-none
//! - Build command: cargo +nightly build -Z build-std=core
//!     --target bpfel-unknown-none --release
//!
//! The resulting object is loaded by `netmon --features ebpf` from the
//! path given with `--bpf-object`.

#![no_std]
#![no_main]

use aya_ebpf::helpers::{bpf_get_current_comm, bpf_get_current_pid_tgid, bpf_probe_read_kernel};
use aya_ebpf::macros::{kprobe, kretprobe, map};
use aya_ebpf::maps::{HashMap, PerCpuHashMap};
use aya_ebpf::programs::{ProbeContext, RetProbeContext};

use netmon_ebpf_common::{COMM_LEN, MAP_MAX_ENTRIES, ProcessKey, TrafficStats};

// ---------------------------------------------------------------------------
// BPF Maps
// ---------------------------------------------------------------------------

/// (tgid, comm) -> cumulative traffic. Per-CPU so increments never race;
/// userspace sums the CPU slots when reading.
#[map]
static PROC_STATS: PerCpuHashMap<ProcessKey, TrafficStats> =
    PerCpuHashMap::with_max_entries(MAP_MAX_ENTRIES, 0);

/// pid_tgid -> `struct sock *` captured at udp_recvmsg entry, consumed by
/// the matching kretprobe.
#[map]
static ACTIVE_UDP_READS: HashMap<u64, u64> = HashMap::with_max_entries(MAP_MAX_ENTRIES, 0);

// ---------------------------------------------------------------------------
// TCP
// ---------------------------------------------------------------------------

/// int tcp_sendmsg(struct sock *sk, struct msghdr *msg, size_t size)
#[kprobe]
pub fn tcp_sendmsg(ctx: ProbeContext) -> u32 {
    match try_sendmsg(&ctx) {
        Ok(()) => 0,
        Err(_) => 0, // never disrupt the probed function
    }
}

/// void tcp_cleanup_rbuf(struct sock *sk, int copied)
///
/// Fires when received data is handed to userspace.
#[kprobe]
pub fn tcp_cleanup_rbuf(ctx: ProbeContext) -> u32 {
    match try_tcp_cleanup_rbuf(&ctx) {
        Ok(()) => 0,
        Err(_) => 0,
    }
}

fn try_tcp_cleanup_rbuf(ctx: &ProbeContext) -> Result<(), i64> {
    let sk: u64 = ctx.arg(0).ok_or(1i64)?;
    let copied: i32 = ctx.arg(1).ok_or(1i64)?;
    if copied <= 0 || is_loopback(sk)? {
        return Ok(());
    }
    record_traffic(0, copied as u64);
    Ok(())
}

// ---------------------------------------------------------------------------
// UDP
// ---------------------------------------------------------------------------

/// int udp_sendmsg(struct sock *sk, struct msghdr *msg, size_t len)
#[kprobe]
pub fn udp_sendmsg(ctx: ProbeContext) -> u32 {
    match try_sendmsg(&ctx) {
        Ok(()) => 0,
        Err(_) => 0,
    }
}

/// Entry half of udp_recvmsg: remember the socket for the return probe.
#[kprobe]
pub fn udp_recvmsg(ctx: ProbeContext) -> u32 {
    let Some(sk) = ctx.arg::<u64>(0) else {
        return 0;
    };
    let id = bpf_get_current_pid_tgid();
    let _ = ACTIVE_UDP_READS.insert(&id, &sk, 0);
    0
}

/// Return half of udp_recvmsg: the return value is the byte count.
#[kretprobe]
pub fn udp_recvmsg_ret(ctx: RetProbeContext) -> u32 {
    let id = bpf_get_current_pid_tgid();
    let _ = try_udp_recvmsg_ret(&ctx, id);
    let _ = ACTIVE_UDP_READS.remove(&id);
    0
}

fn try_udp_recvmsg_ret(ctx: &RetProbeContext, id: u64) -> Result<(), i64> {
    let sk = match unsafe { ACTIVE_UDP_READS.get(&id) } {
        Some(sk) => *sk,
        None => return Ok(()),
    };
    let ret: i32 = ctx.ret().ok_or(1i64)?;
    if ret <= 0 || is_loopback(sk)? {
        return Ok(());
    }
    record_traffic(0, ret as u64);
    Ok(())
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn try_sendmsg(ctx: &ProbeContext) -> Result<(), i64> {
    let sk: u64 = ctx.arg(0).ok_or(1i64)?;
    let size: usize = ctx.arg(2).ok_or(1i64)?;
    if is_loopback(sk)? {
        return Ok(());
    }
    record_traffic(size as u64, 0);
    Ok(())
}

/// `skc_daddr` is the first field of `struct sock_common`, which is itself
/// the first field of `struct sock`, so it sits at offset 0 of `sk`.
#[inline(always)]
fn is_loopback(sk: u64) -> Result<bool, i64> {
    let daddr: u32 = unsafe { bpf_probe_read_kernel(sk as *const u32)? };
    // Network byte order: the first octet is the low byte on little-endian.
    Ok(daddr & 0x0000_00FF == 0x7F)
}

#[inline(always)]
fn record_traffic(tx: u64, rx: u64) {
    let pid = (bpf_get_current_pid_tgid() >> 32) as u32;
    if pid == 0 {
        return;
    }

    let comm = bpf_get_current_comm().unwrap_or([0u8; COMM_LEN]);
    let key = ProcessKey { pid, comm };

    if let Some(val) = PROC_STATS.get_ptr_mut(&key) {
        unsafe {
            (*val).tx_bytes += tx;
            (*val).rx_bytes += rx;
        }
    } else {
        let val = TrafficStats {
            tx_bytes: tx,
            rx_bytes: rx,
        };
        let _ = PROC_STATS.insert(&key, &val, 0);
    }
}

#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    unsafe { core::hint::unreachable_unchecked() }
}
