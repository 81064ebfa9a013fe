// eBPF counter source: kprobes on the TCP/UDP send and receive paths.
//
// The kernel side (netmon-ebpf) accumulates per-(pid, comm) byte counters in
// a per-CPU hash map. This module checks that the running kernel can host
// the program, loads and attaches it with aya, and turns each map walk into
// a `Vec<RawCounterRow>`.
//
// Requires: Linux kernel 5.8+, BTF enabled, root (or CAP_BPF + CAP_PERFMON).

use std::path::Path;

use crate::capture::CounterSnapshotSource;
use crate::error::NetmonError;

// ---------------------------------------------------------------------------
// eBPF availability detection
// ---------------------------------------------------------------------------

/// Check if the running kernel supports the features the probes need.
///
/// Requirements:
/// 1. Kernel version >= 5.8
/// 2. BTF type information available (/sys/kernel/btf/vmlinux)
pub fn ebpf_available() -> bool {
    if !kernel_version_sufficient() {
        log::debug!("ebpf: kernel version < 5.8, not available");
        return false;
    }

    if !btf_available() {
        log::debug!("ebpf: BTF not available (/sys/kernel/btf/vmlinux missing)");
        return false;
    }

    log::debug!("ebpf: kernel and BTF checks passed");
    true
}

fn kernel_version_sufficient() -> bool {
    let version = match std::fs::read_to_string("/proc/version") {
        Ok(v) => v,
        Err(_) => return false,
    };

    parse_kernel_version(&version)
        .map(|(major, minor)| major > 5 || (major == 5 && minor >= 8))
        .unwrap_or(false)
}

/// Extract (major, minor) from a `/proc/version` string.
///
/// Looks for the "version" keyword and parses the following token, so
/// strings like `"Linux (compiled by user.name) version 5.15.0"` still work.
fn parse_kernel_version(version_str: &str) -> Option<(u32, u32)> {
    let tokens: Vec<&str> = version_str.split_whitespace().collect();

    let version_part = tokens
        .iter()
        .position(|&t| t.eq_ignore_ascii_case("version"))
        .and_then(|i| tokens.get(i + 1))?;

    let mut parts = version_part.split('.');
    let major: u32 = parts.next()?.parse().ok()?;
    // Minor might be "8" or "8-arch1"; keep the numeric prefix.
    let minor: u32 = parts
        .next()?
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect::<String>()
        .parse()
        .ok()?;

    Some((major, minor))
}

fn btf_available() -> bool {
    Path::new("/sys/kernel/btf/vmlinux").exists()
}

// ---------------------------------------------------------------------------
// Source construction
// ---------------------------------------------------------------------------

/// Load the kernel object at `object_path` and return a live counter source.
#[cfg(feature = "ebpf")]
pub fn open_counter_source(
    object_path: &Path,
) -> Result<Box<dyn CounterSnapshotSource>, NetmonError> {
    if !ebpf_available() {
        return Err(NetmonError::KernelUnsupported(
            "eBPF kprobes need Linux 5.8+ with BTF (/sys/kernel/btf/vmlinux)".to_string(),
        ));
    }
    Ok(Box::new(loader::EbpfCounterSource::load(object_path)?))
}

#[cfg(not(feature = "ebpf"))]
pub fn open_counter_source(
    _object_path: &Path,
) -> Result<Box<dyn CounterSnapshotSource>, NetmonError> {
    Err(NetmonError::EbpfProgram(
        "eBPF support not compiled in (build with --features ebpf)".to_string(),
    ))
}

#[cfg(feature = "ebpf")]
mod loader {
    use std::path::Path;

    use aya::Ebpf;
    use aya::maps::{MapData, PerCpuHashMap};
    use aya::programs::KProbe;
    use netmon_ebpf_common::{PROC_STATS_MAP, ProcessKey, TrafficStats};

    use crate::capture::{CounterSnapshotSource, RawCounterRow, parse_comm};
    use crate::error::NetmonError;

    struct Probe {
        program: &'static str,
        function: &'static str,
        required: bool,
    }

    /// TCP probes are mandatory; UDP probes are best-effort because some
    /// kernels inline or rename `udp_recvmsg`.
    const PROBES: &[Probe] = &[
        Probe {
            program: "tcp_sendmsg",
            function: "tcp_sendmsg",
            required: true,
        },
        Probe {
            program: "tcp_cleanup_rbuf",
            function: "tcp_cleanup_rbuf",
            required: true,
        },
        Probe {
            program: "udp_sendmsg",
            function: "udp_sendmsg",
            required: false,
        },
        Probe {
            program: "udp_recvmsg",
            function: "udp_recvmsg",
            required: false,
        },
        Probe {
            program: "udp_recvmsg_ret",
            function: "udp_recvmsg",
            required: false,
        },
    ];

    /// Loaded kprobe program plus its counter map.
    ///
    /// Dropping this detaches every probe.
    pub struct EbpfCounterSource {
        _ebpf: Ebpf,
        stats: PerCpuHashMap<MapData, ProcessKey, TrafficStats>,
    }

    impl EbpfCounterSource {
        pub fn load(object_path: &Path) -> Result<Self, NetmonError> {
            let mut ebpf = Ebpf::load_file(object_path).map_err(|e| {
                NetmonError::EbpfProgram(format!("load {}: {e}", object_path.display()))
            })?;

            for probe in PROBES {
                match attach(&mut ebpf, probe) {
                    Ok(()) => log::info!("attached {} -> {}", probe.program, probe.function),
                    Err(e) if !probe.required => {
                        log::warn!("optional probe {} not attached: {e}", probe.program);
                    }
                    Err(e) => return Err(e),
                }
            }

            let map = ebpf
                .take_map(PROC_STATS_MAP)
                .ok_or_else(|| NetmonError::EbpfMap(format!("map {PROC_STATS_MAP} not found")))?;
            let stats = PerCpuHashMap::try_from(map)
                .map_err(|e| NetmonError::EbpfMap(format!("{PROC_STATS_MAP}: {e}")))?;

            Ok(Self { _ebpf: ebpf, stats })
        }
    }

    fn attach(ebpf: &mut Ebpf, probe: &Probe) -> Result<(), NetmonError> {
        let program: &mut KProbe = ebpf
            .program_mut(probe.program)
            .ok_or_else(|| NetmonError::EbpfProgram(format!("program {} missing", probe.program)))?
            .try_into()
            .map_err(|e| NetmonError::EbpfProgram(format!("{}: {e}", probe.program)))?;
        program
            .load()
            .map_err(|e| NetmonError::EbpfProgram(format!("load {}: {e}", probe.program)))?;
        program
            .attach(probe.function, 0)
            .map_err(|e| NetmonError::EbpfProgram(format!("attach {}: {e}", probe.function)))?;
        Ok(())
    }

    impl CounterSnapshotSource for EbpfCounterSource {
        fn snapshot(&mut self) -> Result<Vec<RawCounterRow>, NetmonError> {
            let mut rows = Vec::new();
            for entry in self.stats.iter() {
                let (key, per_cpu) = match entry {
                    Ok(kv) => kv,
                    Err(e) => {
                        // Entry deleted mid-walk or similar; skip it.
                        log::debug!("skipping counter entry: {e}");
                        continue;
                    }
                };
                let (tx_bytes, rx_bytes) = per_cpu.iter().fold((0u64, 0u64), |(tx, rx), v| {
                    (tx.saturating_add(v.tx_bytes), rx.saturating_add(v.rx_bytes))
                });
                rows.push(RawCounterRow {
                    pid: key.pid,
                    thread_name: parse_comm(&key.comm),
                    tx_bytes,
                    rx_bytes,
                });
            }
            Ok(rows)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
