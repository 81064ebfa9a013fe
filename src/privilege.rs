use std::io;

use crate::error::NetmonError;

/// Loading kprobe programs requires root (or CAP_BPF + CAP_PERFMON).
pub fn check_root() -> Result<(), NetmonError> {
    if unsafe { libc::geteuid() } != 0 {
        return Err(NetmonError::InsufficientPermission(
            "netmon must run as root to load eBPF programs: sudo netmon".to_string(),
        ));
    }
    Ok(())
}

/// Lift RLIMIT_MEMLOCK so map and program memory can be locked.
///
/// Kernels before 5.11 charge BPF memory against this limit, and the
/// default (often 64 KiB) is too small for the counter map.
pub fn raise_memlock_rlimit() -> Result<(), NetmonError> {
    let rlim = libc::rlimit {
        rlim_cur: libc::RLIM_INFINITY,
        rlim_max: libc::RLIM_INFINITY,
    };
    let ret = unsafe { libc::setrlimit(libc::RLIMIT_MEMLOCK, &rlim) };
    if ret != 0 {
        return Err(NetmonError::Rlimit(io::Error::last_os_error()));
    }
    log::debug!("RLIMIT_MEMLOCK raised to infinity");
    Ok(())
}
