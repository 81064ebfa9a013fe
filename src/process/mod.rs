// Process name lookup.
//
// The registry asks a `ProcessNameOracle` for the operating system's name of
// a PID before falling back to kernel-observed thread names. On Linux the
// oracle reads /proc/<pid>/comm.

pub mod linux;

pub use linux::ProcfsNameOracle;

/// Best-effort PID -> process name lookup.
///
/// Must return `None` (never panic, never block) when the process is gone or
/// its metadata is unreadable.
pub trait ProcessNameOracle {
    fn lookup(&self, pid: u32) -> Option<String>;
}

impl<T: ProcessNameOracle + ?Sized> ProcessNameOracle for &T {
    fn lookup(&self, pid: u32) -> Option<String> {
        (**self).lookup(pid)
    }
}
