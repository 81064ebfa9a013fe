// Linux process names from procfs.

use std::fs;
use std::path::PathBuf;

use super::ProcessNameOracle;

/// Reads `<root>/<pid>/comm`.
///
/// Short-lived processes are often gone by the time the tick runs; that is
/// reported as `None` and the registry falls back to thread names.
#[derive(Clone, Debug)]
pub struct ProcfsNameOracle {
    root: PathBuf,
}

impl ProcfsNameOracle {
    pub fn new() -> Self {
        Self::with_root("/proc")
    }

    /// Use an alternate procfs mount (or a fixture directory in tests).
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for ProcfsNameOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessNameOracle for ProcfsNameOracle {
    fn lookup(&self, pid: u32) -> Option<String> {
        let path = self.root.join(pid.to_string()).join("comm");
        let raw = fs::read(&path).ok()?;
        let name = parse_comm_file(&raw);
        if name.is_empty() { None } else { Some(name) }
    }
}

/// Strip the single trailing newline the kernel appends to `comm`.
fn parse_comm_file(raw: &[u8]) -> String {
    let trimmed = raw.strip_suffix(b"\n").unwrap_or(raw);
    String::from_utf8_lossy(trimmed).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_comm_file_strips_newline() {
        assert_eq!(parse_comm_file(b"firefox\n"), "firefox");
    }

    #[test]
    fn parse_comm_file_keeps_inner_spaces() {
        assert_eq!(parse_comm_file(b"Web Content\n"), "Web Content");
    }

    #[test]
    fn parse_comm_file_without_newline() {
        assert_eq!(parse_comm_file(b"sshd"), "sshd");
    }

    #[test]
    fn parse_comm_file_empty() {
        assert_eq!(parse_comm_file(b""), "");
        assert_eq!(parse_comm_file(b"\n"), "");
    }

    #[test]
    fn lookup_missing_pid_is_none() {
        let oracle = ProcfsNameOracle::with_root(std::env::temp_dir().join("netmon-no-such-proc"));
        assert_eq!(oracle.lookup(1), None);
    }
}
