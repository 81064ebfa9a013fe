//! ProcfsNameOracle against a fake procfs tree and the real /proc.

#![cfg(target_os = "linux")]

use std::fs;
use std::path::PathBuf;

use netmon::process::{ProcessNameOracle, ProcfsNameOracle};

struct FakeProc {
    root: PathBuf,
}

impl FakeProc {
    fn new(tag: &str) -> Self {
        let root = std::env::temp_dir().join(format!("netmon-procfs-{tag}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(&root).unwrap();
        Self { root }
    }

    fn add(&self, pid: u32, comm: &[u8]) {
        let dir = self.root.join(pid.to_string());
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("comm"), comm).unwrap();
    }
}

impl Drop for FakeProc {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

#[test]
fn reads_comm_and_strips_newline() {
    let proc = FakeProc::new("comm");
    proc.add(100, b"nginx\n");
    let oracle = ProcfsNameOracle::with_root(&proc.root);
    assert_eq!(oracle.lookup(100).as_deref(), Some("nginx"));
}

#[test]
fn missing_pid_is_none() {
    let proc = FakeProc::new("missing");
    let oracle = ProcfsNameOracle::with_root(&proc.root);
    assert_eq!(oracle.lookup(4242), None);
}

#[test]
fn empty_comm_is_none() {
    let proc = FakeProc::new("empty");
    proc.add(7, b"\n");
    let oracle = ProcfsNameOracle::with_root(&proc.root);
    assert_eq!(oracle.lookup(7), None);
}

#[test]
fn own_process_is_resolvable() {
    let oracle = ProcfsNameOracle::new();
    let name = oracle.lookup(std::process::id()).unwrap();
    assert!(!name.is_empty());
    assert!(!name.ends_with('\n'));
}
