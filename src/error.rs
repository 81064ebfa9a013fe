#[derive(Debug, thiserror::Error)]
pub enum NetmonError {
    #[error("{0}")]
    InsufficientPermission(String),
    #[error("cannot raise RLIMIT_MEMLOCK: {0}")]
    Rlimit(#[source] std::io::Error),
    #[error("kernel not supported: {0}")]
    KernelUnsupported(String),
    #[error("eBPF program error: {0}")]
    EbpfProgram(String),
    #[error("eBPF map error: {0}")]
    EbpfMap(String),
    #[error("serialization error: {0}")]
    Serialization(#[source] std::io::Error),
    #[error("TUI error: {0}")]
    Tui(#[source] std::io::Error),
    #[error("fatal: {0}")]
    Fatal(String),
}
