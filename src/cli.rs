use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Default install location of the compiled kernel program.
pub const DEFAULT_BPF_OBJECT: &str = "/usr/lib/netmon/netmon-ebpf.o";

#[derive(Parser, Debug)]
#[command(
    name = "netmon",
    version,
    about = "Per-process TCP/UDP traffic monitor (eBPF)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Launch interactive TUI (default when no subcommand given)
    Monitor(MonitorArgs),
    /// Run a fixed number of ticks and print the result to stdout
    Snapshot(SnapshotArgs),
}

/// Arguments shared by all modes.
#[derive(Args, Debug, Clone)]
pub struct TickArgs {
    /// Tick interval in seconds [default: 1.0]
    #[arg(long, default_value_t = 1.0, value_parser = validate_interval)]
    pub interval: f64,

    /// Compiled netmon-ebpf object to load
    #[arg(long, default_value = DEFAULT_BPF_OBJECT)]
    pub bpf_object: PathBuf,
}

impl Default for TickArgs {
    fn default() -> Self {
        Self {
            interval: 1.0,
            bpf_object: PathBuf::from(DEFAULT_BPF_OBJECT),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct MonitorArgs {
    #[command(flatten)]
    pub tick: TickArgs,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SnapshotArgs {
    #[command(flatten)]
    pub tick: TickArgs,

    /// Output format [default: tsv]
    #[arg(long, default_value = "tsv")]
    pub format: OutputFormat,

    /// Number of ticks to run before printing [default: 5]
    #[arg(long, default_value_t = 5, value_parser = validate_ticks)]
    pub ticks: u32,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Tsv,
    Json,
    Pretty,
}

fn validate_interval(s: &str) -> Result<f64, String> {
    let val: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if val < 0.1 {
        Err("interval must be at least 0.1 seconds".to_string())
    } else if val > 10.0 {
        Err("interval must be at most 10.0 seconds".to_string())
    } else {
        Ok(val)
    }
}

fn validate_ticks(s: &str) -> Result<u32, String> {
    let val: u32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid integer"))?;
    if val < 1 {
        Err("ticks must be at least 1".to_string())
    } else if val > 600 {
        Err("ticks must be at most 600".to_string())
    } else {
        Ok(val)
    }
}

/// Which front end to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Monitor { no_color: bool },
    Snapshot { format: OutputFormat, ticks: u32 },
}

/// Flattened configuration after resolving subcommand variants.
#[derive(Debug, Clone)]
pub struct ResolvedCli {
    pub interval: Duration,
    pub bpf_object: PathBuf,
    pub mode: Mode,
}

impl ResolvedCli {
    pub fn is_monitor(&self) -> bool {
        matches!(self.mode, Mode::Monitor { .. })
    }
}

impl Cli {
    pub fn resolve(self) -> ResolvedCli {
        let (tick, mode) = match self.command {
            Some(Command::Monitor(m)) => (
                m.tick,
                Mode::Monitor {
                    no_color: m.no_color,
                },
            ),
            Some(Command::Snapshot(s)) => (
                s.tick,
                Mode::Snapshot {
                    format: s.format,
                    ticks: s.ticks,
                },
            ),
            None => (TickArgs::default(), Mode::Monitor { no_color: false }),
        };
        ResolvedCli {
            interval: Duration::from_secs_f64(tick.interval),
            bpf_object: tick.bpf_object,
            mode,
        }
    }
}
