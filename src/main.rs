use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use clap::Parser;
use crossbeam_channel::{select, tick};

use netmon::capture::{self, CounterSnapshotSource};
use netmon::cli::{Cli, Mode, OutputFormat, ResolvedCli};
use netmon::engine::Monitor;
use netmon::error::NetmonError;
use netmon::model::Dashboard;
use netmon::output;
use netmon::privilege;
use netmon::process::{ProcessNameOracle, ProcfsNameOracle};
use netmon::tui;

/// Global shutdown flag, set by signal handlers.
static SHUTDOWN_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Upper bound on how long snapshot mode waits before re-checking shutdown.
const SHUTDOWN_POLL: Duration = Duration::from_millis(250);

extern "C" fn signal_handler(_sig: libc::c_int) {
    SHUTDOWN_REQUESTED.store(true, Ordering::Relaxed);
}

fn install_signal_handlers() {
    unsafe {
        libc::signal(
            libc::SIGTERM,
            signal_handler as *const () as libc::sighandler_t,
        );
        libc::signal(
            libc::SIGINT,
            signal_handler as *const () as libc::sighandler_t,
        );
    }
}

fn exit_code(err: &NetmonError) -> i32 {
    match err {
        NetmonError::InsufficientPermission(_) => 1,
        NetmonError::Rlimit(_)
        | NetmonError::KernelUnsupported(_)
        | NetmonError::EbpfProgram(_)
        | NetmonError::EbpfMap(_) => 2,
        NetmonError::Serialization(_) | NetmonError::Tui(_) | NetmonError::Fatal(_) => 4,
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse().resolve();
    let is_tui = cli.is_monitor();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| run(cli)));

    // Snapshot never enters the alternate screen.
    if is_tui {
        tui::restore_terminal();
    }

    match result {
        Ok(Ok(())) => std::process::exit(0),
        Ok(Err(e)) => {
            eprintln!("error: {e}");
            std::process::exit(exit_code(&e));
        }
        Err(_) => {
            eprintln!("error: fatal: unexpected panic");
            std::process::exit(4);
        }
    }
}

fn run(cli: ResolvedCli) -> Result<(), NetmonError> {
    install_signal_handlers();

    privilege::check_root()?;
    privilege::raise_memlock_rlimit()?;

    let mut source = capture::ebpf::open_counter_source(&cli.bpf_object)?;
    let oracle = ProcfsNameOracle::new();
    let mut monitor = Monitor::new();
    log::info!(
        "counters attached from {}, tick interval {:?}",
        cli.bpf_object.display(),
        cli.interval
    );

    match cli.mode {
        Mode::Monitor { no_color } => tui::run_tui(
            &mut monitor,
            source.as_mut(),
            &oracle,
            cli.interval,
            no_color,
            &SHUTDOWN_REQUESTED,
        ),
        Mode::Snapshot { format, ticks } => run_snapshot(
            &mut monitor,
            source.as_mut(),
            &oracle,
            cli.interval,
            ticks,
            format,
        ),
    }
}

/// Run `ticks` ticks, then print the last dashboard.
///
/// An interrupt stops early and prints whatever has been gathered so far.
fn run_snapshot(
    monitor: &mut Monitor,
    source: &mut dyn CounterSnapshotSource,
    oracle: &dyn ProcessNameOracle,
    interval: Duration,
    ticks: u32,
    format: OutputFormat,
) -> Result<(), NetmonError> {
    log::info!("snapshot: running {ticks} ticks");
    let ticker = tick(interval);
    let mut dashboard: Dashboard = monitor.tick(source, oracle, Instant::now());

    while monitor.ticks() < u64::from(ticks) {
        if SHUTDOWN_REQUESTED.load(Ordering::Relaxed) {
            log::info!("interrupted after {} ticks", monitor.ticks());
            break;
        }
        select! {
            recv(ticker) -> at => {
                let now = at.unwrap_or_else(|_| Instant::now());
                dashboard = monitor.tick(source, oracle, now);
            }
            default(SHUTDOWN_POLL) => {}
        }
    }

    log::info!(
        "snapshot: {} ticks, {} processes seen",
        monitor.ticks(),
        monitor.registry().len()
    );
    output::write_snapshot(&dashboard, format, &mut io::stdout().lock())
}
