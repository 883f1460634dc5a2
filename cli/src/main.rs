//! faultsched: runs one scheduler per configuration file until a shutdown
//! signal or session-duration bound is reached.
//!
//! Usage:
//!   faultsched [OPTIONS] <FILE>...
//!   faultsched -d -r config.json
//!   cat config.json | faultsched -

#[cfg(feature = "demo")]
mod actions;
mod logging;

use clap::Parser;
use faultsched_core::{config, ActionRegistry, Scheduler, SchedulerError, SystemClock, SystemRandomSource};
use std::sync::Arc;
use tokio::signal::unix::{signal, SignalKind};

#[derive(Parser, Debug)]
#[command(name = "faultsched", about = "distributed fault-injection scheduler")]
struct Cli {
    /// Enable debug logging.
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    /// Use the export log format (unix-seconds|task-name|message).
    #[arg(short = 'e', long = "export")]
    export: bool,

    /// Report firings but do not dispatch fault actions.
    #[arg(short = 'r', long = "dryrun")]
    dryrun: bool,

    /// Total session duration in seconds; omit to run until a signal.
    #[arg(short = 't', long = "time")]
    time: Option<u64>,

    /// One configuration document per SUT. `-` reads from stdin.
    #[arg(required = true)]
    files: Vec<String>,
}

const EXIT_OK: i32 = 0;
const EXIT_CONTENT_ERROR: i32 = 1;
const EXIT_IO_ERROR: i32 = 2;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.debug, cli.export);

    let stdin_count = cli.files.iter().filter(|f| f.as_str() == "-").count();
    if stdin_count > 1 {
        log::error!("at most one FILE argument may be '-' (stdin)");
        std::process::exit(EXIT_IO_ERROR);
    }

    std::process::exit(run(cli).await);
}

async fn run(cli: Cli) -> i32 {
    let clock: Arc<dyn faultsched_core::Clock> = Arc::new(SystemClock);

    let mut schedulers = Vec::new();
    for file in &cli.files {
        let doc = match config::SutConfigDoc::load(file) {
            Ok(doc) => doc,
            Err(faultsched_core::ConfigError::Io { path, source }) => {
                log::error!("cannot read '{}': {}", path.display(), source);
                return EXIT_IO_ERROR;
            }
            Err(err) => {
                log::error!("{err}");
                return EXIT_CONTENT_ERROR;
            }
        };

        let sut = match config::build_sut(&doc, clock.as_ref()) {
            Ok(sut) => sut,
            Err(err) => {
                log::error!("{err}");
                return EXIT_CONTENT_ERROR;
            }
        };

        let registry = match build_registry(doc.fault_module_label()) {
            Ok(registry) => registry,
            Err(err) => {
                log::error!("{err}");
                return EXIT_CONTENT_ERROR;
            }
        };

        let scheduler = Scheduler::new(
            sut,
            registry,
            clock.clone(),
            Box::new(SystemRandomSource::new()),
            cli.dryrun,
        );
        schedulers.push(scheduler);
    }

    let handles: Vec<_> = schedulers.iter().map(Scheduler::shutdown_handle).collect();
    let mut running: Vec<_> = schedulers
        .into_iter()
        .map(|mut s| tokio::spawn(async move { s.run().await }))
        .collect();

    wait_for_shutdown_trigger(cli.time).await;
    log::info!("shutdown triggered, draining all schedulers");
    for handle in &handles {
        handle.signal();
    }

    for task in running.drain(..) {
        let _ = task.await;
    }

    EXIT_OK
}

/// Resolves SIGINT, SIGTERM, SIGHUP, or an optional `-t` session-duration
/// timer (this crate's equivalent of a self-raised SIGALRM), whichever
/// comes first.
async fn wait_for_shutdown_trigger(session_duration: Option<u64>) {
    let mut sigint = signal(SignalKind::interrupt()).expect("failed to install SIGINT handler");
    let mut sigterm = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
    let mut sighup = signal(SignalKind::hangup()).expect("failed to install SIGHUP handler");

    let timer = async {
        match session_duration {
            Some(secs) => tokio::time::sleep(std::time::Duration::from_secs(secs)).await,
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        _ = sigint.recv() => log::info!("received SIGINT"),
        _ = sigterm.recv() => log::info!("received SIGTERM"),
        _ = sighup.recv() => log::info!("received SIGHUP"),
        _ = timer => log::info!("session duration elapsed"),
    }
}

#[cfg(feature = "demo")]
fn build_registry(fault_module: &str) -> Result<ActionRegistry, SchedulerError> {
    if fault_module == "demo" {
        Ok(actions::demo_registry())
    } else {
        Err(SchedulerError::ActionModuleLoad {
            module: fault_module.to_string(),
            message: format!("unknown fault module '{fault_module}', only 'demo' is built in"),
        })
    }
}

#[cfg(not(feature = "demo"))]
fn build_registry(fault_module: &str) -> Result<ActionRegistry, SchedulerError> {
    Err(SchedulerError::ActionModuleLoad {
        module: fault_module.to_string(),
        message: "no fault action module is compiled in (build with --features demo)".to_string(),
    })
}

