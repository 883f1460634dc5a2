//! The tick loop: checkpoints the system under test once a second,
//! dispatches whatever fires to blocking-pool workers, and drains
//! in-flight work on shutdown.

use crate::clock::Clock;
use crate::component::FiredEvent;
use crate::registry::{ActionRegistry, FaultContext};
use crate::rng::RandomSource;
use crate::sut::SystemUnderTest;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinSet;

const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Runs a `SystemUnderTest` against an `ActionRegistry` until told to
/// stop. Owns the `Clock` and `RandomSource` the checkpoint algorithm
/// needs — nothing else touches them, so there is no locking on the hot
/// path.
pub struct Scheduler {
    sut: SystemUnderTest,
    registry: ActionRegistry,
    clock: Arc<dyn Clock>,
    rng: Box<dyn RandomSource>,
    dry_run: bool,
    shutdown_requested: Arc<AtomicBool>,
    shutdown_notify: Arc<Notify>,
    in_flight: JoinSet<()>,
}

/// A clonable shutdown switch. Signal handlers and timers call `signal()`;
/// the scheduler's tick loop observes it on its next `select!` wakeup.
#[derive(Clone)]
pub struct ShutdownHandle {
    requested: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ShutdownHandle {
    pub fn signal(&self) {
        self.requested.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }
}

impl Scheduler {
    pub fn new(
        sut: SystemUnderTest,
        registry: ActionRegistry,
        clock: Arc<dyn Clock>,
        rng: Box<dyn RandomSource>,
        dry_run: bool,
    ) -> Self {
        Self {
            sut,
            registry,
            clock,
            rng,
            dry_run,
            shutdown_requested: Arc::new(AtomicBool::new(false)),
            shutdown_notify: Arc::new(Notify::new()),
            in_flight: JoinSet::new(),
        }
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            requested: self.shutdown_requested.clone(),
            notify: self.shutdown_notify.clone(),
        }
    }

    fn is_shutting_down(&self) -> bool {
        self.shutdown_requested.load(Ordering::SeqCst)
    }

    /// Runs until shutdown is signaled, then drains whatever is still
    /// in flight before returning.
    pub async fn run(&mut self) {
        log::info!(
            target: &self.sut.system_name,
            "scheduler starting ({} components, dry_run={})",
            self.sut.components().len(),
            self.dry_run
        );

        while !self.is_shutting_down() {
            self.reap_finished();

            let fired = self.sut.checkpoint(self.clock.as_ref(), self.rng.as_mut());
            for event in fired {
                self.dispatch(event);
            }

            tokio::select! {
                _ = tokio::time::sleep(TICK_INTERVAL) => {}
                _ = self.shutdown_notify.notified() => {}
            }
        }

        log::info!(
            target: &self.sut.system_name,
            "scheduler shutting down, draining {} in-flight actions",
            self.in_flight.len()
        );
        while self.in_flight.join_next().await.is_some() {}
    }

    fn reap_finished(&mut self) {
        while let Some(result) = self.in_flight.try_join_next() {
            if let Err(join_err) = result {
                log::warn!(target: &self.sut.system_name, "fault action task panicked: {join_err}");
            }
        }
    }

    fn dispatch(&mut self, event: FiredEvent) {
        let target = self.select_target(&event);

        if self.dry_run {
            log::info!(
                target: &self.sut.system_name,
                "[dry-run] {} > would dispatch '{}' against target '{}'",
                event.component_id,
                event.fault,
                target
            );
            return;
        }

        let worker_target = format!("{}-{}", self.sut.fault_module, event.fault);

        let action = match self.registry.resolve(&event.fault) {
            Some(action) => action,
            None => {
                log::info!(
                    target: &self.sut.system_name,
                    "{} > fault action '{}' could not be resolved in module '{}', skipping",
                    event.component_id,
                    event.fault,
                    self.sut.fault_module
                );
                return;
            }
        };

        let ctx = FaultContext {
            component_id: event.component_id.clone(),
            event_id: event.event_id.clone(),
            target,
            udf1: event.udf1,
            udf2: event.udf2,
            udf3: event.udf3,
            udd: event.udd,
        };

        log::info!(target: &self.sut.system_name, "{} > dispatching '{}'", ctx.component_id, event.fault);
        self.in_flight.spawn_blocking(move || {
            log::info!(target: &worker_target, "{} > start", ctx.component_id);
            action(&ctx);
            log::info!(target: &worker_target, "{} > end", ctx.component_id);
        });
    }

    fn select_target(&mut self, event: &FiredEvent) -> String {
        if event.targets.is_empty() {
            return String::new();
        }
        let idx = self.rng.next_range_inclusive(0, event.targets.len() as i64 - 1) as usize;
        event.targets[idx].clone()
    }
}

