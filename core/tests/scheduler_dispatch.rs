use faultsched_core::{
    ActionModule, ActionRegistry, ActivationModel, Clock, Event, EventConfig, FaultContext,
    ProbabilityModel, Scheduler, SeededRandomSource, StaticActionModule, SystemClock,
    SystemComponent, SystemUnderTest, UdfValue,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn singular_config(fault: &str) -> EventConfig {
    EventConfig {
        fault: fault.into(),
        state_transition: false,
        a_model: ActivationModel::Singular,
        p_model: ProbabilityModel::Deterministic,
        mttf: 1,
        threshold: 0,
        effective_start: -1,
        effective_end: -1,
        standard_deviation: 1,
        shape: 1.0,
        random_range: 1,
        udf1: UdfValue::Null,
        udf2: UdfValue::Null,
        udf3: UdfValue::Null,
        udd: UdfValue::Null,
    }
}

#[tokio::test(start_paused = true)]
async fn dispatches_fired_event_to_registered_action() {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let now = clock.now();
    let ev = Event::new("svc".into(), "e".into(), singular_config("ping"), now);
    let component = SystemComponent::new(
        "svc".into(),
        vec!["host-1".into()],
        vec![ev],
        vec![],
        clock.as_ref(),
    );
    let sut = SystemUnderTest::new("t".into(), "demo".into(), vec![component]);

    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();
    let mut module = StaticActionModule::new();
    module.register(
        "ping",
        Arc::new(move |_ctx: &FaultContext| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        }),
    );
    let registry = ActionRegistry::new(Box::new(module) as Box<dyn ActionModule>);

    let mut scheduler = Scheduler::new(sut, registry, clock.clone(), Box::new(SeededRandomSource::new(1)), false);
    let handle = scheduler.shutdown_handle();

    let run = tokio::spawn(async move {
        scheduler.run().await;
    });

    tokio::time::advance(Duration::from_secs(1)).await;
    tokio::task::yield_now().await;
    handle.signal();
    run.await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn dry_run_never_invokes_the_registered_action() {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let now = clock.now();
    let ev = Event::new("svc".into(), "e".into(), singular_config("ping"), now);
    let component = SystemComponent::new(
        "svc".into(),
        vec!["host-1".into()],
        vec![ev],
        vec![],
        clock.as_ref(),
    );
    let sut = SystemUnderTest::new("t".into(), "demo".into(), vec![component]);

    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();
    let mut module = StaticActionModule::new();
    module.register(
        "ping",
        Arc::new(move |_ctx: &FaultContext| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        }),
    );
    let registry = ActionRegistry::new(Box::new(module) as Box<dyn ActionModule>);

    let mut scheduler = Scheduler::new(sut, registry, clock.clone(), Box::new(SeededRandomSource::new(1)), true);
    let handle = scheduler.shutdown_handle();

    let run = tokio::spawn(async move {
        scheduler.run().await;
    });

    tokio::time::advance(Duration::from_secs(1)).await;
    tokio::task::yield_now().await;
    handle.signal();
    run.await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn unresolvable_action_is_skipped_without_stopping_the_scheduler() {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let now = clock.now();
    let ev = Event::new("svc".into(), "e".into(), singular_config("nonexistent"), now);
    let component = SystemComponent::new(
        "svc".into(),
        vec!["host-1".into()],
        vec![ev],
        vec![],
        clock.as_ref(),
    );
    let sut = SystemUnderTest::new("t".into(), "demo".into(), vec![component]);

    // Empty module: every name resolves to None.
    let module = StaticActionModule::new();
    let registry = ActionRegistry::new(Box::new(module) as Box<dyn ActionModule>);

    let mut scheduler = Scheduler::new(sut, registry, clock.clone(), Box::new(SeededRandomSource::new(1)), false);
    let handle = scheduler.shutdown_handle();

    let run = tokio::spawn(async move {
        scheduler.run().await;
    });

    tokio::time::advance(Duration::from_secs(1)).await;
    tokio::task::yield_now().await;
    handle.signal();

    // The scheduler must still shut down cleanly rather than hang or panic.
    run.await.unwrap();
}
