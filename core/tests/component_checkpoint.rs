use faultsched_core::{
    ActivationModel, Clock, ComponentState, Event, EventConfig, FakeClock, ProbabilityModel,
    SeededRandomSource, SystemComponent, UdfValue,
};
use std::time::Duration;

fn deterministic_config(fault: &str, state_transition: bool) -> EventConfig {
    EventConfig {
        fault: fault.into(),
        state_transition,
        a_model: ActivationModel::Recurring,
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

#[test]
fn transitioning_event_swaps_active_event_list() {
    let clock = FakeClock::new();
    let mut rng = SeededRandomSource::new(1);
    let now = clock.now();

    let kill = Event::new("svc".into(), "kill".into(), deterministic_config("kill", true), now);
    let revive = Event::new("svc".into(), "revive".into(), deterministic_config("revive", true), now);

    let mut component =
        SystemComponent::new("svc".into(), vec!["host-1".into()], vec![kill], vec![revive], &clock);

    assert_eq!(component.state(), ComponentState::Operable);
    let fired = component.checkpoint(&clock, &mut rng);
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].fault, "kill");
    assert_eq!(component.state(), ComponentState::Nonoperable);

    clock.advance(Duration::from_secs(1));
    let fired = component.checkpoint(&clock, &mut rng);
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].fault, "revive");
    assert_eq!(component.state(), ComponentState::Operable);
}

#[test]
fn fired_event_carries_component_targets() {
    let clock = FakeClock::new();
    let mut rng = SeededRandomSource::new(1);
    let now = clock.now();
    let ev = Event::new("svc".into(), "e".into(), deterministic_config("noop", false), now);
    let mut component = SystemComponent::new(
        "svc".into(),
        vec!["host-1".into(), "host-2".into()],
        vec![ev],
        vec![],
        &clock,
    );
    let fired = component.checkpoint(&clock, &mut rng);
    assert_eq!(fired[0].targets.len(), 2);
}
