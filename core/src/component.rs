//! `SystemComponent`: the two-state (operable/nonoperable) state machine
//! that owns one set of events per state and runs the checkpoint algorithm.

use crate::clock::Clock;
use crate::event::Event;
use crate::rng::RandomSource;
use crate::types::{ComponentId, Target};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentState {
    Operable,
    Nonoperable,
}

impl ComponentState {
    fn toggled(self) -> Self {
        match self {
            ComponentState::Operable => ComponentState::Nonoperable,
            ComponentState::Nonoperable => ComponentState::Operable,
        }
    }
}

/// One event that fired during a checkpoint, carrying everything the
/// scheduler needs to dispatch it without borrowing the component again.
pub struct FiredEvent {
    pub component_id: ComponentId,
    pub event_id: crate::types::EventId,
    pub fault: crate::types::ActionName,
    pub targets: Arc<Vec<Target>>,
    pub udf1: crate::event::UdfValue,
    pub udf2: crate::event::UdfValue,
    pub udf3: crate::event::UdfValue,
    pub udd: crate::event::UdfValue,
}

/// A component of the system under test. Holds one event list per state;
/// only the current state's list is evaluated on each checkpoint.
pub struct SystemComponent {
    pub id: ComponentId,
    targets: Arc<Vec<Target>>,
    state: ComponentState,
    operable_events: Vec<Event>,
    nonoperable_events: Vec<Event>,
    life_start_time: Instant,
    last_event_time: Instant,
}

impl SystemComponent {
    pub fn new(
        id: ComponentId,
        targets: Vec<Target>,
        operable_events: Vec<Event>,
        nonoperable_events: Vec<Event>,
        clock: &dyn Clock,
    ) -> Self {
        let now = clock.now();
        Self {
            id,
            targets: Arc::new(targets),
            state: ComponentState::Operable,
            operable_events,
            nonoperable_events,
            life_start_time: now,
            last_event_time: now,
        }
    }

    pub fn state(&self) -> ComponentState {
        self.state
    }

    fn events_for_current_state_mut(&mut self) -> &mut Vec<Event> {
        match self.state {
            ComponentState::Operable => &mut self.operable_events,
            ComponentState::Nonoperable => &mut self.nonoperable_events,
        }
    }

    /// Evaluates every event in the current state's list against a single
    /// pre-update `last_event_time`, firing zero or more of them in
    /// declaration order. Each firing event is marked executed, advances
    /// `last_event_time` to `now`, and — if it is a state-transition event
    /// — toggles `state`, which changes which list subsequent events in
    /// the same tick (and every future tick) are drawn from.
    pub fn checkpoint(&mut self, clock: &dyn Clock, rng: &mut dyn RandomSource) -> Vec<FiredEvent> {
        let now = clock.now();
        let life_start = self.life_start_time;
        let last_fire = self.last_event_time;
        let mut fired = Vec::new();
        let id = self.id.clone();
        let targets = self.targets.clone();
        let mut any_fired = false;
        let mut toggle = false;

        let events = self.events_for_current_state_mut();
        for event in events.iter_mut() {
            if event.is_active(now, life_start, last_fire, rng) {
                event.set_executed();
                fired.push(FiredEvent {
                    component_id: id.clone(),
                    event_id: event.id.clone(),
                    fault: event.fault_name().to_string(),
                    targets: targets.clone(),
                    udf1: event.config.udf1.clone(),
                    udf2: event.config.udf2.clone(),
                    udf3: event.config.udf3.clone(),
                    udd: event.config.udd.clone(),
                });
                any_fired = true;
                if event.is_state_transition() {
                    toggle = !toggle;
                }
            }
        }

        if any_fired {
            self.last_event_time = now;
        }
        if toggle {
            self.state = self.state.toggled();
        }

        fired
    }
}

