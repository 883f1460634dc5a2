//! `SystemUnderTest`: the ordered collection of components a scheduler
//! checkpoints together each tick.

use crate::clock::Clock;
use crate::component::{FiredEvent, SystemComponent};
use crate::rng::RandomSource;

/// The system under test: a name (for logging), the fault-action module
/// name components resolve actions through, and the components
/// themselves in the order they were declared in configuration.
pub struct SystemUnderTest {
    pub system_name: String,
    pub fault_module: String,
    components: Vec<SystemComponent>,
}

impl SystemUnderTest {
    pub fn new(system_name: String, fault_module: String, components: Vec<SystemComponent>) -> Self {
        Self {
            system_name,
            fault_module,
            components,
        }
    }

    pub fn components(&self) -> &[SystemComponent] {
        &self.components
    }

    /// Checkpoints every component in declaration order, concatenating
    /// whatever each one fires. Components do not interact with each
    /// other during a checkpoint.
    pub fn checkpoint(&mut self, clock: &dyn Clock, rng: &mut dyn RandomSource) -> Vec<FiredEvent> {
        let mut fired = Vec::new();
        for component in self.components.iter_mut() {
            fired.extend(component.checkpoint(clock, rng));
        }
        fired
    }
}

