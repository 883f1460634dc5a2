//! Fault-action resolution: turning a `fault` name from configuration
//! into a callable, and the context a callable is invoked with.
//!
//! Actions are registered explicitly by name, never discovered by
//! reflection — a `StaticActionModule` is just a `HashMap` built by the
//! embedding binary.

use crate::event::UdfValue;
use crate::types::{ActionName, ComponentId, EventId, Target};
use std::collections::HashMap;
use std::sync::Arc;

/// Everything a fault action needs to run, assembled by the scheduler
/// from a `FiredEvent` plus the target chosen for this dispatch.
pub struct FaultContext {
    pub component_id: ComponentId,
    pub event_id: EventId,
    pub target: Target,
    pub udf1: UdfValue,
    pub udf2: UdfValue,
    pub udf3: UdfValue,
    pub udd: UdfValue,
}

/// A fault action: a plain function over a `FaultContext`. Actions run on
/// a blocking-pool thread, so they may block or panic without stalling
/// the scheduler's tick loop — a panic only fails that one dispatch.
pub type FaultAction = Arc<dyn Fn(&FaultContext) + Send + Sync>;

/// Something that can resolve a fault name to a callable. Implemented by
/// `StaticActionModule`; a separate implementation could load actions
/// from a plugin crate without changing anything else in the engine.
pub trait ActionModule: Send + Sync {
    fn resolve(&self, name: &str) -> Option<FaultAction>;
}

/// An explicit name-to-action table built by the embedding binary at
/// startup. This is the only `ActionModule` the core ships; there is no
/// dynamic loading or reflection.
#[derive(Default)]
pub struct StaticActionModule {
    actions: HashMap<ActionName, FaultAction>,
}

impl StaticActionModule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<ActionName>, action: FaultAction) -> &mut Self {
        self.actions.insert(name.into(), action);
        self
    }
}

impl ActionModule for StaticActionModule {
    fn resolve(&self, name: &str) -> Option<FaultAction> {
        self.actions.get(name).cloned()
    }
}

/// Wraps an `ActionModule` with a resolution cache so a scheduler that
/// dispatches the same fault name every tick does not pay a map lookup
/// through the module on every hit after the first.
pub struct ActionRegistry {
    module: Box<dyn ActionModule>,
    cache: HashMap<ActionName, Option<FaultAction>>,
}

impl ActionRegistry {
    pub fn new(module: Box<dyn ActionModule>) -> Self {
        Self {
            module,
            cache: HashMap::new(),
        }
    }

    /// Resolves `name`, caching both hits and misses so a persistently
    /// unresolvable fault name does not re-query the module every tick.
    pub fn resolve(&mut self, name: &str) -> Option<FaultAction> {
        if let Some(cached) = self.cache.get(name) {
            return cached.clone();
        }
        let resolved = self.module.resolve(name);
        self.cache.insert(name.to_string(), resolved.clone());
        resolved
    }
}

