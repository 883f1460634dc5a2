//! Shared primitive types used across the engine.

/// Identifier of a `SystemComponent`, unique within one SUT.
pub type ComponentId = String;

/// Identifier of an `Event`, unique within its owning component.
pub type EventId = String;

/// Name of a fault-action function, resolved through an `ActionModule`.
pub type ActionName = String;

/// An opaque identifier for a fault target (process name, URI, ...).
pub type Target = String;

/// Elapsed or threshold time, always expressed in whole seconds.
pub type Seconds = u64;
