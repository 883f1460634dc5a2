//! Deterministic, injectable-time/randomness fault injection engine.
//!
//! A `SystemUnderTest` owns an ordered set of `SystemComponent`s, each
//! cycling between an operable and a nonoperable `Event` list. A
//! `Scheduler` checkpoints the SUT once a second and dispatches whatever
//! fires through an `ActionRegistry` to blocking-pool workers.

pub mod action_doc;
pub mod clock;
pub mod component;
pub mod config;
pub mod error;
pub mod event;
pub mod hazard;
pub mod registry;
pub mod rng;
pub mod scheduler;
pub mod sut;
pub mod types;

pub use clock::{Clock, FakeClock, SystemClock};
pub use component::{ComponentState, FiredEvent, SystemComponent};
pub use config::{build_sut, load_sut, ComponentConfigDoc, EventConfigDoc, SutConfigDoc};
pub use error::{ConfigError, ConfigResult, SchedulerError, SchedulerResult};
pub use event::{ActivationModel, Event, EventConfig, ProbabilityModel, RandomWindowType, UdfValue};
pub use registry::{ActionModule, ActionRegistry, FaultAction, FaultContext, StaticActionModule};
pub use rng::{RandomSource, SeededRandomSource, SystemRandomSource};
pub use scheduler::{Scheduler, ShutdownHandle};
pub use sut::SystemUnderTest;
