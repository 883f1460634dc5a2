//! Event configuration and the activation decision (`is_active`).
//!
//! RULE: mutation of `executed` and the random-model precomputation slot
//! happens only inside `is_active`, which only the owning component's
//! `checkpoint()` calls. Workers never see `&mut Event`.

use crate::hazard;
use crate::rng::RandomSource;
use crate::types::{ActionName, ComponentId, EventId};
use std::time::{Duration, Instant};

/// Whether an event can fire more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationModel {
    Recurring,
    Singular,
}

/// Which random-window behavior the `random` probability model uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandomWindowType {
    Fixed,
    Sliding,
}

/// The firing-probability model. `Random` carries its window type since
/// `random_window_type` only has meaning for that model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbabilityModel {
    Deterministic,
    Exponential,
    Normal,
    Weibull,
    Random(RandomWindowType),
}

/// Opaque payload carried verbatim from configuration to a fault action.
/// The core never interprets these — only the action implementation does.
#[derive(Debug, Clone, PartialEq)]
pub enum UdfValue {
    Null,
    String(String),
    Integer(i64),
    Map(serde_json::Map<String, serde_json::Value>),
}

impl Default for UdfValue {
    fn default() -> Self {
        UdfValue::Null
    }
}

/// Immutable, validated configuration for one event, shared by every
/// `instances` copy constructed from the same JSON definition.
#[derive(Debug, Clone)]
pub struct EventConfig {
    pub fault: ActionName,
    pub state_transition: bool,
    pub a_model: ActivationModel,
    pub p_model: ProbabilityModel,
    pub mttf: u64,
    pub threshold: u64,
    pub effective_start: i64,
    pub effective_end: i64,
    pub standard_deviation: u64,
    pub shape: f64,
    pub random_range: u64,
    pub udf1: UdfValue,
    pub udf2: UdfValue,
    pub udf3: UdfValue,
    pub udd: UdfValue,
}

/// One firing unit bound to a component. Owns its configuration and the
/// mutable runtime state the activation algorithm needs: whether it has
/// already fired, and — for the `random` model only — the armed fire time
/// and current window end.
pub struct Event {
    pub id: EventId,
    pub component_id: ComponentId,
    pub config: EventConfig,
    executed: bool,
    // `random` model only. `armed_fire_time` is `None` except between the
    // moment a window computes its next fire time and that time arriving.
    window_end: Instant,
    armed_fire_time: Option<Instant>,
}

impl Event {
    /// `now` is the wall time of construction: the `random` model's first
    /// window closes promptly because `window_end` starts there.
    pub fn new(component_id: ComponentId, id: EventId, config: EventConfig, now: Instant) -> Self {
        Self {
            id,
            component_id,
            config,
            executed: false,
            window_end: now,
            armed_fire_time: None,
        }
    }

    pub fn fault_name(&self) -> &str {
        &self.config.fault
    }

    pub fn is_state_transition(&self) -> bool {
        self.config.state_transition
    }

    pub fn is_singular(&self) -> bool {
        self.config.a_model == ActivationModel::Singular
    }

    pub fn set_executed(&mut self) {
        self.executed = true;
    }

    /// The activation decision. `now`, `life_start`, and `last_fire` must
    /// all come from the same `Clock`; only their differences matter.
    pub fn is_active(
        &mut self,
        now: Instant,
        life_start: Instant,
        last_fire: Instant,
        rng: &mut dyn RandomSource,
    ) -> bool {
        // 1. Singular gate.
        if self.executed && self.is_singular() {
            return false;
        }

        // 2. Effective window.
        if self.config.effective_start >= 0 {
            let elapsed_life = now.saturating_duration_since(life_start).as_secs() as i64;
            let before_start = elapsed_life < self.config.effective_start;
            let after_end =
                self.config.effective_end != -1 && elapsed_life > self.config.effective_end;
            if before_start || after_end {
                return false;
            }
        }

        // 3. Threshold gate.
        let elapsed = now.saturating_duration_since(last_fire).as_secs();
        if elapsed < self.config.threshold {
            return false;
        }

        // 4. Probability model.
        match self.config.p_model {
            ProbabilityModel::Deterministic => hazard::deterministic_hazard(),
            ProbabilityModel::Exponential => {
                hazard::exponential_hazard(self.config.mttf as f64, rng)
            }
            ProbabilityModel::Normal => hazard::normal_hazard(
                self.config.mttf as f64,
                self.config.standard_deviation as f64,
                elapsed as f64,
                rng,
            ),
            ProbabilityModel::Weibull => {
                hazard::weibull_hazard(self.config.shape, self.config.mttf as f64, elapsed as f64, rng)
            }
            ProbabilityModel::Random(window_type) => self.random_model_tick(now, window_type, rng),
        }
    }

    /// Two-phase precomputed-time scheme for the `random` probability
    /// model. Note: the `fixed`-window case recomputes `window_end` from
    /// `now + random_range` rather than `window_end + random_range` — this
    /// preserves the original's slow temporal drift rather than
    /// introducing a drift-free variant; see DESIGN.md.
    fn random_model_tick(
        &mut self,
        now: Instant,
        window_type: RandomWindowType,
        rng: &mut dyn RandomSource,
    ) -> bool {
        if self.armed_fire_time.is_none() && now > self.window_end {
            let offset = rng.next_range_inclusive(
                self.config.threshold as i64,
                self.config.random_range as i64,
            ) as u64;
            let fire_time = self.window_end + Duration::from_secs(offset);
            self.armed_fire_time = Some(fire_time);
            self.window_end = match window_type {
                RandomWindowType::Fixed => now + Duration::from_secs(self.config.random_range),
                RandomWindowType::Sliding => fire_time,
            };
            return false;
        }

        if let Some(fire_time) = self.armed_fire_time {
            if now >= fire_time {
                self.armed_fire_time = None;
                return true;
            }
        }

        false
    }
}

