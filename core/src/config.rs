//! JSON configuration schema, loading, and validation.
//!
//! The on-disk schema is intentionally flat and explicit: one document
//! names a system, a fault-action module, and an ordered list of
//! components, each carrying an `operable_events`/`nonoperable_events`
//! pair. Validation happens entirely in `SutConfigDoc::validate` so a
//! malformed document is rejected before any `Event`/`SystemComponent` is
//! constructed from it.

use crate::clock::Clock;
use crate::component::SystemComponent;
use crate::error::{ConfigError, ConfigResult};
use crate::event::{ActivationModel, Event, EventConfig, ProbabilityModel, RandomWindowType, UdfValue};
use crate::sut::SystemUnderTest;
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EventConfigDoc {
    pub id: String,
    pub fault: String,
    pub state_transition: bool,
    pub a_model: String,
    pub p_model: String,
    pub mttf: u64,
    pub threshold: u64,
    pub effective_start: i64,
    pub effective_end: i64,
    pub standard_deviation: u64,
    pub shape: f64,
    pub random_range: u64,
    pub random_window_type: String,
    pub instances: u32,
    #[serde(default)]
    pub udf1: serde_json::Value,
    #[serde(default)]
    pub udf2: serde_json::Value,
    #[serde(default)]
    pub udf3: serde_json::Value,
    #[serde(default)]
    pub udd: serde_json::Value,
}

impl Default for EventConfigDoc {
    fn default() -> Self {
        Self {
            id: String::new(),
            fault: String::new(),
            state_transition: false,
            a_model: "recurring".into(),
            p_model: "deterministic".into(),
            mttf: 1,
            threshold: 0,
            effective_start: -1,
            effective_end: -1,
            standard_deviation: 1,
            shape: 1.0,
            random_range: 1,
            random_window_type: "fixed".into(),
            instances: 1,
            udf1: serde_json::Value::Null,
            udf2: serde_json::Value::Null,
            udf3: serde_json::Value::Null,
            udd: serde_json::Value::Null,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComponentConfigDoc {
    pub id: String,
    pub active: bool,
    #[serde(default)]
    pub targets: Vec<String>,
    #[serde(default)]
    pub operable_events: Vec<EventConfigDoc>,
    #[serde(default)]
    pub nonoperable_events: Vec<EventConfigDoc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SutConfigDoc {
    pub system_name: String,
    pub fault_module: String,
    pub components: Vec<ComponentConfigDoc>,
}

impl SutConfigDoc {
    /// Reads and parses `path`. `path == "-"` reads from stdin instead of
    /// the filesystem; both cases attach the original path string (or
    /// `-`) to every error so a caller juggling multiple config files
    /// can tell them apart.
    pub fn load(path: &str) -> ConfigResult<Self> {
        let raw = if path == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| ConfigError::Io {
                    path: PathBuf::from(path),
                    source,
                })?;
            buf
        } else {
            std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: PathBuf::from(path),
                source,
            })?
        };

        let doc: SutConfigDoc =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Malformed {
                path: PathBuf::from(path),
                source,
            })?;

        doc.validate(path)?;
        Ok(doc)
    }

    /// The fault module label with a trailing `.py` stripped, if present.
    /// Kept for schema fidelity with documents authored against the
    /// original Python-module-per-SUT convention even though this engine
    /// never imports a Python module — the result is purely a label.
    pub fn fault_module_label(&self) -> &str {
        self.fault_module.strip_suffix(".py").unwrap_or(&self.fault_module)
    }

    /// Full content validation: component id uniqueness, non-empty
    /// targets on active components, event id uniqueness, event model
    /// names, and every numeric constraint the activation algorithm
    /// relies on.
    fn validate(&self, path: &str) -> ConfigResult<()> {
        if self.system_name.trim().is_empty() {
            return Err(ConfigError::content(path, "system_name must not be empty"));
        }
        if self.components.is_empty() {
            return Err(ConfigError::content(path, "components must not be empty"));
        }

        let mut seen_components = HashSet::new();
        for component in &self.components {
            if !seen_components.insert(component.id.clone()) {
                return Err(ConfigError::content(
                    path,
                    format!("duplicate component id '{}'", component.id),
                ));
            }
            if component.active && component.targets.is_empty() {
                return Err(ConfigError::content(
                    path,
                    format!("active component '{}' must declare at least one target", component.id),
                ));
            }

            let mut seen_events = HashSet::new();
            for event in component.operable_events.iter().chain(&component.nonoperable_events) {
                if !seen_events.insert(event.id.clone()) {
                    return Err(ConfigError::content(
                        path,
                        format!("component '{}': duplicate event id '{}'", component.id, event.id),
                    ));
                }
                Self::validate_event(path, &component.id, event)?;
            }
        }
        Ok(())
    }

    fn validate_event(path: &str, component_id: &str, event: &EventConfigDoc) -> ConfigResult<()> {
        if event.id.trim().is_empty() {
            return Err(ConfigError::content(
                path,
                format!("component '{component_id}': event 'id' must not be empty"),
            ));
        }
        if event.fault.trim().is_empty() {
            return Err(ConfigError::content(
                path,
                format!("component '{component_id}': event '{}': 'fault' must not be empty", event.id),
            ));
        }
        if event.instances == 0 {
            return Err(ConfigError::content(
                path,
                format!(
                    "component '{component_id}': event '{}': 'instances' must be >= 1",
                    event.id
                ),
            ));
        }
        if event.mttf == 0 {
            return Err(ConfigError::content(
                path,
                format!("component '{component_id}': event '{}': 'mttf' must be > 0", event.id),
            ));
        }
        if event.shape <= 0.0 {
            return Err(ConfigError::content(
                path,
                format!("component '{component_id}': event '{}': 'shape' must be > 0", event.id),
            ));
        }
        if event.random_range == 0 {
            return Err(ConfigError::content(
                path,
                format!("component '{component_id}': event '{}': 'random_range' must be > 0", event.id),
            ));
        }
        parse_activation_model(path, component_id, event)?;
        let p_model = parse_probability_model(path, component_id, event)?;
        if let ProbabilityModel::Normal = p_model {
            if event.standard_deviation == 0 {
                return Err(ConfigError::content(
                    path,
                    format!(
                        "component '{component_id}': event '{}': normal model requires standard_deviation > 0",
                        event.id
                    ),
                ));
            }
        }
        if let ProbabilityModel::Random(_) = p_model {
            if event.random_range < event.threshold {
                return Err(ConfigError::content(
                    path,
                    format!(
                        "component '{component_id}': event '{}': random_range must be >= threshold",
                        event.id
                    ),
                ));
            }
        }
        if event.effective_end != -1 && event.effective_start != -1 && event.effective_end < event.effective_start
        {
            return Err(ConfigError::content(
                path,
                format!(
                    "component '{component_id}': event '{}': effective_end must be >= effective_start",
                    event.id
                ),
            ));
        }
        Ok(())
    }
}

fn parse_activation_model(
    path: &str,
    component_id: &str,
    event: &EventConfigDoc,
) -> ConfigResult<ActivationModel> {
    match event.a_model.as_str() {
        "recurring" => Ok(ActivationModel::Recurring),
        "singular" => Ok(ActivationModel::Singular),
        other => Err(ConfigError::content(
            path,
            format!("component '{component_id}': event '{}': unknown a_model '{other}'", event.id),
        )),
    }
}

fn parse_probability_model(
    path: &str,
    component_id: &str,
    event: &EventConfigDoc,
) -> ConfigResult<ProbabilityModel> {
    match event.p_model.as_str() {
        "deterministic" => Ok(ProbabilityModel::Deterministic),
        "exponential" => Ok(ProbabilityModel::Exponential),
        "normal" => Ok(ProbabilityModel::Normal),
        "weibull" => Ok(ProbabilityModel::Weibull),
        "random" => match event.random_window_type.as_str() {
            "fixed" => Ok(ProbabilityModel::Random(RandomWindowType::Fixed)),
            "sliding" => Ok(ProbabilityModel::Random(RandomWindowType::Sliding)),
            other => Err(ConfigError::content(
                path,
                format!(
                    "component '{component_id}': event '{}': unknown random_window_type '{other}'",
                    event.id
                ),
            )),
        },
        other => Err(ConfigError::content(
            path,
            format!("component '{component_id}': event '{}': unknown p_model '{other}'", event.id),
        )),
    }
}

fn udf_value(raw: &serde_json::Value) -> UdfValue {
    match raw {
        serde_json::Value::Null => UdfValue::Null,
        serde_json::Value::String(s) => UdfValue::String(s.clone()),
        serde_json::Value::Number(n) if n.is_i64() => UdfValue::Integer(n.as_i64().unwrap()),
        serde_json::Value::Number(n) => UdfValue::Integer(n.as_f64().unwrap_or(0.0) as i64),
        serde_json::Value::Object(map) => UdfValue::Map(map.clone()),
        other => UdfValue::String(other.to_string()),
    }
}

fn build_event_config(doc: &EventConfigDoc) -> EventConfig {
    // validate() already rejected unknown model names, so the "<validated>"
    // placeholders below can never surface in an error a caller sees.
    let a_model = parse_activation_model("<validated>", "<validated>", doc)
        .expect("a_model was validated before construction");
    let p_model = parse_probability_model("<validated>", "<validated>", doc)
        .expect("p_model was validated before construction");

    EventConfig {
        fault: doc.fault.clone(),
        state_transition: doc.state_transition,
        a_model,
        p_model,
        mttf: doc.mttf,
        threshold: doc.threshold,
        effective_start: doc.effective_start,
        effective_end: doc.effective_end,
        standard_deviation: doc.standard_deviation,
        shape: doc.shape,
        random_range: doc.random_range,
        udf1: udf_value(&doc.udf1),
        udf2: udf_value(&doc.udf2),
        udf3: udf_value(&doc.udf3),
        udd: udf_value(&doc.udd),
    }
}

fn build_events(component_id: &str, docs: &[EventConfigDoc], clock: &dyn Clock) -> Vec<Event> {
    let mut events = Vec::new();
    for doc in docs {
        let config = build_event_config(doc);
        for instance in 0..doc.instances {
            let event_id = if doc.instances == 1 {
                doc.id.clone()
            } else {
                format!("{}-{instance}", doc.id)
            };
            events.push(Event::new(component_id.to_string(), event_id, config.clone(), clock.now()));
        }
    }
    events
}

/// Validates and constructs a runnable `SystemUnderTest` from a document
/// already returned by `SutConfigDoc::load`. Inactive components are
/// dropped: they take no part in checkpointing or dispatch.
pub fn build_sut(doc: &SutConfigDoc, clock: &dyn Clock) -> ConfigResult<SystemUnderTest> {
    let mut components = Vec::new();
    for component_doc in doc.components.iter().filter(|c| c.active) {
        let operable = build_events(&component_doc.id, &component_doc.operable_events, clock);
        let nonoperable = build_events(&component_doc.id, &component_doc.nonoperable_events, clock);
        components.push(SystemComponent::new(
            component_doc.id.clone(),
            component_doc.targets.clone(),
            operable,
            nonoperable,
            clock,
        ));
    }
    Ok(SystemUnderTest::new(
        doc.system_name.clone(),
        doc.fault_module_label().to_string(),
        components,
    ))
}

/// Convenience wrapper: load and build in one call. Kept separate from
/// `load` so a caller can inspect the parsed document (e.g. to print a
/// dry-run summary) before committing to building the live engine types.
pub fn load_sut(path: &str, clock: &dyn Clock) -> ConfigResult<SystemUnderTest> {
    let doc = SutConfigDoc::load(path)?;
    build_sut(&doc, clock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FakeClock;

    fn sample_doc() -> &'static str {
        r#"{
            "system_name": "payments-cluster",
            "fault_module": "demo.py",
            "components": [
                {
                    "id": "leader",
                    "active": true,
                    "targets": ["host-1"],
                    "operable_events": [
                        {
                            "id": "kill",
                            "fault": "kill_leader",
                            "state_transition": true,
                            "a_model": "recurring",
                            "p_model": "deterministic",
                            "threshold": 5
                        }
                    ],
                    "nonoperable_events": [
                        {
                            "id": "revive",
                            "fault": "revive_leader",
                            "state_transition": true,
                            "a_model": "recurring",
                            "p_model": "deterministic"
                        }
                    ]
                }
            ]
        }"#
    }

    #[test]
    fn parses_and_validates_minimal_document() {
        let doc: SutConfigDoc = serde_json::from_str(sample_doc()).unwrap();
        assert!(doc.validate("test.json").is_ok());
        assert_eq!(doc.components.len(), 1);
        assert_eq!(doc.components[0].operable_events[0].fault, "kill_leader");
    }

    #[test]
    fn fault_module_label_strips_py_suffix() {
        let doc: SutConfigDoc = serde_json::from_str(sample_doc()).unwrap();
        assert_eq!(doc.fault_module_label(), "demo");
    }

    #[test]
    fn rejects_duplicate_component_ids() {
        let mut doc: SutConfigDoc = serde_json::from_str(sample_doc()).unwrap();
        let dup = doc.components[0].clone();
        doc.components.push(dup);
        let err = doc.validate("test.json").unwrap_err();
        assert!(matches!(err, ConfigError::Content { .. }));
    }

    #[test]
    fn rejects_duplicate_event_ids_within_a_component() {
        let mut doc: SutConfigDoc = serde_json::from_str(sample_doc()).unwrap();
        let dup_event = doc.components[0].operable_events[0].clone();
        doc.components[0].nonoperable_events.push(dup_event);
        // overwrite id to collide with the operable event's id
        let id = doc.components[0].operable_events[0].id.clone();
        doc.components[0].nonoperable_events.last_mut().unwrap().id = id;
        let err = doc.validate("test.json").unwrap_err();
        assert!(matches!(err, ConfigError::Content { .. }));
    }

    #[test]
    fn rejects_active_component_with_no_targets() {
        let mut doc: SutConfigDoc = serde_json::from_str(sample_doc()).unwrap();
        doc.components[0].targets.clear();
        let err = doc.validate("test.json").unwrap_err();
        assert!(matches!(err, ConfigError::Content { .. }));
    }

    #[test]
    fn rejects_unknown_p_model() {
        let mut doc: SutConfigDoc = serde_json::from_str(sample_doc()).unwrap();
        doc.components[0].operable_events[0].p_model = "magic".into();
        let err = doc.validate("test.json").unwrap_err();
        assert!(matches!(err, ConfigError::Content { .. }));
    }

    #[test]
    fn rejects_zero_mttf() {
        let mut doc: SutConfigDoc = serde_json::from_str(sample_doc()).unwrap();
        doc.components[0].operable_events[0].mttf = 0;
        let err = doc.validate("test.json").unwrap_err();
        assert!(matches!(err, ConfigError::Content { .. }));
    }

    #[test]
    fn rejects_nonpositive_shape() {
        let mut doc: SutConfigDoc = serde_json::from_str(sample_doc()).unwrap();
        doc.components[0].operable_events[0].shape = 0.0;
        let err = doc.validate("test.json").unwrap_err();
        assert!(matches!(err, ConfigError::Content { .. }));
    }

    #[test]
    fn rejects_zero_random_range() {
        let mut doc: SutConfigDoc = serde_json::from_str(sample_doc()).unwrap();
        doc.components[0].operable_events[0].random_range = 0;
        let err = doc.validate("test.json").unwrap_err();
        assert!(matches!(err, ConfigError::Content { .. }));
    }

    #[test]
    fn rejects_normal_model_with_zero_standard_deviation() {
        let mut doc: SutConfigDoc = serde_json::from_str(sample_doc()).unwrap();
        doc.components[0].operable_events[0].p_model = "normal".into();
        doc.components[0].operable_events[0].standard_deviation = 0;
        let err = doc.validate("test.json").unwrap_err();
        assert!(matches!(err, ConfigError::Content { .. }));
    }

    #[test]
    fn builds_runnable_sut_from_validated_document() {
        let doc: SutConfigDoc = serde_json::from_str(sample_doc()).unwrap();
        let clock = FakeClock::new();
        let sut = build_sut(&doc, &clock).unwrap();
        assert_eq!(sut.system_name, "payments-cluster");
        assert_eq!(sut.components().len(), 1);
    }

    #[test]
    fn inactive_components_are_excluded_from_the_built_sut() {
        let mut doc: SutConfigDoc = serde_json::from_str(sample_doc()).unwrap();
        doc.components[0].active = false;
        doc.components[0].targets.clear();
        let clock = FakeClock::new();
        let sut = build_sut(&doc, &clock).unwrap();
        assert!(sut.components().is_empty());
    }

    #[test]
    fn instances_expands_into_multiple_events() {
        let mut doc: SutConfigDoc = serde_json::from_str(sample_doc()).unwrap();
        doc.components[0].operable_events[0].instances = 3;
        let clock = FakeClock::new();
        let sut = build_sut(&doc, &clock).unwrap();
        assert_eq!(sut.components()[0].state(), crate::component::ComponentState::Operable);
    }
}
