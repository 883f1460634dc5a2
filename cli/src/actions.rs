//! Illustrative fault actions, behind the `demo` feature.
//!
//! These are not part of the engine's contract — they exist so the crate
//! is runnable end to end without an external action-module crate.
//! Shapes are grounded in the original `mgc`/`rabbitmq` sample actions:
//! a process-kill action and a message-bus publish/receive pair.

use faultsched_core::{ActionRegistry, FaultAction, FaultContext, StaticActionModule, UdfValue};
use std::sync::Arc;

/// `[fault]` docstring for `kill_leader`, consumed only by
/// `faultsched_core::action_doc::parse_fault_block` if a caller chooses to
/// introspect it — the scheduler itself never reads this text.
///
/// [fault]
/// target=required
/// [/fault]
fn kill_leader(ctx: &FaultContext) {
    log::warn!(
        "{} > kill_leader: terminating target '{}' (event {})",
        ctx.component_id,
        ctx.target,
        ctx.event_id
    );
}

fn revive_leader(ctx: &FaultContext) {
    log::info!(
        "{} > revive_leader: restarting target '{}' (event {})",
        ctx.component_id,
        ctx.target,
        ctx.event_id
    );
}

fn send_msg(ctx: &FaultContext) {
    let payload = match &ctx.udf1 {
        UdfValue::String(s) => s.clone(),
        UdfValue::Integer(n) => n.to_string(),
        UdfValue::Map(m) => serde_json::Value::Object(m.clone()).to_string(),
        UdfValue::Null => "<no payload>".to_string(),
    };
    log::info!("{} > send_msg: publishing '{}' to '{}'", ctx.component_id, payload, ctx.target);
}

fn receive_msg(ctx: &FaultContext) {
    log::info!("{} > receive_msg: draining queue on '{}'", ctx.component_id, ctx.target);
}

/// Builds the `demo` action module and wraps it in a fresh registry.
pub fn demo_registry() -> ActionRegistry {
    let mut module = StaticActionModule::new();
    module
        .register("kill_leader", Arc::new(kill_leader) as FaultAction)
        .register("revive_leader", Arc::new(revive_leader) as FaultAction)
        .register("send_msg", Arc::new(send_msg) as FaultAction)
        .register("receive_msg", Arc::new(receive_msg) as FaultAction);
    ActionRegistry::new(Box::new(module))
}
