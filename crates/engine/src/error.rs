//! Structural error types.
//!
//! Nothing a player does at the keyboard can produce these: game-rule
//! failures travel as `ActionResult` data. An error here means plan data
//! was authored wrong (a step template referencing context the plan never
//! required) and is allowed to propagate.

use crate::state::ActorId;

/// Malformed plan data discovered while driving a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error("step template requires a target actor in the plan context")]
    MissingTarget,

    #[error("step template requires a target position in the plan context")]
    MissingTargetPosition,

    #[error("step template requires a carried item in the plan context")]
    MissingItem,
}

/// Top-level engine failure surfaced by `process_unified_round`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("plan data error for actor {actor}: {source}")]
    Plan {
        actor: ActorId,
        #[source]
        source: PlanError,
    },
}
