//! Action-execution core for a turn-based tile RPG.
//!
//! The crate turns an actor's desire to act (an [`Intent`]) into a
//! world-state change through a fixed executor table, converts bump
//! failures into follow-up actions (the router's arbitration rules), runs
//! declarative multi-turn behaviors ([`ActionPlan`]/[`ActivePlan`]), and
//! schedules energy-budgeted rounds ([`TurnManager`]). All state mutation
//! flows through [`ActionRouter::execute_intent`]; supporting layers (UI,
//! AI, rendering) consume the types re-exported here.

pub mod config;
pub mod env;
pub mod error;
pub mod events;
pub mod exec;
pub mod intent;
pub mod plan;
pub mod router;
pub mod state;
pub mod turn;

#[cfg(test)]
pub(crate) mod testbed;

pub use config::EngineConfig;
pub use env::{
    AttackOutcome, Clock, Controller, D20Source, FixedResolver, FovHook, GridMap, GridPathfinder,
    ManualClock, MapDimensions, MapOracle, NullFov, PathError, Pathfinder, Resolver,
    ResolverSource, StaticTile, SystemClock, TerrainKind, line_of_sight,
};
pub use error::{EngineError, PlanError};
pub use events::{EventSink, FxKind, GameEvent, NullSink, RecordingSink};
pub use exec::{ExecutorSet, IntentExecutor};
pub use intent::{
    ActionRequest, ActionResult, AnimationHint, BlockReason, Blocker, Consequence, Intent,
    IntentKind,
};
pub use plan::{
    ActionPlan, ActivePlan, ApproachStep, IntentStep, IntentTemplate, PathfindingGoal, PlanContext,
    PlanSeed, SkipCondition, Step, drive_actor, start_plan, stop_plan,
};
pub use router::ActionRouter;
pub use state::{
    ActorId, ActorState, ActorStats, ConsumableEffect, InventoryState, Item, ItemHandle, ItemKind,
    PropState, ResourceMeter, TilePos, TimedEffect, WeaponData, WorldState,
};
pub use turn::{RoundReport, TurnManager};
