//! Declarative multi-turn behaviors.
//!
//! An [`ActionPlan`] is an immutable named template of [`Step`]s; an
//! [`ActivePlan`] is the live cursor one actor holds while running it. The
//! driver functions turn "the current step" into at most one routed intent
//! per turn, interleaving pathfinding movement with terminal actions.
//!
//! - `template`: plan templates and the built-in plan library
//! - `step`: steps, intent templates, skip conditions (all plain data)
//! - `context`: the snapshot captured at plan start
//! - `active`: per-actor live state (`ActivePlan`, `PathfindingGoal`)
//! - `driver`: `start_plan` / `stop_plan` and the per-turn drive

pub mod active;
pub mod context;
pub mod driver;
pub mod step;
pub mod template;

pub use active::{ActivePlan, PathfindingGoal};
pub use context::{PlanContext, PlanSeed};
pub use driver::{drive_actor, start_plan, stop_plan};
pub use step::{ApproachStep, IntentStep, IntentTemplate, SkipCondition, Step};
pub use template::ActionPlan;
