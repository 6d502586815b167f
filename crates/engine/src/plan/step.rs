//! Plan steps as plain data.
//!
//! Steps carry no captured functions: an [`IntentStep`] holds an
//! [`IntentTemplate`] describing how to build its intent from the context,
//! plus a [`SkipCondition`] evaluated against live world state. This keeps
//! plans inspectable, comparable, and shareable across running instances.

use crate::error::PlanError;
use crate::intent::Intent;
use crate::plan::context::PlanContext;
use crate::state::{PropState, TilePos, WorldState};

/// One entry in a plan's ordered step list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Build and route one intent, then advance on success.
    Intent(IntentStep),

    /// Walk toward the context target until within a stop distance.
    Approach(ApproachStep),
}

impl Step {
    pub fn intent(template: IntentTemplate) -> Self {
        Self::Intent(IntentStep {
            template,
            skip: SkipCondition::Never,
        })
    }

    pub fn intent_unless(template: IntentTemplate, skip: SkipCondition) -> Self {
        Self::Intent(IntentStep { template, skip })
    }

    pub fn approach(stop_distance: u32) -> Self {
        Self::Approach(ApproachStep {
            stop_distance,
            skip: SkipCondition::Never,
        })
    }

    pub fn approach_unless(stop_distance: u32, skip: SkipCondition) -> Self {
        Self::Approach(ApproachStep {
            stop_distance,
            skip,
        })
    }
}

/// Terminal step: one concrete action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntentStep {
    pub template: IntentTemplate,
    pub skip: SkipCondition,
}

/// Movement step: close distance to the live target (actor position when it
/// is alive, fixed position otherwise).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApproachStep {
    pub stop_distance: u32,
    pub skip: SkipCondition,
}

/// Recipe turning a plan context into a concrete intent.
///
/// A template referencing context the plan never captured is authored-data
/// breakage and surfaces as a [`PlanError`], not a play outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntentTemplate {
    MeleeAttackTarget,
    RangedAttackTarget,
    OpenDoorAtTarget,
    SearchContainerAtTarget,
    /// Use the context's carried-item slot.
    UseCarriedItem,
    /// Stand still for a turn.
    HoldPosition,
}

impl IntentTemplate {
    pub fn build(&self, ctx: &PlanContext) -> Result<Intent, PlanError> {
        match self {
            IntentTemplate::MeleeAttackTarget => {
                let target = ctx.target.ok_or(PlanError::MissingTarget)?;
                Ok(Intent::melee(ctx.actor, target))
            }
            IntentTemplate::RangedAttackTarget => {
                let target = ctx.target.ok_or(PlanError::MissingTarget)?;
                Ok(Intent::ranged(ctx.actor, target))
            }
            IntentTemplate::OpenDoorAtTarget => {
                let at = ctx.target_pos.ok_or(PlanError::MissingTargetPosition)?;
                Ok(Intent::open_door(ctx.actor, at))
            }
            IntentTemplate::SearchContainerAtTarget => {
                let at = ctx.target_pos.ok_or(PlanError::MissingTargetPosition)?;
                Ok(Intent::search_container(ctx.actor, at))
            }
            IntentTemplate::UseCarriedItem => {
                let item = ctx.weapon.ok_or(PlanError::MissingItem)?;
                Ok(Intent::use_consumable(ctx.actor, item))
            }
            IntentTemplate::HoldPosition => Ok(Intent::wait(ctx.actor)),
        }
    }
}

/// Data-described "this step is already satisfied" predicate. Skipped steps
/// cost no turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipCondition {
    Never,

    /// The context target is gone or dead.
    TargetDead,

    /// Already within Chebyshev distance of the target reference point.
    TargetWithin(u32),

    /// The door at the context target position already stands open.
    DoorOpenAtTarget,
}

impl SkipCondition {
    pub fn evaluate(&self, ctx: &PlanContext, world: &WorldState) -> bool {
        match *self {
            SkipCondition::Never => false,
            SkipCondition::TargetDead => match ctx.target {
                Some(target) => !world.actor(target).is_some_and(|a| a.is_alive()),
                None => false,
            },
            SkipCondition::TargetWithin(distance) => {
                let Some(me) = world.actor(ctx.actor) else {
                    return false;
                };
                reference_point(ctx, world)
                    .is_some_and(|point| me.position.chebyshev(point) <= distance)
            }
            SkipCondition::DoorOpenAtTarget => ctx
                .target_pos
                .and_then(|at| world.prop_at(at))
                .is_some_and(|prop| matches!(prop, PropState::Door { open: true })),
        }
    }
}

/// The position a plan is "about": the target actor's live position while it
/// lives, else the fixed target position.
pub(crate) fn reference_point(ctx: &PlanContext, world: &WorldState) -> Option<TilePos> {
    let live = ctx
        .target
        .and_then(|id| world.actor(id))
        .filter(|a| a.is_alive())
        .map(|a| a.position);
    live.or(ctx.target_pos)
}
