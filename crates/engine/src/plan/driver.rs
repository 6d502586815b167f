//! Per-turn plan and goal driving.
//!
//! The driver is consumed only by the turn scheduler: each turn it either
//! produces (and routes) exactly one intent for the actor, or it concludes
//! the actor has nothing to do. Step skips are free and re-evaluate within
//! the same turn, bounded by plan length because every skip advances the
//! monotonic cursor.

use crate::env::{Controller, PathError};
use crate::error::EngineError;
use crate::intent::Intent;
use crate::plan::active::{ActivePlan, PathfindingGoal};
use crate::plan::context::PlanSeed;
use crate::plan::template::ActionPlan;
use crate::plan::step::{Step, reference_point};
use crate::router::ActionRouter;
use crate::state::{ActorId, WorldState};

use std::sync::Arc;

/// Starts `plan` on `actor`, replacing any plan already running.
///
/// Returns false without touching the actor when the actor is gone/dead,
/// when `requires_target` finds no seeded target, or when
/// `requires_adjacency` finds the target out of arm's reach.
pub fn start_plan(
    world: &mut WorldState,
    actor: ActorId,
    plan: Arc<ActionPlan>,
    seed: PlanSeed,
) -> bool {
    let Some(state) = world.actor(actor).filter(|a| a.is_alive()) else {
        return false;
    };

    if plan.requires_target() && seed.target.is_none() {
        return false;
    }

    if plan.requires_adjacency() {
        let reference = seed
            .target
            .and_then(|id| world.actor(id))
            .filter(|a| a.is_alive())
            .map(|a| a.position)
            .or(seed.target_pos);
        let Some(reference) = reference else {
            return false;
        };
        if state.position.chebyshev(reference) > 1 {
            return false;
        }
    }

    let context = seed.into_context(actor);
    tracing::debug!(%actor, plan = plan.name(), "starting plan");
    if let Some(state) = world.actor_mut(actor) {
        state.active_plan = Some(ActivePlan::new(plan, context));
    }
    true
}

/// Cancels `actor`'s running plan, if any.
pub fn stop_plan(world: &mut WorldState, actor: ActorId) {
    if let Some(state) = world.actor_mut(actor)
        && state.active_plan.take().is_some()
    {
        tracing::debug!(%actor, "plan stopped");
    }
}

/// Drives one actor for one turn: active plan first, then the independent
/// pathfinding goal. Returns whether an intent was actually routed (i.e.
/// the turn was consumed).
pub fn drive_actor(
    router: &ActionRouter,
    ctrl: &mut Controller<'_>,
    actor: ActorId,
) -> Result<bool, EngineError> {
    if let Some(acted) = drive_plan(router, ctrl, actor)? {
        return Ok(acted);
    }
    Ok(drive_goal(router, ctrl, actor))
}

/// Plan-driving verdict: `None` means "no plan claimed this turn" (absent,
/// or completed for free) and the goal may still run.
fn drive_plan(
    router: &ActionRouter,
    ctrl: &mut Controller<'_>,
    actor: ActorId,
) -> Result<Option<bool>, EngineError> {
    let Some(mut active) = take_plan(ctrl.world, actor) else {
        return Ok(None);
    };

    loop {
        let Some(step) = active.current_step().copied() else {
            // Cursor ran off the end: the plan is complete and simply goes
            // away. Completion costs nothing.
            tracing::debug!(%actor, plan = active.plan().name(), "plan complete");
            return Ok(None);
        };

        match step {
            Step::Intent(step) => {
                if step.skip.evaluate(active.context(), ctrl.world) {
                    active.advance();
                    continue;
                }

                let intent = step
                    .template
                    .build(active.context())
                    .map_err(|source| EngineError::Plan { actor, source })?;
                let result = router.execute_intent(ctrl, intent);

                if result.succeeded {
                    active.advance();
                    if !active.is_complete() {
                        restore_plan(ctrl.world, actor, active);
                    }
                } else {
                    // No per-step retry: one failed step sinks the plan.
                    tracing::debug!(
                        %actor,
                        plan = active.plan().name(),
                        reason = ?result.block_reason,
                        "plan step failed, cancelling"
                    );
                }
                return Ok(Some(true));
            }
            Step::Approach(step) => {
                if step.skip.evaluate(active.context(), ctrl.world) {
                    active.advance();
                    continue;
                }

                let Some(my_pos) = ctrl
                    .world
                    .actor(actor)
                    .filter(|a| a.is_alive())
                    .map(|a| a.position)
                else {
                    return Ok(Some(false));
                };
                let Some(reference) = reference_point(active.context(), ctrl.world) else {
                    // Nothing left to walk toward.
                    tracing::debug!(%actor, "approach target vanished, cancelling plan");
                    return Ok(Some(false));
                };

                if my_pos.chebyshev(reference) <= step.stop_distance {
                    active.advance();
                    continue;
                }

                if !active.has_path() {
                    match ctrl.pathfinder.find_path(ctrl.map, ctrl.world, my_pos, reference) {
                        Ok(path) => active.set_path(path),
                        Err(PathError::Blocked) => {
                            // Transient congestion: hold position, replan
                            // next turn.
                            restore_plan(ctrl.world, actor, active);
                            return Ok(Some(false));
                        }
                        Err(PathError::NoPath) => {
                            tracing::debug!(
                                %actor,
                                plan = active.plan().name(),
                                "target unreachable, cancelling plan"
                            );
                            return Ok(Some(false));
                        }
                    }
                }

                let Some(hop) = active.peek_hop() else {
                    restore_plan(ctrl.world, actor, active);
                    return Ok(Some(false));
                };
                let (dx, dy) = my_pos.delta_to(hop);
                let result = router.execute_intent(ctrl, Intent::move_by(actor, dx, dy));
                if result.succeeded {
                    active.pop_hop();
                } else {
                    // Stale route; recompute from scratch next turn.
                    active.clear_path();
                }
                restore_plan(ctrl.world, actor, active);
                return Ok(Some(true));
            }
        }
    }
}

/// Drives the actor's pathfinding goal, if present. Returns whether an
/// intent was routed.
fn drive_goal(router: &ActionRouter, ctrl: &mut Controller<'_>, actor: ActorId) -> bool {
    let Some(mut goal) = take_goal(ctrl.world, actor) else {
        return false;
    };
    let Some(my_pos) = ctrl
        .world
        .actor(actor)
        .filter(|a| a.is_alive())
        .map(|a| a.position)
    else {
        return false;
    };

    if my_pos == goal.target {
        // Arrived: run the terminal action (if any) and let the goal go.
        if let Some(intent) = goal.final_intent.take() {
            router.execute_intent(ctrl, intent);
            return true;
        }
        return false;
    }

    if goal.path.is_empty() {
        match ctrl
            .pathfinder
            .find_path(ctrl.map, ctrl.world, my_pos, goal.target)
        {
            Ok(path) => goal.path = path.into(),
            Err(PathError::Blocked) => {
                restore_goal(ctrl.world, actor, goal);
                return false;
            }
            Err(PathError::NoPath) => {
                tracing::debug!(%actor, target = %goal.target, "goal unreachable, dropping");
                return false;
            }
        }
    }

    let Some(&hop) = goal.path.front() else {
        restore_goal(ctrl.world, actor, goal);
        return false;
    };
    let (dx, dy) = my_pos.delta_to(hop);
    let result = router.execute_intent(ctrl, Intent::move_by(actor, dx, dy));
    if result.succeeded {
        goal.path.pop_front();
    } else {
        goal.path.clear();
    }
    restore_goal(ctrl.world, actor, goal);
    true
}

fn take_plan(world: &mut WorldState, actor: ActorId) -> Option<ActivePlan> {
    world.actor_mut(actor)?.active_plan.take()
}

fn restore_plan(world: &mut WorldState, actor: ActorId, plan: ActivePlan) {
    if let Some(state) = world.actor_mut(actor).filter(|a| a.is_alive()) {
        state.active_plan = Some(plan);
    }
}

fn take_goal(world: &mut WorldState, actor: ActorId) -> Option<PathfindingGoal> {
    world.actor_mut(actor)?.pathfinding_goal.take()
}

fn restore_goal(world: &mut WorldState, actor: ActorId, goal: PathfindingGoal) {
    if let Some(state) = world.actor_mut(actor).filter(|a| a.is_alive()) {
        state.pathfinding_goal = Some(goal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::context::PlanSeed;
    use crate::plan::step::IntentTemplate;
    use crate::plan::template::ActionPlan;
    use crate::state::{PropState, TilePos};
    use crate::testbed::TestBed;

    fn drive(bed: &mut TestBed, router: &ActionRouter, actor: ActorId) -> bool {
        drive_actor(router, &mut bed.ctrl(), actor).unwrap()
    }

    #[test]
    fn start_plan_enforces_requirements() {
        let mut bed = TestBed::open(6, 1);
        let player = bed.spawn(0, 0, 0);
        let npc = bed.spawn(1, 4, 0);

        // Target required but not seeded.
        assert!(!start_plan(
            &mut bed.world,
            player,
            ActionPlan::melee_assault(),
            PlanSeed::new(),
        ));
        assert!(bed.world.player().unwrap().active_plan.is_none());

        // Adjacency required but the target stands four tiles off.
        let plan = Arc::new(
            ActionPlan::new("shove", vec![Step::intent(IntentTemplate::MeleeAttackTarget)])
                .requiring_target()
                .requiring_adjacency(),
        );
        assert!(!start_plan(
            &mut bed.world,
            player,
            Arc::clone(&plan),
            PlanSeed::new().target(npc),
        ));

        // Same plan against an adjacent target starts fine.
        assert!(bed.world.move_actor(npc, TilePos::new(1, 0)));
        assert!(start_plan(
            &mut bed.world,
            player,
            plan,
            PlanSeed::new().target(npc),
        ));
        assert!(bed.world.player().unwrap().active_plan.is_some());
    }

    #[test]
    fn starting_a_new_plan_replaces_the_old_one() {
        let mut bed = TestBed::open(6, 1);
        let player = bed.spawn(0, 0, 0);

        assert!(start_plan(
            &mut bed.world,
            player,
            ActionPlan::travel_to(),
            PlanSeed::new().at(TilePos::new(5, 0)),
        ));
        assert!(start_plan(
            &mut bed.world,
            player,
            ActionPlan::loot_container(),
            PlanSeed::new().at(TilePos::new(2, 0)),
        ));

        let active = bed.world.player().unwrap().active_plan.as_ref().unwrap();
        assert_eq!(active.plan().name(), "loot container");
        assert_eq!(active.current_step_index(), 0);
    }

    #[test]
    fn adjacent_travel_resolves_in_one_move_then_removes_the_plan() {
        let router = ActionRouter::standard();
        let mut bed = TestBed::open(4, 1);
        let player = bed.spawn(0, 0, 0);
        assert!(start_plan(
            &mut bed.world,
            player,
            ActionPlan::travel_to(),
            PlanSeed::new().at(TilePos::new(1, 0)),
        ));

        assert!(drive(&mut bed, &router, player));
        assert_eq!(bed.world.player().unwrap().position, TilePos::new(1, 0));

        // Arrival is free: the next drive completes and removes the plan
        // without consuming a turn.
        assert!(!drive(&mut bed, &router, player));
        assert!(bed.world.player().unwrap().active_plan.is_none());
    }

    #[test]
    fn enclosed_target_cancels_without_raising() {
        let router = ActionRouter::standard();
        let mut bed = TestBed::from_rows(&[".....", ".###.", ".#.#.", ".###."]);
        let player = bed.spawn(0, 0, 0);
        assert!(start_plan(
            &mut bed.world,
            player,
            ActionPlan::travel_to(),
            PlanSeed::new().at(TilePos::new(2, 2)),
        ));

        assert!(!drive(&mut bed, &router, player));
        assert!(bed.world.player().unwrap().active_plan.is_none());
    }

    #[test]
    fn transient_blockage_keeps_the_plan_for_next_turn() {
        // One-tile corridor plugged by a living actor.
        let router = ActionRouter::standard();
        let mut bed = TestBed::from_rows(&["#.#", "#.#", "#.#"]);
        let player = bed.spawn(0, 1, 0);
        bed.spawn(1, 1, 1);
        assert!(start_plan(
            &mut bed.world,
            player,
            ActionPlan::travel_to(),
            PlanSeed::new().at(TilePos::new(1, 2)),
        ));

        assert!(!drive(&mut bed, &router, player));
        assert!(bed.world.player().unwrap().active_plan.is_some());
    }

    #[test]
    fn melee_assault_walks_in_and_strikes() {
        let router = ActionRouter::standard();
        let mut bed = TestBed::open(5, 1);
        let player = bed.spawn(0, 0, 0);
        let npc = bed.spawn(1, 3, 0);
        assert!(start_plan(
            &mut bed.world,
            player,
            ActionPlan::melee_assault(),
            PlanSeed::new().target(npc),
        ));

        // Turn 1: step to (1,0). Turn 2: adjacency reached at (2,0) is not
        // yet true, so another step. Turn 3: approach satisfied, attack.
        assert!(drive(&mut bed, &router, player));
        assert_eq!(bed.world.player().unwrap().position, TilePos::new(1, 0));
        assert!(drive(&mut bed, &router, player));
        assert_eq!(bed.world.player().unwrap().position, TilePos::new(2, 0));
        assert!(drive(&mut bed, &router, player));
        assert_eq!(bed.world.actor(npc).unwrap().hp.current, 7);
        assert!(bed.world.player().unwrap().active_plan.is_none());
    }

    #[test]
    fn failed_step_cancels_the_plan() {
        let router = ActionRouter::standard();
        let mut bed = TestBed::open(5, 1);
        let player = bed.spawn(0, 0, 0);
        // Search a tile with no container: the step fails, the plan dies.
        assert!(start_plan(
            &mut bed.world,
            player,
            ActionPlan::loot_container(),
            PlanSeed::new().at(TilePos::new(1, 0)),
        ));

        assert!(drive(&mut bed, &router, player));
        assert!(bed.world.player().unwrap().active_plan.is_none());
    }

    #[test]
    fn malformed_plan_data_propagates_as_an_error() {
        let router = ActionRouter::standard();
        let mut bed = TestBed::open(3, 1);
        let player = bed.spawn(0, 0, 0);
        // An attack template with no target seeded and no requires_target
        // guard: authored-data breakage.
        let plan = Arc::new(ActionPlan::new(
            "broken",
            vec![Step::intent(IntentTemplate::MeleeAttackTarget)],
        ));
        assert!(start_plan(&mut bed.world, player, plan, PlanSeed::new()));

        let err = drive_actor(&router, &mut bed.ctrl(), player).unwrap_err();
        assert_eq!(
            err,
            EngineError::Plan {
                actor: player,
                source: crate::error::PlanError::MissingTarget
            }
        );
    }

    #[test]
    fn goal_walks_then_fires_the_final_intent() {
        let router = ActionRouter::standard();
        let mut bed = TestBed::open(4, 1);
        let player = bed.spawn(0, 0, 0);
        let door = TilePos::new(2, 0);
        bed.world.set_prop(door, PropState::closed_door());
        bed.world.actor_mut(player).unwrap().pathfinding_goal = Some(
            PathfindingGoal::new(TilePos::new(1, 0))
                .with_final_intent(Intent::open_door(player, door)),
        );

        assert!(drive(&mut bed, &router, player));
        assert_eq!(bed.world.player().unwrap().position, TilePos::new(1, 0));
        assert!(bed.world.player().unwrap().pathfinding_goal.is_some());

        // Arrived: the goal's terminal action fires and the goal is gone.
        assert!(drive(&mut bed, &router, player));
        assert_eq!(bed.world.prop_at(door), Some(&PropState::Door { open: true }));
        assert!(bed.world.player().unwrap().pathfinding_goal.is_none());
    }
}
