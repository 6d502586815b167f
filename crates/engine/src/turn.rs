//! Energy-budgeted round scheduling.
//!
//! One call to [`TurnManager::process_unified_round`] resolves a full round
//! atomically before control returns to the input/render layer: upkeep for
//! every actor, energy regeneration, then fixed-point passes in which any
//! actor holding enough energy acts synchronously. No work is ever in
//! flight across a turn boundary, so cancellation anywhere in the engine is
//! plain data removal.

use crate::env::Controller;
use crate::error::EngineError;
use crate::intent::Intent;
use crate::plan::drive_actor;
use crate::router::ActionRouter;
use crate::state::ActorId;

/// What one round did, for frontends and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoundReport {
    pub round: u64,
    pub passes: u32,
    pub actions_executed: u32,
    pub player_died: bool,
    pub hit_pass_cap: bool,
}

/// Round scheduler and single-slot player action queue.
#[derive(Debug, Default)]
pub struct TurnManager {
    pending_player_action: Option<Intent>,
    round: u64,
}

impl TurnManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the player's next action. The slot holds one intent; queuing
    /// again before it is consumed replaces the earlier one.
    pub fn queue_action(&mut self, intent: Intent) {
        if self.pending_player_action.is_some() {
            tracing::trace!("pending player action replaced");
        }
        self.pending_player_action = Some(intent);
    }

    /// Removes and returns the pending player action.
    pub fn dequeue_player_action(&mut self) -> Option<Intent> {
        self.pending_player_action.take()
    }

    /// Runs one full round to completion.
    ///
    /// Pass structure per the concurrency contract: actors act in stable
    /// world-list order; an actor acts when its energy covers the fixed
    /// action cost and its driver actually produces an action. The loop
    /// ends on the first pass that executes nothing, or at the configured
    /// pass cap. A resolved intent that kills the player aborts the round
    /// immediately so later actors never act against a dead player.
    pub fn process_unified_round(
        &mut self,
        ctrl: &mut Controller<'_>,
        router: &ActionRouter,
    ) -> Result<RoundReport, EngineError> {
        self.round += 1;
        let mut report = RoundReport {
            round: self.round,
            ..RoundReport::default()
        };

        let ids = ctrl.world.actor_ids();
        let cost = ctrl.config.action_cost;
        let base_regen = ctrl.config.base_energy_regen;
        let max_energy = ctrl.config.max_energy;
        let pass_cap = ctrl.config.round_pass_cap;

        // Upkeep for everyone first, then regeneration for everyone, so no
        // actor's effects observe a half-regenerated round.
        for &id in &ids {
            if let Some(actor) = ctrl.world.actor_mut(id) {
                actor.update_turn();
            }
        }
        for &id in &ids {
            if let Some(actor) = ctrl.world.actor_mut(id).filter(|a| a.is_alive()) {
                let regen = base_regen * actor.speed / 100;
                actor.energy = (actor.energy + regen).min(max_energy);
            }
        }

        'round: loop {
            if report.passes == pass_cap {
                report.hit_pass_cap = true;
                tracing::warn!(
                    round = self.round,
                    pass_cap,
                    "round pass cap reached; forcing round end"
                );
                break;
            }
            report.passes += 1;

            let mut acted_this_pass = false;
            for &id in &ids {
                let has_budget = ctrl
                    .world
                    .actor(id)
                    .is_some_and(|a| a.is_alive() && a.energy >= cost);
                if !has_budget {
                    continue;
                }

                if self.take_turn(ctrl, router, id)? {
                    acted_this_pass = true;
                    report.actions_executed += 1;
                    if let Some(actor) = ctrl.world.actor_mut(id) {
                        actor.energy = actor.energy.saturating_sub(cost);
                    }
                    // Worlds without a player (sandboxes, tests) never abort.
                    if ctrl.world.player().is_some_and(|p| !p.is_alive()) {
                        report.player_died = true;
                        tracing::debug!(round = self.round, "player died; aborting round");
                        break 'round;
                    }
                }
            }

            if !acted_this_pass {
                break;
            }
        }

        tracing::trace!(?report, "round complete");
        Ok(report)
    }

    /// Produces and routes one actor's next action, if it has one.
    ///
    /// A manually queued player intent always wins over autonomy: it clears
    /// the actor's plan before being routed.
    fn take_turn(
        &mut self,
        ctrl: &mut Controller<'_>,
        router: &ActionRouter,
        id: ActorId,
    ) -> Result<bool, EngineError> {
        if id.is_player()
            && let Some(intent) = self.dequeue_player_action()
        {
            if let Some(actor) = ctrl.world.actor_mut(intent.actor)
                && actor.active_plan.take().is_some()
            {
                tracing::debug!(actor = %intent.actor, "manual intent preempts active plan");
            }
            router.execute_intent(ctrl, intent);
            return Ok(true);
        }

        drive_actor(router, ctrl, id)
    }
}
