//! Intent dispatch and failure arbitration.
//!
//! `execute_intent` is the sole mutation path into the world: UI input, AI,
//! and the plan driver all hand their intents here. Dispatch finds the
//! executor for the intent's kind; arbitration post-processes failures and
//! may convert one into a single synthesized follow-up (bump a door → open
//! it, NPC bumps the player → retaliate).
//!
//! The follow-up chain is an explicit work-list rather than recursion:
//! only original intents may enqueue a follow-up, synthesized ones never
//! re-arbitrate, so the "at most one induced action per failure" invariant
//! is enforced structurally and the chain depth is bounded at one.

use std::collections::VecDeque;

use crate::env::Controller;
use crate::events::GameEvent;
use crate::exec::ExecutorSet;
use crate::intent::{ActionResult, BlockReason, Blocker, Intent};
use crate::state::ActorId;

const BARK_LINES: [&str; 3] = ["Oi, watch it!", "Mind yourself.", "You're in my way."];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Provenance {
    Original,
    /// Created by arbitration; executes once, never escalates again.
    Synthesized,
}

/// Dispatch plus arbitration over a fixed executor table.
pub struct ActionRouter {
    executors: ExecutorSet,
}

impl ActionRouter {
    pub fn new(executors: ExecutorSet) -> Self {
        Self { executors }
    }

    /// Router over the full standard executor table.
    pub fn standard() -> Self {
        Self::new(ExecutorSet::standard())
    }

    /// Resolves one intent, including any arbitration follow-up.
    ///
    /// The returned result describes the original intent (success flag,
    /// blocker, reason); a successful follow-up's consequences and FOV flag
    /// are folded in so one call reports the full outcome.
    pub fn execute_intent(&self, ctrl: &mut Controller<'_>, intent: Intent) -> ActionResult {
        let mut follow_ups = VecDeque::new();
        let mut result = self.run_one(ctrl, &intent, Provenance::Original, &mut follow_ups);

        while let Some(follow_up) = follow_ups.pop_front() {
            let follow_result =
                self.run_one(ctrl, &follow_up, Provenance::Synthesized, &mut follow_ups);
            if follow_result.succeeded {
                result.absorb(&follow_result);
            }
        }

        result
    }

    fn run_one(
        &self,
        ctrl: &mut Controller<'_>,
        intent: &Intent,
        provenance: Provenance,
        follow_ups: &mut VecDeque<Intent>,
    ) -> ActionResult {
        let result = self.dispatch(ctrl, intent);

        // FOV invalidation applies to every execution, synthesized included;
        // it is a success notification, not failure escalation.
        if result.succeeded && result.should_update_fov && intent.actor.is_player() {
            ctrl.fov.request_refresh(intent.actor);
        }

        if provenance == Provenance::Original
            && !result.succeeded
            && let Some(follow_up) = self.arbitrate(ctrl, intent, &result)
        {
            follow_ups.push_back(follow_up);
        }

        result
    }

    fn dispatch(&self, ctrl: &mut Controller<'_>, intent: &Intent) -> ActionResult {
        let kind = intent.kind();
        match self.executors.get(kind) {
            Some(executor) => {
                tracing::debug!(actor = %intent.actor, %kind, "executing intent");
                executor.execute(intent, ctrl)
            }
            None => {
                // Graceful, not fatal: unfinished action kinds dispatch to a
                // failed result with no world mutation.
                tracing::warn!(%kind, "no executor registered for intent kind");
                ActionResult::failure(BlockReason::Unhandled)
            }
        }
    }

    /// The failure rule table. Returns at most one synthesized follow-up.
    fn arbitrate(
        &self,
        ctrl: &mut Controller<'_>,
        intent: &Intent,
        result: &ActionResult,
    ) -> Option<Intent> {
        match result.block_reason? {
            BlockReason::Actor => {
                let Some(Blocker::Actor(bumpee)) = result.blocked_by else {
                    return None;
                };
                self.arbitrate_actor_bump(ctrl, intent.actor, bumpee)
            }
            BlockReason::Door => {
                let Some(Blocker::Tile(at)) = result.blocked_by else {
                    return None;
                };
                tracing::debug!(actor = %intent.actor, %at, "bumped a closed door, opening it");
                Some(Intent::open_door(intent.actor, at))
            }
            BlockReason::Container => {
                let Some(Blocker::Tile(at)) = result.blocked_by else {
                    return None;
                };
                tracing::debug!(actor = %intent.actor, %at, "bumped a container, searching it");
                Some(Intent::search_container(intent.actor, at))
            }
            // Any other failure passes through unchanged.
            _ => None,
        }
    }

    fn arbitrate_actor_bump(
        &self,
        ctrl: &mut Controller<'_>,
        bumper: ActorId,
        bumpee: ActorId,
    ) -> Option<Intent> {
        // Stale check: the blocker may have died since the move resolved.
        if !ctrl.world.actor(bumpee).is_some_and(|a| a.is_alive()) {
            return None;
        }

        if bumper.is_player() && !bumpee.is_player() {
            // Friendly shoulder-bump: a rate-limited complaint, never an attack.
            let window = ctrl.config.bark_window();
            let now = ctrl.now();
            if ctrl.world.try_bark(bumpee, now, window) {
                let line = BARK_LINES[bumpee.0 as usize % BARK_LINES.len()];
                ctrl.publish(GameEvent::Bark {
                    speaker: bumpee,
                    text: line.to_string(),
                });
            }
            None
        } else if bumpee.is_player() && !bumper.is_player() {
            // An NPC pressing into the player is an attack.
            tracing::debug!(%bumper, "bump against the player becomes a melee attack");
            Some(Intent::melee(bumper, bumpee))
        } else {
            // NPC-on-NPC congestion is nobody's fight.
            None
        }
    }
}
