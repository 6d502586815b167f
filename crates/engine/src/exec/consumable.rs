//! Consumable-use executor.

use crate::env::Controller;
use crate::events::{FxKind, GameEvent};
use crate::exec::IntentExecutor;
use crate::intent::{ActionRequest, ActionResult, BlockReason, Consequence, Intent};
use crate::state::{ConsumableEffect, ItemKind, TimedEffect};

/// Drinks/applies a carried consumable: instant heals land immediately,
/// regeneration registers a timed effect ticked by round upkeep. The item
/// is removed either way.
pub struct UseConsumableExecutor;

impl IntentExecutor for UseConsumableExecutor {
    fn execute(&self, intent: &Intent, ctrl: &mut Controller<'_>) -> ActionResult {
        let ActionRequest::UseConsumable { item } = intent.request else {
            return ActionResult::failure(BlockReason::Unhandled);
        };

        let Some(actor) = ctrl.world.actor_mut(intent.actor).filter(|a| a.is_alive()) else {
            return ActionResult::failure(BlockReason::MissingTarget);
        };

        let effect = match actor.inventory.get(item) {
            Some(entry) => match entry.kind {
                ItemKind::Consumable(effect) => effect,
                _ => return ActionResult::failure(BlockReason::MissingItem),
            },
            None => return ActionResult::failure(BlockReason::MissingItem),
        };

        let Some(consumed) = actor.inventory.remove(item) else {
            return ActionResult::failure(BlockReason::MissingItem);
        };
        if actor.equipped == Some(item) {
            actor.equipped = None;
        }

        let mut result = ActionResult::success().with_consequence(Consequence::ItemConsumed {
            actor: intent.actor,
            item,
        });

        match effect {
            ConsumableEffect::Heal(amount) => {
                let healed = actor.hp.restore(amount);
                result = result.with_consequence(Consequence::Healed {
                    target: intent.actor,
                    amount: healed,
                });
            }
            ConsumableEffect::Regeneration { per_turn, turns } => {
                actor.effects.push(TimedEffect {
                    heal_per_turn: per_turn,
                    remaining_turns: turns,
                });
            }
        }

        let name = actor.name.clone();
        let position = actor.position;
        ctrl.publish(GameEvent::Fx {
            kind: FxKind::Heal,
            at: position,
        });
        ctrl.message(format!("{name} uses the {}.", consumed.name));

        result
    }
}
