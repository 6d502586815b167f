//! Attack executors.
//!
//! Both executors defer hit/damage math to the controller's resolver and
//! only apply what comes back. Staleness is checked up front: a target
//! resolved against earlier in the same pass may already be dead.

use crate::env::{AttackOutcome, Controller, line_of_sight};
use crate::events::{FxKind, GameEvent};
use crate::exec::IntentExecutor;
use crate::intent::{ActionRequest, ActionResult, BlockReason, Consequence, Intent};
use crate::state::{ActorId, ItemKind, WeaponData};

/// Strike an adjacent target.
pub struct MeleeAttackExecutor;

impl IntentExecutor for MeleeAttackExecutor {
    fn execute(&self, intent: &Intent, ctrl: &mut Controller<'_>) -> ActionResult {
        let ActionRequest::MeleeAttack { target } = intent.request else {
            return ActionResult::failure(BlockReason::Unhandled);
        };

        let Some(attacker) = ctrl.world.actor(intent.actor).filter(|a| a.is_alive()) else {
            return ActionResult::failure(BlockReason::MissingTarget);
        };
        let Some(defender) = ctrl.world.actor(target).filter(|a| a.is_alive()) else {
            return ActionResult::failure(BlockReason::MissingTarget);
        };

        if attacker.position.chebyshev(defender.position) > ctrl.config.unarmed_range {
            return ActionResult::failure(BlockReason::OutOfRange);
        }

        // A ranged weapon in hand does not swing; melee falls back to fists.
        let weapon = attacker
            .equipped_weapon_data()
            .filter(|data| !data.is_ranged());
        let outcome =
            ctrl.dice
                .create_resolver()
                .resolve_attack(attacker, defender, weapon.as_ref());

        apply_attack_outcome(ctrl, intent.actor, target, outcome, FxKind::MeleeHit)
    }
}

/// Shoot a target with the wielded ranged weapon.
pub struct RangedAttackExecutor;

impl IntentExecutor for RangedAttackExecutor {
    fn execute(&self, intent: &Intent, ctrl: &mut Controller<'_>) -> ActionResult {
        let ActionRequest::RangedAttack { target } = intent.request else {
            return ActionResult::failure(BlockReason::Unhandled);
        };

        let Some(attacker) = ctrl.world.actor(intent.actor).filter(|a| a.is_alive()) else {
            return ActionResult::failure(BlockReason::MissingTarget);
        };
        let Some(defender) = ctrl.world.actor(target).filter(|a| a.is_alive()) else {
            return ActionResult::failure(BlockReason::MissingTarget);
        };

        let Some(weapon) = attacker.equipped_weapon_data().filter(WeaponData::is_ranged) else {
            return ActionResult::failure(BlockReason::MissingItem);
        };
        if weapon.ammo == Some(0) {
            return ActionResult::failure(BlockReason::NoAmmo);
        }
        if attacker.position.chebyshev(defender.position) > weapon.range {
            return ActionResult::failure(BlockReason::OutOfRange);
        }
        if !line_of_sight(ctrl.map, ctrl.world, attacker.position, defender.position) {
            return ActionResult::failure(BlockReason::NoLineOfSight);
        }

        let outcome = ctrl
            .dice
            .create_resolver()
            .resolve_attack(attacker, defender, Some(&weapon));

        // The shot is fired regardless of where it lands.
        spend_ammo(ctrl, intent.actor);

        apply_attack_outcome(ctrl, intent.actor, target, outcome, FxKind::RangedHit)
    }
}

fn spend_ammo(ctrl: &mut Controller<'_>, attacker: ActorId) {
    let Some(actor) = ctrl.world.actor_mut(attacker) else {
        return;
    };
    let Some(handle) = actor.equipped else {
        return;
    };
    if let Some(item) = actor.inventory.get_mut(handle)
        && let ItemKind::Weapon(data) = &mut item.kind
        && let Some(ammo) = &mut data.ammo
    {
        *ammo = ammo.saturating_sub(1);
    }
}

/// Applies a resolver outcome: damage, death handling, events.
fn apply_attack_outcome(
    ctrl: &mut Controller<'_>,
    attacker: ActorId,
    target: ActorId,
    outcome: AttackOutcome,
    hit_fx: FxKind,
) -> ActionResult {
    let attacker_name = ctrl
        .world
        .actor(attacker)
        .map_or_else(|| attacker.to_string(), |a| a.name.clone());
    let Some(target_state) = ctrl.world.actor(target) else {
        return ActionResult::failure(BlockReason::MissingTarget);
    };
    let target_name = target_state.name.clone();
    let target_pos = target_state.position;

    if !outcome.hit {
        ctrl.publish(GameEvent::Fx {
            kind: FxKind::Miss,
            at: target_pos,
        });
        ctrl.message(format!("{attacker_name} misses {target_name}."));
        return ActionResult::success().with_consequence(Consequence::Missed { target });
    }

    let Some(applied) = ctrl.world.damage_actor(target, outcome.damage) else {
        return ActionResult::failure(BlockReason::MissingTarget);
    };

    ctrl.publish(GameEvent::Fx {
        kind: hit_fx,
        at: target_pos,
    });
    if outcome.critical {
        ctrl.publish(GameEvent::ScreenShake { intensity: 3 });
        ctrl.message(format!(
            "{attacker_name} lands a crushing blow on {target_name}!"
        ));
    } else {
        ctrl.message(format!("{attacker_name} hits {target_name}."));
    }

    let mut result = ActionResult::success().with_consequence(Consequence::Damage {
        target,
        amount: applied.amount,
        critical: outcome.critical,
    });

    if applied.died {
        ctrl.publish(GameEvent::Fx {
            kind: FxKind::Death,
            at: target_pos,
        });
        ctrl.message(format!("{target_name} dies."));
        result = result.with_consequence(Consequence::Death { actor: target });
    }

    result
}
