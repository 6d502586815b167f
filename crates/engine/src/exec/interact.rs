//! Door and container executors.

use crate::env::Controller;
use crate::events::{FxKind, GameEvent};
use crate::exec::IntentExecutor;
use crate::intent::{ActionRequest, ActionResult, BlockReason, Consequence, Intent};
use crate::state::{Item, PropState};

/// Opens the door at a tile. Opening an already-open door is an idempotent
/// success; the arbitration path only ever synthesizes this against closed
/// doors, but UI input may aim anywhere.
pub struct OpenDoorExecutor;

impl IntentExecutor for OpenDoorExecutor {
    fn execute(&self, intent: &Intent, ctrl: &mut Controller<'_>) -> ActionResult {
        let ActionRequest::OpenDoor { at } = intent.request else {
            return ActionResult::failure(BlockReason::Unhandled);
        };

        let Some(actor) = ctrl.world.actor(intent.actor).filter(|a| a.is_alive()) else {
            return ActionResult::failure(BlockReason::MissingTarget);
        };
        if actor.position.chebyshev(at) > 1 {
            return ActionResult::failure(BlockReason::OutOfRange);
        }

        match ctrl.world.prop_at_mut(at) {
            Some(PropState::Door { open }) => {
                if *open {
                    return ActionResult::success();
                }
                *open = true;
            }
            _ => return ActionResult::failure(BlockReason::MissingTarget),
        }

        ctrl.publish(GameEvent::Fx {
            kind: FxKind::DoorOpen,
            at,
        });
        ctrl.message("The door creaks open.");

        ActionResult::success()
            .with_fov_update()
            .with_consequence(Consequence::DoorOpened { at })
    }
}

/// Rifles through the container at a tile, transferring as much loot as the
/// searcher can carry. Leftovers stay in the container.
pub struct SearchContainerExecutor;

impl IntentExecutor for SearchContainerExecutor {
    fn execute(&self, intent: &Intent, ctrl: &mut Controller<'_>) -> ActionResult {
        let ActionRequest::SearchContainer { at } = intent.request else {
            return ActionResult::failure(BlockReason::Unhandled);
        };

        let Some(actor) = ctrl.world.actor(intent.actor).filter(|a| a.is_alive()) else {
            return ActionResult::failure(BlockReason::MissingTarget);
        };
        let searcher_name = actor.name.clone();
        if actor.position.chebyshev(at) > 1 {
            return ActionResult::failure(BlockReason::OutOfRange);
        }

        // Phase 1: lift the contents out of the container.
        let contents = match ctrl.world.prop_at_mut(at) {
            Some(PropState::Container { items, searched }) => {
                *searched = true;
                std::mem::take(items)
            }
            _ => return ActionResult::failure(BlockReason::MissingTarget),
        };
        let was_empty = contents.is_empty();

        // Phase 2: carry what fits, return the rest.
        let mut taken: u32 = 0;
        let mut leftovers: Vec<Item> = Vec::new();
        if let Some(actor) = ctrl.world.actor_mut(intent.actor) {
            for item in contents {
                match actor.inventory.add(item) {
                    Ok(()) => taken += 1,
                    Err(item) => leftovers.push(item),
                }
            }
        }
        if !leftovers.is_empty()
            && let Some(PropState::Container { items, .. }) = ctrl.world.prop_at_mut(at)
        {
            *items = leftovers;
        }

        if was_empty {
            ctrl.message(format!("{searcher_name} finds nothing of value."));
        } else if taken == 0 {
            ctrl.message(format!("{searcher_name} can't carry any more."));
        } else {
            ctrl.message(format!("{searcher_name} rummages up {taken} item(s)."));
        }

        ActionResult::success().with_consequence(Consequence::ContainerSearched {
            at,
            items_taken: taken,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ConsumableEffect, ItemHandle, TilePos};
    use crate::testbed::TestBed;

    fn salve(id: u32) -> Item {
        Item::consumable(ItemHandle(id), "salve", ConsumableEffect::Heal(2))
    }

    #[test]
    fn opens_a_closed_door_once() {
        let mut bed = TestBed::open(3, 1);
        let player = bed.spawn(0, 0, 0);
        let door = TilePos::new(1, 0);
        bed.world.set_prop(door, PropState::closed_door());

        let result = OpenDoorExecutor.execute(&Intent::open_door(player, door), &mut bed.ctrl());
        assert!(result.succeeded);
        assert!(result.should_update_fov);
        assert_eq!(bed.world.prop_at(door), Some(&PropState::Door { open: true }));

        // Second open: success, but nothing to report.
        let again = OpenDoorExecutor.execute(&Intent::open_door(player, door), &mut bed.ctrl());
        assert!(again.succeeded);
        assert!(again.consequences.is_empty());
    }

    #[test]
    fn door_out_of_reach_fails() {
        let mut bed = TestBed::open(5, 1);
        let player = bed.spawn(0, 0, 0);
        let door = TilePos::new(3, 0);
        bed.world.set_prop(door, PropState::closed_door());

        let result = OpenDoorExecutor.execute(&Intent::open_door(player, door), &mut bed.ctrl());
        assert_eq!(result.block_reason, Some(BlockReason::OutOfRange));
        assert_eq!(bed.world.prop_at(door), Some(&PropState::Door { open: false }));
    }

    #[test]
    fn search_transfers_what_fits() {
        let mut bed = TestBed::open(3, 1);
        let player = bed.spawn(0, 0, 0);
        let chest = TilePos::new(1, 0);
        bed.world
            .set_prop(chest, PropState::container(vec![salve(1), salve(2)]));

        let result =
            SearchContainerExecutor.execute(&Intent::search_container(player, chest), &mut bed.ctrl());
        assert!(result.succeeded);
        assert_eq!(
            result.consequences,
            vec![Consequence::ContainerSearched {
                at: chest,
                items_taken: 2
            }]
        );
        assert_eq!(bed.world.player().unwrap().inventory.len(), 2);
        match bed.world.prop_at(chest) {
            Some(PropState::Container { items, searched }) => {
                assert!(items.is_empty());
                assert!(*searched);
            }
            other => panic!("container vanished: {other:?}"),
        }
    }

    #[test]
    fn overflow_stays_in_the_container() {
        let mut bed = TestBed::open(3, 1);
        let player = bed.spawn(0, 0, 0);
        let chest = TilePos::new(1, 0);

        // One free slot, two items on offer.
        for id in 10..17 {
            bed.world
                .actor_mut(player)
                .unwrap()
                .inventory
                .add(salve(id))
                .unwrap();
        }
        bed.world
            .set_prop(chest, PropState::container(vec![salve(1), salve(2)]));

        let result =
            SearchContainerExecutor.execute(&Intent::search_container(player, chest), &mut bed.ctrl());
        assert_eq!(
            result.consequences,
            vec![Consequence::ContainerSearched {
                at: chest,
                items_taken: 1
            }]
        );
        match bed.world.prop_at(chest) {
            Some(PropState::Container { items, .. }) => assert_eq!(items.len(), 1),
            other => panic!("container vanished: {other:?}"),
        }
    }
}
