//! Movement executors.

use crate::env::Controller;
use crate::exec::IntentExecutor;
use crate::intent::{ActionRequest, ActionResult, BlockReason, Consequence, Intent};
use crate::state::PropState;

/// Steps the actor one tile.
///
/// Validation order is fixed (bounds → prop → terrain → occupant) so a
/// failing move reports the same reason every time against unchanged world
/// state.
pub struct MoveExecutor;

impl IntentExecutor for MoveExecutor {
    fn execute(&self, intent: &Intent, ctrl: &mut Controller<'_>) -> ActionResult {
        let ActionRequest::Move { dx, dy } = intent.request else {
            return ActionResult::failure(BlockReason::Unhandled);
        };
        debug_assert!(
            dx.abs() <= 1 && dy.abs() <= 1 && (dx, dy) != (0, 0),
            "move deltas are single steps"
        );

        let Some(actor) = ctrl.world.actor(intent.actor).filter(|a| a.is_alive()) else {
            return ActionResult::failure(BlockReason::MissingTarget);
        };
        let origin = actor.position;
        let destination = origin.offset(dx, dy);

        if !ctrl.map.contains(destination) {
            return ActionResult::blocked_by_tile(destination, BlockReason::Bounds);
        }

        match ctrl.world.prop_at(destination) {
            Some(PropState::Door { open: false }) => {
                return ActionResult::blocked_by_tile(destination, BlockReason::Door);
            }
            Some(PropState::Container { .. }) => {
                return ActionResult::blocked_by_tile(destination, BlockReason::Container);
            }
            // An open door overrides terrain: doors sit in wall cuts.
            Some(PropState::Door { open: true }) => {}
            None => {
                if !ctrl.map.is_walkable(destination) {
                    return ActionResult::blocked_by_tile(destination, BlockReason::Terrain);
                }
            }
        }

        if let Some(occupant) = ctrl.world.actor_at(destination) {
            return ActionResult::blocked_by_actor(occupant);
        }

        if !ctrl.world.move_actor(intent.actor, destination) {
            // Occupancy slot refused the move; treat like terrain.
            return ActionResult::blocked_by_tile(destination, BlockReason::Terrain);
        }

        ActionResult::success()
            .with_fov_update()
            .with_consequence(Consequence::Moved {
                actor: intent.actor,
                from: origin,
                to: destination,
            })
    }
}

/// Passes the turn.
pub struct WaitExecutor;

impl IntentExecutor for WaitExecutor {
    fn execute(&self, intent: &Intent, ctrl: &mut Controller<'_>) -> ActionResult {
        if ctrl.world.actor(intent.actor).is_none_or(|a| !a.is_alive()) {
            return ActionResult::failure(BlockReason::MissingTarget);
        }
        ActionResult::success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::Blocker;
    use crate::state::{ActorId, TilePos};
    use crate::testbed::TestBed;

    fn run_move(bed: &mut TestBed, dx: i32, dy: i32) -> ActionResult {
        let intent = Intent::move_by(ActorId::PLAYER, dx, dy);
        MoveExecutor.execute(&intent, &mut bed.ctrl())
    }

    #[test]
    fn walks_onto_open_floor() {
        let mut bed = TestBed::open(4, 4);
        bed.spawn(0, 0, 0);

        let result = run_move(&mut bed, 1, 0);
        assert!(result.succeeded);
        assert!(result.should_update_fov);
        assert_eq!(bed.world.player().unwrap().position, TilePos::new(1, 0));
    }

    #[test]
    fn same_failing_move_reports_the_same_reason() {
        let mut bed = TestBed::from_rows(&[".#", ".."]);
        bed.spawn(0, 0, 0);

        let first = run_move(&mut bed, 1, 0);
        let second = run_move(&mut bed, 1, 0);
        assert_eq!(first.block_reason, Some(BlockReason::Terrain));
        assert_eq!(first.block_reason, second.block_reason);
        assert_eq!(bed.world.player().unwrap().position, TilePos::ORIGIN);
    }

    #[test]
    fn closed_door_and_container_report_their_own_reasons() {
        let mut bed = TestBed::open(3, 1);
        bed.spawn(0, 0, 0);
        bed.world.set_prop(TilePos::new(1, 0), PropState::closed_door());

        let result = run_move(&mut bed, 1, 0);
        assert_eq!(result.block_reason, Some(BlockReason::Door));
        assert_eq!(result.blocked_by, Some(Blocker::Tile(TilePos::new(1, 0))));

        bed.world
            .set_prop(TilePos::new(1, 0), PropState::container(Vec::new()));
        let result = run_move(&mut bed, 1, 0);
        assert_eq!(result.block_reason, Some(BlockReason::Container));
    }

    #[test]
    fn bumping_a_living_actor_names_the_blocker() {
        let mut bed = TestBed::open(3, 1);
        bed.spawn(0, 0, 0);
        let npc = bed.spawn(1, 1, 0);

        let result = run_move(&mut bed, 1, 0);
        assert!(!result.succeeded);
        assert_eq!(result.block_reason, Some(BlockReason::Actor));
        assert_eq!(result.blocked_by, Some(Blocker::Actor(npc)));
    }

    #[test]
    fn dead_occupants_do_not_block() {
        let mut bed = TestBed::open(3, 1);
        bed.spawn(0, 0, 0);
        let npc = bed.spawn(1, 1, 0);
        bed.world.damage_actor(npc, 99);

        assert!(run_move(&mut bed, 1, 0).succeeded);
    }
}
