//! Pathfinder contract and a grid BFS reference implementation.
//!
//! The engine only depends on the produced path and on the failure split:
//! `NoPath` is terminal (the plan driver cancels), `Blocked` is transient
//! (retry next turn once the crowd moves).

use std::collections::{BTreeMap, VecDeque};

use crate::env::map::MapOracle;
use crate::state::{TilePos, WorldState};

/// Pathfinding failure, split by recoverability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// No route exists over static terrain. Terminal.
    #[error("no path exists to the goal")]
    NoPath,

    /// A route exists but living actors currently close it. Transient.
    #[error("path temporarily blocked")]
    Blocked,
}

/// Produces an ordered tile sequence from just after `start` to `goal`
/// inclusive, or a distinguishable failure.
pub trait Pathfinder: Send + Sync {
    fn find_path(
        &self,
        map: &dyn MapOracle,
        world: &WorldState,
        start: TilePos,
        goal: TilePos,
    ) -> Result<Vec<TilePos>, PathError>;
}

/// Breadth-first search over the four orthogonal neighbors.
///
/// Closed doors count as traversable for planning: walking into one fails
/// at execution time and arbitration converts the bump into an open-door
/// action, so routes through doors are real routes. Containers and
/// impassable terrain are not.
#[derive(Clone, Copy, Debug, Default)]
pub struct GridPathfinder;

impl GridPathfinder {
    fn tile_enterable(map: &dyn MapOracle, world: &WorldState, position: TilePos) -> bool {
        if let Some(prop) = world.prop_at(position) {
            if prop.is_container() {
                return false;
            }
            // Door, open or closed: plannable.
            return map.contains(position);
        }
        map.is_walkable(position)
    }

    fn search(
        map: &dyn MapOracle,
        world: &WorldState,
        start: TilePos,
        goal: TilePos,
        avoid_actors: bool,
    ) -> Option<Vec<TilePos>> {
        if start == goal {
            return Some(Vec::new());
        }

        let mut came_from: BTreeMap<TilePos, TilePos> = BTreeMap::new();
        let mut frontier = VecDeque::new();
        frontier.push_back(start);
        came_from.insert(start, start);

        while let Some(current) = frontier.pop_front() {
            for next in current.orthogonal_neighbors() {
                if came_from.contains_key(&next) {
                    continue;
                }
                if !Self::tile_enterable(map, world, next) {
                    continue;
                }
                // The goal tile itself may hold an actor (approaching a
                // target); intermediate hops may not when avoiding.
                if avoid_actors && next != goal && world.actor_at(next).is_some() {
                    continue;
                }
                came_from.insert(next, current);
                if next == goal {
                    let mut path = vec![next];
                    let mut cursor = current;
                    while cursor != start {
                        path.push(cursor);
                        cursor = came_from[&cursor];
                    }
                    path.reverse();
                    return Some(path);
                }
                frontier.push_back(next);
            }
        }
        None
    }
}

impl Pathfinder for GridPathfinder {
    fn find_path(
        &self,
        map: &dyn MapOracle,
        world: &WorldState,
        start: TilePos,
        goal: TilePos,
    ) -> Result<Vec<TilePos>, PathError> {
        if let Some(path) = Self::search(map, world, start, goal, true) {
            return Ok(path);
        }
        if Self::search(map, world, start, goal, false).is_some() {
            return Err(PathError::Blocked);
        }
        Err(PathError::NoPath)
    }
}
