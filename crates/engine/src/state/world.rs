//! Mutable world store: actors, occupancy index, prop layer, bark gate.
//!
//! Execution is strictly serial, so the store hands out plain `&mut`
//! access with no locking. The one discipline callers must keep is
//! staleness checking: an actor resolved against earlier in the same pass
//! may have died since, so `is_alive` gates every re-use.

use std::collections::BTreeMap;
use std::time::Duration;

use arrayvec::ArrayVec;

use crate::config::EngineConfig;
use crate::state::actor::ActorState;
use crate::state::common::{ActorId, TilePos};
use crate::state::prop::PropState;

pub type OccupantSlots = ArrayVec<ActorId, { EngineConfig::MAX_OCCUPANTS_PER_TILE }>;

/// Outcome of applying damage to one actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageApplied {
    pub amount: u32,
    pub died: bool,
}

/// Aggregated mutable world state.
///
/// Actors are keyed by id in a `BTreeMap`, which doubles as the stable
/// world-list order the round scheduler iterates in.
#[derive(Clone, Debug, Default)]
pub struct WorldState {
    actors: BTreeMap<ActorId, ActorState>,
    occupancy: BTreeMap<TilePos, OccupantSlots>,
    props: BTreeMap<TilePos, PropState>,
    barks: BarkGate,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Actor store
    // ========================================================================

    pub fn actor(&self, id: ActorId) -> Option<&ActorState> {
        self.actors.get(&id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut ActorState> {
        self.actors.get_mut(&id)
    }

    pub fn player(&self) -> Option<&ActorState> {
        self.actor(ActorId::PLAYER)
    }

    pub fn player_alive(&self) -> bool {
        self.player().is_some_and(|p| p.is_alive())
    }

    /// All actor ids in stable world-list order (ascending id).
    pub fn actor_ids(&self) -> Vec<ActorId> {
        self.actors.keys().copied().collect()
    }

    pub fn actors(&self) -> impl Iterator<Item = &ActorState> {
        self.actors.values()
    }

    /// Inserts an actor and registers it in the occupancy index.
    ///
    /// Replacing an existing id is a logic error upstream; the old record is
    /// fully evicted first so the index never holds a stale entry.
    pub fn insert_actor(&mut self, actor: ActorState) {
        let id = actor.id;
        if self.actors.contains_key(&id) {
            self.remove_actor(id);
        }
        if actor.is_alive() {
            self.add_occupant(actor.position, id);
        }
        self.actors.insert(id, actor);
    }

    /// Removes an actor entirely: record, occupancy entry, and bark-gate
    /// entry all go. Plan and goal state die with the record.
    pub fn remove_actor(&mut self, id: ActorId) -> Option<ActorState> {
        let actor = self.actors.remove(&id)?;
        self.remove_occupant(actor.position, id);
        self.barks.evict(id);
        Some(actor)
    }

    // ========================================================================
    // Spatial index
    // ========================================================================

    /// The living actor standing at `position`, if any.
    pub fn actor_at(&self, position: TilePos) -> Option<ActorId> {
        self.occupancy
            .get(&position)?
            .iter()
            .copied()
            .find(|&id| self.actors.get(&id).is_some_and(|a| a.is_alive()))
    }

    /// Living actors within `radius` (Chebyshev) of `center`, in id order.
    pub fn actors_in_range(&self, center: TilePos, radius: u32) -> Vec<ActorId> {
        self.actors
            .values()
            .filter(|a| a.is_alive() && a.position.chebyshev(center) <= radius)
            .map(|a| a.id)
            .collect()
    }

    /// Moves an actor to `destination`, keeping the occupancy index in sync.
    /// Returns false (and leaves the world untouched) if the actor is
    /// missing or the index rejects the move.
    pub fn move_actor(&mut self, id: ActorId, destination: TilePos) -> bool {
        let Some(origin) = self.actors.get(&id).map(|a| a.position) else {
            return false;
        };

        if !self.remove_occupant(origin, id) {
            return false;
        }
        if !self.add_occupant(destination, id) {
            // Rollback on failure
            self.add_occupant(origin, id);
            return false;
        }

        if let Some(actor) = self.actors.get_mut(&id) {
            actor.position = destination;
        }
        true
    }

    fn add_occupant(&mut self, position: TilePos, id: ActorId) -> bool {
        let slot = self.occupancy.entry(position).or_default();
        if slot.contains(&id) {
            return true;
        }
        slot.try_push(id).is_ok()
    }

    fn remove_occupant(&mut self, position: TilePos, id: ActorId) -> bool {
        let Some(slot) = self.occupancy.get_mut(&position) else {
            return false;
        };
        let Some(index) = slot.iter().position(|occupant| *occupant == id) else {
            return false;
        };
        slot.swap_remove(index);
        if slot.is_empty() {
            self.occupancy.remove(&position);
        }
        true
    }

    // ========================================================================
    // Health mutation
    // ========================================================================

    /// Applies damage. A kill clears the occupancy entry and bark state but
    /// keeps the record, so same-pass staleness checks resolve against real
    /// data instead of a dangling id.
    pub fn damage_actor(&mut self, id: ActorId, amount: u32) -> Option<DamageApplied> {
        let actor = self.actors.get_mut(&id)?;
        let applied = actor.hp.deplete(amount);
        let died = actor.hp.is_empty();
        if died {
            let position = actor.position;
            actor.active_plan = None;
            actor.pathfinding_goal = None;
            self.remove_occupant(position, id);
            self.barks.evict(id);
        }
        Some(DamageApplied {
            amount: applied,
            died,
        })
    }

    // ========================================================================
    // Prop layer
    // ========================================================================

    pub fn prop_at(&self, position: TilePos) -> Option<&PropState> {
        self.props.get(&position)
    }

    pub fn prop_at_mut(&mut self, position: TilePos) -> Option<&mut PropState> {
        self.props.get_mut(&position)
    }

    pub fn set_prop(&mut self, position: TilePos, prop: PropState) {
        self.props.insert(position, prop);
    }

    // ========================================================================
    // Bark gate
    // ========================================================================

    /// Attempts to fire a bump bark at `target`. Returns true (and records
    /// the timestamp) only when the suppression window has fully elapsed.
    pub fn try_bark(&mut self, target: ActorId, now: Duration, window: Duration) -> bool {
        self.barks.try_trigger(target, now, window)
    }

    #[cfg(test)]
    pub(crate) fn bark_gate(&self) -> &BarkGate {
        &self.barks
    }
}

/// Per-target bark cooldown side table.
///
/// Owned by the world rather than the router so entries are evicted when
/// their actor leaves the world instead of accumulating across actor
/// lifetimes.
#[derive(Clone, Debug, Default)]
pub struct BarkGate {
    last_fired: BTreeMap<ActorId, Duration>,
}

impl BarkGate {
    pub fn try_trigger(&mut self, target: ActorId, now: Duration, window: Duration) -> bool {
        if let Some(&last) = self.last_fired.get(&target)
            && now.saturating_sub(last) < window
        {
            return false;
        }
        self.last_fired.insert(target, now);
        true
    }

    pub fn evict(&mut self, target: ActorId) {
        self.last_fired.remove(&target);
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, target: ActorId) -> bool {
        self.last_fired.contains_key(&target)
    }
}
