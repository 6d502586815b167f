//! Actor records.
//!
//! Everything the engine knows about one creature lives here: vitals,
//! energy budget, carried items, and the autonomous-behavior state the plan
//! driver mutates (`active_plan`, `pathfinding_goal`). There is no separate
//! component store; actor state is literal fields on one record.

use crate::plan::{ActivePlan, PathfindingGoal};
use crate::state::common::{ActorId, ResourceMeter, TilePos};
use crate::state::inventory::{InventoryState, Item, ItemHandle, ItemKind, WeaponData};

/// Combat-facing numbers the probability resolver consumes.
///
/// Hit/damage math is the resolver's business; the engine only stores the
/// inputs the resolver contract names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorStats {
    pub attack: i32,
    pub defense: i32,
    pub unarmed_min: u32,
    pub unarmed_max: u32,
}

impl Default for ActorStats {
    fn default() -> Self {
        Self {
            attack: 2,
            defense: 10,
            unarmed_min: 1,
            unarmed_max: 3,
        }
    }
}

/// A lingering consumable after-effect, ticked once per round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedEffect {
    pub heal_per_turn: u32,
    pub remaining_turns: u32,
}

/// Complete per-actor state.
#[derive(Clone, Debug)]
pub struct ActorState {
    pub id: ActorId,
    pub name: String,
    pub position: TilePos,
    pub hp: ResourceMeter,
    pub stats: ActorStats,

    // === Round scheduling ===
    /// Current energy balance. Withdrawn per action, regenerated per round.
    pub energy: u32,
    /// Regeneration multiplier in percent. 100 = one action per round.
    pub speed: u32,

    // === Possessions ===
    pub inventory: InventoryState,
    pub equipped: Option<ItemHandle>,

    // === Autonomous behavior (driven by TurnManager) ===
    pub active_plan: Option<ActivePlan>,
    pub pathfinding_goal: Option<PathfindingGoal>,

    // === Upkeep ===
    pub effects: Vec<TimedEffect>,
}

impl ActorState {
    pub fn new(id: ActorId, name: impl Into<String>, position: TilePos, max_hp: u32) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            hp: ResourceMeter::full(max_hp),
            stats: ActorStats::default(),
            energy: 0,
            speed: 100,
            inventory: InventoryState::new(),
            equipped: None,
            active_plan: None,
            pathfinding_goal: None,
            effects: Vec::new(),
        }
    }

    pub fn with_stats(mut self, stats: ActorStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_energy(mut self, energy: u32) -> Self {
        self.energy = energy;
        self
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.hp.is_empty()
    }

    #[inline]
    pub fn is_player(&self) -> bool {
        self.id.is_player()
    }

    /// The currently wielded weapon, if the equipped handle still resolves.
    pub fn equipped_weapon(&self) -> Option<&Item> {
        let handle = self.equipped?;
        let item = self.inventory.get(handle)?;
        matches!(item.kind, ItemKind::Weapon(_)).then_some(item)
    }

    pub fn equipped_weapon_data(&self) -> Option<WeaponData> {
        match self.equipped_weapon()?.kind {
            ItemKind::Weapon(data) => Some(data),
            _ => None,
        }
    }

    /// Equips a carried weapon. Returns false if the handle is missing or
    /// not a weapon.
    pub fn equip(&mut self, handle: ItemHandle) -> bool {
        match self.inventory.get(handle) {
            Some(item) if matches!(item.kind, ItemKind::Weapon(_)) => {
                self.equipped = Some(handle);
                true
            }
            _ => false,
        }
    }

    /// Per-round upkeep: apply and expire timed effects.
    ///
    /// Runs for every actor before energy regeneration.
    pub fn update_turn(&mut self) {
        if !self.is_alive() {
            self.effects.clear();
            return;
        }
        for effect in &mut self.effects {
            self.hp.restore(effect.heal_per_turn);
            effect.remaining_turns -= 1;
        }
        self.effects.retain(|effect| effect.remaining_turns > 0);
    }
}
