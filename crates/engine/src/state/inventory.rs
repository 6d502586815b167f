//! Items and actor-owned inventory storage.
//!
//! Rich item data tables (names, descriptions, loot weights) are an external
//! concern; items here carry exactly the fields the executors consume:
//! weapon reach/damage/ammo and consumable effects.

use arrayvec::ArrayVec;

use crate::config::EngineConfig;

/// Opaque handle identifying one item instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemHandle(pub u32);

/// One item instance carried by an actor or stored in a container.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub handle: ItemHandle,
    pub name: String,
    pub kind: ItemKind,
}

impl Item {
    pub fn new(handle: ItemHandle, name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            handle,
            name: name.into(),
            kind,
        }
    }

    pub fn weapon(handle: ItemHandle, name: impl Into<String>, data: WeaponData) -> Self {
        Self::new(handle, name, ItemKind::Weapon(data))
    }

    pub fn consumable(handle: ItemHandle, name: impl Into<String>, effect: ConsumableEffect) -> Self {
        Self::new(handle, name, ItemKind::Consumable(effect))
    }
}

/// Item type with type-specific data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    /// Equippable weapon.
    Weapon(WeaponData),

    /// Consumable item (potions, salves).
    Consumable(ConsumableEffect),

    /// Inert valuable; exists to be looted.
    Trinket,
}

/// Weapon-specific data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponData {
    pub damage_min: u32,
    pub damage_max: u32,
    /// Attack reach in tiles (Chebyshev). 1 = melee.
    pub range: u32,
    /// Remaining shots for ranged weapons. `None` means the weapon does not
    /// track ammunition (melee).
    pub ammo: Option<u32>,
}

impl WeaponData {
    pub fn melee(damage_min: u32, damage_max: u32) -> Self {
        Self {
            damage_min,
            damage_max,
            range: 1,
            ammo: None,
        }
    }

    pub fn ranged(damage_min: u32, damage_max: u32, range: u32, ammo: u32) -> Self {
        Self {
            damage_min,
            damage_max,
            range,
            ammo: Some(ammo),
        }
    }

    pub fn is_ranged(&self) -> bool {
        self.range > 1
    }
}

/// Consumable effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConsumableEffect {
    /// Restore health immediately.
    Heal(u32),

    /// Restore health over time.
    Regeneration { per_turn: u32, turns: u32 },
}

/// Bounded item storage owned by one actor.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryState {
    slots: ArrayVec<Item, { EngineConfig::MAX_INVENTORY_SLOTS }>,
}

impl InventoryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.is_full()
    }

    pub fn get(&self, handle: ItemHandle) -> Option<&Item> {
        self.slots.iter().find(|item| item.handle == handle)
    }

    pub fn get_mut(&mut self, handle: ItemHandle) -> Option<&mut Item> {
        self.slots.iter_mut().find(|item| item.handle == handle)
    }

    /// Adds an item. Returns the item back if the inventory is full.
    pub fn add(&mut self, item: Item) -> Result<(), Item> {
        self.slots.try_push(item).map_err(|err| err.element())
    }

    /// Removes and returns the item with `handle`, if present.
    pub fn remove(&mut self, handle: ItemHandle) -> Option<Item> {
        let index = self.slots.iter().position(|item| item.handle == handle)?;
        Some(self.slots.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_rejects_overflow() {
        let mut inv = InventoryState::new();
        for i in 0..EngineConfig::MAX_INVENTORY_SLOTS {
            let item = Item::consumable(ItemHandle(i as u32), "salve", ConsumableEffect::Heal(1));
            assert!(inv.add(item).is_ok());
        }
        let extra = Item::consumable(ItemHandle(99), "salve", ConsumableEffect::Heal(1));
        assert!(inv.add(extra).is_err());
        assert!(inv.is_full());
    }

    #[test]
    fn remove_by_handle() {
        let mut inv = InventoryState::new();
        inv.add(Item::weapon(ItemHandle(7), "knife", WeaponData::melee(1, 3)))
            .unwrap();
        assert!(inv.get(ItemHandle(7)).is_some());
        let removed = inv.remove(ItemHandle(7)).unwrap();
        assert_eq!(removed.handle, ItemHandle(7));
        assert!(inv.is_empty());
    }
}
