//! World and actor state types.
//!
//! - `common`: ids, tile positions, resource meters
//! - `actor`: per-actor records (vitals, energy, possessions, plan state)
//! - `inventory`: items and bounded inventory storage
//! - `prop`: doors and containers layered on static terrain
//! - `world`: the mutable store plus occupancy index and bark gate

pub mod actor;
pub mod common;
pub mod inventory;
pub mod prop;
pub mod world;

pub use actor::{ActorState, ActorStats, TimedEffect};
pub use common::{ActorId, ResourceMeter, TilePos};
pub use inventory::{ConsumableEffect, InventoryState, Item, ItemHandle, ItemKind, WeaponData};
pub use prop::PropState;
pub use world::{BarkGate, DamageApplied, OccupantSlots, WorldState};
