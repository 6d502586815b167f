//! Intents: pure-data requests to perform a game action.
//!
//! An intent never mutates anything itself. UI input, AI, arbitration, and
//! the plan driver all speak this one vocabulary; the router consumes each
//! instance exactly once.

pub mod result;

pub use result::{ActionResult, BlockReason, Blocker, Consequence};

use crate::state::{ActorId, ItemHandle, TilePos};

/// Cosmetic animation suggestion carried alongside the request. Frontends
/// may ignore it; the engine never reads it back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimationHint {
    Idle,
    Walk,
    Swing,
    Shoot,
    Rummage,
    Quaff,
}

/// Action-kind-specific request payload.
///
/// A closed union: the set of action kinds is fixed and centrally defined,
/// and [`IntentKind`] is derived from it so dispatch tables can be checked
/// for coverage by iterating the discriminants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumDiscriminants)]
#[strum_discriminants(name(IntentKind))]
#[strum_discriminants(derive(Hash, PartialOrd, Ord, strum::EnumIter, strum::Display))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionRequest {
    /// Step one tile by delta.
    Move { dx: i32, dy: i32 },

    /// Strike an adjacent target with the wielded (or bare) weapon.
    MeleeAttack { target: ActorId },

    /// Shoot a target with the wielded ranged weapon.
    RangedAttack { target: ActorId },

    /// Open the door standing at a tile.
    OpenDoor { at: TilePos },

    /// Rifle through the container standing at a tile.
    SearchContainer { at: TilePos },

    /// Drink/apply a carried consumable.
    UseConsumable { item: ItemHandle },

    /// Pass the turn.
    Wait,
}

/// An actor's desire to act: immutable request record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Intent {
    pub actor: ActorId,
    pub hint: AnimationHint,
    pub request: ActionRequest,
}

impl Intent {
    pub fn new(actor: ActorId, request: ActionRequest, hint: AnimationHint) -> Self {
        Self {
            actor,
            hint,
            request,
        }
    }

    pub fn kind(&self) -> IntentKind {
        IntentKind::from(&self.request)
    }

    pub fn with_hint(mut self, hint: AnimationHint) -> Self {
        self.hint = hint;
        self
    }

    // ========================================================================
    // Constructors (default hints per kind)
    // ========================================================================

    pub fn move_by(actor: ActorId, dx: i32, dy: i32) -> Self {
        Self::new(actor, ActionRequest::Move { dx, dy }, AnimationHint::Walk)
    }

    pub fn melee(actor: ActorId, target: ActorId) -> Self {
        Self::new(
            actor,
            ActionRequest::MeleeAttack { target },
            AnimationHint::Swing,
        )
    }

    pub fn ranged(actor: ActorId, target: ActorId) -> Self {
        Self::new(
            actor,
            ActionRequest::RangedAttack { target },
            AnimationHint::Shoot,
        )
    }

    pub fn open_door(actor: ActorId, at: TilePos) -> Self {
        Self::new(actor, ActionRequest::OpenDoor { at }, AnimationHint::Idle)
    }

    pub fn search_container(actor: ActorId, at: TilePos) -> Self {
        Self::new(
            actor,
            ActionRequest::SearchContainer { at },
            AnimationHint::Rummage,
        )
    }

    pub fn use_consumable(actor: ActorId, item: ItemHandle) -> Self {
        Self::new(
            actor,
            ActionRequest::UseConsumable { item },
            AnimationHint::Quaff,
        )
    }

    pub fn wait(actor: ActorId) -> Self {
        Self::new(actor, ActionRequest::Wait, AnimationHint::Idle)
    }
}
