//! Action outcomes: flags and records, never exceptions.

use crate::state::{ActorId, ItemHandle, TilePos};

/// What stood in a failed action's way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Blocker {
    Actor(ActorId),
    Tile(TilePos),
}

/// Why an action failed. Every variant is an expected play outcome: the
/// arbitration table matches on `Actor`/`Door`/`Container`, the rest pass
/// through to the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockReason {
    /// A living actor occupies the destination.
    Actor,
    /// A closed door occupies the destination.
    Door,
    /// A container occupies the destination.
    Container,
    /// Impassable terrain.
    Terrain,
    /// Destination is outside the map.
    Bounds,
    /// Target is beyond the weapon's reach.
    OutOfRange,
    /// No clear sight line to the target.
    NoLineOfSight,
    /// The wielded weapon is out of ammunition.
    NoAmmo,
    /// The referenced target is gone or dead.
    MissingTarget,
    /// The referenced item is gone or not usable this way.
    MissingItem,
    /// No executor registered for this intent kind.
    Unhandled,
}

impl BlockReason {
    /// Short second-person line for the message pane.
    pub fn player_message(self) -> &'static str {
        match self {
            BlockReason::Actor => "Someone is in the way.",
            BlockReason::Door => "The door is closed.",
            BlockReason::Container => "Something bulky is in the way.",
            BlockReason::Terrain => "You can't walk there.",
            BlockReason::Bounds => "There is nothing that way.",
            BlockReason::OutOfRange => "Too far away.",
            BlockReason::NoLineOfSight => "You can't see the target from here.",
            BlockReason::NoAmmo => "Out of ammunition.",
            BlockReason::MissingTarget => "Your target is gone.",
            BlockReason::MissingItem => "You don't have that.",
            BlockReason::Unhandled => "Nothing happens.",
        }
    }
}

/// A concrete world-state change an executed intent produced. Read by
/// callers for messaging and by tests as the record of what happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Consequence {
    Moved { actor: ActorId, from: TilePos, to: TilePos },
    Damage { target: ActorId, amount: u32, critical: bool },
    Missed { target: ActorId },
    Death { actor: ActorId },
    DoorOpened { at: TilePos },
    ContainerSearched { at: TilePos, items_taken: u32 },
    ItemConsumed { actor: ActorId, item: ItemHandle },
    Healed { target: ActorId, amount: u32 },
}

/// Outcome of one `execute_intent` call.
///
/// Produced exactly once per call; failures are flags plus a reason, never
/// an error type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionResult {
    pub succeeded: bool,
    pub should_update_fov: bool,
    pub blocked_by: Option<Blocker>,
    pub block_reason: Option<BlockReason>,
    pub consequences: Vec<Consequence>,
}

impl ActionResult {
    pub fn success() -> Self {
        Self {
            succeeded: true,
            should_update_fov: false,
            blocked_by: None,
            block_reason: None,
            consequences: Vec::new(),
        }
    }

    pub fn failure(reason: BlockReason) -> Self {
        Self {
            succeeded: false,
            should_update_fov: false,
            blocked_by: None,
            block_reason: Some(reason),
            consequences: Vec::new(),
        }
    }

    pub fn blocked_by_actor(actor: ActorId) -> Self {
        Self::failure(BlockReason::Actor).with_blocker(Blocker::Actor(actor))
    }

    pub fn blocked_by_tile(at: TilePos, reason: BlockReason) -> Self {
        Self::failure(reason).with_blocker(Blocker::Tile(at))
    }

    pub fn with_blocker(mut self, blocker: Blocker) -> Self {
        self.blocked_by = Some(blocker);
        self
    }

    pub fn with_fov_update(mut self) -> Self {
        self.should_update_fov = true;
        self
    }

    pub fn with_consequence(mut self, consequence: Consequence) -> Self {
        self.consequences.push(consequence);
        self
    }

    /// Folds a synthesized follow-up's outcome into this result: its
    /// consequences are appended and its FOV flag is OR-ed in, while the
    /// success flags and blocker keep describing the original intent.
    pub fn absorb(&mut self, follow_up: &ActionResult) {
        self.should_update_fov |= follow_up.should_update_fov;
        self.consequences.extend(follow_up.consequences.iter().copied());
    }
}
