//! Plan context: the immutable snapshot captured when a plan starts.

use crate::state::{ActorId, ItemHandle, TilePos};

/// Everything a plan's steps may reference, captured at `start_plan`.
///
/// The driving controller is not stored here; it is passed by reference
/// into every evaluation, so the context stays plain data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlanContext {
    pub actor: ActorId,
    pub target: Option<ActorId>,
    pub target_pos: Option<TilePos>,
    pub weapon: Option<ItemHandle>,
}

impl PlanContext {
    pub fn new(actor: ActorId) -> Self {
        Self {
            actor,
            target: None,
            target_pos: None,
            weapon: None,
        }
    }
}

/// Context overrides handed to `start_plan`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlanSeed {
    pub target: Option<ActorId>,
    pub target_pos: Option<TilePos>,
    pub weapon: Option<ItemHandle>,
}

impl PlanSeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(mut self, target: ActorId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn at(mut self, position: TilePos) -> Self {
        self.target_pos = Some(position);
        self
    }

    pub fn weapon(mut self, item: ItemHandle) -> Self {
        self.weapon = Some(item);
        self
    }

    pub(crate) fn into_context(self, actor: ActorId) -> PlanContext {
        PlanContext {
            actor,
            target: self.target,
            target_pos: self.target_pos,
            weapon: self.weapon,
        }
    }
}
