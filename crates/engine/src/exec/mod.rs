//! Executors: one stateless strategy per intent kind.
//!
//! An executor applies one intent's effects to world state and reports the
//! outcome as data. Domain failures (blocked tile, no ammo, dead target)
//! are expected runtime outcomes returned in the result, never raised.

mod combat;
mod consumable;
mod interact;
mod movement;

pub use combat::{MeleeAttackExecutor, RangedAttackExecutor};
pub use consumable::UseConsumableExecutor;
pub use interact::{OpenDoorExecutor, SearchContainerExecutor};
pub use movement::{MoveExecutor, WaitExecutor};

use std::collections::HashMap;

use strum::IntoEnumIterator;

use crate::env::Controller;
use crate::intent::{ActionResult, Intent, IntentKind};

/// Applies one intent kind's effects.
///
/// Implementations are stateless strategies; all world access goes through
/// the controller passed per call.
pub trait IntentExecutor: Send + Sync {
    fn execute(&self, intent: &Intent, ctrl: &mut Controller<'_>) -> ActionResult;
}

/// Fixed dispatch table keyed by the closed [`IntentKind`] discriminant.
///
/// [`ExecutorSet::standard`] registers every kind and is coverage-checked
/// against `IntentKind::iter()`. Partial sets remain constructible:
/// dispatch on a missing entry returns a failed result with no mutation,
/// which is what incremental feature rollout relies on.
#[derive(Default)]
pub struct ExecutorSet {
    entries: HashMap<IntentKind, Box<dyn IntentExecutor>>,
}

impl ExecutorSet {
    /// The full table: one executor per intent kind.
    pub fn standard() -> Self {
        let set = Self::empty()
            .with(IntentKind::Move, MoveExecutor)
            .with(IntentKind::MeleeAttack, MeleeAttackExecutor)
            .with(IntentKind::RangedAttack, RangedAttackExecutor)
            .with(IntentKind::OpenDoor, OpenDoorExecutor)
            .with(IntentKind::SearchContainer, SearchContainerExecutor)
            .with(IntentKind::UseConsumable, UseConsumableExecutor)
            .with(IntentKind::Wait, WaitExecutor);
        debug_assert!(set.covers_all_kinds(), "standard set must cover every kind");
        set
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: IntentKind, executor: impl IntentExecutor + 'static) -> Self {
        self.register(kind, Box::new(executor));
        self
    }

    pub fn register(&mut self, kind: IntentKind, executor: Box<dyn IntentExecutor>) {
        self.entries.insert(kind, executor);
    }

    pub fn get(&self, kind: IntentKind) -> Option<&dyn IntentExecutor> {
        self.entries.get(&kind).map(|boxed| boxed.as_ref())
    }

    pub fn covers_all_kinds(&self) -> bool {
        IntentKind::iter().all(|kind| self.entries.contains_key(&kind))
    }
}
