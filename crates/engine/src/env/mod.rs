//! External collaborator contracts and the controller aggregate.
//!
//! The engine consumes its surroundings through narrow traits (static map,
//! pathfinder, probability resolver, event sink, FOV hook, clock), and a
//! [`Controller`] bundles one of each, plus the mutable world and the
//! config, so executors can reach everything they need without hard
//! coupling to concrete implementations. Reference implementations live
//! beside each trait.

mod clock;
mod map;
mod path;
mod resolve;
mod rng;

pub use clock::{Clock, ManualClock, SystemClock};
pub use map::{GridMap, MapDimensions, MapOracle, StaticTile, TerrainKind, line_of_sight};
pub use path::{GridPathfinder, PathError, Pathfinder};
pub use resolve::{AttackOutcome, D20Source, FixedResolver, Resolver, ResolverSource};
pub use rng::{Pcg32, mix_seed};

use std::time::Duration;

use crate::config::EngineConfig;
use crate::events::{EventSink, GameEvent};
use crate::state::{ActorId, WorldState};

/// Receives "player field of view is stale" notifications.
///
/// FOV recomputation itself is a rendering-side concern; the engine only
/// signals when a successful action invalidated it.
pub trait FovHook: Send + Sync {
    fn request_refresh(&self, viewer: ActorId);
}

/// Ignores refresh requests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullFov;

impl FovHook for NullFov {
    fn request_refresh(&self, _viewer: ActorId) {}
}

/// Everything an executor may touch while resolving one intent.
///
/// World access is `&mut` because execution is strictly serial; the rest
/// are shared read-only collaborators.
pub struct Controller<'a> {
    pub world: &'a mut WorldState,
    pub map: &'a dyn MapOracle,
    pub pathfinder: &'a dyn Pathfinder,
    pub dice: &'a dyn ResolverSource,
    pub events: &'a dyn EventSink,
    pub fov: &'a dyn FovHook,
    pub clock: &'a dyn Clock,
    pub config: &'a EngineConfig,
}

impl Controller<'_> {
    /// Fixed energy cost of one executed action.
    pub fn action_cost(&self) -> u32 {
        self.config.action_cost
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    pub fn publish(&self, event: GameEvent) {
        self.events.publish(event);
    }

    /// Convenience for the common message-pane event.
    pub fn message(&self, text: impl Into<String>) {
        self.publish(GameEvent::Message { text: text.into() });
    }
}
