//! Shared unit-test fixture: a tiny world plus stub collaborators.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::config::EngineConfig;
use crate::env::{
    AttackOutcome, Controller, FixedResolver, FovHook, GridMap, GridPathfinder, ManualClock,
};
use crate::events::RecordingSink;
use crate::state::{ActorId, ActorState, TilePos, WorldState};

/// Counts FOV refresh requests.
#[derive(Debug, Default)]
pub(crate) struct CountingFov {
    refreshes: AtomicU32,
}

impl CountingFov {
    pub fn count(&self) -> u32 {
        self.refreshes.load(Ordering::Relaxed)
    }
}

impl FovHook for CountingFov {
    fn request_refresh(&self, _viewer: ActorId) {
        self.refreshes.fetch_add(1, Ordering::Relaxed);
    }
}

/// Owns one of every collaborator so tests can borrow a [`Controller`].
pub(crate) struct TestBed {
    pub world: WorldState,
    pub map: GridMap,
    pub config: EngineConfig,
    pub pathfinder: GridPathfinder,
    pub dice: FixedResolver,
    pub events: RecordingSink,
    pub fov: CountingFov,
    pub clock: ManualClock,
}

impl TestBed {
    /// Open floor rectangle; resolver pinned to a plain 3-damage hit.
    pub fn open(width: u32, height: u32) -> Self {
        Self::with_map(GridMap::open(width, height))
    }

    pub fn from_rows(rows: &[&str]) -> Self {
        Self::with_map(GridMap::from_rows(rows))
    }

    fn with_map(map: GridMap) -> Self {
        Self {
            world: WorldState::new(),
            map,
            config: EngineConfig::default(),
            pathfinder: GridPathfinder,
            dice: FixedResolver(AttackOutcome::hit(3)),
            events: RecordingSink::new(),
            fov: CountingFov::default(),
            clock: ManualClock::new(),
        }
    }

    pub fn ctrl(&mut self) -> Controller<'_> {
        Controller {
            world: &mut self.world,
            map: &self.map,
            pathfinder: &self.pathfinder,
            dice: &self.dice,
            events: &self.events,
            fov: &self.fov,
            clock: &self.clock,
            config: &self.config,
        }
    }

    /// Spawns a 10-hp actor and returns its id.
    pub fn spawn(&mut self, id: u32, x: i32, y: i32) -> ActorId {
        let id = ActorId(id);
        self.world
            .insert_actor(ActorState::new(id, format!("actor-{}", id.0), TilePos::new(x, y), 10));
        id
    }
}
