//! Shared integration fixture: a small world with stub collaborators.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};

use mirefall_engine::{
    ActorId, ActorState, AttackOutcome, Controller, EngineConfig, FixedResolver, FovHook, GridMap,
    GridPathfinder, ManualClock, RecordingSink, TilePos, WorldState,
};

/// Routes engine tracing into the test harness when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Counts FOV refresh requests.
#[derive(Debug, Default)]
pub struct CountingFov {
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

pub struct Fixture {
    pub world: WorldState,
    pub map: GridMap,
    pub config: EngineConfig,
    pub pathfinder: GridPathfinder,
    pub dice: FixedResolver,
    pub events: RecordingSink,
    pub fov: CountingFov,
    pub clock: ManualClock,
}

impl Fixture {
    pub fn open(width: u32, height: u32) -> Self {
        Self::with_map(GridMap::open(width, height))
    }

    pub fn from_rows(rows: &[&str]) -> Self {
        Self::with_map(GridMap::from_rows(rows))
    }

    fn with_map(map: GridMap) -> Self {
        init_tracing();
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

    /// Spawns a 10-hp actor with a full round of energy banked.
    pub fn spawn(&mut self, id: u32, x: i32, y: i32) -> ActorId {
        let id = ActorId(id);
        let actor = ActorState::new(id, format!("actor-{}", id.0), TilePos::new(x, y), 10)
            .with_energy(self.config.action_cost);
        self.world.insert_actor(actor);
        id
    }
}
