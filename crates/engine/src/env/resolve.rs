//! Probability resolver contract.
//!
//! Combat math is not this crate's business; only the result contract is.
//! An executor asks the controller's `ResolverSource` for a fresh resolver,
//! hands it the two actor records and the weapon, and applies whatever comes
//! back. `D20Source` is the shipped d20-flavored reference; `FixedResolver`
//! pins outcomes for tests.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::env::rng::{Pcg32, mix_seed};
use crate::state::{ActorState, WeaponData};

/// What one attack roll produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackOutcome {
    pub hit: bool,
    pub critical: bool,
    pub damage: u32,
}

impl AttackOutcome {
    pub fn miss() -> Self {
        Self {
            hit: false,
            critical: false,
            damage: 0,
        }
    }

    pub fn hit(damage: u32) -> Self {
        Self {
            hit: true,
            critical: false,
            damage,
        }
    }
}

/// One attack resolution instrument. May be stateful across rolls within a
/// single execution; a fresh one is created per executed intent.
pub trait Resolver {
    fn resolve_attack(
        &mut self,
        attacker: &ActorState,
        defender: &ActorState,
        weapon: Option<&WeaponData>,
    ) -> AttackOutcome;
}

/// Factory the controller exposes; executors call `create_resolver` once
/// per resolution.
pub trait ResolverSource: Send + Sync {
    fn create_resolver(&self) -> Box<dyn Resolver>;
}

/// Seeded d20 source. Every created resolver gets its own PCG stream, so
/// outcomes depend only on the game seed and resolution order.
#[derive(Debug)]
pub struct D20Source {
    game_seed: u64,
    streams: AtomicU64,
}

impl D20Source {
    pub fn new(game_seed: u64) -> Self {
        Self {
            game_seed,
            streams: AtomicU64::new(0),
        }
    }
}

impl ResolverSource for D20Source {
    fn create_resolver(&self) -> Box<dyn Resolver> {
        let stream = self.streams.fetch_add(1, Ordering::Relaxed);
        Box::new(D20Resolver {
            rng: Pcg32::new(mix_seed(self.game_seed, stream)),
        })
    }
}

/// d20 + attack bonus vs. static defense; natural 20 crits for double
/// damage, natural 1 always misses.
struct D20Resolver {
    rng: Pcg32,
}

impl Resolver for D20Resolver {
    fn resolve_attack(
        &mut self,
        attacker: &ActorState,
        defender: &ActorState,
        weapon: Option<&WeaponData>,
    ) -> AttackOutcome {
        let roll = self.rng.roll(20) as i32;
        let critical = roll == 20;
        let hit = critical || (roll != 1 && roll + attacker.stats.attack >= defender.stats.defense);
        if !hit {
            return AttackOutcome::miss();
        }

        let (min, max) = match weapon {
            Some(data) => (data.damage_min, data.damage_max),
            None => (attacker.stats.unarmed_min, attacker.stats.unarmed_max),
        };
        let mut damage = self.rng.range(min, max);
        if critical {
            damage *= 2;
        }
        AttackOutcome {
            hit,
            critical,
            damage,
        }
    }
}

/// Resolver that always returns the same outcome. Doubles as its own
/// source, which is what tests want.
#[derive(Clone, Copy, Debug)]
pub struct FixedResolver(pub AttackOutcome);

impl Resolver for FixedResolver {
    fn resolve_attack(
        &mut self,
        _attacker: &ActorState,
        _defender: &ActorState,
        _weapon: Option<&WeaponData>,
    ) -> AttackOutcome {
        self.0
    }
}

impl ResolverSource for FixedResolver {
    fn create_resolver(&self) -> Box<dyn Resolver> {
        Box::new(*self)
    }
}
