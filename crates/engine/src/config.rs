use std::time::Duration;

/// Engine configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Energy withdrawn per executed action.
    pub action_cost: u32,

    /// Energy restored to every living actor at the start of each round,
    /// before speed scaling.
    pub base_energy_regen: u32,

    /// Energy ceiling. Caps how many actions an idle actor can bank.
    pub max_energy: u32,

    /// Hard bound on fixed-point passes within one round. A pass that
    /// executes no action always ends the round before this bound matters.
    pub round_pass_cap: u32,

    /// How long a bump bark stays on screen.
    pub bark_display: Duration,

    /// Extra suppression window after a bark's display time elapses.
    pub bark_extra_cooldown: Duration,

    /// Attack reach in tiles when no weapon is equipped.
    pub unarmed_range: u32,
}

impl EngineConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_OCCUPANTS_PER_TILE: usize = 4;
    pub const MAX_INVENTORY_SLOTS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ACTION_COST: u32 = 100;
    pub const DEFAULT_ROUND_PASS_CAP: u32 = 50;

    pub fn new() -> Self {
        Self {
            action_cost: Self::DEFAULT_ACTION_COST,
            base_energy_regen: Self::DEFAULT_ACTION_COST,
            max_energy: Self::DEFAULT_ACTION_COST * 2,
            round_pass_cap: Self::DEFAULT_ROUND_PASS_CAP,
            bark_display: Duration::from_millis(1100),
            bark_extra_cooldown: Duration::from_millis(250),
            unarmed_range: 1,
        }
    }

    /// Full suppression window between barks at the same target.
    pub fn bark_window(&self) -> Duration {
        self.bark_display + self.bark_extra_cooldown
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
