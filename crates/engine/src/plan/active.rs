//! Live plan and pathfinding-goal state owned by one actor.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::intent::Intent;
use crate::plan::context::PlanContext;
use crate::plan::template::ActionPlan;
use crate::plan::step::Step;
use crate::state::TilePos;

/// Cursor over one running plan instance.
///
/// # Invariants
///
/// - `current_step_index` only ever increases; the only way "back" is
///   cancelling the whole plan.
/// - `advance` clears the cached path, since different steps generally need
///   different routes.
#[derive(Clone, Debug)]
pub struct ActivePlan {
    plan: Arc<ActionPlan>,
    context: PlanContext,
    current_step_index: usize,
    cached_path: VecDeque<TilePos>,
}

impl ActivePlan {
    pub fn new(plan: Arc<ActionPlan>, context: PlanContext) -> Self {
        Self {
            plan,
            context,
            current_step_index: 0,
            cached_path: VecDeque::new(),
        }
    }

    pub fn plan(&self) -> &ActionPlan {
        &self.plan
    }

    pub fn context(&self) -> &PlanContext {
        &self.context
    }

    pub fn current_step_index(&self) -> usize {
        self.current_step_index
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.plan.step(self.current_step_index)
    }

    pub fn is_complete(&self) -> bool {
        self.current_step_index == self.plan.len()
    }

    /// Moves the cursor forward by exactly one step and drops the cached
    /// path.
    pub fn advance(&mut self) {
        debug_assert!(!self.is_complete(), "advance past the end of the plan");
        self.current_step_index += 1;
        self.cached_path.clear();
    }

    // ========================================================================
    // Cached path
    // ========================================================================

    pub fn has_path(&self) -> bool {
        !self.cached_path.is_empty()
    }

    pub fn set_path(&mut self, path: Vec<TilePos>) {
        self.cached_path = path.into();
    }

    pub fn clear_path(&mut self) {
        self.cached_path.clear();
    }

    /// Next hop without consuming it; pop only after the move succeeds.
    pub fn peek_hop(&self) -> Option<TilePos> {
        self.cached_path.front().copied()
    }

    pub fn pop_hop(&mut self) -> Option<TilePos> {
        self.cached_path.pop_front()
    }
}

/// Transient autonomous-movement state: walk to a position, optionally do
/// one thing on arrival. Independent of any `ActivePlan` on the same actor.
#[derive(Clone, Debug)]
pub struct PathfindingGoal {
    pub target: TilePos,
    pub final_intent: Option<Intent>,
    pub path: VecDeque<TilePos>,
}

impl PathfindingGoal {
    pub fn new(target: TilePos) -> Self {
        Self {
            target,
            final_intent: None,
            path: VecDeque::new(),
        }
    }

    pub fn with_final_intent(mut self, intent: Intent) -> Self {
        self.final_intent = Some(intent);
        self
    }
}
