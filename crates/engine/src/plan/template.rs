//! Plan templates.

use std::sync::Arc;

use crate::plan::step::{IntentTemplate, SkipCondition, Step};

/// Immutable named template: an ordered step list plus start requirements.
/// One `ActionPlan` is shared by every instance running it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionPlan {
    name: &'static str,
    steps: Vec<Step>,
    requires_target: bool,
    requires_adjacency: bool,
}

impl ActionPlan {
    pub fn new(name: &'static str, steps: Vec<Step>) -> Self {
        Self {
            name,
            steps,
            requires_target: false,
            requires_adjacency: false,
        }
    }

    pub fn requiring_target(mut self) -> Self {
        self.requires_target = true;
        self
    }

    pub fn requiring_adjacency(mut self) -> Self {
        self.requires_adjacency = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn requires_target(&self) -> bool {
        self.requires_target
    }

    pub fn requires_adjacency(&self) -> bool {
        self.requires_adjacency
    }

    // ========================================================================
    // Library
    // ========================================================================

    /// Close to arm's reach, then strike. The attack is skipped if the
    /// target dies on the way in.
    pub fn melee_assault() -> Arc<Self> {
        Arc::new(
            Self::new(
                "melee assault",
                vec![
                    Step::approach(1),
                    Step::intent_unless(IntentTemplate::MeleeAttackTarget, SkipCondition::TargetDead),
                ],
            )
            .requiring_target(),
        )
    }

    /// Close to shooting range, then loose.
    pub fn ranged_assault(preferred_range: u32) -> Arc<Self> {
        Arc::new(
            Self::new(
                "ranged assault",
                vec![
                    Step::approach(preferred_range),
                    Step::intent_unless(IntentTemplate::RangedAttackTarget, SkipCondition::TargetDead),
                ],
            )
            .requiring_target(),
        )
    }

    /// Walk to a container and rifle through it.
    pub fn loot_container() -> Arc<Self> {
        Arc::new(Self::new(
            "loot container",
            vec![
                Step::approach(1),
                Step::intent(IntentTemplate::SearchContainerAtTarget),
            ],
        ))
    }

    /// Walk to a door and open it; nothing to do if it already stands open.
    pub fn force_door() -> Arc<Self> {
        Arc::new(Self::new(
            "force door",
            vec![
                Step::approach_unless(1, SkipCondition::DoorOpenAtTarget),
                Step::intent_unless(IntentTemplate::OpenDoorAtTarget, SkipCondition::DoorOpenAtTarget),
            ],
        ))
    }

    /// Walk until standing on the target position.
    pub fn travel_to() -> Arc<Self> {
        Arc::new(Self::new("travel", vec![Step::approach(0)]))
    }
}
