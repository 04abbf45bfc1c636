// Per-character-kind behaviour plugged into the state machine

use std::fmt::Debug;

use super::attack::{AttackKind, AttackTrigger, ComboStage};
use super::state::Facing;

/// Strategy hooks that differ between character kinds
pub trait CharacterProfile: Debug {
    /// Animation trigger for an attack of `kind` at combo `stage`
    fn attack_trigger(&self, kind: AttackKind, stage: ComboStage) -> AttackTrigger;

    /// Horizontal sign of a dodge started while facing `facing`.
    /// Defaults to a backstep.
    fn dodge_direction(&self, facing: Facing) -> f32 {
        -facing.sign()
    }
}

/// How far the combo counter drives attack animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComboEscalation {
    /// Always play the stage-one animation; the counter still advances
    #[default]
    FirstStage,
    /// Play the animation for the current combo stage
    FollowCombo,
}

/// Profile for player-controlled brawlers
#[derive(Debug, Clone, Default)]
pub struct PlayerProfile {
    pub escalation: ComboEscalation,
}

impl PlayerProfile {
    pub fn new(escalation: ComboEscalation) -> Self {
        Self { escalation }
    }
}

impl CharacterProfile for PlayerProfile {
    fn attack_trigger(&self, kind: AttackKind, stage: ComboStage) -> AttackTrigger {
        match self.escalation {
            ComboEscalation::FirstStage => AttackTrigger::new(kind, ComboStage::One),
            ComboEscalation::FollowCombo => AttackTrigger::new(kind, stage),
        }
    }
}
