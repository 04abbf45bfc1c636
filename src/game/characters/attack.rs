// Melee attack kinds and combo stages

/// Which limb an attack uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackKind {
    Punch,
    Kick,
}

impl AttackKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Punch => "Punch",
            Self::Kick => "Kick",
        }
    }
}

/// Position of an attack inside a combo chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComboStage {
    One,
    Two,
    Three,
}

impl ComboStage {
    /// Stage following `current` in the 1 → 2 → 3 → 1 cycle.
    /// `None` means no combo is running.
    pub fn next(current: Option<ComboStage>) -> ComboStage {
        match current {
            None | Some(Self::Three) => Self::One,
            Some(Self::One) => Self::Two,
            Some(Self::Two) => Self::Three,
        }
    }

    /// Numeric stage (1..=3)
    pub fn index(&self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

/// Animation trigger for one attack: kind × combo stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttackTrigger {
    pub kind: AttackKind,
    pub stage: ComboStage,
}

impl AttackTrigger {
    pub fn new(kind: AttackKind, stage: ComboStage) -> Self {
        Self { kind, stage }
    }

    /// Animator trigger (and state) name, e.g. "Punch1"
    pub fn name(&self) -> &'static str {
        match (self.kind, self.stage) {
            (AttackKind::Punch, ComboStage::One) => "Punch1",
            (AttackKind::Punch, ComboStage::Two) => "Punch2",
            (AttackKind::Punch, ComboStage::Three) => "Punch3",
            (AttackKind::Kick, ComboStage::One) => "Kick1",
            (AttackKind::Kick, ComboStage::Two) => "Kick2",
            (AttackKind::Kick, ComboStage::Three) => "Kick3",
        }
    }

    /// Every trigger, in kind-then-stage order
    pub fn all() -> [AttackTrigger; 6] {
        use AttackKind::*;
        use ComboStage::*;
        [
            Self::new(Punch, One),
            Self::new(Punch, Two),
            Self::new(Punch, Three),
            Self::new(Kick, One),
            Self::new(Kick, Two),
            Self::new(Kick, Three),
        ]
    }
}
