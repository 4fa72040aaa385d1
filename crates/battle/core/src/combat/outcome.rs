//! Reports produced by action resolution.

use rust_decimal::Decimal;

use crate::action::ActionKind;
use crate::hero::HeroId;
use crate::status::DebuffKind;

/// Result of one damage instance against one hero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitReport {
    pub attacker: HeroId,
    pub target: HeroId,
    pub critical: bool,
    pub glancing: bool,
    /// Damage before defense, after critical/glancing scaling.
    pub raw: Decimal,
    /// Damage after defense, floored at zero.
    pub damage: Decimal,
    /// Portion soaked by the target's shield.
    pub absorbed: Decimal,
    /// Portion removed from the target's HP.
    pub hp_lost: Decimal,
    /// HP the attacker regained through life drain.
    pub drained: Decimal,
    /// Damage returned to the attacker.
    pub reflected: Decimal,
    pub target_defeated: bool,
}

impl HitReport {
    /// Damage that actually landed (shield plus HP).
    pub fn dealt(&self) -> Decimal {
        self.absorbed + self.hp_lost
    }
}

/// HP restored to one hero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealReport {
    pub target: HeroId,
    pub amount: Decimal,
}

/// What happened to one debuff an action tried to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DebuffOutcome {
    Landed,
    Resisted,
    /// Immune, protected by an immunity buff, or the list is full.
    Blocked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebuffReport {
    pub target: HeroId,
    pub kind: DebuffKind,
    pub outcome: DebuffOutcome,
}

/// Full result of one executed action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionOutcome {
    pub kind: ActionKind,
    pub actor: HeroId,
    pub hits: Vec<HitReport>,
    pub heals: Vec<HealReport>,
    pub debuffs: Vec<DebuffReport>,
    /// The target's retaliation, if it countered.
    pub counterattack: Option<HitReport>,
    pub magic_points_spent: Decimal,
    /// A special power was chosen while cooling down; nothing happened.
    pub on_cooldown: bool,
}

impl ActionOutcome {
    pub fn new(kind: ActionKind, actor: HeroId) -> Self {
        Self {
            kind,
            actor,
            hits: Vec::new(),
            heals: Vec::new(),
            debuffs: Vec::new(),
            counterattack: None,
            magic_points_spent: Decimal::ZERO,
            on_cooldown: false,
        }
    }

    /// Total damage landed by the actor's hits.
    pub fn total_damage(&self) -> Decimal {
        self.hits.iter().map(HitReport::dealt).sum()
    }

    pub fn total_healed(&self) -> Decimal {
        self.heals.iter().map(|h| h.amount).sum()
    }

    pub fn debuffs_landed(&self) -> usize {
        self.debuffs
            .iter()
            .filter(|d| d.outcome == DebuffOutcome::Landed)
            .count()
    }
}
