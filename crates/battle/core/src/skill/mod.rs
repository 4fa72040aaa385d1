//! Skills heroes own.
//!
//! All skills share a name, description and magic point cost; the variant
//! payload decides how the skill participates in battle:
//!
//! - **Active**: used as an action (damage, heals, statuses)
//! - **Special**: a single-target strike gated by a cooldown
//! - **Passive**: battle-start stat bonuses for the owner or its team
//! - **Leader**: battle-start stat bonuses for the whole team, only while the
//!   owner leads it

pub mod multiplier;

pub use multiplier::DamageMultiplier;

use rust_decimal::Decimal;

use crate::hero::Element;
use crate::stats::StatBonus;
use crate::status::{Buff, Debuff};

/// A skill owned by a hero.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    /// Identifies the skill within its owner's skill list.
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub magic_point_cost: Decimal,
    pub kind: SkillKind,
}

/// Variant payloads.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillKind {
    Active(ActiveSkill),
    Passive(PassiveSkill),
    Leader(LeaderSkill),
    Special(SpecialPower),
}

impl Skill {
    pub fn new(name: impl Into<String>, magic_point_cost: Decimal, kind: SkillKind) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            magic_point_cost: magic_point_cost.max(Decimal::ZERO),
            kind,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Magic points consumed when the skill is used.
    pub fn resource_cost(&self) -> Decimal {
        self.magic_point_cost
    }

    /// Returns true for skills that can be chosen as a battle action.
    pub fn is_usable(&self) -> bool {
        matches!(self.kind, SkillKind::Active(_) | SkillKind::Special(_))
    }

    pub fn as_special(&self) -> Option<&SpecialPower> {
        match &self.kind {
            SkillKind::Special(power) => Some(power),
            _ => None,
        }
    }

    pub fn as_special_mut(&mut self) -> Option<&mut SpecialPower> {
        match &mut self.kind {
            SkillKind::Special(power) => Some(power),
            _ => None,
        }
    }
}

/// A skill used as an action.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActiveSkill {
    pub multiplier: DamageMultiplier,
    pub is_aoe: bool,
    pub ignores_enemy_defense: bool,
    pub buffs_to_self: Vec<Buff>,
    pub buffs_to_allies: Vec<Buff>,
    pub debuffs_to_enemies: Vec<Debuff>,
    pub heal_amount_to_self: Decimal,
    pub heal_amount_to_allies: Decimal,
}

impl ActiveSkill {
    /// A single-target strike with the given multiplier.
    pub fn strike(multiplier: DamageMultiplier) -> Self {
        Self {
            multiplier,
            ..Self::default()
        }
    }

    /// An area-of-effect strike with the given multiplier.
    pub fn area(multiplier: DamageMultiplier) -> Self {
        Self {
            multiplier,
            is_aoe: true,
            ..Self::default()
        }
    }
}

/// Turn counter gating a special power.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cooldown {
    pub current: u32,
    pub max: u32,
}

impl Cooldown {
    /// A ready cooldown that rearms to `max` turns after use.
    pub const fn ready(max: u32) -> Self {
        Self { current: 0, max }
    }

    pub const fn is_ready(&self) -> bool {
        self.current == 0
    }

    /// Starts the cooldown after use.
    pub fn trigger(&mut self) {
        self.current = self.max;
    }

    /// Counts down one owner turn.
    pub fn tick(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }
}

/// A strike usable once every `cooldown.max` owner turns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpecialPower {
    pub multiplier: DamageMultiplier,
    pub ignores_enemy_defense: bool,
    pub cooldown: Cooldown,
}

/// Who receives a passive skill's bonuses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassiveScope {
    /// Only the skill's owner.
    #[default]
    Owner,
    /// Every member of the owner's team.
    Team,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PassiveSkill {
    pub bonuses: Vec<StatBonus>,
    pub scope: PassiveScope,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LeaderSkill {
    pub bonuses: Vec<StatBonus>,
    /// When set, only members of this element benefit.
    pub element: Option<Element>,
}

impl LeaderSkill {
    pub fn applies_to(&self, element: Element) -> bool {
        self.element.is_none_or(|required| required == element)
    }
}
