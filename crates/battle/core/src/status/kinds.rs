//! Buff and debuff names and the single effect each name implies.

use bitflags::bitflags;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::stats::{BattleStat, StatBonus};

bitflags! {
    /// Behavioral flags carried by flag-type statuses.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EffectFlags: u8 {
        /// The owner skips its turns.
        const PREVENTS_TURN  = 1 << 0;
        /// Incoming damage is reduced to zero.
        const PREVENTS_DAMAGE = 1 << 1;
        /// Heals on the owner restore nothing.
        const BLOCKS_HEAL    = 1 << 2;
        /// The owner cannot use skills.
        const BLOCKS_SKILLS  = 1 << 3;
        /// New debuffs are rejected.
        const BLOCKS_DEBUFFS = 1 << 4;
    }
}

bitflags! {
    /// Debuff categories a hero can be immune to.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ImmunityTags: u8 {
        const STAT_REDUCTION    = 1 << 0;
        const CROWD_CONTROL     = 1 << 1;
        const SILENCE           = 1 << 2;
        const HEAL_BLOCK        = 1 << 3;
        const MARK              = 1 << 4;
        const CONTINUOUS_DAMAGE = 1 << 5;
    }
}

/// The effect a status has while active. Determined solely by its name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusEffect {
    /// Modifies one stat while active.
    Stat(StatBonus),
    /// Grants a damage-absorbing shield of `percentage`% max HP.
    Shield { percentage: Decimal },
    /// Restores `percentage`% max HP at the start of each owner turn.
    Recovery { percentage: Decimal },
    /// Deals `percentage`% max HP at the start of each owner turn.
    ContinuousDamage { percentage: Decimal },
    /// Behavioral restriction or protection.
    Flags(EffectFlags),
}

impl StatusEffect {
    /// Flags carried by this effect (empty for non-flag effects).
    pub fn flags(&self) -> EffectFlags {
        match self {
            Self::Flags(flags) => *flags,
            _ => EffectFlags::empty(),
        }
    }
}

/// Common behaviour of buff and debuff names.
pub trait StatusKind: Copy + Eq + core::fmt::Debug + core::fmt::Display {
    /// The effect implied by this name.
    fn effect(self) -> StatusEffect;
}

/// Beneficial status names.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum BuffKind {
    AttackUp,
    DefenseUp,
    SpeedUp,
    CritRateUp,
    Shield,
    Invincible,
    Immunity,
    Recovery,
    Counter,
}

impl StatusKind for BuffKind {
    fn effect(self) -> StatusEffect {
        match self {
            Self::AttackUp => StatusEffect::Stat(StatBonus::new(BattleStat::AttackPower, dec!(50))),
            Self::DefenseUp => StatusEffect::Stat(StatBonus::new(BattleStat::Defense, dec!(50))),
            Self::SpeedUp => StatusEffect::Stat(StatBonus::new(BattleStat::AttackSpeed, dec!(30))),
            Self::CritRateUp => StatusEffect::Stat(StatBonus::new(BattleStat::CritRate, dec!(0.3))),
            Self::Shield => StatusEffect::Shield {
                percentage: dec!(15),
            },
            Self::Invincible => StatusEffect::Flags(EffectFlags::PREVENTS_DAMAGE),
            Self::Immunity => StatusEffect::Flags(EffectFlags::BLOCKS_DEBUFFS),
            Self::Recovery => StatusEffect::Recovery {
                percentage: dec!(15),
            },
            Self::Counter => {
                StatusEffect::Stat(StatBonus::new(BattleStat::CounterattackChance, dec!(1)))
            }
        }
    }
}

/// Harmful status names.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum DebuffKind {
    AttackDown,
    DefenseDown,
    SpeedDown,
    Stun,
    Freeze,
    Sleep,
    Silence,
    Unrecoverable,
    Brand,
    Poison,
}

impl DebuffKind {
    /// The immunity category that blocks this debuff.
    pub const fn immunity_tag(self) -> ImmunityTags {
        match self {
            Self::AttackDown | Self::DefenseDown | Self::SpeedDown => ImmunityTags::STAT_REDUCTION,
            Self::Stun | Self::Freeze | Self::Sleep => ImmunityTags::CROWD_CONTROL,
            Self::Silence => ImmunityTags::SILENCE,
            Self::Unrecoverable => ImmunityTags::HEAL_BLOCK,
            Self::Brand => ImmunityTags::MARK,
            Self::Poison => ImmunityTags::CONTINUOUS_DAMAGE,
        }
    }
}

impl StatusKind for DebuffKind {
    fn effect(self) -> StatusEffect {
        match self {
            Self::AttackDown => {
                StatusEffect::Stat(StatBonus::new(BattleStat::AttackPower, dec!(-50)))
            }
            Self::DefenseDown => StatusEffect::Stat(StatBonus::new(BattleStat::Defense, dec!(-70))),
            Self::SpeedDown => {
                StatusEffect::Stat(StatBonus::new(BattleStat::AttackSpeed, dec!(-30)))
            }
            Self::Stun | Self::Freeze | Self::Sleep => {
                StatusEffect::Flags(EffectFlags::PREVENTS_TURN)
            }
            Self::Silence => StatusEffect::Flags(EffectFlags::BLOCKS_SKILLS),
            Self::Unrecoverable => StatusEffect::Flags(EffectFlags::BLOCKS_HEAL),
            Self::Brand => StatusEffect::Stat(StatBonus::new(BattleStat::DamageReceived, dec!(25))),
            Self::Poison => StatusEffect::ContinuousDamage {
                percentage: dec!(5),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn names_parse_from_screaming_case() {
        assert_eq!("STUN".parse::<DebuffKind>(), Ok(DebuffKind::Stun));
        assert_eq!("invincible".parse::<BuffKind>(), Ok(BuffKind::Invincible));
        assert_eq!(BuffKind::AttackUp.to_string(), "ATTACK_UP");
    }

    #[test]
    fn stun_prevents_turn_and_shield_is_fifteen_percent() {
        assert_eq!(
            DebuffKind::Stun.effect().flags(),
            EffectFlags::PREVENTS_TURN
        );
        assert_eq!(
            BuffKind::Shield.effect(),
            StatusEffect::Shield {
                percentage: dec!(15)
            }
        );
    }

    #[test]
    fn every_debuff_has_an_immunity_category() {
        for kind in DebuffKind::iter() {
            assert!(!kind.immunity_tag().is_empty(), "{kind} has no category");
        }
    }
}
