//! Battle-only stat modifiers.
//!
//! Modifiers are injected before combat (leader and passive skills) and reset
//! to exactly zero when the battle ends. Percentage stats keep `up` and `down`
//! separately so the effective value is always
//! `base × (1 + up/100 − down/100)`.

use rust_decimal::Decimal;

/// Stats that battle effects can modify.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BattleStat {
    // Percentage-modified base stats
    MaxHp,
    MaxMagicPoints,
    AttackPower,
    Defense,
    AttackSpeed,

    // Additive rate stats
    CritRate,
    CritDamage,
    Resistance,
    Accuracy,
    ExtraTurnChance,
    CounterattackChance,
    LifeDrainPercentage,

    /// Additional damage percentage received.
    DamageReceived,
}

impl BattleStat {
    /// Returns true for stats modified through `up`/`down` percentages.
    pub const fn is_percentage(self) -> bool {
        matches!(
            self,
            Self::MaxHp | Self::MaxMagicPoints | Self::AttackPower | Self::Defense | Self::AttackSpeed
        )
    }
}

/// A single bonus to one stat.
///
/// For percentage stats a positive amount is "+amount %" and a negative amount
/// is "−amount %". For rate stats the amount is added as-is (0.1 = +10 points
/// of crit rate).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBonus {
    pub stat: BattleStat,
    pub amount: Decimal,
}

impl StatBonus {
    pub const fn new(stat: BattleStat, amount: Decimal) -> Self {
        Self { stat, amount }
    }
}

/// Accumulated percentage increases and decreases for one stat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PercentDelta {
    pub up: Decimal,
    pub down: Decimal,
}

impl PercentDelta {
    pub const ZERO: Self = Self {
        up: Decimal::ZERO,
        down: Decimal::ZERO,
    };

    /// Adds a signed percentage: positive goes to `up`, negative to `down`.
    pub fn add(&mut self, amount: Decimal) {
        if amount.is_sign_negative() {
            self.down = self.down.saturating_sub(amount);
        } else {
            self.up = self.up.saturating_add(amount);
        }
    }

    /// Sums two deltas component-wise.
    pub fn combined(self, other: Self) -> Self {
        Self {
            up: self.up.saturating_add(other.up),
            down: self.down.saturating_add(other.down),
        }
    }

    /// `1 + up/100 − down/100`, never negative.
    pub fn factor(&self) -> Decimal {
        super::percent_factor(self.up, self.down)
    }
}

/// Per-hero battle-only stat deltas.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifiers {
    pub max_hp: PercentDelta,
    pub max_magic_points: PercentDelta,
    pub attack_power: PercentDelta,
    pub defense: PercentDelta,
    pub attack_speed: PercentDelta,

    pub crit_rate: Decimal,
    pub crit_damage: Decimal,
    pub resistance: Decimal,
    pub accuracy: Decimal,
    pub extra_turn_chance: Decimal,
    pub counterattack_chance: Decimal,
    pub life_drain_percentage: Decimal,
    pub additional_damage_percentage_received: Decimal,
}

impl StatModifiers {
    /// Create empty modifiers
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a bonus into the matching field.
    pub fn apply(&mut self, bonus: &StatBonus) {
        match bonus.stat {
            BattleStat::MaxHp => self.max_hp.add(bonus.amount),
            BattleStat::MaxMagicPoints => self.max_magic_points.add(bonus.amount),
            BattleStat::AttackPower => self.attack_power.add(bonus.amount),
            BattleStat::Defense => self.defense.add(bonus.amount),
            BattleStat::AttackSpeed => self.attack_speed.add(bonus.amount),
            BattleStat::CritRate => self.crit_rate += bonus.amount,
            BattleStat::CritDamage => self.crit_damage += bonus.amount,
            BattleStat::Resistance => self.resistance += bonus.amount,
            BattleStat::Accuracy => self.accuracy += bonus.amount,
            BattleStat::ExtraTurnChance => self.extra_turn_chance += bonus.amount,
            BattleStat::CounterattackChance => self.counterattack_chance += bonus.amount,
            BattleStat::LifeDrainPercentage => self.life_drain_percentage += bonus.amount,
            BattleStat::DamageReceived => {
                self.additional_damage_percentage_received += bonus.amount
            }
        }
    }

    /// Returns the percentage delta of a percentage stat, or zero for rates.
    pub fn percent(&self, stat: BattleStat) -> PercentDelta {
        match stat {
            BattleStat::MaxHp => self.max_hp,
            BattleStat::MaxMagicPoints => self.max_magic_points,
            BattleStat::AttackPower => self.attack_power,
            BattleStat::Defense => self.defense,
            BattleStat::AttackSpeed => self.attack_speed,
            _ => PercentDelta::ZERO,
        }
    }

    /// Returns the additive bonus of a rate stat, or zero for percentage stats.
    pub fn rate(&self, stat: BattleStat) -> Decimal {
        match stat {
            BattleStat::CritRate => self.crit_rate,
            BattleStat::CritDamage => self.crit_damage,
            BattleStat::Resistance => self.resistance,
            BattleStat::Accuracy => self.accuracy,
            BattleStat::ExtraTurnChance => self.extra_turn_chance,
            BattleStat::CounterattackChance => self.counterattack_chance,
            BattleStat::LifeDrainPercentage => self.life_drain_percentage,
            BattleStat::DamageReceived => self.additional_damage_percentage_received,
            _ => Decimal::ZERO,
        }
    }

    /// Returns true when every field is exactly zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Clears every battle-only delta.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
