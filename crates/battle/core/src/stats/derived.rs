//! Battle rates - bounded probability and percentage stats.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Inclusive bounds for a rate stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateBounds {
    pub min: Decimal,
    pub max: Decimal,
}

impl RateBounds {
    pub const CRIT_RATE: Self = Self::new(dec!(0.15), dec!(1));
    pub const CRIT_DAMAGE: Self = Self::new(dec!(0.5), Decimal::MAX);
    pub const RESISTANCE: Self = Self::new(dec!(0.15), dec!(1));
    pub const ACCURACY: Self = Self::new(dec!(0), dec!(1));
    pub const EXTRA_TURN_CHANCE: Self = Self::new(dec!(0), dec!(0.75));
    pub const COUNTERATTACK_CHANCE: Self = Self::new(dec!(0), dec!(1));
    pub const CRIT_RESIST: Self = Self::new(dec!(0), dec!(1));
    pub const GLANCING_HIT_CHANCE: Self = Self::new(dec!(0), dec!(1));
    /// Life drain and reflected damage are percentages without an upper cap.
    pub const PERCENTAGE: Self = Self::new(dec!(0), Decimal::MAX);

    pub const fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: Decimal) -> Decimal {
        value.clamp(self.min, self.max)
    }
}

/// Persistent battle rates of a hero, always within their [`RateBounds`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleRates {
    pub crit_rate: Decimal,
    /// Extra damage fraction on a critical hit (0.5 = +50%).
    pub crit_damage: Decimal,
    pub resistance: Decimal,
    pub accuracy: Decimal,
    pub life_drain_percentage: Decimal,
    pub extra_turn_chance: Decimal,
    pub counterattack_chance: Decimal,
    pub reflected_damage_percentage: Decimal,
    pub crit_resist: Decimal,
    pub glancing_hit_chance: Decimal,
}

impl BattleRates {
    /// Re-applies every bound. Called after deserialization or bulk edits.
    pub fn clamped(self) -> Self {
        Self {
            crit_rate: RateBounds::CRIT_RATE.clamp(self.crit_rate),
            crit_damage: RateBounds::CRIT_DAMAGE.clamp(self.crit_damage),
            resistance: RateBounds::RESISTANCE.clamp(self.resistance),
            accuracy: RateBounds::ACCURACY.clamp(self.accuracy),
            life_drain_percentage: RateBounds::PERCENTAGE.clamp(self.life_drain_percentage),
            extra_turn_chance: RateBounds::EXTRA_TURN_CHANCE.clamp(self.extra_turn_chance),
            counterattack_chance: RateBounds::COUNTERATTACK_CHANCE.clamp(self.counterattack_chance),
            reflected_damage_percentage: RateBounds::PERCENTAGE
                .clamp(self.reflected_damage_percentage),
            crit_resist: RateBounds::CRIT_RESIST.clamp(self.crit_resist),
            glancing_hit_chance: RateBounds::GLANCING_HIT_CHANCE.clamp(self.glancing_hit_chance),
        }
    }
}

impl Default for BattleRates {
    fn default() -> Self {
        Self {
            crit_rate: RateBounds::CRIT_RATE.min,
            crit_damage: RateBounds::CRIT_DAMAGE.min,
            resistance: RateBounds::RESISTANCE.min,
            accuracy: RateBounds::ACCURACY.min,
            life_drain_percentage: Decimal::ZERO,
            extra_turn_chance: Decimal::ZERO,
            counterattack_chance: Decimal::ZERO,
            reflected_damage_percentage: Decimal::ZERO,
            crit_resist: Decimal::ZERO,
            glancing_hit_chance: Decimal::ZERO,
        }
    }
}
