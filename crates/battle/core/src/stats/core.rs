//! Base stats - the persistent, level-scaled numbers of a hero.

use rust_decimal::Decimal;

use super::saturating_mul;

/// Base statistics of a hero.
///
/// All values are non-negative. They only change through progression
/// (level-ups); battle effects never touch them directly.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub max_hp: Decimal,
    pub max_magic_points: Decimal,
    pub attack_power: Decimal,
    pub defense: Decimal,
    pub attack_speed: Decimal,
}

impl BaseStats {
    /// Creates base stats, clamping negative inputs to zero.
    pub fn new(
        max_hp: Decimal,
        max_magic_points: Decimal,
        attack_power: Decimal,
        defense: Decimal,
        attack_speed: Decimal,
    ) -> Self {
        Self {
            max_hp: max_hp.max(Decimal::ZERO),
            max_magic_points: max_magic_points.max(Decimal::ZERO),
            attack_power: attack_power.max(Decimal::ZERO),
            defense: defense.max(Decimal::ZERO),
            attack_speed: attack_speed.max(Decimal::ZERO),
        }
    }

    /// Multiplies the level-scaled stats (HP, MP, attack, defense) by `factor`.
    ///
    /// Attack speed is not level-scaled.
    pub fn scale_for_level(&mut self, factor: Decimal) {
        self.max_hp = saturating_mul(self.max_hp, factor);
        self.max_magic_points = saturating_mul(self.max_magic_points, factor);
        self.attack_power = saturating_mul(self.attack_power, factor);
        self.defense = saturating_mul(self.defense, factor);
    }
}

impl Default for BaseStats {
    fn default() -> Self {
        Self::new(
            Decimal::ONE,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
        )
    }
}
