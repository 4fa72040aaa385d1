use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Percentage of max HP restored by a normal (self) heal.
    pub normal_heal_percentage: Decimal,

    /// Damage factor applied to glancing hits.
    pub glancing_hit_factor: Decimal,

    /// Lower bound on the chance that a debuff is resisted.
    pub min_resist_chance: Decimal,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_TEAM_SIZE: usize = 5;
    pub const MAX_TEAMS: usize = 2;
    pub const MAX_BUFFS: usize = 10;
    pub const MAX_DEBUFFS: usize = 10;
    pub const MAX_SKILLS: usize = 8;

    // ===== hero progression bounds =====
    pub const MIN_LEVEL: u32 = 1;
    pub const MIN_RATING: u8 = 1;
    pub const MAX_RATING: u8 = 6;
    pub const INITIAL_REQUIRED_EXP: Decimal = dec!(1000000);

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_NORMAL_HEAL_PERCENTAGE: Decimal = dec!(5);
    pub const DEFAULT_GLANCING_HIT_FACTOR: Decimal = dec!(0.7);
    pub const DEFAULT_MIN_RESIST_CHANCE: Decimal = dec!(0.15);

    pub fn new() -> Self {
        Self {
            normal_heal_percentage: Self::DEFAULT_NORMAL_HEAL_PERCENTAGE,
            glancing_hit_factor: Self::DEFAULT_GLANCING_HIT_FACTOR,
            min_resist_chance: Self::DEFAULT_MIN_RESIST_CHANCE,
        }
    }

    pub fn with_normal_heal_percentage(mut self, percentage: Decimal) -> Self {
        self.normal_heal_percentage = percentage.max(Decimal::ZERO);
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
