//! Effective ("actual") stats of a hero at a point in battle.

use rust_decimal::Decimal;

use super::{RateBounds, StatModifiers, saturating_mul};
use crate::hero::Hero;

/// Snapshot of a hero's stats with battle modifiers and active statuses
/// folded in.
///
/// Percentage stats are `base × (1 + up/100 − down/100)` (never negative);
/// rates are `base + bonus` clamped to their bounds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveStats {
    pub max_hp: Decimal,
    pub max_magic_points: Decimal,
    pub attack_power: Decimal,
    pub defense: Decimal,
    pub attack_speed: Decimal,

    pub crit_rate: Decimal,
    pub crit_damage: Decimal,
    pub resistance: Decimal,
    pub accuracy: Decimal,
    pub extra_turn_chance: Decimal,

    pub counterattack_chance: Decimal,
    pub life_drain_percentage: Decimal,
    pub reflected_damage_percentage: Decimal,
    pub crit_resist: Decimal,
    pub glancing_hit_chance: Decimal,
    /// Extra percentage of damage this hero receives.
    pub damage_received_percentage: Decimal,
}

impl EffectiveStats {
    pub fn of(hero: &Hero) -> Self {
        let total = Self::total_modifiers(hero);
        let base = hero.stats();
        let rates = hero.rates();

        Self {
            max_hp: saturating_mul(base.max_hp, total.max_hp.factor()),
            max_magic_points: saturating_mul(base.max_magic_points, total.max_magic_points.factor()),
            attack_power: saturating_mul(base.attack_power, total.attack_power.factor()),
            defense: saturating_mul(base.defense, total.defense.factor()),
            attack_speed: saturating_mul(base.attack_speed, total.attack_speed.factor()),

            crit_rate: RateBounds::CRIT_RATE.clamp(rates.crit_rate + total.crit_rate),
            crit_damage: RateBounds::CRIT_DAMAGE
                .clamp(rates.crit_damage.saturating_add(total.crit_damage)),
            resistance: RateBounds::RESISTANCE.clamp(rates.resistance + total.resistance),
            accuracy: RateBounds::ACCURACY.clamp(rates.accuracy + total.accuracy),
            extra_turn_chance: RateBounds::EXTRA_TURN_CHANCE
                .clamp(rates.extra_turn_chance + total.extra_turn_chance),

            counterattack_chance: RateBounds::COUNTERATTACK_CHANCE
                .clamp(rates.counterattack_chance + total.counterattack_chance),
            life_drain_percentage: RateBounds::PERCENTAGE
                .clamp(rates.life_drain_percentage.saturating_add(total.life_drain_percentage)),
            reflected_damage_percentage: rates.reflected_damage_percentage,
            crit_resist: rates.crit_resist,
            glancing_hit_chance: rates.glancing_hit_chance,
            damage_received_percentage: total.additional_damage_percentage_received,
        }
    }

    /// Battle modifiers plus every stat bonus from active buffs and debuffs.
    fn total_modifiers(hero: &Hero) -> StatModifiers {
        let mut total = hero.modifiers().clone();
        for bonus in hero
            .buffs()
            .stat_bonuses()
            .chain(hero.debuffs().stat_bonuses())
        {
            total.apply(&bonus);
        }
        total
    }
}
