//! Damage multiplier evaluation.
//!
//! Turns a skill's [`DamageMultiplier`] into a raw damage number for one
//! user/target pair. Every function here is pure: it reads the battle state
//! and returns a value, never mutating anything.
//!
//! Both heroes must belong to a team; outside a battle the result is zero.

use rust_decimal::Decimal;

use crate::hero::{Hero, HeroId};
use crate::skill::DamageMultiplier;
use crate::state::BattleState;
use crate::stats::{EffectiveStats, percent_of, saturating_mul};

/// Everything the multiplier can observe about one user/target pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DamageInputs {
    pub user: EffectiveStats,
    pub target: EffectiveStats,
    pub user_hp_percentage: Decimal,
    pub target_hp_percentage: Decimal,
    pub user_magic_point_percentage: Decimal,
    pub dead_allies: usize,
    pub dead_enemies: usize,
    pub turns_gained: u32,
    pub user_buffs: usize,
    pub target_debuffs: usize,
    pub target_unbuffed: bool,
}

impl DamageInputs {
    /// Gathers the observables, or `None` when either hero is missing or
    /// not on a team.
    pub fn gather(state: &BattleState, user: HeroId, target: HeroId) -> Option<Self> {
        let user_hero = state.hero(user).filter(|h| h.team().is_some())?;
        let target_hero = state.hero(target).filter(|h| h.team().is_some())?;

        Some(Self {
            user: user_hero.effective_stats(),
            target: target_hero.effective_stats(),
            user_hp_percentage: user_hero.hp().percentage(),
            target_hp_percentage: target_hero.hp().percentage(),
            user_magic_point_percentage: user_hero.magic_points().percentage(),
            dead_allies: state.dead_allies_of(user),
            dead_enemies: state.dead_allies_of(target),
            turns_gained: user_hero.turns_gained(),
            user_buffs: user_hero.buffs().len(),
            target_debuffs: target_hero.debuffs().len(),
            target_unbuffed: target_hero.buffs().is_empty(),
        })
    }
}

impl DamageMultiplier {
    /// Raw damage before critical hits and defense.
    pub fn evaluate(&self, inputs: &DamageInputs) -> Decimal {
        let user = &inputs.user;
        let target = &inputs.target;

        let user_side = saturating_mul(
            term(self.multiplier_to_self_attack_power, user.attack_power)
                .saturating_add(term(self.multiplier_to_self_defense, user.defense)),
            one_plus(self.multiplier_to_self_attack_speed, user.attack_speed),
        );
        let target_side = saturating_mul(
            term(self.multiplier_to_enemy_attack_power, target.attack_power)
                .saturating_add(term(self.multiplier_to_enemy_defense, target.defense)),
            one_plus(self.multiplier_to_enemy_attack_speed, target.attack_speed),
        );
        let base = [
            term(self.multiplier_to_self_max_hp, user.max_hp),
            term(self.multiplier_to_enemy_max_hp, target.max_hp),
            term(self.multiplier_to_self_max_magic_points, user.max_magic_points),
            term(self.multiplier_to_enemy_max_magic_points, target.max_magic_points),
            user_side,
            target_side,
        ]
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add);

        let hundred = Decimal::ONE_HUNDRED;
        let factors = [
            one_plus(self.multiplier_to_self_hp_percentage, inputs.user_hp_percentage),
            one_plus(
                self.multiplier_to_self_hp_percentage_loss,
                hundred - inputs.user_hp_percentage,
            ),
            one_plus(self.multiplier_to_enemy_hp_percentage, inputs.target_hp_percentage),
            one_plus(
                self.multiplier_to_enemy_hp_percentage_loss,
                hundred - inputs.target_hp_percentage,
            ),
            one_plus(
                self.multiplier_to_number_of_dead_allies,
                Decimal::from(inputs.dead_allies),
            ),
            one_plus(
                self.multiplier_to_number_of_dead_enemies,
                Decimal::from(inputs.dead_enemies),
            ),
            one_plus(
                self.multiplier_to_turns_gained,
                Decimal::from(inputs.turns_gained),
            ),
            one_plus(
                self.multiplier_to_number_of_self_buffs,
                Decimal::from(inputs.user_buffs),
            ),
            one_plus(
                self.multiplier_to_number_of_enemy_debuffs,
                Decimal::from(inputs.target_debuffs),
            ),
            one_plus(
                self.multiplier_to_self_magic_point_percentage,
                inputs.user_magic_point_percentage,
            ),
            one_plus(
                self.multiplier_to_unbuffed_enemy,
                if inputs.target_unbuffed {
                    Decimal::ONE
                } else {
                    Decimal::ZERO
                },
            ),
            Decimal::ONE + percent_of(Decimal::ONE, target.damage_received_percentage),
        ];

        factors.into_iter().fold(base, saturating_mul)
    }
}

fn term(coefficient: Decimal, observable: Decimal) -> Decimal {
    saturating_mul(coefficient, observable)
}

fn one_plus(coefficient: Decimal, observable: Decimal) -> Decimal {
    Decimal::ONE.saturating_add(saturating_mul(coefficient, observable))
}

fn critical_factor(user: &Hero) -> Decimal {
    Decimal::ONE.saturating_add(user.effective_stats().crit_damage)
}

fn target_defense(state: &BattleState, target: HeroId) -> Decimal {
    state
        .hero(target)
        .map(|hero| hero.effective_stats().defense)
        .unwrap_or_default()
}

/// Raw damage of a non-critical hit, ignoring the target's defense.
pub fn calculate_normal_raw_damage_without_enemy_defense(
    state: &BattleState,
    multiplier: &DamageMultiplier,
    user: HeroId,
    target: HeroId,
) -> Decimal {
    DamageInputs::gather(state, user, target)
        .map(|inputs| multiplier.evaluate(&inputs))
        .unwrap_or_default()
}

/// Raw damage of a non-critical hit minus the target's effective defense.
pub fn calculate_normal_raw_damage(
    state: &BattleState,
    multiplier: &DamageMultiplier,
    user: HeroId,
    target: HeroId,
) -> Decimal {
    if DamageInputs::gather(state, user, target).is_none() {
        return Decimal::ZERO;
    }
    calculate_normal_raw_damage_without_enemy_defense(state, multiplier, user, target)
        .saturating_sub(target_defense(state, target))
}

/// Raw damage of a critical hit, ignoring the target's defense.
pub fn calculate_critical_raw_damage_without_enemy_defense(
    state: &BattleState,
    multiplier: &DamageMultiplier,
    user: HeroId,
    target: HeroId,
) -> Decimal {
    let Some(hero) = state.hero(user) else {
        return Decimal::ZERO;
    };
    saturating_mul(
        calculate_normal_raw_damage_without_enemy_defense(state, multiplier, user, target),
        critical_factor(hero),
    )
}

/// Raw damage of a critical hit minus the target's effective defense.
pub fn calculate_critical_raw_damage(
    state: &BattleState,
    multiplier: &DamageMultiplier,
    user: HeroId,
    target: HeroId,
) -> Decimal {
    if DamageInputs::gather(state, user, target).is_none() {
        return Decimal::ZERO;
    }
    calculate_critical_raw_damage_without_enemy_defense(state, multiplier, user, target)
        .saturating_sub(target_defense(state, target))
}
