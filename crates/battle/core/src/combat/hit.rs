//! Single damage instances and debuff landing.
//!
//! ```text
//! glancing?  (attacker chance > 0 only)        × glancing factor, no crit
//! critical?  draw ≤ crit_rate − crit_resist    × (1 + crit_damage)
//! damage   = max(raw − defense, 0)              defense skipped if ignored
//! landed   = shield first, then HP; zero while the target is invincible
//! ```

use rust_decimal::Decimal;
use tracing::trace;

use super::evaluate::DamageInputs;
use super::outcome::{DebuffOutcome, DebuffReport, HitReport};
use crate::config::BattleConfig;
use crate::hero::HeroId;
use crate::rng::RandomSource;
use crate::skill::DamageMultiplier;
use crate::state::BattleState;
use crate::stats::{EffectiveStats, percent_of, saturating_mul};
use crate::status::Debuff;

/// How raw damage of a hit is computed.
#[derive(Clone, Copy, Debug)]
pub enum Strike<'m> {
    /// Attack power against defense.
    Normal,
    /// A skill's damage multiplier.
    Skill {
        multiplier: &'m DamageMultiplier,
        ignores_defense: bool,
    },
}

/// Rolls for a critical hit. Always consumes exactly one draw.
pub fn roll_critical<R: RandomSource + ?Sized>(rng: &mut R, rate: Decimal) -> bool {
    let draw = rng.draw_unit();
    rate > Decimal::ZERO && draw <= rate
}

/// Critical rate after the target's critical resistance, within `[0, 1]`.
pub fn effective_crit_rate(attacker: &EffectiveStats, target: &EffectiveStats) -> Decimal {
    (attacker.crit_rate - target.crit_resist).clamp(Decimal::ZERO, Decimal::ONE)
}

/// Resolves one hit of `attacker` on `target` and applies it.
///
/// Both heroes must exist; missing heroes produce an empty report.
pub fn strike<R: RandomSource + ?Sized>(
    state: &mut BattleState,
    config: &BattleConfig,
    rng: &mut R,
    attacker: HeroId,
    target: HeroId,
    strike: Strike<'_>,
) -> HitReport {
    let mut report = HitReport {
        attacker,
        target,
        ..HitReport::default()
    };
    let (Some(user), Some(victim)) = (state.hero(attacker), state.hero(target)) else {
        return report;
    };
    let user_stats = user.effective_stats();
    let target_stats = victim.effective_stats();

    report.glancing = rng.chance(user_stats.glancing_hit_chance);
    report.critical =
        !report.glancing && roll_critical(rng, effective_crit_rate(&user_stats, &target_stats));

    let (mut raw, defense) = match strike {
        Strike::Normal => (
            saturating_mul(
                user_stats.attack_power,
                Decimal::ONE + percent_of(Decimal::ONE, target_stats.damage_received_percentage),
            ),
            target_stats.defense,
        ),
        Strike::Skill {
            multiplier,
            ignores_defense,
        } => {
            let raw = DamageInputs::gather(state, attacker, target)
                .map(|inputs| multiplier.evaluate(&inputs))
                .unwrap_or_default();
            let defense = if ignores_defense {
                Decimal::ZERO
            } else {
                target_stats.defense
            };
            (raw, defense)
        }
    };
    if report.critical {
        raw = saturating_mul(raw, Decimal::ONE.saturating_add(user_stats.crit_damage));
    }
    if report.glancing {
        raw = saturating_mul(raw, config.glancing_hit_factor);
    }

    report.raw = raw;
    report.damage = raw.saturating_sub(defense).max(Decimal::ZERO);

    let Some(victim) = state.hero_mut(target) else {
        return report;
    };
    let taken = victim.take_damage(report.damage);
    report.absorbed = taken.absorbed;
    report.hp_lost = taken.hp_lost;
    report.target_defeated = !victim.is_alive();
    let dealt = report.dealt();

    if dealt > Decimal::ZERO {
        if let Some(user) = state.hero_mut(attacker) {
            if user_stats.life_drain_percentage > Decimal::ZERO {
                report.drained =
                    user.receive_heal(percent_of(dealt, user_stats.life_drain_percentage));
            }
            if target_stats.reflected_damage_percentage > Decimal::ZERO {
                report.reflected = user
                    .take_damage(percent_of(dealt, target_stats.reflected_damage_percentage))
                    .total();
            }
        }
    }

    trace!(
        attacker = %attacker,
        target = %target,
        critical = report.critical,
        glancing = report.glancing,
        damage = %report.damage,
        "hit resolved"
    );
    report
}

/// Tries to land each debuff on `target`.
///
/// Immune targets block the debuff outright; otherwise one resistance roll
/// is made per debuff with chance
/// `clamp(resistance − accuracy, min_resist_chance, 1)`.
pub fn land_debuffs<R: RandomSource + ?Sized>(
    state: &mut BattleState,
    config: &BattleConfig,
    rng: &mut R,
    attacker: HeroId,
    target: HeroId,
    debuffs: &[Debuff],
) -> Vec<DebuffReport> {
    if debuffs.is_empty() {
        return Vec::new();
    }
    let accuracy = state
        .hero(attacker)
        .map(|hero| hero.effective_stats().accuracy)
        .unwrap_or_default();
    let Some(victim) = state.hero_mut(target) else {
        return Vec::new();
    };
    if !victim.is_alive() {
        return Vec::new();
    }
    let resist_chance = (victim.effective_stats().resistance - accuracy)
        .clamp(config.min_resist_chance.min(Decimal::ONE), Decimal::ONE);

    debuffs
        .iter()
        .map(|&debuff| {
            let outcome = if victim.is_immune_to(debuff.kind) {
                DebuffOutcome::Blocked
            } else if rng.chance(resist_chance) {
                DebuffOutcome::Resisted
            } else if victim.add_debuff(debuff) {
                DebuffOutcome::Landed
            } else {
                DebuffOutcome::Blocked
            };
            trace!(target = %target, debuff = %debuff.kind, ?outcome, "debuff");
            DebuffReport {
                target,
                kind: debuff.kind,
                outcome,
            }
        })
        .collect()
}
