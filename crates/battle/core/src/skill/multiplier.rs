//! Damage multiplier coefficients.
//!
//! A [`DamageMultiplier`] is an immutable bag of coefficients owned by the
//! skill that defines it. Evaluation against two heroes lives in
//! [`crate::combat::evaluate`]; this type holds no state and is safe to share.
//!
//! ```text
//! base = Σ linear terms (attack / defense terms × (1 + speed_coef × speed))
//! raw  = base × Π (1 + factor_coef × observable) × (1 + damage_received%/100)
//! ```
//!
//! Every coefficient defaults to zero, which means "no contribution" for the
//! linear terms and "× 1" for the factors.

use rust_decimal::Decimal;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DamageMultiplier {
    // ===== linear base term =====
    pub multiplier_to_self_max_hp: Decimal,
    pub multiplier_to_enemy_max_hp: Decimal,
    pub multiplier_to_self_attack_power: Decimal,
    pub multiplier_to_enemy_attack_power: Decimal,
    pub multiplier_to_self_defense: Decimal,
    pub multiplier_to_enemy_defense: Decimal,
    pub multiplier_to_self_max_magic_points: Decimal,
    pub multiplier_to_enemy_max_magic_points: Decimal,
    /// Scales the self attack/defense terms by `(1 + c × self attack speed)`.
    pub multiplier_to_self_attack_speed: Decimal,
    /// Scales the enemy attack/defense terms by `(1 + c × enemy attack speed)`.
    pub multiplier_to_enemy_attack_speed: Decimal,

    // ===== (1 + c × observable) factors =====
    /// Observable: user's current HP percentage (0–100).
    pub multiplier_to_self_hp_percentage: Decimal,
    /// Observable: user's HP percentage lost (0–100).
    pub multiplier_to_self_hp_percentage_loss: Decimal,
    /// Observable: target's current HP percentage (0–100).
    pub multiplier_to_enemy_hp_percentage: Decimal,
    /// Observable: target's HP percentage lost (0–100).
    pub multiplier_to_enemy_hp_percentage_loss: Decimal,
    /// Observable: dead heroes on the user's team, excluding the user.
    pub multiplier_to_number_of_dead_allies: Decimal,
    /// Observable: dead heroes on the target's team, excluding the target.
    pub multiplier_to_number_of_dead_enemies: Decimal,
    /// Observable: extra turns the user gained this battle.
    pub multiplier_to_turns_gained: Decimal,
    /// Observable: number of buffs on the user.
    pub multiplier_to_number_of_self_buffs: Decimal,
    /// Observable: number of debuffs on the target.
    pub multiplier_to_number_of_enemy_debuffs: Decimal,
    /// Observable: user's current magic point percentage (0–100).
    pub multiplier_to_self_magic_point_percentage: Decimal,
    /// Observable: 1 when the target holds no buffs, else 0.
    pub multiplier_to_unbuffed_enemy: Decimal,
}

impl DamageMultiplier {
    /// A multiplier that only scales with the user's attack power.
    ///
    /// The most common skill shape: `coefficient × attack`.
    pub fn attack_scaling(coefficient: Decimal) -> Self {
        Self {
            multiplier_to_self_attack_power: coefficient,
            ..Self::default()
        }
    }

    /// Returns true when every coefficient is zero (the skill deals no damage).
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}
