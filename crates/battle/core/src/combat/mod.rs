//! Damage arithmetic.
//!
//! - [`evaluate`]: pure raw-damage formulas driven by a skill's multiplier
//! - [`hit`]: resolving and applying a single hit, landing debuffs
//! - [`outcome`]: reports handed back to callers

pub mod evaluate;
pub mod hit;
pub mod outcome;

pub use evaluate::{
    DamageInputs, calculate_critical_raw_damage,
    calculate_critical_raw_damage_without_enemy_defense, calculate_normal_raw_damage,
    calculate_normal_raw_damage_without_enemy_defense,
};
pub use hit::{Strike, effective_crit_rate, land_debuffs, roll_critical, strike};
pub use outcome::{ActionOutcome, DebuffOutcome, DebuffReport, HealReport, HitReport};
