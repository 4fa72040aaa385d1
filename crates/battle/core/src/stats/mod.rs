//! Stat System
//!
//! ```text
//! [ Base Stats ]        max HP, max MP, attack, defense, speed (persistent)
//!      ↓
//! [ Battle Rates ]      crit, resistance, accuracy, ... (persistent, bounded)
//!      ↓
//! [ Modifiers ]         battle-only up/down deltas (reset after battle)
//!      ↓
//! [ Effective Stats ]   base × (1 + up%/100 − down%/100), computed on demand
//! ```
//!
//! Resources (current HP / MP) are the only per-turn mutable values and are
//! kept in [`ResourceMeter`], which enforces `0 ≤ current ≤ max`.
//!
//! All arithmetic uses [`Decimal`] so that long chains of multipliers stay
//! exact to 28 significant digits.

pub mod core;
pub mod derived;
pub mod modifiers;
pub mod resources;
pub mod snapshot;

pub use self::core::BaseStats;
pub use derived::{BattleRates, RateBounds};
pub use modifiers::{BattleStat, PercentDelta, StatBonus, StatModifiers};
pub use resources::ResourceMeter;
pub use snapshot::EffectiveStats;

use rust_decimal::Decimal;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Triangular number `n·(n−1)/2`.
///
/// Used for the level cap (`10 × triangular(rating)`) and the per-level stat
/// multiplier.
pub const fn triangular(n: u32) -> u64 {
    let n = n as u64;
    if n == 0 {
        return 0;
    }
    n * (n - 1) / 2
}

/// `1 + up/100 − down/100`, never below zero.
pub fn percent_factor(up: Decimal, down: Decimal) -> Decimal {
    Decimal::ONE
        .saturating_add(up / HUNDRED)
        .saturating_sub(down / HUNDRED)
        .max(Decimal::ZERO)
}

/// `percentage%` of `value`, saturating at the representable bounds.
pub fn percent_of(value: Decimal, percentage: Decimal) -> Decimal {
    saturating_mul(value, percentage / HUNDRED)
}

/// Multiplication that saturates at the representable bounds instead of
/// panicking on overflow.
pub fn saturating_mul(lhs: Decimal, rhs: Decimal) -> Decimal {
    lhs.checked_mul(rhs).unwrap_or_else(|| {
        if lhs.is_sign_negative() != rhs.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    })
}
