//! Experience, level-ups and limit breaks.
//!
//! ```text
//! level cap      = max(10 × triangular(rating), 1)    until limit-broken
//! per level-up   : required_exp ×= 10^level
//!                  max HP, max MP, attack, defense ×= triangular(level)
//! ```
//!
//! Collaborators outside combat (trainers, repeated-clear scaling) feed exp
//! through [`Hero::gain_exp`] and drive [`Hero::level_up`] themselves.

use rust_decimal::Decimal;
use tracing::debug;

use super::Hero;
use crate::config::BattleConfig;
use crate::stats::{saturating_mul, triangular};

/// Highest level a hero may reach.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LevelCap {
    Bounded(u32),
    /// Set by a limit break.
    Unbounded,
}

impl LevelCap {
    /// `10 × triangular(rating)`, never below the minimum level.
    pub fn for_rating(rating: u8) -> Self {
        let cap = 10 * triangular(u32::from(rating));
        let cap = u32::try_from(cap).unwrap_or(u32::MAX);
        Self::Bounded(cap.max(BattleConfig::MIN_LEVEL))
    }

    /// The numeric cap, or `None` when unbounded.
    pub fn max(&self) -> Option<u32> {
        match self {
            Self::Bounded(cap) => Some(*cap),
            Self::Unbounded => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Self::Unbounded)
    }

    /// Returns true when `level` may still increase.
    pub fn allows(&self, level: u32) -> bool {
        self.max().is_none_or(|cap| level < cap)
    }
}

impl Hero {
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn exp(&self) -> Decimal {
        self.exp
    }

    pub fn required_exp(&self) -> Decimal {
        self.required_exp
    }

    pub fn level_cap(&self) -> LevelCap {
        self.level_cap
    }

    /// `None` once the limit has been broken.
    pub fn max_level(&self) -> Option<u32> {
        self.level_cap.max()
    }

    pub fn is_limit_broken(&self) -> bool {
        self.level_cap.is_unbounded()
    }

    /// Banks experience. Negative amounts are ignored.
    pub fn gain_exp(&mut self, amount: Decimal) {
        if amount.is_sign_positive() {
            self.exp = self.exp.saturating_add(amount);
        }
    }

    /// Levels up as many times as banked experience allows.
    ///
    /// Every level-up multiplies the requirement by `10^level`, scales the
    /// level-scaled stats by `triangular(level)` and fully restores HP and
    /// magic points. Returns the number of levels gained; calling again
    /// without new experience changes nothing. Once the requirement
    /// saturates at [`Decimal::MAX`] no further level can be reached.
    pub fn level_up(&mut self) -> u32 {
        let mut gained = 0;

        // A saturated requirement is out of reach.
        while self.exp >= self.required_exp
            && self.required_exp < Decimal::MAX
            && self.level_cap.allows(self.level)
        {
            let Some(next) = self.level.checked_add(1) else {
                break;
            };
            self.level = next;
            gained += 1;

            self.required_exp = saturating_mul(self.required_exp, pow10(self.level));
            self.stats
                .scale_for_level(Decimal::from(triangular(self.level)));

            self.sync_resource_caps();
            self.hp.refill();
            self.magic_points.refill();
        }

        if gained > 0 {
            debug!(hero = %self.id, level = self.level, gained, "hero leveled up");
        }
        gained
    }

    /// Removes the level cap.
    ///
    /// Succeeds once, and only for a maximum-rating hero at its level cap.
    pub fn apply_limit_break(&mut self) -> bool {
        let at_cap = self.level_cap.max() == Some(self.level);
        if self.rating != BattleConfig::MAX_RATING || !at_cap {
            return false;
        }

        self.level_cap = LevelCap::Unbounded;
        debug!(hero = %self.id, level = self.level, "limit break applied");
        true
    }
}

/// `10^exp`, saturating at [`Decimal::MAX`].
fn pow10(exp: u32) -> Decimal {
    let ten = Decimal::TEN;
    (0..exp).fold(Decimal::ONE, |acc, _| saturating_mul(acc, ten))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hero::{Element, HeroId, HeroType};
    use crate::stats::BaseStats;
    use rust_decimal_macros::dec;

    fn recruit(rating: u8) -> Hero {
        Hero::new(
            HeroId(7),
            "Brom",
            Element::Fire,
            HeroType::Attack,
            BaseStats::new(dec!(100), dec!(20), dec!(10), dec!(5), dec!(50)),
        )
        .with_rating(rating)
    }

    #[test]
    fn level_cap_follows_rating() {
        assert_eq!(LevelCap::for_rating(1), LevelCap::Bounded(1));
        assert_eq!(LevelCap::for_rating(2), LevelCap::Bounded(10));
        assert_eq!(LevelCap::for_rating(6), LevelCap::Bounded(150));
    }

    #[test]
    fn level_up_needs_required_exp() {
        let mut hero = recruit(3);
        hero.gain_exp(dec!(999999));
        assert_eq!(hero.level_up(), 0);
        assert_eq!(hero.level(), 1);
    }

    #[test]
    fn level_up_scales_stats_and_restores() {
        let mut hero = recruit(3);
        hero.take_damage(dec!(40));

        hero.gain_exp(dec!(1000000));
        assert_eq!(hero.level_up(), 1);

        // level 2: requirement ×100, stats × triangular(2) = 1
        assert_eq!(hero.level(), 2);
        assert_eq!(hero.required_exp(), dec!(100000000));
        assert_eq!(hero.stats().max_hp, dec!(100));
        assert_eq!(hero.curr_hp(), dec!(100));
    }

    #[test]
    fn level_up_loops_over_banked_exp() {
        let mut hero = recruit(3);
        // 1e6 → level 2 (req 1e8) → level 3 (req 1e11)
        hero.gain_exp(dec!(100000000));

        assert_eq!(hero.level_up(), 2);
        assert_eq!(hero.level(), 3);
        assert_eq!(hero.required_exp(), dec!(100000000000));
        // triangular(2) × triangular(3) = 1 × 3
        assert_eq!(hero.stats().attack_power, dec!(30));
        assert_eq!(hero.max_hp(), dec!(300));
        assert_eq!(hero.curr_hp(), dec!(300));
    }

    #[test]
    fn level_up_is_idempotent_without_new_exp() {
        let mut hero = recruit(3);
        hero.gain_exp(dec!(1000000));
        hero.level_up();

        let before = hero.clone();
        assert_eq!(hero.level_up(), 0);
        assert_eq!(hero, before);
    }

    #[test]
    fn level_up_stops_at_cap() {
        let mut hero = recruit(1);
        hero.gain_exp(Decimal::MAX);
        assert_eq!(hero.level_up(), 0);
        assert_eq!(hero.level(), 1);
    }

    #[test]
    fn negative_exp_is_ignored() {
        let mut hero = recruit(2);
        hero.gain_exp(dec!(-5));
        assert_eq!(hero.exp(), Decimal::ZERO);
    }

    #[test]
    fn limit_break_rejected_below_max_rating_or_level() {
        let mut low_rating = recruit(5);
        assert!(!low_rating.apply_limit_break());
        assert_eq!(low_rating.max_level(), Some(100));

        let mut low_level = recruit(6);
        assert!(!low_level.apply_limit_break());
        assert_eq!(low_level.max_level(), Some(150));
        assert!(!low_level.is_limit_broken());
    }

    #[test]
    fn limit_break_at_cap_succeeds_once() {
        let mut hero = recruit(6);
        hero.level = 150;

        assert!(hero.apply_limit_break());
        assert_eq!(hero.max_level(), None);
        assert!(!hero.apply_limit_break());
    }

    #[test]
    fn saturated_requirement_ends_progression() {
        let mut hero = recruit(6);
        hero.gain_exp(Decimal::MAX);

        let gained = hero.level_up();
        assert!(gained > 0);
        assert_eq!(hero.required_exp(), Decimal::MAX);
        assert_eq!(hero.level_up(), 0);

        hero.level = 150;
        assert!(hero.apply_limit_break());
        let level = hero.level();
        assert_eq!(hero.level_up(), 0);
        assert_eq!(hero.level(), level);
    }
}
