//! Injected randomness for battle resolution.
//!
//! Critical hits, glancing hits, debuff resistance, counterattacks and extra
//! turns are the only non-deterministic parts of a battle. All of them draw
//! from a [`RandomSource`] owned by the caller, so a battle replays exactly
//! given the same seed.

use std::collections::VecDeque;

use rust_decimal::Decimal;

/// Source of uniform draws in `[0, 1)`.
pub trait RandomSource {
    /// Draws the next value uniformly from `[0, 1)`.
    fn draw_unit(&mut self) -> Decimal;

    /// Returns true with the given probability.
    ///
    /// Probabilities at or below zero never succeed and never consume a draw.
    fn chance(&mut self, probability: Decimal) -> bool {
        if probability <= Decimal::ZERO {
            return false;
        }
        self.draw_unit() < probability
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn draw_unit(&mut self) -> Decimal {
        (**self).draw_unit()
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// Uses the PCG-XSH-RR variant: 32-bit output from 64-bit state.
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a generator from a seed. Equal seeds yield equal sequences.
    pub fn seeded(seed: u64) -> Self {
        let mut rng = Self { state: 0 };
        rng.step();
        rng.state = rng.state.wrapping_add(seed);
        rng.step();
        rng
    }

    /// Advances the LCG state: `state' = state × multiplier + increment (mod 2^64)`.
    #[inline]
    fn step(&mut self) {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
    }

    /// XSH-RR output permutation.
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Generates the next raw 32-bit value.
    pub fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.step();
        Self::output(old)
    }
}

impl RandomSource for PcgRng {
    fn draw_unit(&mut self) -> Decimal {
        // u32 / 2^32 is exactly representable and strictly below one.
        Decimal::from(self.next_u32()) / Decimal::from(1u64 << 32)
    }
}

/// Replays a fixed sequence of draws, then repeats the fallback value.
///
/// Used to force outcomes (e.g. "no critical hit") in tests and scripted
/// scenarios. Counts how many draws were taken.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptedRolls {
    rolls: VecDeque<Decimal>,
    fallback: Decimal,
    drawn: usize,
}

impl ScriptedRolls {
    /// Creates a source that yields `rolls` in order, then `fallback` forever.
    pub fn new(rolls: impl IntoIterator<Item = Decimal>, fallback: Decimal) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            fallback,
            drawn: 0,
        }
    }

    /// A source whose every draw is `value`.
    pub fn constant(value: Decimal) -> Self {
        Self::new([], value)
    }

    /// Every draw is just below one: critical hits (rate < 1) never happen.
    pub fn never() -> Self {
        Self::constant(Decimal::new(999_999, 6))
    }

    /// Every draw is zero: every chance above zero succeeds.
    pub fn always() -> Self {
        Self::constant(Decimal::ZERO)
    }

    /// Number of draws taken so far.
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl RandomSource for ScriptedRolls {
    fn draw_unit(&mut self) -> Decimal {
        self.drawn += 1;
        self.rolls.pop_front().unwrap_or(self.fallback)
    }
}
