//! Resource pools (HP, magic points).
//!
//! Maximums follow the hero's effective stats; the current value is the only
//! part that changes turn to turn. Every mutation clamps into `[0, max]`.

use rust_decimal::Decimal;

/// A current/maximum pair with `0 ≤ current ≤ max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    current: Decimal,
    max: Decimal,
}

impl ResourceMeter {
    /// A full meter.
    pub fn full(max: Decimal) -> Self {
        let max = max.max(Decimal::ZERO);
        Self { current: max, max }
    }

    /// A meter at `current`, clamped into `[0, max]`.
    pub fn new(current: Decimal, max: Decimal) -> Self {
        let max = max.max(Decimal::ZERO);
        Self {
            current: current.clamp(Decimal::ZERO, max),
            max,
        }
    }

    pub fn current(&self) -> Decimal {
        self.current
    }

    pub fn max(&self) -> Decimal {
        self.max
    }

    pub fn is_empty(&self) -> bool {
        self.current <= Decimal::ZERO
    }

    /// Current value as a percentage of max (0 when max is 0).
    pub fn percentage(&self) -> Decimal {
        if self.max.is_zero() {
            return Decimal::ZERO;
        }
        self.current / self.max * Decimal::ONE_HUNDRED
    }

    /// Adds `amount` (negative amounts are ignored). Returns the amount gained.
    pub fn restore(&mut self, amount: Decimal) -> Decimal {
        let before = self.current;
        self.current = self.current.saturating_add(amount.max(Decimal::ZERO)).min(self.max);
        self.current - before
    }

    /// Removes `amount` (negative amounts are ignored). Returns the amount lost.
    pub fn drain(&mut self, amount: Decimal) -> Decimal {
        let before = self.current;
        self.current = self.current.saturating_sub(amount.max(Decimal::ZERO)).max(Decimal::ZERO);
        before - self.current
    }

    /// Sets the current value to max.
    pub fn refill(&mut self) {
        self.current = self.max;
    }

    /// Replaces the maximum. A growing pool gains the difference unless it is
    /// empty; a shrinking one clamps.
    pub fn resize(&mut self, max: Decimal) {
        let max = max.max(Decimal::ZERO);
        if max > self.max && !self.is_empty() {
            self.current = self.current.saturating_add(max - self.max);
        }
        self.max = max;
        self.current = self.current.min(self.max);
    }

    /// Sets the current value, clamped into `[0, max]`.
    pub fn set_current(&mut self, current: Decimal) {
        self.current = current.clamp(Decimal::ZERO, self.max);
    }
}
