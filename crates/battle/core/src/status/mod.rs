//! Status effect registry.
//!
//! Heroes carry two bounded lists, one of buffs and one of debuffs. Each entry
//! is a name plus the number of owner turns it has left; the effect itself is
//! always derived from the name (see [`StatusKind::effect`]).
//!
//! # Turn-based Duration
//!
//! `turns` is decremented once at the end of each of the owner's turns and
//! the entry is removed when it reaches zero.

pub mod kinds;

pub use kinds::{BuffKind, DebuffKind, EffectFlags, ImmunityTags, StatusEffect, StatusKind};

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::stats::StatBonus;

/// A single active status with its remaining turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Status<K> {
    pub kind: K,
    pub turns: u32,
}

impl<K: StatusKind> Status<K> {
    pub const fn new(kind: K, turns: u32) -> Self {
        Self { kind, turns }
    }

    pub fn effect(&self) -> StatusEffect {
        self.kind.effect()
    }
}

pub type Buff = Status<BuffKind>;
pub type Debuff = Status<DebuffKind>;

/// Fixed-capacity list of active statuses.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusList<K, const N: usize> {
    entries: ArrayVec<Status<K>, N>,
}

pub type BuffList = StatusList<BuffKind, { BattleConfig::MAX_BUFFS }>;
pub type DebuffList = StatusList<DebuffKind, { BattleConfig::MAX_DEBUFFS }>;

impl<K: StatusKind, const N: usize> StatusList<K, N> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            entries: ArrayVec::new(),
        }
    }

    /// Adds a status.
    ///
    /// Re-applying an active name keeps the longer duration. Returns false only
    /// when the name is new and the list is full, or `turns` is zero.
    pub fn add(&mut self, status: Status<K>) -> bool {
        if status.turns == 0 {
            return false;
        }

        if let Some(existing) = self.entries.iter_mut().find(|e| e.kind == status.kind) {
            existing.turns = existing.turns.max(status.turns);
            return true;
        }

        self.entries.try_push(status).is_ok()
    }

    /// Removes the status with this name. Returns true if it was present.
    pub fn remove(&mut self, kind: K) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.kind != kind);
        self.entries.len() != before
    }

    /// Checks if a status with this name is active.
    pub fn has(&self, kind: K) -> bool {
        self.entries.iter().any(|e| e.kind == kind)
    }

    /// Remaining turns of a status, if active.
    pub fn turns_left(&self, kind: K) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.turns)
    }

    /// Decrements every status by one turn and removes the expired ones.
    ///
    /// Returns the names that expired.
    pub fn tick(&mut self) -> ArrayVec<K, N> {
        let mut expired = ArrayVec::new();
        for entry in self.entries.iter_mut() {
            entry.turns = entry.turns.saturating_sub(1);
            if entry.turns == 0 {
                expired.push(entry.kind);
            }
        }
        self.entries.retain(|e| e.turns > 0);
        expired
    }

    /// Union of all behavioral flags.
    pub fn flags(&self) -> EffectFlags {
        self.entries
            .iter()
            .fold(EffectFlags::empty(), |acc, e| acc | e.effect().flags())
    }

    /// Stat bonuses contributed by the active statuses.
    pub fn stat_bonuses(&self) -> impl Iterator<Item = StatBonus> + '_ {
        self.entries.iter().filter_map(|e| match e.effect() {
            StatusEffect::Stat(bonus) => Some(bonus),
            _ => None,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Status<K>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.is_full()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K: StatusKind, const N: usize> Default for StatusList<K, N> {
    fn default() -> Self {
        Self::new()
    }
}
