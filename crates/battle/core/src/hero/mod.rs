//! Heroes: identity, stats, resources, statuses and owned skills.
//!
//! A hero owns its buff/debuff lists and skill list. Its team membership is a
//! non-owning back reference ([`TeamId`]) maintained by [`Team`](crate::Team).

mod progression;

pub use progression::LevelCap;

use core::fmt;

use arrayvec::ArrayVec;
use rust_decimal::Decimal;

use crate::config::BattleConfig;
use crate::skill::Skill;
use crate::stats::{
    BaseStats, BattleRates, EffectiveStats, ResourceMeter, StatBonus, StatModifiers, percent_of,
};
use crate::status::{
    Buff, BuffKind, BuffList, Debuff, DebuffKind, DebuffList, EffectFlags, ImmunityTags,
    StatusEffect, StatusKind,
};
use crate::team::TeamId;

/// Unique identifier of a hero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct HeroId(pub u32);

impl fmt::Display for HeroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hero#{}", self.0)
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Element {
    #[default]
    Fire,
    Water,
    Wind,
    Light,
    Dark,
    Neutral,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum HeroType {
    #[default]
    Attack,
    Defense,
    Hp,
    Support,
}

/// Damage actually taken by a hero after shields and protections.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageTaken {
    /// Amount soaked by the shield.
    pub absorbed: Decimal,
    /// Amount removed from current HP.
    pub hp_lost: Decimal,
}

impl DamageTaken {
    pub fn total(&self) -> Decimal {
        self.absorbed + self.hp_lost
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hero {
    pub id: HeroId,
    pub name: String,
    pub element: Element,
    pub hero_type: HeroType,

    rating: u8,
    level: u32,
    exp: Decimal,
    required_exp: Decimal,
    level_cap: LevelCap,

    stats: BaseStats,
    rates: BattleRates,
    hp: ResourceMeter,
    magic_points: ResourceMeter,

    buffs: BuffList,
    debuffs: DebuffList,
    immunities: ImmunityTags,
    skills: ArrayVec<Skill, { BattleConfig::MAX_SKILLS }>,

    team: Option<TeamId>,

    // ===== battle-only state =====
    modifiers: StatModifiers,
    shield_amount: Decimal,
    turns_gained: u32,
}

impl Hero {
    /// Creates a level 1, rating 1 hero at full HP and magic points.
    pub fn new(
        id: HeroId,
        name: impl Into<String>,
        element: Element,
        hero_type: HeroType,
        stats: BaseStats,
    ) -> Self {
        let hp = ResourceMeter::full(stats.max_hp);
        let magic_points = ResourceMeter::full(stats.max_magic_points);
        let rating = BattleConfig::MIN_RATING;

        Self {
            id,
            name: name.into(),
            element,
            hero_type,
            rating,
            level: BattleConfig::MIN_LEVEL,
            exp: Decimal::ZERO,
            required_exp: BattleConfig::INITIAL_REQUIRED_EXP,
            level_cap: LevelCap::for_rating(rating),
            stats,
            rates: BattleRates::default(),
            hp,
            magic_points,
            buffs: BuffList::new(),
            debuffs: DebuffList::new(),
            immunities: ImmunityTags::empty(),
            skills: ArrayVec::new(),
            team: None,
            modifiers: StatModifiers::new(),
            shield_amount: Decimal::ZERO,
            turns_gained: 0,
        }
    }

    /// Sets the rating (clamped to 1–6) and recomputes the level cap.
    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = rating.clamp(BattleConfig::MIN_RATING, BattleConfig::MAX_RATING);
        if !self.level_cap.is_unbounded() {
            self.level_cap = LevelCap::for_rating(self.rating);
            self.level = self.level.min(self.level_cap.max().unwrap_or(self.level));
        }
        self
    }

    /// Sets battle rates, clamping each into its bounds.
    pub fn with_rates(mut self, rates: BattleRates) -> Self {
        self.rates = rates.clamped();
        self
    }

    pub fn with_crit_rate(self, value: Decimal) -> Self {
        self.with_rate(|rates| rates.crit_rate = value)
    }

    pub fn with_crit_damage(self, value: Decimal) -> Self {
        self.with_rate(|rates| rates.crit_damage = value)
    }

    pub fn with_resistance(self, value: Decimal) -> Self {
        self.with_rate(|rates| rates.resistance = value)
    }

    pub fn with_accuracy(self, value: Decimal) -> Self {
        self.with_rate(|rates| rates.accuracy = value)
    }

    pub fn with_life_drain_percentage(self, value: Decimal) -> Self {
        self.with_rate(|rates| rates.life_drain_percentage = value)
    }

    pub fn with_extra_turn_chance(self, value: Decimal) -> Self {
        self.with_rate(|rates| rates.extra_turn_chance = value)
    }

    pub fn with_counterattack_chance(self, value: Decimal) -> Self {
        self.with_rate(|rates| rates.counterattack_chance = value)
    }

    fn with_rate(mut self, edit: impl FnOnce(&mut BattleRates)) -> Self {
        edit(&mut self.rates);
        self.rates = self.rates.clone().clamped();
        self
    }

    pub fn with_immunities(mut self, immunities: ImmunityTags) -> Self {
        self.immunities = immunities;
        self
    }

    /// Adds skills in order; skills beyond capacity are dropped.
    pub fn with_skills(mut self, skills: impl IntoIterator<Item = Skill>) -> Self {
        for skill in skills {
            if !self.learn_skill(skill) {
                break;
            }
        }
        self
    }

    // ===== accessors =====

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn stats(&self) -> &BaseStats {
        &self.stats
    }

    pub fn rates(&self) -> &BattleRates {
        &self.rates
    }

    pub fn set_rates(&mut self, rates: BattleRates) {
        self.rates = rates.clamped();
    }

    pub fn hp(&self) -> &ResourceMeter {
        &self.hp
    }

    pub fn magic_points(&self) -> &ResourceMeter {
        &self.magic_points
    }

    pub fn curr_hp(&self) -> Decimal {
        self.hp.current()
    }

    pub fn max_hp(&self) -> Decimal {
        self.hp.max()
    }

    pub fn curr_magic_points(&self) -> Decimal {
        self.magic_points.current()
    }

    pub fn max_magic_points(&self) -> Decimal {
        self.magic_points.max()
    }

    /// Alive while current HP is above zero.
    pub fn is_alive(&self) -> bool {
        !self.hp.is_empty()
    }

    pub fn team(&self) -> Option<TeamId> {
        self.team
    }

    pub(crate) fn set_team(&mut self, team: Option<TeamId>) {
        self.team = team;
    }

    pub fn immunities(&self) -> ImmunityTags {
        self.immunities
    }

    pub fn modifiers(&self) -> &StatModifiers {
        &self.modifiers
    }

    /// Folds a battle-only bonus into the modifiers.
    ///
    /// HP and magic point pools follow their effective maximums.
    pub fn apply_bonus(&mut self, bonus: &StatBonus) {
        self.modifiers.apply(bonus);
        self.sync_resource_caps();
    }

    /// Drops every battle-only bonus; the pools shrink back to base.
    pub fn clear_modifiers(&mut self) {
        self.modifiers.reset();
        self.sync_resource_caps();
    }

    /// Resizes the HP and magic point pools to the effective maximums.
    pub(crate) fn sync_resource_caps(&mut self) {
        let stats = EffectiveStats::of(self);
        self.hp.resize(stats.max_hp);
        self.magic_points.resize(stats.max_magic_points);
    }

    /// Sets current HP and magic points, clamped into their pools.
    pub(crate) fn set_resources(&mut self, hp: Decimal, magic_points: Decimal) {
        self.hp.set_current(hp);
        self.magic_points.set_current(magic_points);
    }

    pub fn shield_amount(&self) -> Decimal {
        self.shield_amount
    }

    pub fn turns_gained(&self) -> u32 {
        self.turns_gained
    }

    pub(crate) fn gain_turn(&mut self) {
        self.turns_gained += 1;
    }

    /// Current "actual" stats with modifiers and statuses folded in.
    pub fn effective_stats(&self) -> EffectiveStats {
        EffectiveStats::of(self)
    }

    // ===== resources =====

    /// Restores HP, clamped to max. Returns the amount restored.
    pub fn restore_hp(&mut self, amount: Decimal) -> Decimal {
        self.hp.restore(amount)
    }

    /// Restores magic points, clamped to max. Returns the amount restored.
    pub fn restore_magic_points(&mut self, amount: Decimal) -> Decimal {
        self.magic_points.restore(amount)
    }

    /// Applies a heal from a battle action.
    ///
    /// Heal-blocking statuses reduce it to nothing.
    pub fn receive_heal(&mut self, amount: Decimal) -> Decimal {
        if self.status_flags().contains(EffectFlags::BLOCKS_HEAL) {
            return Decimal::ZERO;
        }
        self.restore_hp(amount)
    }

    /// Pays `cost` magic points. Returns false (and pays nothing) when short.
    pub fn spend_magic_points(&mut self, cost: Decimal) -> bool {
        if self.magic_points.current() < cost {
            return false;
        }
        self.magic_points.drain(cost);
        true
    }

    /// Applies incoming damage.
    ///
    /// Damage-preventing statuses zero it; the shield absorbs first; HP is
    /// clamped at zero.
    pub fn take_damage(&mut self, amount: Decimal) -> DamageTaken {
        let amount = amount.max(Decimal::ZERO);
        if amount.is_zero() || self.status_flags().contains(EffectFlags::PREVENTS_DAMAGE) {
            return DamageTaken::default();
        }

        let absorbed = amount.min(self.shield_amount);
        self.shield_amount -= absorbed;
        let hp_lost = self.hp.drain(amount - absorbed);

        DamageTaken { absorbed, hp_lost }
    }

    /// Fully restores HP and magic points.
    pub fn refill(&mut self) {
        self.hp.refill();
        self.magic_points.refill();
    }

    // ===== statuses =====

    pub fn buffs(&self) -> &BuffList {
        &self.buffs
    }

    pub fn debuffs(&self) -> &DebuffList {
        &self.debuffs
    }

    pub fn has_buff(&self, kind: BuffKind) -> bool {
        self.buffs.has(kind)
    }

    pub fn has_debuff(&self, kind: DebuffKind) -> bool {
        self.debuffs.has(kind)
    }

    /// Union of all behavioral flags from buffs and debuffs.
    pub fn status_flags(&self) -> EffectFlags {
        self.buffs.flags() | self.debuffs.flags()
    }

    /// Adds a buff. Returns false when the buff list is full.
    ///
    /// A shield buff grants its shield immediately.
    pub fn add_buff(&mut self, buff: Buff) -> bool {
        if !self.buffs.add(buff) {
            return false;
        }
        if let StatusEffect::Shield { percentage } = buff.effect() {
            let granted = percent_of(self.max_hp(), percentage);
            self.shield_amount = self.shield_amount.max(granted);
        }
        true
    }

    pub fn remove_buff(&mut self, kind: BuffKind) -> bool {
        let removed = self.buffs.remove(kind);
        if removed && matches!(kind.effect(), StatusEffect::Shield { .. }) {
            self.shield_amount = Decimal::ZERO;
        }
        removed
    }

    /// Returns true when this debuff would be rejected outright.
    pub fn is_immune_to(&self, kind: DebuffKind) -> bool {
        self.immunities.intersects(kind.immunity_tag())
            || self.status_flags().contains(EffectFlags::BLOCKS_DEBUFFS)
    }

    /// Adds a debuff. Returns false when immune or the list is full.
    pub fn add_debuff(&mut self, debuff: Debuff) -> bool {
        if self.is_immune_to(debuff.kind) {
            return false;
        }
        self.debuffs.add(debuff)
    }

    pub fn remove_debuff(&mut self, kind: DebuffKind) -> bool {
        self.debuffs.remove(kind)
    }

    /// Counts down every status by one owner turn and drops the expired ones.
    pub fn tick_statuses(&mut self) {
        let expired = self.buffs.tick();
        if expired
            .iter()
            .any(|kind| matches!(kind.effect(), StatusEffect::Shield { .. }))
        {
            self.shield_amount = Decimal::ZERO;
        }
        self.debuffs.tick();
    }

    // ===== skills =====

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    /// Learns a skill. Returns false when the skill list is full or a skill
    /// with the same name is already known.
    pub fn learn_skill(&mut self, skill: Skill) -> bool {
        if self.skill_index(&skill.name).is_some() {
            return false;
        }
        self.skills.try_push(skill).is_ok()
    }

    pub fn skill_index(&self, name: &str) -> Option<usize> {
        self.skills.iter().position(|s| s.name == name)
    }

    pub fn owns_skill(&self, skill: &Skill) -> bool {
        self.skill_index(&skill.name).is_some()
    }

    pub(crate) fn skill_at_mut(&mut self, index: usize) -> Option<&mut Skill> {
        self.skills.get_mut(index)
    }

    /// Owned, usable as an action, and affordable.
    pub fn can_use_skill(&self, skill: &Skill) -> bool {
        self.owns_skill(skill)
            && skill.is_usable()
            && self.magic_points.current() >= skill.resource_cost()
    }

    /// Counts down every special power cooldown by one owner turn.
    pub fn tick_cooldowns(&mut self) {
        for skill in self.skills.iter_mut() {
            if let Some(power) = skill.as_special_mut() {
                power.cooldown.tick();
            }
        }
    }

    /// Clears every battle-only field: modifiers, statuses, shield, turn
    /// counter and cooldowns.
    pub fn reset_battle_state(&mut self) {
        self.clear_modifiers();
        self.buffs.clear();
        self.debuffs.clear();
        self.shield_amount = Decimal::ZERO;
        self.turns_gained = 0;
        for skill in self.skills.iter_mut() {
            if let Some(power) = skill.as_special_mut() {
                power.cooldown.reset();
            }
        }
    }
}
