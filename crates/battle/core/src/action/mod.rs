//! Battle actions.
//!
//! Every action is a transition with three phases driven by the engine:
//! `pre_validate` (rejections, no side effects) → `apply` → `post_validate`.
//!
//! - [`NormalAttackAction`]: attack power against defense
//! - [`NormalHealAction`]: self-heal for a fixed share of max HP
//! - [`UseSkillAction`]: active skill or special power

mod attack;
mod error;
mod heal;
mod skill;

pub use attack::NormalAttackAction;
pub use error::ActionError;
pub use heal::NormalHealAction;
pub use skill::UseSkillAction;

use rust_decimal::Decimal;

use crate::combat::{HitReport, Strike, strike};
use crate::config::BattleConfig;
use crate::hero::{Hero, HeroId};
use crate::rng::RandomSource;
use crate::skill::Skill;
use crate::state::BattleState;
use crate::status::EffectFlags;

/// The three kinds of action a hero can take.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    NormalAttack,
    NormalHeal,
    UseSkill,
}

/// Resolution context handed to [`ActionTransition::apply`].
pub struct BattleEnv<'a, R: ?Sized> {
    pub config: &'a BattleConfig,
    pub rng: &'a mut R,
}

impl<'a, R: RandomSource + ?Sized> BattleEnv<'a, R> {
    pub fn new(config: &'a BattleConfig, rng: &'a mut R) -> Self {
        Self { config, rng }
    }
}

/// Defines how an action variant mutates battle state.
pub trait ActionTransition {
    type Error;
    type Result;

    /// Returns the hero performing this action.
    fn actor(&self) -> HeroId;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &BattleState, _config: &BattleConfig) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action. Assumes `pre_validate` succeeded.
    fn apply<R: RandomSource + ?Sized>(
        &self,
        state: &mut BattleState,
        env: &mut BattleEnv<'_, R>,
    ) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &BattleState, _config: &BattleConfig) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// An action ready for execution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    NormalAttack(NormalAttackAction),
    NormalHeal(NormalHealAction),
    UseSkill(UseSkillAction),
}

impl Action {
    /// Builds an action from its kind. Skill actions require `skill`; other
    /// kinds ignore it.
    pub fn new(
        kind: ActionKind,
        actor: HeroId,
        target: HeroId,
        skill: Option<&Skill>,
    ) -> Result<Self, ActionError> {
        Ok(match kind {
            ActionKind::NormalAttack => Self::NormalAttack(NormalAttackAction::new(actor, target)),
            ActionKind::NormalHeal => Self::NormalHeal(NormalHealAction::new(actor, target)),
            ActionKind::UseSkill => {
                let skill = skill.ok_or(ActionError::MissingSkill)?;
                Self::UseSkill(UseSkillAction::new(actor, target, skill))
            }
        })
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Self::NormalAttack(_) => ActionKind::NormalAttack,
            Self::NormalHeal(_) => ActionKind::NormalHeal,
            Self::UseSkill(_) => ActionKind::UseSkill,
        }
    }

    pub fn actor(&self) -> HeroId {
        match self {
            Self::NormalAttack(a) => a.actor,
            Self::NormalHeal(a) => a.actor,
            Self::UseSkill(a) => a.actor,
        }
    }

    pub fn target(&self) -> HeroId {
        match self {
            Self::NormalAttack(a) => a.target,
            Self::NormalHeal(a) => a.target,
            Self::UseSkill(a) => a.target,
        }
    }
}

// ===== shared validation =====

/// The actor, provided it exists, is alive and may act.
fn ready_actor(state: &BattleState, actor: HeroId) -> Result<&Hero, ActionError> {
    let hero = state.hero(actor).ok_or(ActionError::ActorNotFound(actor))?;
    if !hero.is_alive() {
        return Err(ActionError::ActorDead(actor));
    }
    if hero.status_flags().contains(EffectFlags::PREVENTS_TURN) {
        return Err(ActionError::ActorIncapacitated(actor));
    }
    Ok(hero)
}

fn existing_target(state: &BattleState, target: HeroId) -> Result<&Hero, ActionError> {
    state.hero(target).ok_or(ActionError::TargetNotFound(target))
}

fn living_target(state: &BattleState, target: HeroId) -> Result<&Hero, ActionError> {
    let hero = existing_target(state, target)?;
    if !hero.is_alive() {
        return Err(ActionError::TargetDead(target));
    }
    Ok(hero)
}

/// Every involved hero still satisfies `0 ≤ current ≤ max`.
fn check_resources(state: &BattleState, heroes: &[HeroId]) -> Result<(), ActionError> {
    for &id in heroes {
        let Some(hero) = state.hero(id) else {
            continue;
        };
        let within = |current: Decimal, max: Decimal| current >= Decimal::ZERO && current <= max;
        if !within(hero.curr_hp(), hero.max_hp())
            || !within(hero.curr_magic_points(), hero.max_magic_points())
            || hero.shield_amount().is_sign_negative()
        {
            return Err(ActionError::InvariantViolated(id));
        }
    }
    Ok(())
}

/// Lets `defender` strike back at `attacker` with a normal attack.
///
/// Only rolled when the defender is alive, able to act and has a positive
/// counterattack chance.
fn counterattack<R: RandomSource + ?Sized>(
    state: &mut BattleState,
    env: &mut BattleEnv<'_, R>,
    attacker: HeroId,
    defender: HeroId,
) -> Option<HitReport> {
    let able = |hero: &Hero| {
        hero.is_alive() && !hero.status_flags().contains(EffectFlags::PREVENTS_TURN)
    };
    let defending = state.hero(defender).filter(|h| able(*h))?;
    let chance = defending.effective_stats().counterattack_chance;
    if !state.hero(attacker).is_some_and(Hero::is_alive) {
        return None;
    }
    if !env.rng.chance(chance) {
        return None;
    }

    tracing::debug!(counter = %defender, target = %attacker, "counterattack");
    Some(strike(
        state,
        env.config,
        &mut *env.rng,
        defender,
        attacker,
        Strike::Normal,
    ))
}
