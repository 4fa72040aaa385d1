//! Action execution pipeline and turn loop.
//!
//! The [`BattleEngine`] is the authoritative reducer for [`BattleState`]. It
//! routes every action through the transition phases, surfaces rich error
//! information, and drives the round-based turn order. Randomness comes
//! from the [`RandomSource`] the engine owns for its lifetime.

mod errors;
mod transition;
mod turns;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};
pub use turns::{TurnEnd, TurnError, TurnStart};

use tracing::debug;

use crate::action::{Action, ActionKind, BattleEnv};
use crate::combat::ActionOutcome;
use crate::config::BattleConfig;
use crate::error::BattleError;
use crate::hero::HeroId;
use crate::rng::RandomSource;
use crate::skill::Skill;
use crate::state::BattleState;

/// Battle engine that manages action execution and turn scheduling.
///
/// All state mutations flow through the three-phase action pipeline:
/// pre_validate → apply → post_validate
///
/// An action rejected in pre_validate leaves the state untouched.
pub struct BattleEngine<'a, R> {
    state: &'a mut BattleState,
    config: &'a BattleConfig,
    rng: R,
}

impl<'a, R: RandomSource> BattleEngine<'a, R> {
    /// Creates a new battle engine over the given state.
    pub fn new(state: &'a mut BattleState, config: &'a BattleConfig, rng: R) -> Self {
        Self { state, config, rng }
    }

    pub fn state(&self) -> &BattleState {
        self.state
    }

    pub fn state_mut(&mut self) -> &mut BattleState {
        self.state
    }

    pub fn config(&self) -> &BattleConfig {
        self.config
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Releases the random source, e.g. to continue the sequence elsewhere.
    pub fn into_rng(self) -> R {
        self.rng
    }

    /// Executes an action and reports whether it succeeded.
    ///
    /// Rejections are logged and reported as `false`; use [`try_execute`]
    /// for the reason.
    ///
    /// [`try_execute`]: Self::try_execute
    pub fn execute(
        &mut self,
        kind: ActionKind,
        actor: HeroId,
        target: HeroId,
        skill: Option<&Skill>,
    ) -> bool {
        match self.try_execute(kind, actor, target, skill) {
            Ok(_) => true,
            Err(error) => {
                debug!(
                    %kind,
                    %actor,
                    %target,
                    code = error.error_code(),
                    severity = error.severity().as_str(),
                    %error,
                    "action rejected"
                );
                false
            }
        }
    }

    /// Builds and executes an action, returning its outcome.
    pub fn try_execute(
        &mut self,
        kind: ActionKind,
        actor: HeroId,
        target: HeroId,
        skill: Option<&Skill>,
    ) -> Result<ActionOutcome, ExecuteError> {
        let action = Action::new(kind, actor, target, skill).map_err(ExecuteError::Build)?;
        self.execute_action(&action)
    }

    /// Executes a prepared action through the transition pipeline.
    ///
    /// Once the battle has started, only the hero whose turn it is may act.
    pub fn execute_action(&mut self, action: &Action) -> Result<ActionOutcome, ExecuteError> {
        self.validate_actor(action.actor())?;

        let mut env = BattleEnv::new(self.config, &mut self.rng);
        let outcome = transition::execute_transition(action, self.state, &mut env)?;

        if self.state.turn.started {
            self.refresh_winner();
        }
        Ok(outcome)
    }

    fn validate_actor(&self, actor: HeroId) -> Result<(), ExecuteError> {
        let turn = &self.state.turn;
        if !turn.started {
            return Ok(());
        }
        if turn.winner.is_some() {
            return Err(ExecuteError::BattleOver);
        }
        match turn.whose_turn {
            Some(current) if current != actor => {
                Err(ExecuteError::ActorNotCurrent { actor, current })
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionError;
    use crate::hero::{Element, Hero, HeroType};
    use crate::rng::ScriptedRolls;
    use crate::skill::{ActiveSkill, DamageMultiplier, SkillKind};
    use crate::stats::BaseStats;
    use rust_decimal_macros::dec;

    fn duel() -> BattleState {
        let stats = BaseStats::new(dec!(1000), dec!(100), dec!(500), dec!(100), dec!(100));
        let roster = [1, 2]
            .into_iter()
            .map(|id| {
                Hero::new(HeroId(id), "Duelist", Element::Wind, HeroType::Attack, stats.clone())
            })
            .collect();
        let mut state = BattleState::new(roster);
        let red = state.create_team().unwrap();
        let blue = state.create_team().unwrap();
        state.assign(HeroId(1), red).unwrap();
        state.assign(HeroId(2), blue).unwrap();
        state
    }

    #[test]
    fn execute_reports_success_and_failure_as_bool() {
        let mut state = duel();
        let config = BattleConfig::default();
        {
            let mut engine = BattleEngine::new(&mut state, &config, ScriptedRolls::never());
            assert!(engine.execute(ActionKind::NormalAttack, HeroId(1), HeroId(2), None));
            assert!(!engine.execute(ActionKind::NormalAttack, HeroId(1), HeroId(1), None));
            assert!(!engine.execute(ActionKind::NormalHeal, HeroId(1), HeroId(2), None));
            assert!(engine.execute(ActionKind::NormalHeal, HeroId(2), HeroId(2), None));
        }

        // 1000 − 400 + 50
        assert_eq!(state.hero(HeroId(2)).unwrap().curr_hp(), dec!(650));
    }

    #[test]
    fn rejection_carries_phase_and_reason() {
        let mut state = duel();
        let config = BattleConfig::default();
        let mut engine = BattleEngine::new(&mut state, &config, ScriptedRolls::never());

        let error = engine
            .try_execute(ActionKind::NormalAttack, HeroId(1), HeroId(1), None)
            .unwrap_err();
        assert_eq!(error.phase(), Some(TransitionPhase::PreValidate));
        assert_eq!(error.action_error(), Some(&ActionError::SelfTargetedAttack));
        assert_eq!(error.error_code(), "ACTION_SELF_TARGETED_ATTACK");
    }

    #[test]
    fn skill_action_without_skill_fails_to_build() {
        let mut state = duel();
        let config = BattleConfig::default();
        let mut engine = BattleEngine::new(&mut state, &config, ScriptedRolls::never());

        let error = engine
            .try_execute(ActionKind::UseSkill, HeroId(1), HeroId(2), None)
            .unwrap_err();
        assert_eq!(error, ExecuteError::Build(ActionError::MissingSkill));
        assert_eq!(error.phase(), None);
    }

    #[test]
    fn rejected_skill_leaves_state_untouched() {
        let mut state = duel();
        let before = state.clone();
        let config = BattleConfig::default();
        let unknown = Skill::new(
            "Unknown",
            dec!(10),
            SkillKind::Active(ActiveSkill::strike(DamageMultiplier::attack_scaling(dec!(1)))),
        );

        {
            let mut engine = BattleEngine::new(&mut state, &config, ScriptedRolls::never());
            assert!(!engine.execute(ActionKind::UseSkill, HeroId(1), HeroId(2), Some(&unknown)));
        }
        assert_eq!(state, before);
    }
}
