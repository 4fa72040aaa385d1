//! Error types for the action execution pipeline.

use crate::action::{
    ActionError, ActionTransition, NormalAttackAction, NormalHealAction, UseSkillAction,
};
use crate::error::{BattleError, ErrorSeverity};
use crate::hero::HeroId;

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing an action through the battle engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("normal attack failed: {0}")]
    NormalAttack(TransitionPhaseError<<NormalAttackAction as ActionTransition>::Error>),

    #[error("normal heal failed: {0}")]
    NormalHeal(TransitionPhaseError<<NormalHealAction as ActionTransition>::Error>),

    #[error("skill use failed: {0}")]
    UseSkill(TransitionPhaseError<<UseSkillAction as ActionTransition>::Error>),

    #[error("action could not be built: {0}")]
    Build(ActionError),

    #[error("{actor} cannot act: it is {current}'s turn")]
    ActorNotCurrent { actor: HeroId, current: HeroId },

    #[error("the battle is over")]
    BattleOver,
}

impl ExecuteError {
    /// The action's rejection reason, if the action itself was rejected.
    pub fn action_error(&self) -> Option<&ActionError> {
        match self {
            Self::NormalAttack(e) | Self::NormalHeal(e) | Self::UseSkill(e) => Some(&e.error),
            Self::Build(e) => Some(e),
            Self::ActorNotCurrent { .. } | Self::BattleOver => None,
        }
    }

    /// The pipeline phase that failed, if the action got that far.
    pub fn phase(&self) -> Option<TransitionPhase> {
        match self {
            Self::NormalAttack(e) | Self::NormalHeal(e) | Self::UseSkill(e) => Some(e.phase),
            _ => None,
        }
    }
}

impl BattleError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ActorNotCurrent { .. } => ErrorSeverity::Recoverable,
            Self::BattleOver => ErrorSeverity::Validation,
            other => other
                .action_error()
                .map_or(ErrorSeverity::Internal, BattleError::severity),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorNotCurrent { .. } => "EXECUTE_ACTOR_NOT_CURRENT",
            Self::BattleOver => "EXECUTE_BATTLE_OVER",
            other => other
                .action_error()
                .map_or("EXECUTE_UNKNOWN", BattleError::error_code),
        }
    }
}
