//! Action transition dispatch and execution logic.

use crate::action::{Action, ActionTransition, BattleEnv};
use crate::combat::ActionOutcome;
use crate::rng::RandomSource;
use crate::state::BattleState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline and returns the result.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the battle state and return result
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T, R>(
    transition: &T,
    state: &mut BattleState,
    env: &mut BattleEnv<'_, R>,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
    R: RandomSource + ?Sized,
{
    transition
        .pre_validate(state, env.config)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env.config)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Routes each action variant to its transition.
pub(super) fn execute_transition<R: RandomSource + ?Sized>(
    action: &Action,
    state: &mut BattleState,
    env: &mut BattleEnv<'_, R>,
) -> Result<ActionOutcome, ExecuteError> {
    match action {
        Action::NormalAttack(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::NormalAttack)
        }
        Action::NormalHeal(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::NormalHeal)
        }
        Action::UseSkill(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::UseSkill)
        }
    }
}
