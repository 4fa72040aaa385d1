use tracing::debug;

use super::{
    ActionError, ActionKind, ActionTransition, BattleEnv, check_resources, counterattack,
    living_target, ready_actor,
};
use crate::combat::{ActionOutcome, Strike, strike};
use crate::config::BattleConfig;
use crate::hero::HeroId;
use crate::rng::RandomSource;
use crate::state::BattleState;

/// A basic attack: effective attack (× critical factor) minus effective
/// defense, floored at zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalAttackAction {
    pub actor: HeroId,
    pub target: HeroId,
}

impl NormalAttackAction {
    pub fn new(actor: HeroId, target: HeroId) -> Self {
        Self { actor, target }
    }
}

impl ActionTransition for NormalAttackAction {
    type Error = ActionError;
    type Result = ActionOutcome;

    fn actor(&self) -> HeroId {
        self.actor
    }

    fn pre_validate(&self, state: &BattleState, _config: &BattleConfig) -> Result<(), ActionError> {
        if self.actor == self.target {
            return Err(ActionError::SelfTargetedAttack);
        }
        ready_actor(state, self.actor)?;
        living_target(state, self.target)?;
        Ok(())
    }

    fn apply<R: RandomSource + ?Sized>(
        &self,
        state: &mut BattleState,
        env: &mut BattleEnv<'_, R>,
    ) -> Result<ActionOutcome, ActionError> {
        let mut outcome = ActionOutcome::new(ActionKind::NormalAttack, self.actor);

        let hit = strike(
            state,
            env.config,
            &mut *env.rng,
            self.actor,
            self.target,
            Strike::Normal,
        );
        debug!(
            actor = %self.actor,
            target = %self.target,
            damage = %hit.damage,
            critical = hit.critical,
            "normal attack"
        );
        outcome.hits.push(hit);
        outcome.counterattack = counterattack(state, env, self.actor, self.target);

        Ok(outcome)
    }

    fn post_validate(&self, state: &BattleState, _config: &BattleConfig) -> Result<(), ActionError> {
        check_resources(state, &[self.actor, self.target])
    }
}
