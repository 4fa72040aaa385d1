use tracing::debug;

use super::{ActionError, ActionKind, ActionTransition, BattleEnv, check_resources, ready_actor};
use crate::combat::{ActionOutcome, HealReport};
use crate::config::BattleConfig;
use crate::hero::HeroId;
use crate::rng::RandomSource;
use crate::state::BattleState;
use crate::stats::percent_of;

/// Self-heal for `normal_heal_percentage`% of max HP.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalHealAction {
    pub actor: HeroId,
    pub target: HeroId,
}

impl NormalHealAction {
    pub fn new(actor: HeroId, target: HeroId) -> Self {
        Self { actor, target }
    }
}

impl ActionTransition for NormalHealAction {
    type Error = ActionError;
    type Result = ActionOutcome;

    fn actor(&self) -> HeroId {
        self.actor
    }

    fn pre_validate(&self, state: &BattleState, _config: &BattleConfig) -> Result<(), ActionError> {
        if self.actor != self.target {
            return Err(ActionError::HealTargetNotSelf);
        }
        ready_actor(state, self.actor)?;
        Ok(())
    }

    fn apply<R: RandomSource + ?Sized>(
        &self,
        state: &mut BattleState,
        env: &mut BattleEnv<'_, R>,
    ) -> Result<ActionOutcome, ActionError> {
        let hero = state
            .hero_mut(self.actor)
            .ok_or(ActionError::ActorNotFound(self.actor))?;

        let amount = hero.receive_heal(percent_of(hero.max_hp(), env.config.normal_heal_percentage));
        debug!(actor = %self.actor, %amount, "normal heal");

        let mut outcome = ActionOutcome::new(ActionKind::NormalHeal, self.actor);
        outcome.heals.push(HealReport {
            target: self.actor,
            amount,
        });
        Ok(outcome)
    }

    fn post_validate(&self, state: &BattleState, _config: &BattleConfig) -> Result<(), ActionError> {
        check_resources(state, &[self.actor])
    }
}
