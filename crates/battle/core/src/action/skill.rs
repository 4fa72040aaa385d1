//! Skill use: active skills and special powers.
//!
//! | skill            | target          | effect                                   |
//! |------------------|-----------------|------------------------------------------|
//! | active           | ally (or self)  | heal self and target, no damage          |
//! | active           | enemy           | one hit, debuffs, may be countered       |
//! | active, AOE      | enemy team      | one independent hit per living member    |
//! | special power    | enemy           | one hit; no-op while cooling down        |
//!
//! Buffs to self and allies are applied after the main effect.

use rust_decimal::Decimal;
use tracing::debug;

use super::{
    ActionError, ActionKind, ActionTransition, BattleEnv, check_resources, counterattack,
    existing_target, living_target, ready_actor,
};
use crate::combat::{ActionOutcome, HealReport, Strike, land_debuffs, strike};
use crate::config::BattleConfig;
use crate::hero::HeroId;
use crate::rng::RandomSource;
use crate::skill::{ActiveSkill, Skill, SkillKind, SpecialPower};
use crate::state::BattleState;
use crate::status::EffectFlags;

/// Uses one of the actor's skills, identified by name.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseSkillAction {
    pub actor: HeroId,
    pub target: HeroId,
    pub skill: String,
}

impl UseSkillAction {
    pub fn new(actor: HeroId, target: HeroId, skill: &Skill) -> Self {
        Self {
            actor,
            target,
            skill: skill.name.clone(),
        }
    }

    /// The actor's own copy of the skill.
    fn owned_skill<'s>(&self, state: &'s BattleState) -> Result<(usize, &'s Skill), ActionError> {
        let hero = state
            .hero(self.actor)
            .ok_or(ActionError::ActorNotFound(self.actor))?;
        let index = hero
            .skill_index(&self.skill)
            .ok_or_else(|| ActionError::SkillNotOwned(self.skill.clone()))?;
        Ok((index, &hero.skills()[index]))
    }

    fn is_friendly(&self, state: &BattleState) -> bool {
        self.actor == self.target || state.are_allies(self.actor, self.target)
    }

    fn validate_target(&self, state: &BattleState, skill: &Skill) -> Result<(), ActionError> {
        let invalid = ActionError::InvalidTarget {
            actor: self.actor,
            target: self.target,
        };
        match &skill.kind {
            SkillKind::Active(active) if active.is_aoe => {
                let target = existing_target(state, self.target)?;
                let actor_team = state.hero(self.actor).and_then(|h| h.team());
                match target.team() {
                    Some(team) if Some(team) != actor_team => Ok(()),
                    _ => Err(invalid),
                }
            }
            SkillKind::Active(_) => living_target(state, self.target).map(|_| ()),
            SkillKind::Special(_) => {
                living_target(state, self.target)?;
                if self.is_friendly(state) {
                    return Err(invalid);
                }
                Ok(())
            }
            SkillKind::Passive(_) | SkillKind::Leader(_) => {
                Err(ActionError::SkillNotUsable(skill.name.clone()))
            }
        }
    }

    fn spend(&self, state: &mut BattleState, skill: &Skill, outcome: &mut ActionOutcome) {
        if let Some(hero) = state.hero_mut(self.actor) {
            if hero.spend_magic_points(skill.resource_cost()) {
                outcome.magic_points_spent = skill.resource_cost();
            }
        }
    }

    fn use_special<R: RandomSource + ?Sized>(
        &self,
        state: &mut BattleState,
        env: &mut BattleEnv<'_, R>,
        index: usize,
        skill: &Skill,
        power: &SpecialPower,
        outcome: &mut ActionOutcome,
    ) {
        if !power.cooldown.is_ready() {
            debug!(actor = %self.actor, skill = %skill.name, remaining = power.cooldown.current, "special power cooling down");
            outcome.on_cooldown = true;
            return;
        }

        self.spend(state, skill, outcome);
        if let Some(owned) = state
            .hero_mut(self.actor)
            .and_then(|hero| hero.skill_at_mut(index))
            .and_then(Skill::as_special_mut)
        {
            owned.cooldown.trigger();
        }

        let hit = strike(
            state,
            env.config,
            &mut *env.rng,
            self.actor,
            self.target,
            Strike::Skill {
                multiplier: &power.multiplier,
                ignores_defense: power.ignores_enemy_defense,
            },
        );
        outcome.hits.push(hit);
        outcome.counterattack = counterattack(state, env, self.actor, self.target);
    }

    fn use_active<R: RandomSource + ?Sized>(
        &self,
        state: &mut BattleState,
        env: &mut BattleEnv<'_, R>,
        skill: &Skill,
        active: &ActiveSkill,
        outcome: &mut ActionOutcome,
    ) {
        self.spend(state, skill, outcome);

        let hit_kind = Strike::Skill {
            multiplier: &active.multiplier,
            ignores_defense: active.ignores_enemy_defense,
        };

        if active.is_aoe {
            let victims: Vec<HeroId> = state
                .team_of(self.target)
                .map(|team| team.living(&state.roster).collect())
                .unwrap_or_default();
            for victim in victims {
                let hit = strike(state, env.config, &mut *env.rng, self.actor, victim, hit_kind);
                outcome.hits.push(hit);
                outcome.debuffs.extend(land_debuffs(
                    state,
                    env.config,
                    &mut *env.rng,
                    self.actor,
                    victim,
                    &active.debuffs_to_enemies,
                ));
            }
        } else if self.is_friendly(state) {
            let targets = [
                (self.actor, active.heal_amount_to_self),
                (self.target, active.heal_amount_to_allies),
            ];
            for (id, amount) in targets {
                if amount <= Decimal::ZERO {
                    continue;
                }
                if let Some(hero) = state.hero_mut(id) {
                    let healed = hero.receive_heal(amount);
                    outcome.heals.push(HealReport {
                        target: id,
                        amount: healed,
                    });
                }
            }
        } else {
            let hit = strike(
                state,
                env.config,
                &mut *env.rng,
                self.actor,
                self.target,
                hit_kind,
            );
            outcome.hits.push(hit);
            outcome.debuffs.extend(land_debuffs(
                state,
                env.config,
                &mut *env.rng,
                self.actor,
                self.target,
                &active.debuffs_to_enemies,
            ));
            outcome.counterattack = counterattack(state, env, self.actor, self.target);
        }

        if let Some(hero) = state.hero_mut(self.actor) {
            for &buff in &active.buffs_to_self {
                hero.add_buff(buff);
            }
        }
        if !active.buffs_to_allies.is_empty() {
            for ally in state.allies_of(self.actor) {
                if let Some(hero) = state.hero_mut(ally).filter(|h| h.is_alive()) {
                    for &buff in &active.buffs_to_allies {
                        hero.add_buff(buff);
                    }
                }
            }
        }
    }
}

impl ActionTransition for UseSkillAction {
    type Error = ActionError;
    type Result = ActionOutcome;

    fn actor(&self) -> HeroId {
        self.actor
    }

    fn pre_validate(&self, state: &BattleState, _config: &BattleConfig) -> Result<(), ActionError> {
        let actor = ready_actor(state, self.actor)?;
        let (_, skill) = self.owned_skill(state)?;

        if !skill.is_usable() {
            return Err(ActionError::SkillNotUsable(skill.name.clone()));
        }
        if actor.status_flags().contains(EffectFlags::BLOCKS_SKILLS) {
            return Err(ActionError::Silenced(self.actor));
        }
        if actor.curr_magic_points() < skill.resource_cost() {
            return Err(ActionError::InsufficientMagicPoints {
                required: skill.resource_cost(),
                available: actor.curr_magic_points(),
            });
        }
        self.validate_target(state, skill)
    }

    fn apply<R: RandomSource + ?Sized>(
        &self,
        state: &mut BattleState,
        env: &mut BattleEnv<'_, R>,
    ) -> Result<ActionOutcome, ActionError> {
        let (index, skill) = self.owned_skill(state)?;
        let skill = skill.clone();
        let mut outcome = ActionOutcome::new(ActionKind::UseSkill, self.actor);

        match &skill.kind {
            SkillKind::Special(power) => {
                self.use_special(state, env, index, &skill, power, &mut outcome)
            }
            SkillKind::Active(active) => self.use_active(state, env, &skill, active, &mut outcome),
            SkillKind::Passive(_) | SkillKind::Leader(_) => {
                return Err(ActionError::SkillNotUsable(skill.name.clone()));
            }
        }

        debug!(
            actor = %self.actor,
            target = %self.target,
            skill = %skill.name,
            hits = outcome.hits.len(),
            damage = %outcome.total_damage(),
            "skill used"
        );
        Ok(outcome)
    }

    fn post_validate(&self, state: &BattleState, _config: &BattleConfig) -> Result<(), ActionError> {
        let mut involved = vec![self.actor, self.target];
        if let Some(team) = state.team_of(self.target) {
            involved.extend_from_slice(team.members());
        }
        check_resources(state, &involved)
    }
}
