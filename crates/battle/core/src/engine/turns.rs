use rust_decimal::Decimal;
use tracing::{debug, info, trace};

use crate::config::BattleConfig;
use crate::error::{BattleError, ErrorSeverity};
use crate::hero::{Hero, HeroId};
use crate::rng::RandomSource;
use crate::state::TurnState;
use crate::stats::percent_of;
use crate::status::{EffectFlags, StatusEffect};
use crate::team::{Team, TeamId};

use super::BattleEngine;

/// Errors that can occur during turn operations
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnError {
    #[error("a battle needs two teams with at least one member each")]
    NotEnoughTeams,

    #[error("the battle has not started")]
    NotStarted,

    #[error("the battle is over")]
    BattleOver,

    #[error("no hero is taking a turn")]
    NoCurrentHero,

    #[error("hero {0} is not in the roster")]
    UnknownHero(HeroId),

    #[error("no living hero can act")]
    NoLivingHeroes,
}

impl BattleError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotEnoughTeams | Self::NotStarted | Self::BattleOver => ErrorSeverity::Validation,
            Self::NoCurrentHero => ErrorSeverity::Recoverable,
            Self::UnknownHero(_) | Self::NoLivingHeroes => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotEnoughTeams => "TURN_NOT_ENOUGH_TEAMS",
            Self::NotStarted => "TURN_NOT_STARTED",
            Self::BattleOver => "TURN_BATTLE_OVER",
            Self::NoCurrentHero => "TURN_NO_CURRENT_HERO",
            Self::UnknownHero(_) => "TURN_UNKNOWN_HERO",
            Self::NoLivingHeroes => "TURN_NO_LIVING_HEROES",
        }
    }
}

/// Effects resolved at the start of a hero's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnStart {
    pub hero: HeroId,
    /// HP restored by recovery buffs.
    pub recovered: Decimal,
    /// Damage taken from continuous-damage debuffs.
    pub continuous_damage: Decimal,
    /// False when the hero died or a status prevents its turn.
    pub can_act: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnEnd {
    pub hero: HeroId,
    /// The hero acts again before the round continues.
    pub extra_turn: bool,
    pub winner: Option<TeamId>,
}

/// Turn scheduling methods for BattleEngine.
impl<'a, R: RandomSource> BattleEngine<'a, R> {
    /// Applies team effects and resets turn bookkeeping.
    pub fn start_battle(&mut self) -> Result<(), TurnError> {
        let teams = self.state.teams();
        if teams.len() < BattleConfig::MAX_TEAMS || teams.iter().any(Team::is_empty) {
            return Err(TurnError::NotEnoughTeams);
        }

        let (roster, teams) = self.state.split_mut();
        for team in teams.iter_mut() {
            team.apply_team_effects(roster);
        }

        self.state.turn = TurnState {
            started: true,
            ..TurnState::new()
        };
        self.refresh_winner();
        info!(heroes = self.state.roster.len(), "battle started");
        Ok(())
    }

    /// Returns the hero currently taking its turn.
    pub fn whose_turn(&self) -> Option<HeroId> {
        self.state.turn.whose_turn
    }

    pub fn round(&self) -> u32 {
        self.state.turn.round
    }

    pub fn winner(&self) -> Option<TeamId> {
        self.state.turn.winner
    }

    /// Returns true once a team has no living members.
    pub fn is_over(&self) -> bool {
        self.state.turn.winner.is_some()
            || self
                .state
                .teams()
                .iter()
                .any(|team| team.is_defeated(&self.state.roster))
    }

    /// Selects the next hero to act.
    ///
    /// Each round every living hero acts once, by effective attack speed
    /// (fastest first, ties by id). Heroes that die before their slot are
    /// skipped. A new round starts when the queue is exhausted.
    pub fn prepare_next_turn(&mut self) -> Result<HeroId, TurnError> {
        self.ensure_running()?;

        loop {
            while let Some(next) = self.state.turn.queue.pop_front() {
                if self.state.hero(next).is_some_and(Hero::is_alive) {
                    self.state.turn.whose_turn = Some(next);
                    trace!(hero = %next, round = self.state.turn.round, "turn prepared");
                    return Ok(next);
                }
            }

            let order = self.turn_order();
            if order.is_empty() {
                return Err(TurnError::NoLivingHeroes);
            }
            self.state.turn.round += 1;
            debug!(round = self.state.turn.round, heroes = order.len(), "round started");
            self.state.turn.queue = order.into();
        }
    }

    /// Resolves start-of-turn statuses for the current hero.
    ///
    /// Recovery buffs heal and continuous-damage debuffs hurt by their
    /// percentage of max HP.
    pub fn begin_turn(&mut self) -> Result<TurnStart, TurnError> {
        self.ensure_running()?;
        let id = self.state.turn.whose_turn.ok_or(TurnError::NoCurrentHero)?;
        let hero = self.state.hero_mut(id).ok_or(TurnError::UnknownHero(id))?;

        let recovery: Decimal = hero
            .buffs()
            .iter()
            .filter_map(|buff| match buff.effect() {
                StatusEffect::Recovery { percentage } => Some(percentage),
                _ => None,
            })
            .sum();
        let poison: Decimal = hero
            .debuffs()
            .iter()
            .filter_map(|debuff| match debuff.effect() {
                StatusEffect::ContinuousDamage { percentage } => Some(percentage),
                _ => None,
            })
            .sum();

        let max_hp = hero.max_hp();
        let recovered = if recovery > Decimal::ZERO {
            hero.receive_heal(percent_of(max_hp, recovery))
        } else {
            Decimal::ZERO
        };
        let continuous_damage = if poison > Decimal::ZERO {
            hero.take_damage(percent_of(max_hp, poison)).total()
        } else {
            Decimal::ZERO
        };
        let can_act =
            hero.is_alive() && !hero.status_flags().contains(EffectFlags::PREVENTS_TURN);

        debug!(hero = %id, %recovered, %continuous_damage, can_act, "turn begins");
        if !can_act {
            self.refresh_winner();
        }
        Ok(TurnStart {
            hero: id,
            recovered,
            continuous_damage,
            can_act,
        })
    }

    /// Closes the current hero's turn.
    ///
    /// Counts down its statuses and special power cooldowns, then rolls for
    /// an extra turn (only when the chance is positive).
    pub fn end_turn(&mut self) -> Result<TurnEnd, TurnError> {
        if !self.state.turn.started {
            return Err(TurnError::NotStarted);
        }
        let id = self
            .state
            .turn
            .whose_turn
            .take()
            .ok_or(TurnError::NoCurrentHero)?;
        let hero = self.state.hero_mut(id).ok_or(TurnError::UnknownHero(id))?;

        hero.tick_statuses();
        hero.tick_cooldowns();

        let chance = if hero.is_alive() {
            hero.effective_stats().extra_turn_chance
        } else {
            Decimal::ZERO
        };
        let extra_turn = self.rng.chance(chance);
        if extra_turn {
            hero.gain_turn();
            debug!(hero = %id, gained = hero.turns_gained(), "extra turn");
        }

        let winner = self.refresh_winner();
        if extra_turn && winner.is_none() {
            self.state.turn.queue.push_front(id);
        }
        Ok(TurnEnd {
            hero: id,
            extra_turn,
            winner,
        })
    }

    /// Ends the battle: removes team effects and clears every battle-only
    /// field of every member. Returns the winner, if any.
    pub fn finish_battle(&mut self) -> Option<TeamId> {
        let winner = self.refresh_winner();

        let (roster, teams) = self.state.split_mut();
        for team in teams.iter_mut() {
            team.remove_team_effects(roster);
            for &member in team.members() {
                if let Some(hero) = roster.get_mut(member) {
                    hero.reset_battle_state();
                }
            }
        }

        self.state.turn = TurnState {
            winner,
            ..TurnState::new()
        };
        info!(winner = ?winner, "battle finished");
        winner
    }

    /// Records the winner once exactly one team has living members.
    pub(super) fn refresh_winner(&mut self) -> Option<TeamId> {
        if self.state.turn.winner.is_none() {
            let roster = &self.state.roster;
            let standing: Vec<TeamId> = self
                .state
                .teams()
                .iter()
                .filter(|team| !team.is_defeated(roster))
                .map(Team::id)
                .collect();
            if standing.len() == 1 && self.state.teams().len() == BattleConfig::MAX_TEAMS {
                let team = standing[0];
                info!(winner = %team, "team victorious");
                self.state.turn.winner = Some(team);
            }
        }
        self.state.turn.winner
    }

    fn ensure_running(&self) -> Result<(), TurnError> {
        if !self.state.turn.started {
            return Err(TurnError::NotStarted);
        }
        if self.is_over() {
            return Err(TurnError::BattleOver);
        }
        Ok(())
    }

    fn turn_order(&self) -> Vec<HeroId> {
        let mut order: Vec<(Decimal, HeroId)> = self
            .state
            .teams()
            .iter()
            .flat_map(|team| team.living(&self.state.roster))
            .filter_map(|id| {
                let hero = self.state.hero(id)?;
                Some((hero.effective_stats().attack_speed, id))
            })
            .collect();
        order.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        order.into_iter().map(|(_, id)| id).collect()
    }
}
