//! Teams and the roster that owns heroes.
//!
//! A [`Team`] only references heroes by [`HeroId`]; the [`Roster`] owns their
//! lifetimes. Heroes may exist in the roster without belonging to any team.

mod effects;
mod roster;

pub use roster::Roster;

use core::fmt;

use arrayvec::ArrayVec;
use tracing::debug;

use crate::config::BattleConfig;
use crate::error::{BattleError, ErrorSeverity};
use crate::hero::{Hero, HeroId};

/// Identifier of a team within a battle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeamId(pub u8);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "team#{}", self.0)
    }
}

/// Errors from team membership changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TeamError {
    #[error("{team} is full")]
    Full { team: TeamId },

    #[error("{hero} already belongs to {team}")]
    AlreadyAssigned { hero: HeroId, team: TeamId },

    #[error("{hero} is not a member of {team}")]
    NotMember { hero: HeroId, team: TeamId },

    #[error("{0} is not on any team")]
    Unassigned(HeroId),

    #[error("{0} is not in the roster")]
    UnknownHero(HeroId),

    #[error("{0} does not exist")]
    UnknownTeam(TeamId),

    #[error("battle already has the maximum number of teams")]
    TooManyTeams,
}

impl BattleError for TeamError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Full { .. } | Self::TooManyTeams => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Full { .. } => "TEAM_FULL",
            Self::AlreadyAssigned { .. } => "TEAM_ALREADY_ASSIGNED",
            Self::NotMember { .. } => "TEAM_NOT_MEMBER",
            Self::Unassigned(_) => "TEAM_UNASSIGNED",
            Self::UnknownHero(_) => "TEAM_UNKNOWN_HERO",
            Self::UnknownTeam(_) => "TEAM_UNKNOWN_TEAM",
            Self::TooManyTeams => "TEAM_TOO_MANY_TEAMS",
        }
    }
}

/// An ordered group of up to five heroes with an optional leader.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Team {
    id: TeamId,
    members: ArrayVec<HeroId, { BattleConfig::MAX_TEAM_SIZE }>,
    leader: Option<HeroId>,
    /// Whether leader and passive bonuses are currently folded into members.
    effects_applied: bool,
}

impl Team {
    pub fn new(id: TeamId) -> Self {
        Self {
            id,
            members: ArrayVec::new(),
            leader: None,
            effects_applied: false,
        }
    }

    pub fn id(&self) -> TeamId {
        self.id
    }

    /// Members in insertion order.
    pub fn members(&self) -> &[HeroId] {
        &self.members
    }

    pub fn leader(&self) -> Option<HeroId> {
        self.leader
    }

    pub fn effects_applied(&self) -> bool {
        self.effects_applied
    }

    pub fn contains(&self, hero: HeroId) -> bool {
        self.members.contains(&hero)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.is_full()
    }

    /// Adds a hero and points its back reference at this team.
    ///
    /// The hero must not belong to any team yet.
    pub fn try_add_hero(&mut self, hero: &mut Hero) -> Result<(), TeamError> {
        if let Some(team) = hero.team() {
            return Err(TeamError::AlreadyAssigned {
                hero: hero.id,
                team,
            });
        }
        self.members
            .try_push(hero.id)
            .map_err(|_| TeamError::Full { team: self.id })?;
        hero.set_team(Some(self.id));

        debug!(team = %self.id, hero = %hero.id, "hero joined team");
        Ok(())
    }

    /// Returns false when the team is full or the hero is already assigned.
    pub fn add_hero(&mut self, hero: &mut Hero) -> bool {
        self.try_add_hero(hero).is_ok()
    }

    /// Removes a hero and clears its back reference.
    ///
    /// Removing the leader promotes the first remaining member, if any. A
    /// hero leaving while team effects are applied loses its modifiers; the
    /// bonuses it granted to others stay until the effects are rebuilt (see
    /// [`BattleState::unassign`](crate::state::BattleState::unassign)).
    pub fn try_remove_hero(&mut self, hero: &mut Hero) -> Result<(), TeamError> {
        let index = self
            .members
            .iter()
            .position(|&id| id == hero.id)
            .ok_or(TeamError::NotMember {
                hero: hero.id,
                team: self.id,
            })?;

        self.members.remove(index);
        hero.set_team(None);
        if self.effects_applied {
            hero.clear_modifiers();
        }

        if self.leader == Some(hero.id) {
            self.leader = self.members.first().copied();
            debug!(team = %self.id, leader = ?self.leader, "leader replaced");
        }
        Ok(())
    }

    pub fn remove_hero(&mut self, hero: &mut Hero) -> bool {
        self.try_remove_hero(hero).is_ok()
    }

    /// Designates a member as leader.
    pub fn set_leader(&mut self, hero: HeroId) -> Result<(), TeamError> {
        if !self.contains(hero) {
            return Err(TeamError::NotMember {
                hero,
                team: self.id,
            });
        }
        self.leader = Some(hero);
        Ok(())
    }

    pub fn clear_leader(&mut self) {
        self.leader = None;
    }

    /// Members still alive, in team order.
    pub fn living<'r>(&'r self, roster: &'r Roster) -> impl Iterator<Item = HeroId> + 'r {
        self.members
            .iter()
            .copied()
            .filter(|&id| roster.get(id).is_some_and(Hero::is_alive))
    }

    /// Returns true when no member is alive.
    pub fn is_defeated(&self, roster: &Roster) -> bool {
        self.living(roster).next().is_none()
    }

    /// Dead members other than `except`.
    pub fn dead_count_except(&self, roster: &Roster, except: HeroId) -> usize {
        self.members
            .iter()
            .filter(|&&id| id != except)
            .filter(|&&id| roster.get(id).is_some_and(|h| !h.is_alive()))
            .count()
    }
}
