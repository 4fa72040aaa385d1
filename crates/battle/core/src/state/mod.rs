//! Battle state: the roster, the opposing teams and turn bookkeeping.

mod turn;

pub use turn::TurnState;

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::hero::{Hero, HeroId};
use crate::team::{Roster, Team, TeamError, TeamId};

/// Everything a battle mutates.
///
/// Teams are indexed by their [`TeamId`]; the first team created is
/// `TeamId(0)`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    pub roster: Roster,
    teams: ArrayVec<Team, { BattleConfig::MAX_TEAMS }>,
    pub turn: TurnState,
}

impl BattleState {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            teams: ArrayVec::new(),
            turn: TurnState::new(),
        }
    }

    /// Creates an empty team.
    pub fn create_team(&mut self) -> Result<TeamId, TeamError> {
        let id = TeamId(self.teams.len() as u8);
        self.teams
            .try_push(Team::new(id))
            .map_err(|_| TeamError::TooManyTeams)?;
        Ok(id)
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(usize::from(id.0))
    }

    pub fn team_mut(&mut self, id: TeamId) -> Option<&mut Team> {
        self.teams.get_mut(usize::from(id.0))
    }

    pub fn hero(&self, id: HeroId) -> Option<&Hero> {
        self.roster.get(id)
    }

    pub fn hero_mut(&mut self, id: HeroId) -> Option<&mut Hero> {
        self.roster.get_mut(id)
    }

    /// Adds a roster hero to a team.
    pub fn assign(&mut self, hero: HeroId, team: TeamId) -> Result<(), TeamError> {
        let slot = self
            .teams
            .get_mut(usize::from(team.0))
            .ok_or(TeamError::UnknownTeam(team))?;
        if !self.roster.contains(hero) {
            return Err(TeamError::UnknownHero(hero));
        }

        rebuild_effects(slot, &mut self.roster, |slot, roster| match roster.get_mut(hero) {
            Some(entry) => slot.try_add_hero(entry),
            None => Err(TeamError::UnknownHero(hero)),
        })
    }

    /// Removes a hero from whichever team it belongs to.
    ///
    /// Team effects already applied are rebuilt for the remaining members,
    /// and the leaver keeps none of them.
    pub fn unassign(&mut self, hero: HeroId) -> Result<(), TeamError> {
        let entry = self.roster.get(hero).ok_or(TeamError::UnknownHero(hero))?;
        let team = entry.team().ok_or(TeamError::Unassigned(hero))?;
        let slot = self
            .teams
            .get_mut(usize::from(team.0))
            .ok_or(TeamError::UnknownTeam(team))?;

        rebuild_effects(slot, &mut self.roster, |slot, roster| match roster.get_mut(hero) {
            Some(entry) => slot.try_remove_hero(entry),
            None => Err(TeamError::UnknownHero(hero)),
        })
    }

    /// The team a hero currently belongs to.
    pub fn team_of(&self, hero: HeroId) -> Option<&Team> {
        let team = self.roster.get(hero)?.team()?;
        self.team(team)
    }

    /// The first team other than `team`.
    pub fn opponent_of(&self, team: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id() != team)
    }

    /// Returns true when both heroes are on the same team.
    pub fn are_allies(&self, a: HeroId, b: HeroId) -> bool {
        match (self.hero(a).and_then(Hero::team), self.hero(b).and_then(Hero::team)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    /// Teammates of a hero, excluding the hero.
    pub fn allies_of(&self, hero: HeroId) -> Vec<HeroId> {
        self.team_of(hero)
            .map(|team| {
                team.members()
                    .iter()
                    .copied()
                    .filter(|&id| id != hero)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Members of every team other than the hero's.
    pub fn enemies_of(&self, hero: HeroId) -> Vec<HeroId> {
        let Some(own) = self.hero(hero).and_then(Hero::team) else {
            return Vec::new();
        };
        self.teams
            .iter()
            .filter(|team| team.id() != own)
            .flat_map(|team| team.members().iter().copied())
            .collect()
    }

    /// Dead teammates of a hero, excluding the hero.
    pub fn dead_allies_of(&self, hero: HeroId) -> usize {
        self.team_of(hero)
            .map(|team| team.dead_count_except(&self.roster, hero))
            .unwrap_or(0)
    }

    /// Splits into the roster and the team list for simultaneous mutation.
    pub(crate) fn split_mut(&mut self) -> (&mut Roster, &mut [Team]) {
        (&mut self.roster, &mut self.teams)
    }
}

/// Runs a membership change with the team's effects lifted, then re-applies
/// them if they were in place. Members that stay keep their current HP and
/// magic points, clamped to the rebuilt maximums.
fn rebuild_effects(
    team: &mut Team,
    roster: &mut Roster,
    change: impl FnOnce(&mut Team, &mut Roster) -> Result<(), TeamError>,
) -> Result<(), TeamError> {
    if !team.effects_applied() {
        return change(team, roster);
    }

    let pools: Vec<_> = team
        .members()
        .iter()
        .filter_map(|&id| roster.get(id).map(|h| (id, h.curr_hp(), h.curr_magic_points())))
        .collect();

    team.remove_team_effects(roster);
    let result = change(team, roster);
    team.apply_team_effects(roster);

    for (id, hp, magic_points) in pools {
        if !team.contains(id) {
            continue;
        }
        if let Some(hero) = roster.get_mut(id) {
            hero.set_resources(hp, magic_points);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hero::{Element, HeroType};
    use crate::skill::{PassiveScope, PassiveSkill, Skill, SkillKind};
    use crate::stats::{BaseStats, BattleStat, StatBonus};
    use rust_decimal_macros::dec;

    fn hero(id: u32) -> Hero {
        Hero::new(
            HeroId(id),
            format!("Hero {id}"),
            Element::Dark,
            HeroType::Attack,
            BaseStats::new(dec!(100), dec!(10), dec!(10), dec!(10), dec!(10)),
        )
    }

    fn two_on_two() -> BattleState {
        let mut state = BattleState::new((1..=5).map(hero).collect());
        let red = state.create_team().unwrap();
        let blue = state.create_team().unwrap();
        state.assign(HeroId(1), red).unwrap();
        state.assign(HeroId(2), red).unwrap();
        state.assign(HeroId(3), blue).unwrap();
        state.assign(HeroId(4), blue).unwrap();
        state
    }

    #[test]
    fn at_most_two_teams() {
        let mut state = two_on_two();
        assert_eq!(state.create_team(), Err(TeamError::TooManyTeams));
    }

    #[test]
    fn allies_and_enemies() {
        let state = two_on_two();
        assert!(state.are_allies(HeroId(1), HeroId(2)));
        assert!(!state.are_allies(HeroId(1), HeroId(3)));
        assert!(!state.are_allies(HeroId(1), HeroId(5)));
        assert_eq!(state.allies_of(HeroId(1)), vec![HeroId(2)]);
        assert_eq!(state.enemies_of(HeroId(1)), vec![HeroId(3), HeroId(4)]);
        assert!(state.enemies_of(HeroId(5)).is_empty());
    }

    #[test]
    fn unassign_detaches_hero() {
        let mut state = two_on_two();
        state.unassign(HeroId(2)).unwrap();

        assert_eq!(state.hero(HeroId(2)).unwrap().team(), None);
        assert_eq!(state.team(TeamId(0)).unwrap().members(), &[HeroId(1)]);
        assert!(state.unassign(HeroId(2)).is_err());
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let mut state = two_on_two();
        assert_eq!(
            state.assign(HeroId(42), TeamId(0)),
            Err(TeamError::UnknownHero(HeroId(42)))
        );
        assert_eq!(
            state.assign(HeroId(5), TeamId(7)),
            Err(TeamError::UnknownTeam(TeamId(7)))
        );
    }

    #[test]
    fn dead_allies_exclude_self() {
        let mut state = two_on_two();
        state.hero_mut(HeroId(2)).unwrap().take_damage(dec!(1000));
        state.hero_mut(HeroId(1)).unwrap().take_damage(dec!(1000));

        assert_eq!(state.dead_allies_of(HeroId(1)), 1);
        assert_eq!(state.dead_allies_of(HeroId(3)), 0);
    }

    #[test]
    fn membership_changes_rebuild_applied_effects() {
        let vigor = Skill::new(
            "Vigor",
            dec!(0),
            SkillKind::Passive(PassiveSkill {
                bonuses: vec![StatBonus::new(BattleStat::MaxHp, dec!(50))],
                scope: PassiveScope::Team,
            }),
        );
        let mut state = two_on_two();
        state.hero_mut(HeroId(1)).unwrap().learn_skill(vigor);
        {
            let (roster, teams) = state.split_mut();
            assert!(teams[0].apply_team_effects(roster));
        }
        state.hero_mut(HeroId(2)).unwrap().take_damage(dec!(60));

        state.assign(HeroId(5), TeamId(0)).unwrap();
        let hp = |state: &BattleState, id: u32| {
            let hero = state.hero(HeroId(id)).unwrap();
            (hero.curr_hp(), hero.max_hp())
        };
        assert_eq!(hp(&state, 2), (dec!(90), dec!(150)));
        assert_eq!(hp(&state, 5), (dec!(150), dec!(150)));

        state.unassign(HeroId(1)).unwrap();
        assert!(state.hero(HeroId(1)).unwrap().modifiers().is_zero());
        assert_eq!(hp(&state, 1), (dec!(100), dec!(100)));
        assert_eq!(hp(&state, 2), (dec!(90), dec!(100)));
        assert!(state.team(TeamId(0)).unwrap().effects_applied());
    }
}
