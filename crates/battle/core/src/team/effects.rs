//! Team-wide leader and passive bonuses.
//!
//! Before combat every applicable bonus is summed additively, per stat, into
//! each member's battle-only [`StatModifiers`](crate::stats::StatModifiers):
//!
//! - passive skill, owner scope: the owning member
//! - passive skill, team scope: every member
//! - leader skill of the current leader: every member passing its element
//!   filter
//!
//! Removal resets every member's modifiers to exactly zero.

use tracing::{debug, trace};

use super::{Roster, Team};
use crate::hero::HeroId;
use crate::skill::{PassiveScope, SkillKind};
use crate::stats::StatBonus;

impl Team {
    /// Folds leader and passive bonuses into members. Returns false when
    /// they are already applied.
    pub fn apply_team_effects(&mut self, roster: &mut Roster) -> bool {
        if self.effects_applied {
            return false;
        }

        let grants = self.collect_bonuses(roster);
        for (member, bonus) in &grants {
            if let Some(hero) = roster.get_mut(*member) {
                hero.apply_bonus(bonus);
                trace!(hero = %member, stat = %bonus.stat, amount = %bonus.amount, "team bonus");
            }
        }

        self.effects_applied = true;
        debug!(team = %self.id, bonuses = grants.len(), "team effects applied");
        true
    }

    /// Resets every member's battle-only modifiers. Returns false when no
    /// effects are applied.
    pub fn remove_team_effects(&mut self, roster: &mut Roster) -> bool {
        if !self.effects_applied {
            return false;
        }

        for &member in &self.members {
            if let Some(hero) = roster.get_mut(member) {
                hero.clear_modifiers();
            }
        }

        self.effects_applied = false;
        debug!(team = %self.id, "team effects removed");
        true
    }

    fn collect_bonuses(&self, roster: &Roster) -> Vec<(HeroId, StatBonus)> {
        let mut grants = Vec::new();

        for &owner in &self.members {
            let Some(hero) = roster.get(owner) else {
                continue;
            };
            for skill in hero.skills() {
                let SkillKind::Passive(passive) = &skill.kind else {
                    continue;
                };
                match passive.scope {
                    PassiveScope::Owner => {
                        grants.extend(passive.bonuses.iter().map(|&b| (owner, b)));
                    }
                    PassiveScope::Team => {
                        for &member in &self.members {
                            grants.extend(passive.bonuses.iter().map(|&b| (member, b)));
                        }
                    }
                }
            }
        }

        let Some(leader) = self.leader.and_then(|id| roster.get(id)) else {
            return grants;
        };
        for skill in leader.skills() {
            let SkillKind::Leader(leader_skill) = &skill.kind else {
                continue;
            };
            for &member in &self.members {
                let qualifies = roster
                    .get(member)
                    .is_some_and(|hero| leader_skill.applies_to(hero.element));
                if qualifies {
                    grants.extend(leader_skill.bonuses.iter().map(|&b| (member, b)));
                }
            }
        }

        grants
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hero::{Element, Hero, HeroType};
    use crate::skill::{LeaderSkill, PassiveSkill, Skill};
    use crate::stats::{BaseStats, BattleStat};
    use crate::team::TeamId;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn hero(id: u32, element: Element) -> Hero {
        Hero::new(
            HeroId(id),
            format!("Hero {id}"),
            element,
            HeroType::Attack,
            BaseStats::new(dec!(1000), dec!(100), dec!(100), dec!(50), dec!(100)),
        )
    }

    fn leader_skill(element: Option<Element>) -> Skill {
        Skill::new(
            "Rally",
            Decimal::ZERO,
            SkillKind::Leader(LeaderSkill {
                bonuses: vec![StatBonus::new(BattleStat::AttackPower, dec!(20))],
                element,
            }),
        )
    }

    fn passive(name: &str, scope: PassiveScope, bonus: StatBonus) -> Skill {
        Skill::new(
            name,
            Decimal::ZERO,
            SkillKind::Passive(PassiveSkill {
                bonuses: vec![bonus],
                scope,
            }),
        )
    }

    /// Leader (fire, Rally: +20% atk to fire) with an owner passive, plus a
    /// water member carrying a team passive.
    fn setup() -> (Team, Roster) {
        let leader = hero(1, Element::Fire).with_skills([
            leader_skill(Some(Element::Fire)),
            passive(
                "Focus",
                PassiveScope::Owner,
                StatBonus::new(BattleStat::CritRate, dec!(0.1)),
            ),
        ]);
        let support = hero(2, Element::Water).with_skills([passive(
            "Guard",
            PassiveScope::Team,
            StatBonus::new(BattleStat::Defense, dec!(10)),
        )]);

        let mut roster: Roster = [leader, support].into_iter().collect();
        let mut team = Team::new(TeamId(0));
        for id in [HeroId(1), HeroId(2)] {
            let hero = roster.get_mut(id).unwrap();
            assert!(team.add_hero(hero));
        }
        team.set_leader(HeroId(1)).unwrap();
        (team, roster)
    }

    #[test]
    fn bonuses_sum_per_stat_and_respect_filters() {
        let (mut team, mut roster) = setup();
        assert!(team.apply_team_effects(&mut roster));

        let leader = roster.get(HeroId(1)).unwrap().modifiers();
        assert_eq!(leader.attack_power.up, dec!(20));
        assert_eq!(leader.defense.up, dec!(10));
        assert_eq!(leader.crit_rate, dec!(0.1));

        let support = roster.get(HeroId(2)).unwrap().modifiers();
        assert_eq!(support.attack_power.up, Decimal::ZERO);
        assert_eq!(support.defense.up, dec!(10));
        assert_eq!(support.crit_rate, Decimal::ZERO);
    }

    #[test]
    fn apply_and_remove_are_idempotent() {
        let (mut team, mut roster) = setup();
        assert!(team.apply_team_effects(&mut roster));
        assert!(!team.apply_team_effects(&mut roster));
        assert_eq!(
            roster.get(HeroId(1)).unwrap().modifiers().attack_power.up,
            dec!(20)
        );

        assert!(team.remove_team_effects(&mut roster));
        assert!(!team.remove_team_effects(&mut roster));
        for hero in roster.iter() {
            assert!(hero.modifiers().is_zero());
        }
    }

    #[test]
    fn no_leader_means_no_leader_bonus() {
        let (mut team, mut roster) = setup();
        team.clear_leader();
        team.apply_team_effects(&mut roster);

        let leader = roster.get(HeroId(1)).unwrap().modifiers();
        assert_eq!(leader.attack_power.up, Decimal::ZERO);
        assert_eq!(leader.defense.up, dec!(10));
    }
}
