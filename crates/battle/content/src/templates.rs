//! Content templates and their conversion into battle values.

use std::collections::HashMap;

use battle_core::{
    BaseStats, BattleConfig, BattleRates, BattleState, DebuffKind, Element, Hero, HeroId,
    HeroType, ImmunityTags, Roster, Skill, TeamError,
};
use tracing::debug;

/// Errors raised while turning templates into heroes and teams.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("hero {hero} references unknown skill `{skill}`")]
    UnknownSkill { hero: HeroId, skill: String },

    #[error("hero {hero} lists {count} skills, at most {max} fit", max = BattleConfig::MAX_SKILLS)]
    TooManySkills { hero: HeroId, count: usize },

    #[error("skill `{0}` is defined more than once")]
    DuplicateSkill(String),

    #[error("hero {0} is defined more than once")]
    DuplicateHero(HeroId),

    #[error("battle setup references unknown hero {0}")]
    UnknownHero(HeroId),

    #[error(transparent)]
    Team(#[from] TeamError),
}

/// Skills indexed by name.
#[derive(Clone, Debug, Default)]
pub struct SkillCatalog {
    skills: HashMap<String, Skill>,
}

impl SkillCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog, rejecting repeated names.
    pub fn from_skills(skills: impl IntoIterator<Item = Skill>) -> Result<Self, TemplateError> {
        let mut catalog = Self::new();
        for skill in skills {
            catalog.insert(skill)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, skill: Skill) -> Result<(), TemplateError> {
        if self.skills.contains_key(&skill.name) {
            return Err(TemplateError::DuplicateSkill(skill.name));
        }
        self.skills.insert(skill.name.clone(), skill);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Skill> {
        self.skills.get(name)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

#[cfg(feature = "serde")]
fn default_rating() -> u8 {
    BattleConfig::MIN_RATING
}

/// Static description of a hero as it appears in content files.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroTemplate {
    pub id: HeroId,
    pub name: String,
    pub element: Element,
    pub hero_type: HeroType,
    #[cfg_attr(feature = "serde", serde(default = "default_rating"))]
    pub rating: u8,
    pub stats: BaseStats,
    /// Missing rates fall back to the minimum of every bound.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rates: Option<BattleRates>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub immune_to: Vec<DebuffKind>,
    /// Skill names, resolved against a [`SkillCatalog`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<String>,
}

impl HeroTemplate {
    /// Creates a fresh hero at full HP and magic points.
    pub fn build(&self, catalog: &SkillCatalog) -> Result<Hero, TemplateError> {
        if self.skills.len() > BattleConfig::MAX_SKILLS {
            return Err(TemplateError::TooManySkills {
                hero: self.id,
                count: self.skills.len(),
            });
        }

        let skills = self
            .skills
            .iter()
            .map(|name| {
                catalog
                    .get(name)
                    .cloned()
                    .ok_or_else(|| TemplateError::UnknownSkill {
                        hero: self.id,
                        skill: name.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let immunities = self
            .immune_to
            .iter()
            .fold(ImmunityTags::empty(), |tags, kind| tags | kind.immunity_tag());

        let hero = Hero::new(
            self.id,
            self.name.clone(),
            self.element,
            self.hero_type,
            self.stats.clone(),
        )
        .with_rating(self.rating)
        .with_rates(self.rates.clone().unwrap_or_default())
        .with_immunities(immunities)
        .with_skills(skills);

        Ok(hero)
    }
}

/// One side of a battle setup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TeamTemplate {
    /// Members in join order. The first one leads unless `leader` is set.
    pub heroes: Vec<HeroId>,
    pub leader: Option<HeroId>,
}

/// Which heroes fight and on which team.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSetup {
    pub teams: Vec<TeamTemplate>,
}

impl BattleSetup {
    /// Builds heroes for every listed id and seats them on their teams.
    ///
    /// Only heroes named in the setup enter the roster.
    pub fn build(
        &self,
        heroes: &[HeroTemplate],
        catalog: &SkillCatalog,
    ) -> Result<BattleState, TemplateError> {
        let mut templates: HashMap<HeroId, &HeroTemplate> = HashMap::new();
        for template in heroes {
            if templates.insert(template.id, template).is_some() {
                return Err(TemplateError::DuplicateHero(template.id));
            }
        }

        let mut roster = Roster::new();
        for id in self.teams.iter().flat_map(|team| &team.heroes) {
            let template = templates
                .get(id)
                .ok_or(TemplateError::UnknownHero(*id))?;
            if roster.insert(template.build(catalog)?).is_some() {
                return Err(TemplateError::DuplicateHero(*id));
            }
        }

        let mut state = BattleState::new(roster);
        for team in &self.teams {
            let team_id = state.create_team()?;
            for &hero in &team.heroes {
                state.assign(hero, team_id)?;
            }
            if let Some(leader) = team.leader.or_else(|| team.heroes.first().copied()) {
                state
                    .team_mut(team_id)
                    .ok_or(TeamError::UnknownTeam(team_id))?
                    .set_leader(leader)?;
            }
            debug!(team = %team_id, members = team.heroes.len(), "team seated");
        }
        Ok(state)
    }
}
