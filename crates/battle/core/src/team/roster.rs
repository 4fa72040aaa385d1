use std::collections::BTreeMap;

use crate::hero::{Hero, HeroId};

/// Owns every hero taking part in (or waiting for) a battle.
///
/// Iteration order is by [`HeroId`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    heroes: BTreeMap<HeroId, Hero>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a hero, returning the previous hero with the same id.
    pub fn insert(&mut self, hero: Hero) -> Option<Hero> {
        self.heroes.insert(hero.id, hero)
    }

    /// Removes a hero. The caller is responsible for detaching it from its
    /// team first.
    pub fn remove(&mut self, id: HeroId) -> Option<Hero> {
        self.heroes.remove(&id)
    }

    pub fn get(&self, id: HeroId) -> Option<&Hero> {
        self.heroes.get(&id)
    }

    pub fn get_mut(&mut self, id: HeroId) -> Option<&mut Hero> {
        self.heroes.get_mut(&id)
    }

    pub fn contains(&self, id: HeroId) -> bool {
        self.heroes.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hero> {
        self.heroes.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Hero> {
        self.heroes.values_mut()
    }

    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }
}

impl FromIterator<Hero> for Roster {
    fn from_iter<I: IntoIterator<Item = Hero>>(iter: I) -> Self {
        let mut roster = Self::new();
        for hero in iter {
            roster.insert(hero);
        }
        roster
    }
}
