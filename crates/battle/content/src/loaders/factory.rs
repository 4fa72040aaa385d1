//! Content factory for building battles from data files.

use std::path::{Path, PathBuf};

use battle_core::{BattleConfig, BattleState};
use tracing::debug;

use crate::loaders::{ConfigLoader, HeroLoader, LoadResult, SetupLoader, SkillLoader};
use crate::templates::{HeroTemplate, SkillCatalog};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── skills.ron
/// ├── heroes.ron
/// └── battles/
///     ├── tutorial.ron
///     └── arena.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle configuration from `config.toml`.
    ///
    /// A missing file yields the default configuration.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(BattleConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the skill catalog from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<SkillCatalog> {
        let path = self.data_dir.join("skills.ron");
        SkillLoader::load(&path)
    }

    /// Load hero templates from `heroes.ron`.
    pub fn load_heroes(&self) -> LoadResult<Vec<HeroTemplate>> {
        let path = self.data_dir.join("heroes.ron");
        HeroLoader::load(&path)
    }

    /// Build a ready-to-start battle from `battles/{name}.ron`.
    ///
    /// Loads skills and heroes, then seats the heroes the setup names.
    pub fn load_battle(&self, name: &str) -> LoadResult<BattleState> {
        let path = self.data_dir.join("battles").join(format!("{}.ron", name));
        let setup = SetupLoader::load(&path)?;
        let skills = self.load_skills()?;
        let heroes = self.load_heroes()?;

        let state = setup
            .build(&heroes, &skills)
            .map_err(|e| anyhow::anyhow!("Failed to build battle {}: {}", name, e))?;
        debug!(battle = name, heroes = state.roster.len(), "battle loaded");
        Ok(state)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
