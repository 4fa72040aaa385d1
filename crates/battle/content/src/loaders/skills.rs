//! Skill catalog loader.

use std::path::Path;

use battle_core::Skill;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};
use crate::templates::SkillCatalog;

/// Skill catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillFile {
    pub skills: Vec<Skill>,
}

/// Loader for skill catalogs from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load a skill catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<SkillCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SkillCatalog> {
        let file: SkillFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;
        Ok(SkillCatalog::from_skills(file.skills)?)
    }
}
