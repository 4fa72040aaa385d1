//! Hero template loader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};
use crate::templates::HeroTemplate;

/// Hero catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroFile {
    pub heroes: Vec<HeroTemplate>,
}

/// Loader for hero templates from RON files.
pub struct HeroLoader;

impl HeroLoader {
    /// Load hero templates from a RON file.
    ///
    /// Skill names are not resolved here; see [`HeroTemplate::build`].
    pub fn load(path: &Path) -> LoadResult<Vec<HeroTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<HeroTemplate>> {
        let file: HeroFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse hero catalog RON: {}", e))?;
        Ok(file.heroes)
    }
}
