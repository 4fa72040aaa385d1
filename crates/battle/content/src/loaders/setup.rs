//! Battle setup loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::templates::BattleSetup;

/// Loader for battle setups from RON files.
pub struct SetupLoader;

impl SetupLoader {
    pub fn load(path: &Path) -> LoadResult<BattleSetup> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BattleSetup> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse battle setup RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::HeroId;

    #[test]
    fn parses_teams_and_optional_leader() {
        let setup = SetupLoader::parse(
            r#"(teams: [
                (heroes: [1, 2], leader: Some(2)),
                (heroes: [3]),
            ])"#,
        )
        .unwrap();

        assert_eq!(setup.teams.len(), 2);
        assert_eq!(setup.teams[0].heroes, vec![HeroId(1), HeroId(2)]);
        assert_eq!(setup.teams[0].leader, Some(HeroId(2)));
        assert_eq!(setup.teams[1].leader, None);
    }
}
