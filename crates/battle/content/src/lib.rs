//! Data-driven battle content.
//!
//! This crate turns content files into `battle-core` values:
//! - Skill catalogs (RON)
//! - Hero templates (RON)
//! - Battle setups: which heroes fight on which team (RON)
//! - Battle configuration (TOML)
//!
//! Templates are plain data and are always available; the file loaders sit
//! behind the `loaders` feature.

pub mod templates;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use templates::{BattleSetup, HeroTemplate, SkillCatalog, TeamTemplate, TemplateError};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, HeroLoader, SetupLoader, SkillLoader};
