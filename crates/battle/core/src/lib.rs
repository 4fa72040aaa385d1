//! Deterministic hero battle rules.
//!
//! `battle-core` defines heroes, teams, skills, statuses and the damage
//! arithmetic of a turn-based hero RPG, and exposes pure APIs that content
//! loaders and front ends can share. All battle mutation flows through
//! [`engine::BattleEngine`]; randomness is injected through
//! [`rng::RandomSource`] so that a seeded battle replays exactly.
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod error;
pub mod hero;
pub mod rng;
pub mod skill;
pub mod state;
pub mod stats;
pub mod status;
pub mod team;

pub use action::{
    Action, ActionError, ActionKind, ActionTransition, BattleEnv, NormalAttackAction,
    NormalHealAction, UseSkillAction,
};
pub use combat::{
    ActionOutcome, DebuffOutcome, DebuffReport, HealReport, HitReport,
    calculate_critical_raw_damage, calculate_critical_raw_damage_without_enemy_defense,
    calculate_normal_raw_damage, calculate_normal_raw_damage_without_enemy_defense,
};
pub use config::BattleConfig;
pub use engine::{
    BattleEngine, ExecuteError, TransitionPhase, TransitionPhaseError, TurnEnd, TurnError,
    TurnStart,
};
pub use error::{BattleError, ErrorSeverity};
pub use hero::{DamageTaken, Element, Hero, HeroId, HeroType, LevelCap};
pub use rng::{PcgRng, RandomSource, ScriptedRolls};
pub use skill::{
    ActiveSkill, Cooldown, DamageMultiplier, LeaderSkill, PassiveScope, PassiveSkill, Skill,
    SkillKind, SpecialPower,
};
pub use state::{BattleState, TurnState};
pub use stats::{
    BaseStats, BattleRates, BattleStat, EffectiveStats, RateBounds, ResourceMeter, StatBonus,
    StatModifiers,
};
pub use status::{Buff, BuffKind, Debuff, DebuffKind, EffectFlags, ImmunityTags, StatusEffect};
pub use team::{Roster, Team, TeamError, TeamId};
