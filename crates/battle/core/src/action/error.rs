//! Action rejection reasons.

use rust_decimal::Decimal;

use crate::error::{BattleError, ErrorSeverity};
use crate::hero::HeroId;

/// Reasons an action is rejected. Rejections never leave partial effects.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("actor {0} not found")]
    ActorNotFound(HeroId),

    #[error("target {0} not found")]
    TargetNotFound(HeroId),

    #[error("actor {0} is dead")]
    ActorDead(HeroId),

    #[error("target {0} is dead")]
    TargetDead(HeroId),

    #[error("actor {0} cannot act this turn")]
    ActorIncapacitated(HeroId),

    #[error("a hero cannot attack itself")]
    SelfTargetedAttack,

    #[error("normal heal only targets the actor")]
    HealTargetNotSelf,

    #[error("{actor} cannot target {target} with this action")]
    InvalidTarget { actor: HeroId, target: HeroId },

    #[error("skill action without a skill")]
    MissingSkill,

    #[error("skill '{0}' is not owned by the actor")]
    SkillNotOwned(String),

    #[error("skill '{0}' cannot be used as an action")]
    SkillNotUsable(String),

    #[error("actor {0} is silenced")]
    Silenced(HeroId),

    #[error("insufficient magic points: need {required}, have {available}")]
    InsufficientMagicPoints {
        required: Decimal,
        available: Decimal,
    },

    #[error("resource invariant violated for {0}")]
    InvariantViolated(HeroId),
}

impl BattleError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            ActorNotFound(_) | TargetNotFound(_) | MissingSkill => ErrorSeverity::Validation,
            SelfTargetedAttack | HealTargetNotSelf | InvalidTarget { .. } => {
                ErrorSeverity::Validation
            }
            SkillNotOwned(_) | SkillNotUsable(_) => ErrorSeverity::Validation,
            ActorDead(_) | TargetDead(_) => ErrorSeverity::Validation,
            ActorIncapacitated(_) | Silenced(_) | InsufficientMagicPoints { .. } => {
                ErrorSeverity::Recoverable
            }
            InvariantViolated(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            ActorNotFound(_) => "ACTION_ACTOR_NOT_FOUND",
            TargetNotFound(_) => "ACTION_TARGET_NOT_FOUND",
            ActorDead(_) => "ACTION_ACTOR_DEAD",
            TargetDead(_) => "ACTION_TARGET_DEAD",
            ActorIncapacitated(_) => "ACTION_ACTOR_INCAPACITATED",
            SelfTargetedAttack => "ACTION_SELF_TARGETED_ATTACK",
            HealTargetNotSelf => "ACTION_HEAL_TARGET_NOT_SELF",
            InvalidTarget { .. } => "ACTION_INVALID_TARGET",
            MissingSkill => "ACTION_MISSING_SKILL",
            SkillNotOwned(_) => "ACTION_SKILL_NOT_OWNED",
            SkillNotUsable(_) => "ACTION_SKILL_NOT_USABLE",
            Silenced(_) => "ACTION_SILENCED",
            InsufficientMagicPoints { .. } => "ACTION_INSUFFICIENT_MAGIC_POINTS",
            InvariantViolated(_) => "ACTION_INVARIANT_VIOLATED",
        }
    }
}
