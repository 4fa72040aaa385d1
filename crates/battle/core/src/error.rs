//! Common error infrastructure for battle-core.
//!
//! Domain errors (`ActionError`, `TeamError`) live next to the operations that
//! produce them. This module only provides the classification shared by all of
//! them.
//!
//! Rejections in battle are never fatal to the caller: the public action entry
//! point reports them as a plain `false`, and the typed errors exist for
//! diagnostics and tests.

/// Severity level of an error, used for categorization and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The same request may succeed later (cooldown, resources, turn order).
    Recoverable,

    /// Invalid input; retrying unchanged will fail again.
    ///
    /// Examples: self-targeted attack, unknown hero id
    Validation,

    /// Unexpected state inconsistency. Indicates a bug.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all battle-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait BattleError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
