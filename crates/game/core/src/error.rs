//! Common error infrastructure for tactics-core.
//!
//! Every rejection the unit state machine can produce is reported as a typed
//! error instead of a silent no-op. Domain-specific errors (e.g. [`UnitError`])
//! live next to the state they protect and implement [`GameError`] so callers
//! can classify them uniformly.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each rejection has its own variant with the offending input
//! - **No Partial Writes**: An `Err` always means the unit was left untouched
//! - **Severity Classification**: Errors are categorized for recovery strategies
//!
//! [`UnitError`]: crate::state::UnitError

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: Temporary conditions that may succeed on retry or with alternative input
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal** / **Fatal**: reserved for host-side errors; unit rejections
///   never use them
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative input.
    ///
    /// Examples: ability on cooldown, not enough aura, unit still moving
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: move target outside the valid set, ability index out of range
    Validation,

    /// Host-side inconsistency, such as an occupancy index out of sync.
    Internal,

    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all tactics-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// This is useful for error categorization, metrics, and testing.
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
