//! Shared error type across enchguard crates.

use thiserror::Error;

/// Stable reject codes surfaced to the admin command layer (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectCode {
    /// Configuration failed strict parsing or validation.
    BadConfig,
    /// Enchant key is not in the catalog.
    UnknownEnchant,
    /// Level text did not parse or is out of range.
    InvalidLevel,
    /// Enchant is on the disabled list and the actor has no bypass.
    Disabled,
    /// Requested level exceeds the actor's effective limit.
    LimitExceeded,
    /// Enchant is not present on the item.
    NotFound,
    /// A collaborator (capability resolver) could not answer.
    Unavailable,
}

impl RejectCode {
    /// String representation used in host-facing responses.
    pub fn as_str(self) -> &'static str {
        match self {
            RejectCode::BadConfig => "BAD_CONFIG",
            RejectCode::UnknownEnchant => "UNKNOWN_ENCHANT",
            RejectCode::InvalidLevel => "INVALID_LEVEL",
            RejectCode::Disabled => "DISABLED",
            RejectCode::LimitExceeded => "LIMIT_EXCEEDED",
            RejectCode::NotFound => "NOT_FOUND",
            RejectCode::Unavailable => "UNAVAILABLE",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, EnchGuardError>;

/// Unified error type used by core and engine.
#[derive(Debug, Error)]
pub enum EnchGuardError {
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unknown enchant: {0}")]
    UnknownEnchant(String),
    #[error("invalid level: {0}")]
    InvalidLevel(String),
    #[error("enchant disabled: {0}")]
    Disabled(String),
    #[error("level {level} exceeds limit {max} for {enchant}")]
    LimitExceeded {
        enchant: String,
        level: u32,
        max: u32,
    },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),
}

impl EnchGuardError {
    /// Map internal error to a stable reject code.
    pub fn reject_code(&self) -> RejectCode {
        match self {
            EnchGuardError::BadConfig(_) => RejectCode::BadConfig,
            EnchGuardError::UnknownEnchant(_) => RejectCode::UnknownEnchant,
            EnchGuardError::InvalidLevel(_) => RejectCode::InvalidLevel,
            EnchGuardError::Disabled(_) => RejectCode::Disabled,
            EnchGuardError::LimitExceeded { .. } => RejectCode::LimitExceeded,
            EnchGuardError::NotFound(_) => RejectCode::NotFound,
            EnchGuardError::Unavailable(_) => RejectCode::Unavailable,
        }
    }
}
