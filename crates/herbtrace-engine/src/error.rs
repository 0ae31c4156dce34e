//! Error types for the traceability engine
//!
//! Every failure is returned as a value and is distinguishable by kind:
//! - [`ValidationError`]: malformed input, rejected before a record is built
//! - [`NotFoundError`]: a referenced package or plant is absent
//! - [`DecodeError`]: a scanned code or label payload could not be read
//! - [`ConfigError`]: engine configuration is unusable

use chrono::{DateTime, Utc};
use herbtrace_model::{DecodeError, PackageId, PlantId, ValidationError};

/// Main engine error type
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// Input rejected
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Referenced record missing from the supplied collections
    #[error("not found: {0}")]
    NotFound(#[from] NotFoundError),

    /// Scanned payload unreadable
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// Configuration unusable
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Expiry date cannot be represented
    #[error("expiry out of range for packaging time {0}")]
    ExpiryOutOfRange(DateTime<Utc>),
}

impl TraceError {
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::ExpiryOutOfRange(_))
    }

    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    #[inline]
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

/// Missing record
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotFoundError {
    #[error("package {0}")]
    Package(PackageId),

    #[error("plant {0}")]
    Plant(PlantId),
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML could not be parsed
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("shelf life must be at least one year")]
    ZeroShelfLife,

    #[error("batch prefix must not be empty")]
    EmptyBatchPrefix,
}
