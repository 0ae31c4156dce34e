//! Record-level error types
//!
//! [`ValidationError`] rejects malformed input before a record is built.
//! [`DecodeError`] describes why a scanned payload could not be read.

use crate::plant::PlantStatus;

/// Malformed or missing required input
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Farm reference was empty
    #[error("farm id must not be empty")]
    EmptyFarmId,

    /// Herb-species reference was empty
    #[error("herb id must not be empty")]
    EmptyHerbId,

    /// Packager reference was empty
    #[error("packager id must not be empty")]
    EmptyPackagerId,

    /// Package has no member plants
    #[error("package must contain at least one plant")]
    EmptyMemberSet,

    /// Package weight is zero, negative or not a number
    #[error("total weight must be positive, got {0}")]
    NonPositiveWeight(f64),

    /// Record was appended to a plant it does not belong to
    #[error("{kind} {record} belongs to plant {owner}, not {target}")]
    ForeignRecord {
        kind: &'static str,
        record: String,
        owner: String,
        target: String,
    },

    /// Lifecycle transition is not allowed
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition { from: PlantStatus, to: PlantStatus },
}

/// Malformed scannable-code or label payload
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Payload was empty
    #[error("empty payload")]
    Empty,

    /// Discriminator prefix is not one we issue
    #[error("unknown code prefix: {0}")]
    UnknownPrefix(String),

    /// A required field is absent
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// Identifier segment is not a valid ULID
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(#[from] ulid::DecodeError),

    /// Member count segment is not a positive integer
    #[error("invalid member count: {0}")]
    InvalidCount(String),

    /// Timestamp segment is not a valid millisecond epoch
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Integrity check over the code fields failed
    #[error("checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    /// Label's embedded code names a different record
    #[error("label code does not match payload")]
    CodeMismatch,

    /// Label JSON could not be parsed
    #[error("label payload error: {0}")]
    Payload(#[from] serde_json::Error),
}
