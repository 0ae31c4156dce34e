//! Record identifiers
//!
//! Every record carries a ULID-backed identifier. ULIDs sort by creation
//! time, so a collection ordered by identifier is also ordered by when its
//! records were minted.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use ulid::Ulid;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Ulid);

        impl $name {
            /// Generate a fresh identifier
            #[inline]
            #[must_use]
            pub fn new() -> Self {
                Self(Ulid::new())
            }

            /// Wrap an existing ULID
            #[inline]
            #[must_use]
            pub const fn from_ulid(ulid: Ulid) -> Self {
                Self(ulid)
            }

            /// Underlying ULID
            #[inline]
            #[must_use]
            pub const fn as_ulid(&self) -> Ulid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ulid::DecodeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ulid::from_string(s).map(Self)
            }
        }
    };
}

record_id!(
    /// Identifier of a tracked plant
    PlantId
);

record_id!(
    /// Identifier of an assembled package
    PackageId
);

record_id!(
    /// Identifier of a growth-stage event
    GrowthStageId
);

record_id!(
    /// Identifier of a lab result
    LabResultId
);

record_id!(
    /// Identifier of an entry in the trace log
    TraceEventId
);
