//! Package records

use crate::id::{PackageId, PlantId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

/// How a package is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageType {
    Pouch,
    Jar,
    Box,
    Sachet,
    Bulk,
}

/// Quality grade assigned at assembly
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QualityGrade {
    Premium,
    B,
    C,
}

impl QualityGrade {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Premium => "Premium",
            Self::B => "B",
            Self::C => "C",
        }
    }
}

impl Display for QualityGrade {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Batch number stamped on a package, unique per assembly
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchNumber(pub String);

impl BatchNumber {
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for BatchNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An assembled lot of plants
///
/// # Invariants
/// - `plant_ids` is non-empty and fixed at assembly
/// - `total_weight_grams` is positive
/// - `grade` never changes after assembly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub id: PackageId,
    pub code: String,
    pub plant_ids: BTreeSet<PlantId>,
    pub package_type: PackageType,
    pub total_weight_grams: f64,
    pub packaged_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub batch_number: BatchNumber,
    pub grade: QualityGrade,
    pub packager_id: String,
}

impl Package {
    #[inline]
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.plant_ids.len()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, plant_id: &PlantId) -> bool {
        self.plant_ids.contains(plant_id)
    }

    /// Whether the package is past its expiry at `now`
    #[inline]
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
