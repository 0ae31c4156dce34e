//! JSON label payloads
//!
//! QR labels carry a small JSON document rather than just the bare code.
//! Decoding is tagged: a payload is a plant label, a package label, or a
//! [`DecodeError`].

use crate::code::{self, ScannedCode};
use crate::error::DecodeError;
use crate::id::{PackageId, PlantId};
use crate::package::{Package, QualityGrade};
use crate::plant::Plant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contents of a printed label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LabelPayload {
    Plant {
        id: PlantId,
        code: String,
        farm_id: String,
        herb_id: String,
        planted_at: DateTime<Utc>,
    },
    Package {
        id: PackageId,
        code: String,
        batch_number: String,
        grade: QualityGrade,
        expires_at: DateTime<Utc>,
    },
}

impl LabelPayload {
    #[must_use]
    pub fn for_plant(plant: &Plant) -> Self {
        Self::Plant {
            id: plant.id,
            code: plant.code.clone(),
            farm_id: plant.farm_id.clone(),
            herb_id: plant.herb_id.clone(),
            planted_at: plant.planted_at,
        }
    }

    #[must_use]
    pub fn for_package(package: &Package) -> Self {
        Self::Package {
            id: package.id,
            code: package.code.clone(),
            batch_number: package.batch_number.to_string(),
            grade: package.grade,
            expires_at: package.expires_at,
        }
    }

    /// Serialize to the JSON printed on the label
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn to_json(&self) -> Result<String, DecodeError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a scanned label
    ///
    /// The embedded code must decode and agree with the payload's type and
    /// identifier, otherwise the label is treated as damaged.
    ///
    /// # Errors
    /// Returns [`DecodeError`] for malformed JSON, an undecodable code, or
    /// a code that names a different record
    pub fn decode(raw: &str) -> Result<Self, DecodeError> {
        if raw.trim().is_empty() {
            return Err(DecodeError::Empty);
        }
        let payload: Self = serde_json::from_str(raw)?;
        let scanned = code::decode_code(payload.code())?;

        let consistent = match (&payload, &scanned) {
            (Self::Plant { id, .. }, ScannedCode::Plant { plant_id, .. }) => id == plant_id,
            (Self::Package { id, .. }, ScannedCode::Package { package_id, .. }) => {
                id == package_id
            }
            _ => false,
        };
        if !consistent {
            return Err(DecodeError::CodeMismatch);
        }
        Ok(payload)
    }

    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Plant { code, .. } | Self::Package { code, .. } => code,
        }
    }
}
