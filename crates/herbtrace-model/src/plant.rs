//! Plant records and their append-only histories

use crate::error::ValidationError;
use crate::id::{GrowthStageId, LabResultId, PlantId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

/// Lifecycle status of a plant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantStatus {
    Seedling,
    Growing,
    Flowering,
    Harvested,
    Failed,
}

impl PlantStatus {
    /// Status every new plant starts in
    pub const INITIAL: Self = Self::Seedling;

    /// Harvested and failed plants never change status again
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Harvested | Self::Failed)
    }

    /// Whether `next` is a legal successor of `self`
    ///
    /// The forward path is Seedling → Growing → Flowering → Harvested.
    /// Any non-terminal status may drop to Failed.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        match (self, next) {
            (from, Self::Failed) => !from.is_terminal(),
            (Self::Seedling, Self::Growing)
            | (Self::Growing, Self::Flowering)
            | (Self::Flowering, Self::Harvested) => true,
            _ => false,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Seedling => "seedling",
            Self::Growing => "growing",
            Self::Flowering => "flowering",
            Self::Harvested => "harvested",
            Self::Failed => "failed",
        }
    }
}

impl Display for PlantStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of site a plant currently sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacilityType {
    Outdoor,
    Greenhouse,
    Indoor,
    Nursery,
    Warehouse,
    Processing,
}

/// Where a plant is
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub facility: FacilityType,
}

impl Location {
    #[inline]
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64, facility: FacilityType) -> Self {
        Self {
            latitude,
            longitude,
            facility,
        }
    }
}

/// Tag of a growth-stage event
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageTag {
    Planting,
    Germination,
    Vegetative,
    Flowering,
    Harvest,
    Drying,
    Curing,
    Custom(String),
}

impl Display for StageTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Planting => f.write_str("planting"),
            Self::Germination => f.write_str("germination"),
            Self::Vegetative => f.write_str("vegetative"),
            Self::Flowering => f.write_str("flowering"),
            Self::Harvest => f.write_str("harvest"),
            Self::Drying => f.write_str("drying"),
            Self::Curing => f.write_str("curing"),
            Self::Custom(tag) => f.write_str(tag),
        }
    }
}

/// A recorded growth-stage event. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthStage {
    pub id: GrowthStageId,
    pub plant_id: PlantId,
    pub stage: StageTag,
    pub timestamp: DateTime<Utc>,
    pub note: String,
}

/// What a lab test measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabTestKind {
    Potency,
    Contaminants,
    Moisture,
    HeavyMetals,
    Microbial,
    #[default]
    Other,
}

/// A recorded lab outcome. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabResult {
    pub id: LabResultId,
    pub plant_id: PlantId,
    pub passed: bool,
    pub test_kind: LabTestKind,
    pub tested_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_name: Option<String>,
    /// Numeric assay readings keyed by analyte
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub assays: BTreeMap<String, f64>,
}

/// Caller-supplied fields for a new lab result
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabResultInput {
    pub passed: bool,
    pub test_kind: LabTestKind,
    pub lab_name: Option<String>,
    pub assays: BTreeMap<String, f64>,
}

impl LabResultInput {
    #[inline]
    #[must_use]
    pub fn new(passed: bool) -> Self {
        Self {
            passed,
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn passing() -> Self {
        Self::new(true)
    }

    #[inline]
    #[must_use]
    pub fn failing() -> Self {
        Self::new(false)
    }

    #[inline]
    #[must_use]
    pub fn with_kind(mut self, kind: LabTestKind) -> Self {
        self.test_kind = kind;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_lab(mut self, lab_name: impl Into<String>) -> Self {
        self.lab_name = Some(lab_name.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_assay(mut self, analyte: impl Into<String>, value: f64) -> Self {
        self.assays.insert(analyte.into(), value);
        self
    }
}

/// A tracked plant
///
/// `parent_plant_id` is a weak reference: it names another plant in the
/// same collection and is resolved by lookup, never followed as a pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    pub id: PlantId,
    pub code: String,
    #[serde(default)]
    pub parent_plant_id: Option<PlantId>,
    pub planted_at: DateTime<Utc>,
    pub farm_id: String,
    pub herb_id: String,
    pub status: PlantStatus,
    /// Current location. Registration does not take one, so a plant has
    /// no location until the grower records where it stands; records
    /// written before it was known deserialize as `None`.
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub growth_stages: Vec<GrowthStage>,
    #[serde(default)]
    pub lab_results: Vec<LabResult>,
}

impl Plant {
    /// No parent: this plant starts its lineage
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent_plant_id.is_none()
    }

    #[inline]
    #[must_use]
    pub fn has_lab_results(&self) -> bool {
        !self.lab_results.is_empty()
    }

    /// At least one recorded lab result did not pass
    #[inline]
    #[must_use]
    pub fn has_failed_lab_result(&self) -> bool {
        self.lab_results.iter().any(|r| !r.passed)
    }

    /// Most recently appended growth stage
    #[inline]
    #[must_use]
    pub fn latest_stage(&self) -> Option<&GrowthStage> {
        self.growth_stages.last()
    }

    /// Append a growth stage recorded against this plant
    ///
    /// # Errors
    /// Returns [`ValidationError::ForeignRecord`] if the stage names another plant
    pub fn append_growth_stage(&mut self, stage: GrowthStage) -> Result<(), ValidationError> {
        if stage.plant_id != self.id {
            return Err(ValidationError::ForeignRecord {
                kind: "growth stage",
                record: stage.id.to_string(),
                owner: stage.plant_id.to_string(),
                target: self.id.to_string(),
            });
        }
        self.growth_stages.push(stage);
        Ok(())
    }

    /// Append a lab result recorded against this plant
    ///
    /// # Errors
    /// Returns [`ValidationError::ForeignRecord`] if the result names another plant
    pub fn append_lab_result(&mut self, result: LabResult) -> Result<(), ValidationError> {
        if result.plant_id != self.id {
            return Err(ValidationError::ForeignRecord {
                kind: "lab result",
                record: result.id.to_string(),
                owner: result.plant_id.to_string(),
                target: self.id.to_string(),
            });
        }
        self.lab_results.push(result);
        Ok(())
    }
}

/// Check a lifecycle transition for `plant`
///
/// # Errors
/// Returns [`ValidationError::InvalidTransition`] if `next` is not reachable
/// from the plant's current status
pub fn advance_status(plant: &Plant, next: PlantStatus) -> Result<PlantStatus, ValidationError> {
    if plant.status.can_transition_to(next) {
        Ok(next)
    } else {
        Err(ValidationError::InvalidTransition {
            from: plant.status,
            to: next,
        })
    }
}
