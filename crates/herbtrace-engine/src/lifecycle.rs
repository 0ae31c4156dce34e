//! Plant lifecycle tracker
//!
//! Builds new plant, growth-stage and lab-result records. Nothing here
//! touches a store: the caller appends what it gets back.

use crate::config::EngineConfig;
use crate::error::TraceError;
use chrono::{DateTime, Utc};
use herbtrace_model::{
    new_plant_code, GrowthStage, GrowthStageId, LabResult, LabResultId, LabResultInput, Location,
    Plant, PlantId, PlantStatus, StageTag, ValidationError,
};

/// Request to register a new plant
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlant {
    pub farm_id: String,
    pub herb_id: String,
    pub parent_plant_id: Option<PlantId>,
    pub location: Option<Location>,
}

impl NewPlant {
    #[inline]
    #[must_use]
    pub fn new(farm_id: impl Into<String>, herb_id: impl Into<String>) -> Self {
        Self {
            farm_id: farm_id.into(),
            herb_id: herb_id.into(),
            parent_plant_id: None,
            location: None,
        }
    }

    /// Propagated from another tracked plant
    #[inline]
    #[must_use]
    pub fn with_parent(mut self, parent: PlantId) -> Self {
        self.parent_plant_id = Some(parent);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

/// Create a plant
///
/// The plant gets a fresh identifier, its scannable code, the initial
/// lifecycle status, and a history seeded with one planting stage.
///
/// Farm and herb references are stored trimmed.
///
/// # Errors
/// Returns [`ValidationError::EmptyFarmId`] or [`ValidationError::EmptyHerbId`]
/// for blank references, and [`ConfigError`](crate::ConfigError) if `config`
/// fails validation
pub fn create_plant(
    request: NewPlant,
    planted_at: DateTime<Utc>,
    config: &EngineConfig,
) -> Result<Plant, TraceError> {
    config.validate()?;

    let farm_id = request.farm_id.trim();
    if farm_id.is_empty() {
        tracing::warn!("Rejected plant: empty farm id");
        return Err(ValidationError::EmptyFarmId.into());
    }
    let herb_id = request.herb_id.trim();
    if herb_id.is_empty() {
        tracing::warn!("Rejected plant: empty herb id");
        return Err(ValidationError::EmptyHerbId.into());
    }

    let id = PlantId::new();
    let code = new_plant_code(id, farm_id, planted_at);
    let planting = record_growth_stage(
        id,
        StageTag::Planting,
        planted_at,
        config.planting_note.clone(),
    );

    tracing::debug!(plant = %id, farm = %farm_id, herb = %herb_id, "Created plant");

    Ok(Plant {
        id,
        code,
        parent_plant_id: request.parent_plant_id,
        planted_at,
        farm_id: farm_id.to_string(),
        herb_id: herb_id.to_string(),
        status: PlantStatus::INITIAL,
        location: request.location,
        growth_stages: vec![planting],
        lab_results: Vec::new(),
    })
}

/// Build a growth-stage event for `plant_id`
#[must_use]
pub fn record_growth_stage(
    plant_id: PlantId,
    stage: StageTag,
    timestamp: DateTime<Utc>,
    note: impl Into<String>,
) -> GrowthStage {
    let stage = GrowthStage {
        id: GrowthStageId::new(),
        plant_id,
        stage,
        timestamp,
        note: note.into(),
    };
    tracing::debug!(plant = %plant_id, stage = %stage.stage, "Recorded growth stage");
    stage
}

/// Build a lab result for `plant_id`
#[must_use]
pub fn record_lab_result(
    plant_id: PlantId,
    input: LabResultInput,
    tested_at: DateTime<Utc>,
) -> LabResult {
    tracing::debug!(plant = %plant_id, passed = input.passed, "Recorded lab result");
    LabResult {
        id: LabResultId::new(),
        plant_id,
        passed: input.passed,
        test_kind: input.test_kind,
        tested_at,
        lab_name: input.lab_name,
        assays: input.assays,
    }
}
