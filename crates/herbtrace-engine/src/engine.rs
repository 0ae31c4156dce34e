//! Engine facade
//!
//! [`TraceEngine`] bundles a validated configuration and a clock and
//! exposes every engine operation. It holds no mutable state, so one
//! instance can be shared freely across threads.

use crate::assembly::{self, PackageRequest};
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::error::TraceError;
use crate::lifecycle::{self, NewPlant};
use crate::lineage::{self, TraceabilityChain};
use crate::quality::{self, QualityAssessment};
use chrono::{DateTime, Utc};
use herbtrace_model::{
    decode_code, GrowthStage, LabResult, LabResultInput, LabelPayload, Package, PackageId, Plant,
    PlantId, ScannedCode, StageTag, TraceEvent,
};

/// The traceability chain engine
#[derive(Debug, Clone)]
pub struct TraceEngine<C: Clock = SystemClock> {
    config: EngineConfig,
    clock: C,
}

impl TraceEngine<SystemClock> {
    /// Engine on the wall clock
    ///
    /// # Errors
    /// Returns [`TraceError::Config`] if `config` is invalid
    pub fn new(config: EngineConfig) -> Result<Self, TraceError> {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for TraceEngine<SystemClock> {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            clock: SystemClock,
        }
    }
}

impl<C: Clock> TraceEngine<C> {
    /// Engine reading time from `clock`
    ///
    /// # Errors
    /// Returns [`TraceError::Config`] if `config` is invalid
    pub fn with_clock(config: EngineConfig, clock: C) -> Result<Self, TraceError> {
        config.validate()?;
        Ok(Self { config, clock })
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Register a plant planted now
    ///
    /// # Errors
    /// Returns a validation error for a blank farm or herb id
    pub fn create_plant(
        &self,
        farm_id: &str,
        herb_id: &str,
        parent_plant_id: Option<PlantId>,
    ) -> Result<Plant, TraceError> {
        let mut request = NewPlant::new(farm_id, herb_id);
        request.parent_plant_id = parent_plant_id;
        self.create_plant_from(request)
    }

    /// Register a plant from a full request
    ///
    /// # Errors
    /// Returns a validation error for a blank farm or herb id
    pub fn create_plant_from(&self, request: NewPlant) -> Result<Plant, TraceError> {
        lifecycle::create_plant(request, self.clock.now(), &self.config)
    }

    #[must_use]
    pub fn record_growth_stage(
        &self,
        plant_id: PlantId,
        stage: StageTag,
        timestamp: DateTime<Utc>,
        note: impl Into<String>,
    ) -> GrowthStage {
        lifecycle::record_growth_stage(plant_id, stage, timestamp, note)
    }

    /// Lab result stamped with the current time
    #[must_use]
    pub fn record_lab_result(&self, plant_id: PlantId, input: LabResultInput) -> LabResult {
        lifecycle::record_lab_result(plant_id, input, self.clock.now())
    }

    /// Assemble a package now
    ///
    /// # Errors
    /// See [`assembly::assemble_package`]
    pub fn assemble_package(
        &self,
        request: PackageRequest,
        plants: &[Plant],
    ) -> Result<Package, TraceError> {
        assembly::assemble_package(request, plants, self.clock.now(), &self.config)
    }

    #[must_use]
    pub fn assess_package_quality<'a, I>(&self, plant_ids: I, plants: &[Plant]) -> QualityAssessment
    where
        I: IntoIterator<Item = &'a PlantId>,
    {
        quality::assess_package_quality(plant_ids, plants)
    }

    /// # Errors
    /// Returns a not-found error if no package has `package_id`
    pub fn resolve_chain(
        &self,
        package_id: PackageId,
        plants: &[Plant],
        packages: &[Package],
    ) -> Result<TraceabilityChain, TraceError> {
        lineage::resolve_chain(package_id, plants, packages)
    }

    #[must_use]
    pub fn plant_journey<'t>(
        &self,
        plant_id: PlantId,
        traces: &'t [TraceEvent],
    ) -> Vec<&'t TraceEvent> {
        lineage::plant_journey(plant_id, traces)
    }

    #[must_use]
    pub fn package_journey<'t>(
        &self,
        package_id: PackageId,
        traces: &'t [TraceEvent],
    ) -> Vec<&'t TraceEvent> {
        lineage::package_journey(package_id, traces)
    }

    /// Decode a scanned code
    ///
    /// # Errors
    /// Returns a decode error for foreign or damaged codes
    pub fn scan(&self, code: &str) -> Result<ScannedCode, TraceError> {
        decode_code(code).map_err(|e| {
            tracing::debug!("Scan rejected: {}", e);
            TraceError::from(e)
        })
    }

    /// Decode a scanned JSON label
    ///
    /// # Errors
    /// Returns a decode error for malformed or inconsistent labels
    pub fn decode_label(&self, raw: &str) -> Result<LabelPayload, TraceError> {
        LabelPayload::decode(raw).map_err(|e| {
            tracing::debug!("Label rejected: {}", e);
            TraceError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::TimeZone;
    use herbtrace_model::{PackageType, QualityGrade};

    fn engine() -> TraceEngine<FixedClock> {
        let now = Utc.with_ymd_and_hms(2024, 9, 1, 10, 0, 0).unwrap();
        TraceEngine::with_clock(EngineConfig::default(), FixedClock(now)).unwrap()
    }

    #[test]
    fn rejects_invalid_config() {
        let err = TraceEngine::new(EngineConfig::new().with_shelf_life_years(0)).unwrap_err();
        assert!(matches!(err, TraceError::Config(_)));
    }

    #[test]
    fn engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TraceEngine>();
        assert_send_sync::<TraceEngine<FixedClock>>();
    }

    #[test]
    fn timestamps_come_from_clock() {
        let engine = engine();
        let plant = engine.create_plant("farm-2", "rosemary", None).unwrap();
        assert_eq!(plant.planted_at, engine.now());

        let result = engine.record_lab_result(plant.id, LabResultInput::passing());
        assert_eq!(result.tested_at, engine.now());
    }

    #[test]
    fn end_to_end_through_facade() {
        let engine = engine();
        let mut plant = engine.create_plant("farm-2", "rosemary", None).unwrap();
        let result = engine.record_lab_result(plant.id, LabResultInput::passing());
        plant.append_lab_result(result).unwrap();
        let plants = vec![plant];

        let package = engine
            .assemble_package(
                PackageRequest::new([plants[0].id], PackageType::Jar, 120.0, "packer"),
                &plants,
            )
            .unwrap();
        assert_eq!(package.grade, QualityGrade::Premium);

        let scanned = engine.scan(&package.code).unwrap();
        assert_eq!(scanned.package_id(), Some(package.id));

        let chain = engine.resolve_chain(package.id, &plants, &[package]).unwrap();
        assert!(chain.is_complete());
    }

    #[test]
    fn scan_errors_are_decode_errors() {
        let err = engine().scan("QR-unknown").unwrap_err();
        assert!(err.is_decode());
        assert!(engine().decode_label("{}").unwrap_err().is_decode());
    }
}
