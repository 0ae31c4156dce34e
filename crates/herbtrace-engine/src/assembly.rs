//! Package assembler
//!
//! Groups resolved plant records into a package. The assembler never reads
//! a store: the caller hands over the plants it wants packed.

use crate::config::EngineConfig;
use crate::error::{NotFoundError, TraceError};
use crate::quality::assess_package_quality;
use chrono::{DateTime, Months, Utc};
use herbtrace_model::{
    new_package_code, BatchNumber, Package, PackageId, PackageType, Plant, PlantId,
    ValidationError,
};
use std::collections::{BTreeSet, HashSet};
use ulid::Ulid;

/// Request to assemble a package
#[derive(Debug, Clone, PartialEq)]
pub struct PackageRequest {
    pub plant_ids: BTreeSet<PlantId>,
    pub package_type: PackageType,
    pub total_weight_grams: f64,
    pub packager_id: String,
}

impl PackageRequest {
    #[must_use]
    pub fn new(
        plant_ids: impl IntoIterator<Item = PlantId>,
        package_type: PackageType,
        total_weight_grams: f64,
        packager_id: impl Into<String>,
    ) -> Self {
        Self {
            plant_ids: plant_ids.into_iter().collect(),
            package_type,
            total_weight_grams,
            packager_id: packager_id.into(),
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.plant_ids.is_empty() {
            return Err(ValidationError::EmptyMemberSet);
        }
        let weight = self.total_weight_grams;
        if !weight.is_finite() || weight <= 0.0 {
            return Err(ValidationError::NonPositiveWeight(weight));
        }
        if self.packager_id.trim().is_empty() {
            return Err(ValidationError::EmptyPackagerId);
        }
        Ok(())
    }
}

/// Assemble a package from `plants`
///
/// Grade comes from [`assess_package_quality`] over the member records.
/// Expiry is the packaging time plus the configured shelf life in calendar
/// years; Feb 29 lands on Feb 28 in a non-leap year.
///
/// # Errors
/// - [`ConfigError`](crate::ConfigError) if `config` fails validation
/// - [`ValidationError`] for an empty member set, non-positive weight or
///   blank packager
/// - [`NotFoundError::Plant`] if a member id has no record in `plants`
/// - [`TraceError::ExpiryOutOfRange`] if the expiry cannot be represented
pub fn assemble_package(
    request: PackageRequest,
    plants: &[Plant],
    packaged_at: DateTime<Utc>,
    config: &EngineConfig,
) -> Result<Package, TraceError> {
    config.validate()?;
    if let Err(e) = request.validate() {
        tracing::warn!("Rejected package: {}", e);
        return Err(e.into());
    }

    let known: HashSet<PlantId> = plants.iter().map(|p| p.id).collect();
    if let Some(missing) = request.plant_ids.iter().find(|id| !known.contains(*id)) {
        tracing::warn!(plant = %missing, "Rejected package: unknown member");
        return Err(NotFoundError::Plant(*missing).into());
    }

    let expires_at = expiry_for(packaged_at, config.shelf_life_years)?;
    let verdict = assess_package_quality(&request.plant_ids, plants);

    let id = PackageId::new();
    let code = new_package_code(id, request.plant_ids.len(), packaged_at);
    let batch_number = new_batch_number(&config.batch_prefix, packaged_at);

    tracing::info!(
        package = %id,
        members = request.plant_ids.len(),
        grade = %verdict.overall_grade,
        batch = %batch_number,
        "Assembled package"
    );

    Ok(Package {
        id,
        code,
        plant_ids: request.plant_ids,
        package_type: request.package_type,
        total_weight_grams: request.total_weight_grams,
        packaged_at,
        expires_at,
        batch_number,
        grade: verdict.overall_grade,
        packager_id: request.packager_id,
    })
}

/// Packaging time plus `years` calendar years
///
/// # Errors
/// Returns [`TraceError::ExpiryOutOfRange`] past chrono's representable range
pub fn expiry_for(packaged_at: DateTime<Utc>, years: u32) -> Result<DateTime<Utc>, TraceError> {
    years
        .checked_mul(12)
        .and_then(|months| packaged_at.checked_add_months(Months::new(months)))
        .ok_or(TraceError::ExpiryOutOfRange(packaged_at))
}

/// `<prefix>-<yyyymmdd>-<ulid>`; the ULID makes every call unique
#[must_use]
pub fn new_batch_number(prefix: &str, packaged_at: DateTime<Utc>) -> BatchNumber {
    BatchNumber(format!(
        "{prefix}-{}-{}",
        packaged_at.format("%Y%m%d"),
        Ulid::new()
    ))
}
