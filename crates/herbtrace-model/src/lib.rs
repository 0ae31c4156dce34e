//! HerbTrace Model
//!
//! Records that make up a botanical chain of custody, and the scannable
//! codes printed on their labels.
//!
//! # Core Concepts
//!
//! - [`Plant`]: a tracked cultivation unit with append-only histories
//! - [`GrowthStage`] / [`LabResult`]: immutable events recorded against a plant
//! - [`Package`]: a fixed, graded set of plants assembled into one lot
//! - [`TraceEvent`]: an entry in the flat chronological trace log
//! - Scannable codes: `PLANT-…` / `PKG-…` strings with an integrity check
//!
//! # Example
//!
//! ```rust
//! use herbtrace_model::{decode_code, is_plant_code, new_plant_code, PlantId, ScannedCode};
//! use chrono::Utc;
//!
//! let id = PlantId::new();
//! let code = new_plant_code(id, "farm-7", Utc::now());
//! assert!(is_plant_code(&code));
//!
//! let scanned = decode_code(&code).unwrap();
//! assert_eq!(scanned.plant_id(), Some(id));
//! assert!(ScannedCode::try_scan("not ours").is_none());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod code;
mod error;
mod id;
mod label;
mod package;
mod plant;
mod trace;

pub use code::{
    decode_code, is_package_code, is_plant_code, new_package_code, new_plant_code, ScannedCode,
    PACKAGE_PREFIX, PLANT_PREFIX,
};
pub use error::{DecodeError, ValidationError};
pub use id::{GrowthStageId, LabResultId, PackageId, PlantId, TraceEventId};
pub use label::LabelPayload;
pub use package::{BatchNumber, Package, PackageType, QualityGrade};
pub use plant::{
    advance_status, FacilityType, GrowthStage, LabResult, LabResultInput, LabTestKind, Location,
    Plant, PlantStatus, StageTag,
};
pub use trace::{TraceAction, TraceEvent, TraceSubject};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
