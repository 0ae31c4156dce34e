//! HerbTrace Engine - Traceability Chain Engine
//!
//! Turns plant, lab and packaging records into a verifiable chain of
//! custody:
//! - Registers plants and builds their growth-stage and lab-result events
//! - Assembles graded packages from resolved plant records
//! - Resolves a package back to its member plants, their parents and
//!   their histories
//! - Adjudicates package quality from accumulated lab outcomes
//!
//! Every operation is a pure function over caller-supplied snapshots. The
//! engine performs no I/O and keeps no mutable state; persisting what it
//! returns is the caller's job.
//!
//! # Example
//!
//! ```rust
//! use herbtrace_engine::{PackageRequest, TraceEngine};
//! use herbtrace_model::{LabResultInput, PackageType, QualityGrade};
//!
//! # fn main() -> Result<(), herbtrace_engine::TraceError> {
//! let engine = TraceEngine::default();
//!
//! let mut plant = engine.create_plant("farm-7", "chamomile", None)?;
//! let result = engine.record_lab_result(plant.id, LabResultInput::passing());
//! plant.append_lab_result(result)?;
//! let plants = vec![plant];
//!
//! let request = PackageRequest::new([plants[0].id], PackageType::Pouch, 50.0, "packer-1");
//! let package = engine.assemble_package(request, &plants)?;
//! assert_eq!(package.grade, QualityGrade::Premium);
//!
//! let chain = engine.resolve_chain(package.id, &plants, &[package])?;
//! assert_eq!(chain.links.len(), 1);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod assembly;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod lineage;
pub mod quality;

// Re-exports for convenience
pub use assembly::{assemble_package, expiry_for, new_batch_number, PackageRequest};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::EngineConfig;
pub use engine::TraceEngine;
pub use error::{ConfigError, NotFoundError, TraceError};
pub use lifecycle::{create_plant, record_growth_stage, record_lab_result, NewPlant};
pub use lineage::{package_journey, plant_journey, resolve_chain, ChainLink, TraceabilityChain};
pub use quality::{assess_package_quality, QualityAssessment, QualityIssue};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the engine
    pub use crate::{
        EngineConfig, NewPlant, PackageRequest, QualityAssessment, TraceEngine, TraceError,
        TraceabilityChain,
    };
    pub use herbtrace_model::{
        LabResultInput, Package, PackageType, Plant, PlantId, QualityGrade, StageTag,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
