//! Testing utilities for the HerbTrace workspace
//!
//! Shared fixtures: a clock-pinned engine and plants with canned lab
//! histories.

#![allow(missing_docs)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use herbtrace_engine::{EngineConfig, FixedClock, NewPlant, PackageRequest, TraceEngine};
use herbtrace_model::{
    LabResultInput, Package, PackageType, Plant, StageTag, TraceAction, TraceEvent, TraceSubject,
};

/// The instant every fixture engine reports as "now"
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 15, 9, 0, 0).unwrap()
}

pub fn test_engine() -> TraceEngine<FixedClock> {
    TraceEngine::with_clock(EngineConfig::default(), FixedClock(fixed_time())).unwrap()
}

/// A plant that has been through vegetative growth, with one lab result
/// per entry in `results`
pub fn plant_with_results(results: &[bool]) -> Plant {
    plant_from(NewPlant::new("farm-test", "basil"), results)
}

/// A plant propagated from `parent`
pub fn child_of(parent: &Plant, results: &[bool]) -> Plant {
    plant_from(
        NewPlant::new(parent.farm_id.clone(), parent.herb_id.clone()).with_parent(parent.id),
        results,
    )
}

fn plant_from(request: NewPlant, results: &[bool]) -> Plant {
    let engine = test_engine();
    let mut plant = engine.create_plant_from(request).unwrap();

    let stage = engine.record_growth_stage(
        plant.id,
        StageTag::Vegetative,
        fixed_time() + Duration::days(14),
        "first true leaves",
    );
    plant.append_growth_stage(stage).unwrap();

    for &passed in results {
        let result = engine.record_lab_result(plant.id, LabResultInput::new(passed));
        plant.append_lab_result(result).unwrap();
    }
    plant
}

/// Package every plant in `plants`
pub fn package_all(plants: &[Plant]) -> Package {
    let request = PackageRequest::new(
        plants.iter().map(|p| p.id),
        PackageType::Jar,
        100.0,
        "packer-test",
    );
    test_engine().assemble_package(request, plants).unwrap()
}

pub fn trace(
    subject: TraceSubject,
    action: TraceAction,
    at: DateTime<Utc>,
    actor: &str,
) -> TraceEvent {
    TraceEvent::new(subject, action, at, actor)
}
