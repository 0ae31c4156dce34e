//! Lineage resolver
//!
//! Rebuilds the provenance view of one package from snapshots of the plant
//! and package collections, and reads per-subject journeys out of the
//! trace log. Chains are derived values: recompute them, never store them
//! as the source of truth.

use crate::error::{NotFoundError, TraceError};
use herbtrace_model::{GrowthStage, LabResult, Package, PackageId, Plant, PlantId, TraceEvent};
use serde::Serialize;
use std::collections::HashMap;

/// One member plant within a chain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainLink {
    pub plant: Plant,
    /// Direct parent, when it is present in the supplied collection
    pub mother_plant: Option<Plant>,
    /// Parent id that could not be found. Lineage may predate the tracked
    /// window, so this is reported rather than treated as an error.
    pub unresolved_parent: Option<PlantId>,
}

impl ChainLink {
    #[inline]
    #[must_use]
    pub fn growth_stages(&self) -> &[GrowthStage] {
        &self.plant.growth_stages
    }

    #[inline]
    #[must_use]
    pub fn lab_results(&self) -> &[LabResult] {
        &self.plant.lab_results
    }
}

/// Provenance of one package down to its member plants
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceabilityChain {
    pub package: Package,
    /// In the order the plants appear in the supplied collection
    pub links: Vec<ChainLink>,
    /// Member ids with no record in the supplied collection
    pub missing_members: Vec<PlantId>,
}

impl TraceabilityChain {
    /// Every member found and every parent resolved
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_members.is_empty() && self.links.iter().all(|l| l.unresolved_parent.is_none())
    }

    #[must_use]
    pub fn link_for(&self, plant_id: PlantId) -> Option<&ChainLink> {
        self.links.iter().find(|l| l.plant.id == plant_id)
    }
}

/// Resolve the chain rooted at `package_id`
///
/// Parents are followed a single hop through an id index over `plants`.
/// Deeper ancestry would walk the same index repeatedly from
/// `mother_plant`; it is not part of the chain today.
///
/// # Errors
/// Returns [`NotFoundError::Package`] if no package has that id
pub fn resolve_chain(
    package_id: PackageId,
    plants: &[Plant],
    packages: &[Package],
) -> Result<TraceabilityChain, TraceError> {
    let Some(package) = packages.iter().find(|p| p.id == package_id) else {
        tracing::warn!(package = %package_id, "No chain: package not found");
        return Err(NotFoundError::Package(package_id).into());
    };

    let index: HashMap<PlantId, &Plant> = plants.iter().map(|p| (p.id, p)).collect();

    let links: Vec<ChainLink> = plants
        .iter()
        .filter(|p| package.contains(&p.id))
        .map(|plant| link_for_member(plant, &index))
        .collect();

    let missing_members: Vec<PlantId> = package
        .plant_ids
        .iter()
        .filter(|id| !index.contains_key(*id))
        .copied()
        .collect();
    if !missing_members.is_empty() {
        tracing::warn!(
            package = %package_id,
            missing = missing_members.len(),
            "Package members absent from plant collection"
        );
    }

    tracing::info!(package = %package_id, links = links.len(), "Resolved traceability chain");

    Ok(TraceabilityChain {
        package: package.clone(),
        links,
        missing_members,
    })
}

fn link_for_member(plant: &Plant, index: &HashMap<PlantId, &Plant>) -> ChainLink {
    let (mother_plant, unresolved_parent) = match plant.parent_plant_id {
        None => (None, None),
        Some(parent_id) => match index.get(&parent_id) {
            Some(parent) => (Some((*parent).clone()), None),
            None => {
                tracing::warn!(plant = %plant.id, parent = %parent_id, "Unresolved parent plant");
                (None, Some(parent_id))
            }
        },
    };

    ChainLink {
        plant: plant.clone(),
        mother_plant,
        unresolved_parent,
    }
}

/// Events about `plant_id`, oldest first; ties keep log order
#[must_use]
pub fn plant_journey(plant_id: PlantId, traces: &[TraceEvent]) -> Vec<&TraceEvent> {
    journey(traces, |e| e.is_for_plant(plant_id))
}

/// Events about `package_id`, oldest first; ties keep log order
#[must_use]
pub fn package_journey(package_id: PackageId, traces: &[TraceEvent]) -> Vec<&TraceEvent> {
    journey(traces, |e| e.is_for_package(package_id))
}

fn journey(traces: &[TraceEvent], keep: impl Fn(&TraceEvent) -> bool) -> Vec<&TraceEvent> {
    let mut events: Vec<&TraceEvent> = traces.iter().filter(|e| keep(*e)).collect();
    // sort_by_key is stable
    events.sort_by_key(|e| e.timestamp);
    events
}
