//! Flat trace log entries
//!
//! The store keeps one chronological log of everything that happened to
//! plants and packages. Journeys are read out of it by subject.

use crate::id::{PackageId, PlantId, TraceEventId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a trace event is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum TraceSubject {
    Plant(PlantId),
    Package(PackageId),
}

/// What happened
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceAction {
    Planted,
    GrowthStage,
    LabTest,
    Harvested,
    Packaged,
    Shipped,
    Received,
    Custom(String),
}

/// One entry in the trace log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub id: TraceEventId,
    pub subject: TraceSubject,
    pub action: TraceAction,
    pub timestamp: DateTime<Utc>,
    /// Who performed the action (opaque reference)
    pub actor: String,
    #[serde(default)]
    pub details: String,
}

impl TraceEvent {
    #[must_use]
    pub fn new(
        subject: TraceSubject,
        action: TraceAction,
        timestamp: DateTime<Utc>,
        actor: impl Into<String>,
    ) -> Self {
        Self {
            id: TraceEventId::new(),
            subject,
            action,
            timestamp,
            actor: actor.into(),
            details: String::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn is_for_plant(&self, plant_id: PlantId) -> bool {
        self.subject == TraceSubject::Plant(plant_id)
    }

    #[inline]
    #[must_use]
    pub fn is_for_package(&self, package_id: PackageId) -> bool {
        self.subject == TraceSubject::Package(package_id)
    }
}
