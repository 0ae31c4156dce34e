//! Store snapshots read from disk

use anyhow::Context;
use herbtrace_model::{Package, Plant, TraceEvent};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Read-only copy of the store's collections
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Snapshot {
    pub(crate) plants: Vec<Plant>,
    pub(crate) packages: Vec<Package>,
    pub(crate) traces: Vec<TraceEvent>,
}

impl Snapshot {
    pub(crate) fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading snapshot {}", path.display()))?;
        let snapshot: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parsing snapshot {}", path.display()))?;
        tracing::debug!(
            plants = snapshot.plants.len(),
            packages = snapshot.packages.len(),
            traces = snapshot.traces.len(),
            "Loaded snapshot"
        );
        Ok(snapshot)
    }
}
