//! Quality adjudicator
//!
//! Folds the lab outcomes of a set of plants into a verdict and a grade.
//!
//! Rules, in order:
//! 1. Select the plants whose id was requested.
//! 2. Plants with no lab results at all raise a "missing" issue.
//! 3. Plants with at least one failing result raise a "failed" issue.
//! 4. Grade starts at Premium, drops to B on any issue, and to C if any
//!    plant failed outright. C wins when both issues are present.
//! 5. The package is valid only when no issue was raised.
//!
//! Grade and validity are independent outputs: an invalid package still
//! carries a grade, and release policy belongs to the caller.

use herbtrace_model::{Plant, PlantId, QualityGrade};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};

/// A problem found while adjudicating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QualityIssue {
    MissingLabResults { count: usize },
    FailedLabVerification { count: usize },
}

impl Display for QualityIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingLabResults { count } => write!(f, "{count} plants missing lab results"),
            Self::FailedLabVerification { count } => {
                write!(f, "{count} plants failed lab verification")
            }
        }
    }
}

/// Verdict for a set of plants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityAssessment {
    pub is_valid: bool,
    pub issues: Vec<QualityIssue>,
    pub overall_grade: QualityGrade,
}

impl QualityAssessment {
    /// Issues rendered for display
    #[must_use]
    pub fn issue_messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }
}

/// Adjudicate the plants named by `plant_ids`
///
/// Ids with no matching record in `plants` are ignored; callers that need
/// every member present check that before calling (the assembler does).
pub fn assess_package_quality<'a, I>(plant_ids: I, plants: &[Plant]) -> QualityAssessment
where
    I: IntoIterator<Item = &'a PlantId>,
{
    let wanted: HashSet<&PlantId> = plant_ids.into_iter().collect();
    let selected: Vec<&Plant> = plants.iter().filter(|p| wanted.contains(&p.id)).collect();

    let missing = selected.iter().filter(|p| !p.has_lab_results()).count();
    let failed = selected.iter().filter(|p| p.has_failed_lab_result()).count();

    let mut issues = Vec::new();
    if missing > 0 {
        issues.push(QualityIssue::MissingLabResults { count: missing });
    }
    if failed > 0 {
        issues.push(QualityIssue::FailedLabVerification { count: failed });
    }

    let mut grade = QualityGrade::Premium;
    if !issues.is_empty() {
        grade = QualityGrade::B;
    }
    if failed > 0 {
        grade = QualityGrade::C;
    }

    tracing::debug!(
        selected = selected.len(),
        missing,
        failed,
        grade = %grade,
        "Assessed package quality"
    );

    QualityAssessment {
        is_valid: issues.is_empty(),
        issues,
        overall_grade: grade,
    }
}
