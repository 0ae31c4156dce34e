//! Property tests for adjudication and journey ordering.

use chrono::Duration;
use herbtrace_engine::{assess_package_quality, package_journey, plant_journey};
use herbtrace_model::{
    PackageId, Plant, PlantId, QualityGrade, TraceAction, TraceEvent, TraceSubject,
};
use herbtrace_test_utils::{fixed_time, plant_with_results, trace};
use proptest::prelude::*;

fn lab_history() -> impl Strategy<Value = Vec<bool>> {
    proptest::collection::vec(any::<bool>(), 0..4)
}

fn plants_from(histories: &[Vec<bool>]) -> Vec<Plant> {
    histories.iter().map(|h| plant_with_results(h)).collect()
}

fn ids(plants: &[Plant]) -> Vec<PlantId> {
    plants.iter().map(|p| p.id).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn verdict_ignores_plant_order(histories in proptest::collection::vec(lab_history(), 1..8)) {
        let plants = plants_from(&histories);
        let forward = assess_package_quality(&ids(&plants), &plants);

        let mut reversed = plants.clone();
        reversed.reverse();
        let mut reversed_ids = ids(&reversed);
        reversed_ids.rotate_left(1);
        let backward = assess_package_quality(&reversed_ids, &reversed);

        let mut a = forward.issue_messages();
        let mut b = backward.issue_messages();
        a.sort();
        b.sort();
        prop_assert_eq!(a, b);
        prop_assert_eq!(forward.is_valid, backward.is_valid);
        prop_assert_eq!(forward.overall_grade, backward.overall_grade);
    }

    #[test]
    fn adding_a_failure_always_yields_c(
        histories in proptest::collection::vec(lab_history(), 0..6),
    ) {
        let mut plants = plants_from(&histories);
        plants.push(plant_with_results(&[true, false]));

        let verdict = assess_package_quality(&ids(&plants), &plants);
        prop_assert_eq!(verdict.overall_grade, QualityGrade::C);
        prop_assert!(!verdict.is_valid);
    }

    #[test]
    fn validity_matches_issue_list(histories in proptest::collection::vec(lab_history(), 0..6)) {
        let plants = plants_from(&histories);
        let verdict = assess_package_quality(&ids(&plants), &plants);
        prop_assert_eq!(verdict.is_valid, verdict.issues.is_empty());
        prop_assert_eq!(verdict.is_valid, verdict.overall_grade == QualityGrade::Premium);
    }

    #[test]
    fn journeys_are_sorted_and_stable(
        offsets in proptest::collection::vec((0i64..5, any::<bool>()), 0..24)
    ) {
        let plant_id = PlantId::new();
        let package_id = PackageId::new();

        // actor = insertion index, so stability is checkable after sorting
        let traces: Vec<TraceEvent> = offsets
            .iter()
            .enumerate()
            .map(|(i, (hours, is_plant))| {
                let subject = if *is_plant {
                    TraceSubject::Plant(plant_id)
                } else {
                    TraceSubject::Package(package_id)
                };
                trace(
                    subject,
                    TraceAction::Custom("step".into()),
                    fixed_time() + Duration::hours(*hours),
                    &i.to_string(),
                )
            })
            .collect();

        for journey in [plant_journey(plant_id, &traces), package_journey(package_id, &traces)] {
            for pair in journey.windows(2) {
                prop_assert!(pair[0].timestamp <= pair[1].timestamp);
                if pair[0].timestamp == pair[1].timestamp {
                    let first: usize = pair[0].actor.parse().unwrap();
                    let second: usize = pair[1].actor.parse().unwrap();
                    prop_assert!(first < second);
                }
            }
        }

        let plant_count = offsets.iter().filter(|(_, is_plant)| *is_plant).count();
        prop_assert_eq!(plant_journey(plant_id, &traces).len(), plant_count);
    }
}

/// Adding a failing plant to a B-graded set moves it to C, never back up.
#[test]
fn failing_plant_downgrades_b_to_c() {
    let mut plants = vec![plant_with_results(&[true]), plant_with_results(&[])];
    let before = assess_package_quality(&ids(&plants), &plants);
    assert_eq!(before.overall_grade, QualityGrade::B);

    plants.push(plant_with_results(&[false]));
    let after = assess_package_quality(&ids(&plants), &plants);
    assert_eq!(after.overall_grade, QualityGrade::C);
}
