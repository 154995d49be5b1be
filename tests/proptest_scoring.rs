// SPDX-License-Identifier: PMPL-1.0-or-later
//! Property-based tests for scoring and recommendation ordering

use proptest::prelude::*;
use serde_json::{json, Value};
use wcag_auditor::findings::{RawAutomatedResults, RawManualResults};
use wcag_auditor::{build_report, AnalysisInput, RunMeta, WcagLevel};

const IMPACTS: [&str; 5] = ["critical", "serious", "moderate", "minor", "bogus"];
const STATUSES: [&str; 5] = ["pass", "fail", "warning", "error", "unsure"];
const PRIORITIES: [&str; 5] = ["critical", "high", "medium", "low", "urgent"];

fn automated(passes: usize, impacts: &[usize]) -> RawAutomatedResults {
    serde_json::from_value(json!({
        "passes": (0..passes).map(|i| json!({"id": format!("pass-{}", i)})).collect::<Vec<_>>(),
        "violations": impacts
            .iter()
            .enumerate()
            .map(|(i, impact)| json!({"id": format!("rule-{}", i), "impact": IMPACTS[*impact]}))
            .collect::<Vec<_>>(),
    }))
    .unwrap()
}

fn manual(verdicts: &[(usize, usize, f64)]) -> RawManualResults {
    verdicts
        .iter()
        .enumerate()
        .map(|(i, (status, priority, confidence))| {
            let record: Value = json!({
                "status": STATUSES[*status],
                "priority": PRIORITIES[*priority],
                "confidence": confidence,
            });
            (format!("9.{}.{}", i / 10, i % 10), record)
        })
        .collect()
}

fn input(
    automated_part: Option<(usize, Vec<usize>)>,
    manual_part: Option<Vec<(usize, usize, f64)>>,
) -> AnalysisInput {
    AnalysisInput {
        meta: RunMeta::new("https://example.org", "2026-10-18T09:00:00Z", &[WcagLevel::A]),
        automated: automated_part.map(|(passes, impacts)| automated(passes, &impacts)),
        manual: manual_part.map(|verdicts| manual(&verdicts)),
    }
}

fn verdict_strategy() -> impl Strategy<Value = (usize, usize, f64)> {
    (0..STATUSES.len(), 0..PRIORITIES.len(), -2.0f64..3.0)
}

proptest! {
    #[test]
    fn test_score_is_bounded(
        automated_part in proptest::option::of(
            (0usize..30, prop::collection::vec(0..IMPACTS.len(), 0..30))
        ),
        manual_part in proptest::option::of(prop::collection::vec(verdict_strategy(), 0..30)),
    ) {
        let report = build_report(&input(automated_part, manual_part));
        prop_assert!(report.compliance_score <= 100);
    }

    #[test]
    fn test_recommendations_sorted_by_priority(
        impacts in prop::collection::vec(0..IMPACTS.len(), 0..20),
        verdicts in prop::collection::vec(verdict_strategy(), 0..20),
    ) {
        let report = build_report(&input(Some((3, impacts)), Some(verdicts)));
        let priorities: Vec<_> = report.recommendations.iter().map(|r| r.priority()).collect();
        prop_assert!(priorities.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_confidence_is_clamped(
        verdicts in prop::collection::vec(verdict_strategy(), 1..20),
    ) {
        let report = build_report(&input(None, Some(verdicts)));
        let manual = report.manual_assessment.details.expect("manual section");
        prop_assert!(manual
            .detailed_results
            .iter()
            .all(|v| (0.0..=1.0).contains(&v.confidence)));
    }

    #[test]
    fn test_build_is_deterministic(
        impacts in prop::collection::vec(0..IMPACTS.len(), 0..10),
        verdicts in prop::collection::vec(verdict_strategy(), 0..10),
    ) {
        let first = build_report(&input(Some((2, impacts.clone())), Some(verdicts.clone())));
        let second = build_report(&input(Some((2, impacts)), Some(verdicts)));
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
