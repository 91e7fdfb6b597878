//! Uncertainty scoring: a confidence discount derived from known sources
//! of snapshot incompleteness.

use snapvet_types::{
    Uncertainty, UNCERTAINTY_BASELINE, UNCERTAINTY_COVERAGE_INCREMENT,
    UNCERTAINTY_FILTER_INCREMENT, UNCERTAINTY_MAX, UNCERTAINTY_NOTE, UNCERTAINTY_NO_DRIVERS,
    UNCERTAINTY_REDUCED_CONTEXT_INCREMENT,
};

use crate::doc::{is_truthy, SnapshotDoc};

pub fn assess(doc: &SnapshotDoc) -> Uncertainty {
    let mut score = UNCERTAINTY_BASELINE;
    let mut causes = Vec::new();

    if doc
        .f64_at(&["coverage", "coverage_pct"])
        .is_some_and(|cov| cov < 100.0)
    {
        score += UNCERTAINTY_COVERAGE_INCREMENT;
        causes.push("Coverage below 100%: the snapshot is incomplete (blind spots).".to_string());
    }

    // Dynamic truthiness on purpose: a filter set to a list or a number
    // still skews the snapshot, even though no filter *finding* fires.
    let filters_active = ["path_filter", "ext_filter"].iter().any(|&key| {
        doc.value_at(&["meta", "filters", key])
            .is_some_and(is_truthy)
    });
    if filters_active {
        score += UNCERTAINTY_FILTER_INCREMENT;
        causes.push("Filters active: structural findings may be skewed.".to_string());
    }

    if doc.bool_at(&["meta", "plan_only"]) == Some(true)
        || doc.bool_at(&["meta", "code_only"]) == Some(true)
    {
        score += UNCERTAINTY_REDUCED_CONTEXT_INCREMENT;
        causes.push("plan_only/code_only: semantic context is partially missing.".to_string());
    }

    if causes.is_empty() {
        causes.push(UNCERTAINTY_NO_DRIVERS.to_string());
    }

    Uncertainty {
        score: score.clamp(0.0, UNCERTAINTY_MAX),
        causes,
        note: UNCERTAINTY_NOTE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> SnapshotDoc {
        SnapshotDoc::new(value).expect("test document must be an object")
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn baseline_with_sentinel_cause_for_empty_document() {
        let u = assess(&doc(json!({})));
        assert!(close(u.score, UNCERTAINTY_BASELINE));
        assert_eq!(u.causes, vec![UNCERTAINTY_NO_DRIVERS.to_string()]);
        assert_eq!(u.note, UNCERTAINTY_NOTE);
    }

    #[test]
    fn full_coverage_adds_nothing() {
        let u = assess(&doc(json!({"coverage": {"coverage_pct": 100}})));
        assert!(close(u.score, UNCERTAINTY_BASELINE));
    }

    #[test]
    fn each_driver_adds_its_increment() {
        let u = assess(&doc(json!({"coverage": {"coverage_pct": 99.5}})));
        assert!(close(u.score, UNCERTAINTY_BASELINE + UNCERTAINTY_COVERAGE_INCREMENT));
        assert_eq!(u.causes.len(), 1);

        let u = assess(&doc(json!({"meta": {"filters": {"ext_filter": ".rs"}}})));
        assert!(close(u.score, UNCERTAINTY_BASELINE + UNCERTAINTY_FILTER_INCREMENT));

        let u = assess(&doc(json!({"meta": {"code_only": true}})));
        assert!(close(
            u.score,
            UNCERTAINTY_BASELINE + UNCERTAINTY_REDUCED_CONTEXT_INCREMENT
        ));
    }

    #[test]
    fn all_drivers_stack() {
        let u = assess(&doc(json!({
            "coverage": {"coverage_pct": 40},
            "meta": {"filters": {"path_filter": "src/"}, "plan_only": true},
        })));
        assert!(close(
            u.score,
            UNCERTAINTY_BASELINE
                + UNCERTAINTY_COVERAGE_INCREMENT
                + UNCERTAINTY_FILTER_INCREMENT
                + UNCERTAINTY_REDUCED_CONTEXT_INCREMENT
        ));
        assert_eq!(u.causes.len(), 3);
    }

    #[test]
    fn truthy_non_string_filter_counts_as_driver() {
        let u = assess(&doc(json!({"meta": {"filters": {"path_filter": ["src/"]}}})));
        assert!(close(u.score, UNCERTAINTY_BASELINE + UNCERTAINTY_FILTER_INCREMENT));

        let u = assess(&doc(json!({"meta": {"filters": {"path_filter": ""}}})));
        assert!(close(u.score, UNCERTAINTY_BASELINE));
    }

    #[test]
    fn non_boolean_plan_only_is_not_explicitly_true() {
        let u = assess(&doc(json!({"meta": {"plan_only": "yes"}})));
        assert!(close(u.score, UNCERTAINTY_BASELINE));
    }

    proptest! {
        /// Score stays in [0, 0.95] and causes is never empty, for any
        /// combination of drivers.
        #[test]
        fn score_bounds_and_causes_invariant(
            coverage in proptest::option::of(-1000.0f64..1000.0),
            path_filter in proptest::option::of(".{0,12}"),
            plan_only in proptest::option::of(proptest::bool::ANY),
            code_only in proptest::option::of(proptest::bool::ANY),
        ) {
            let mut meta = serde_json::Map::new();
            if let Some(pf) = path_filter {
                meta.insert("filters".into(), json!({"path_filter": pf}));
            }
            if let Some(p) = plan_only {
                meta.insert("plan_only".into(), json!(p));
            }
            if let Some(c) = code_only {
                meta.insert("code_only".into(), json!(c));
            }
            let mut root = serde_json::Map::new();
            root.insert("meta".into(), serde_json::Value::Object(meta));
            if let Some(cov) = coverage {
                root.insert("coverage".into(), json!({"coverage_pct": cov}));
            }

            let u = assess(&doc(serde_json::Value::Object(root)));
            prop_assert!(u.score >= 0.0);
            prop_assert!(u.score <= UNCERTAINTY_MAX);
            prop_assert!(!u.causes.is_empty());
        }
    }
}
