//! Evaluation orchestration: document in, report out.

use std::collections::BTreeSet;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use snapvet_types::{Report, AGENT, REPORT_SCHEMA_V1};

use crate::doc::{ShapeError, SnapshotDoc};
use crate::{rules, uncertainty};

/// Builds the report for one snapshot. Pure and deterministic: same
/// document + same `generated_at` yields a bit-identical report.
///
/// Metadata-sanity findings come first, then marker findings, each family
/// in its registered rule order.
pub fn evaluate(doc: &SnapshotDoc, input_path: &str, generated_at: DateTime<Utc>) -> Report {
    let file_paths = doc.file_paths();
    let distinct: BTreeSet<&str> = file_paths.iter().copied().collect();

    let mut findings = rules::run_meta_rules(doc);
    findings.extend(rules::run_marker_rules(&distinct));

    Report {
        schema: REPORT_SCHEMA_V1.to_string(),
        generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Micros, true),
        agent: AGENT.to_string(),
        input_path: input_path.to_string(),
        meta: doc.meta(),
        scope: doc.scope().to_string(),
        coverage_pct: doc.f64_at(&["coverage", "coverage_pct"]),
        files_total: doc.i64_at(&["meta", "total_files"]),
        findings,
        uncertainty: uncertainty::assess(doc),
    }
}

/// Convenience for callers holding a raw parsed value: checks the root
/// shape, then evaluates.
pub fn evaluate_value(
    value: Value,
    input_path: &str,
    generated_at: DateTime<Utc>,
) -> Result<Report, ShapeError> {
    let doc = SnapshotDoc::new(value)?;
    Ok(evaluate(&doc, input_path, generated_at))
}
