//! Data types (report DTOs) for snapvet.
//!
//! This crate is intentionally "dumb": pure DTOs with serde + schemars,
//! plus the frozen vocabulary every other crate agrees on.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ── Schema Identifiers ─────────────────────────────────────────
pub const REPORT_SCHEMA_V1: &str = "snapvet.report.v1";

/// Agent identifier; also the artifact suffix (`<stem>__<AGENT>.md`).
pub const AGENT: &str = "snapvet.coherence";

// ── Frozen Vocabulary ──────────────────────────────────────────
// Contract pair a well-formed merge snapshot declares.
pub const EXPECTED_CONTRACT: &str = "wc-merge-agent";
pub const EXPECTED_CONTRACT_VERSION: &str = "v1";

// Rule codes: `SNAPVET-` prefix + 3-digit rule number.
// 00x = marker rules, 01x = metadata sanity rules.
pub const CODE_NO_AI_CONTEXT: &str = "SNAPVET-001";
pub const CODE_NO_WGX: &str = "SNAPVET-002";
pub const CODE_NO_CONTRACTS: &str = "SNAPVET-003";
pub const CODE_NO_DOCS: &str = "SNAPVET-004";
pub const CODE_NO_WORKFLOWS: &str = "SNAPVET-005";
pub const CODE_WRONG_CONTRACT: &str = "SNAPVET-010";
pub const CODE_LOW_COVERAGE: &str = "SNAPVET-011";
pub const CODE_TRUNCATION_ACTIVE: &str = "SNAPVET-012";
pub const CODE_PATH_FILTER: &str = "SNAPVET-013";
pub const CODE_EXT_FILTER: &str = "SNAPVET-014";
pub const CODE_DUPLICATE_PATHS: &str = "SNAPVET-015";
pub const CODE_REDUCED_PROFILE: &str = "SNAPVET-016";
pub const CODE_NO_SCOPE: &str = "SNAPVET-017";

/// Profiles that trade blind-spot risk for speed (matched case-insensitively).
pub const REDUCED_PROFILES: &[&str] = &["dev", "min"];

/// Coverage below this percentage fires the low-coverage finding.
pub const COVERAGE_WARN_THRESHOLD: f64 = 95.0;

/// Cap on duplicate paths listed in a single finding detail.
pub const DUPLICATE_LIST_CAP: usize = 50;

// Uncertainty model weights.
pub const UNCERTAINTY_BASELINE: f64 = 0.18;
pub const UNCERTAINTY_COVERAGE_INCREMENT: f64 = 0.10;
pub const UNCERTAINTY_FILTER_INCREMENT: f64 = 0.08;
pub const UNCERTAINTY_REDUCED_CONTEXT_INCREMENT: f64 = 0.12;
pub const UNCERTAINTY_MAX: f64 = 0.95;

/// Sentinel cause when no uncertainty driver fired. `causes` is never empty.
pub const UNCERTAINTY_NO_DRIVERS: &str =
    "No dominant uncertainty drivers detected (but a snapshot is still only a snapshot).";

/// Fixed note attached to every assessment.
pub const UNCERTAINTY_NOTE: &str = "Uncertainty is surfaced deliberately: it keeps \
     snapshot findings from being mistaken for live truth.";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warn,
    Crit,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Crit => "crit",
        }
    }
}

/// One graded observation about the snapshot's structure or metadata.
///
/// Findings are pure derivations: created once per evaluation, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    pub severity: Severity,
    /// Stable rule code, one of the `CODE_*` constants.
    pub code: String,
    /// Short human label.
    pub title: String,
    /// Explanatory sentence, may embed values from the document.
    pub detail: String,
}

/// How much the findings should be discounted given snapshot incompleteness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Uncertainty {
    /// Clamped to `[0, UNCERTAINTY_MAX]`.
    pub score: f64,
    /// Human-readable drivers; never empty (sentinel otherwise).
    pub causes: Vec<String>,
    pub note: String,
}

/// The single output record of an evaluation.
///
/// A report exclusively owns its findings and its uncertainty assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Report {
    /// Schema identifier, always [`REPORT_SCHEMA_V1`].
    pub schema: String,
    /// RFC 3339 UTC timestamp of the evaluation.
    pub generated_at: String,
    /// Always [`AGENT`].
    pub agent: String,
    pub input_path: String,
    /// Echo of the document's `meta` mapping, or an empty object.
    pub meta: serde_json::Value,
    /// Declared scope, empty string when absent.
    pub scope: String,
    pub coverage_pct: Option<f64>,
    pub files_total: Option<i64>,
    pub findings: Vec<Finding>,
    pub uncertainty: Uncertainty,
}
