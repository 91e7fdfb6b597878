//! The two heuristic rule families.
//!
//! Each rule is a small pure function (document -> zero-or-one finding)
//! invoked in a fixed registered order. Rules never read each other's
//! output; malformed input data becomes evidence, not failure.

use std::collections::BTreeSet;

use snapvet_types::{
    Finding, Severity, CODE_DUPLICATE_PATHS, CODE_EXT_FILTER, CODE_LOW_COVERAGE,
    CODE_NO_AI_CONTEXT, CODE_NO_CONTRACTS, CODE_NO_DOCS, CODE_NO_SCOPE, CODE_NO_WGX,
    CODE_NO_WORKFLOWS, CODE_PATH_FILTER, CODE_REDUCED_PROFILE, CODE_TRUNCATION_ACTIVE,
    CODE_WRONG_CONTRACT, COVERAGE_WARN_THRESHOLD, DUPLICATE_LIST_CAP, EXPECTED_CONTRACT,
    EXPECTED_CONTRACT_VERSION, REDUCED_PROFILES,
};

use crate::doc::SnapshotDoc;

type MetaRule = fn(&SnapshotDoc) -> Option<Finding>;
type MarkerRule = fn(&BTreeSet<&str>) -> Option<Finding>;

/// Registered order doubles as render order within each severity bucket.
const META_RULES: &[MetaRule] = &[
    wrong_contract,
    low_coverage,
    truncation_active,
    path_filter_active,
    ext_filter_active,
    duplicate_paths,
    reduced_profile,
    missing_scope,
];

const MARKER_RULES: &[MarkerRule] = &[
    no_ai_context,
    no_wgx,
    no_contracts,
    no_docs,
    no_workflows,
];

pub fn run_meta_rules(doc: &SnapshotDoc) -> Vec<Finding> {
    META_RULES.iter().filter_map(|rule| rule(doc)).collect()
}

pub fn run_marker_rules(paths: &BTreeSet<&str>) -> Vec<Finding> {
    MARKER_RULES.iter().filter_map(|rule| rule(paths)).collect()
}

// ── Metadata sanity rules ──────────────────────────────────────

fn wrong_contract(doc: &SnapshotDoc) -> Option<Finding> {
    let contract = doc.str_at(&["meta", "contract"]);
    let version = doc.str_at(&["meta", "contract_version"]);
    if contract == Some(EXPECTED_CONTRACT) && version == Some(EXPECTED_CONTRACT_VERSION) {
        return None;
    }
    Some(Finding {
        severity: Severity::Crit,
        code: CODE_WRONG_CONTRACT.to_string(),
        title: "Unexpected merge contract".to_string(),
        detail: format!(
            "Expected {EXPECTED_CONTRACT}/{EXPECTED_CONTRACT_VERSION}, found: {}/{}. \
             The result is only partially interpretable under unknown contracts.",
            contract.unwrap_or("none"),
            version.unwrap_or("none"),
        ),
    })
}

fn low_coverage(doc: &SnapshotDoc) -> Option<Finding> {
    let coverage = doc.f64_at(&["coverage", "coverage_pct"])?;
    if coverage >= COVERAGE_WARN_THRESHOLD {
        return None;
    }
    Some(Finding {
        severity: Severity::Warn,
        code: CODE_LOW_COVERAGE.to_string(),
        title: "Coverage below 95%".to_string(),
        detail: format!(
            "Coverage {coverage}%: high chance of blind spots. \
             Findings are tendencies rather than statements."
        ),
    })
}

fn truncation_active(doc: &SnapshotDoc) -> Option<Finding> {
    // max_file_bytes = 0 means no per-file truncation.
    let max_file_bytes = doc.i64_at(&["meta", "max_file_bytes"])?;
    if max_file_bytes == 0 {
        return None;
    }
    Some(Finding {
        severity: Severity::Warn,
        code: CODE_TRUNCATION_ACTIVE.to_string(),
        title: "File truncation active (max_file_bytes != 0)".to_string(),
        detail: format!(
            "max_file_bytes={max_file_bytes}. Truncated files carry partial truths; \
             splitting the merge would be safer."
        ),
    })
}

fn path_filter_active(doc: &SnapshotDoc) -> Option<Finding> {
    let filter = doc.str_at(&["meta", "filters", "path_filter"])?;
    if filter.trim().is_empty() {
        return None;
    }
    Some(Finding {
        severity: Severity::Info,
        code: CODE_PATH_FILTER.to_string(),
        title: "Path filter active".to_string(),
        detail: format!(
            "path_filter=\"{filter}\". Markers may be absent because they fall \
             outside the scope, not because they are missing."
        ),
    })
}

fn ext_filter_active(doc: &SnapshotDoc) -> Option<Finding> {
    let filter = doc.str_at(&["meta", "filters", "ext_filter"])?;
    if filter.trim().is_empty() {
        return None;
    }
    Some(Finding {
        severity: Severity::Info,
        code: CODE_EXT_FILTER.to_string(),
        title: "Extension filter active".to_string(),
        detail: format!("ext_filter=\"{filter}\". Structural findings may be skewed."),
    })
}

fn duplicate_paths(doc: &SnapshotDoc) -> Option<Finding> {
    let mut seen = BTreeSet::new();
    let mut dups = BTreeSet::new();
    for path in doc.file_paths() {
        if !seen.insert(path) {
            dups.insert(path);
        }
    }
    if dups.is_empty() {
        return None;
    }

    let listed: Vec<&str> = dups.iter().copied().take(DUPLICATE_LIST_CAP).collect();
    let ellipsis = if dups.len() > DUPLICATE_LIST_CAP {
        " …"
    } else {
        ""
    };
    Some(Finding {
        severity: Severity::Crit,
        code: CODE_DUPLICATE_PATHS.to_string(),
        title: "Duplicate file paths in merge".to_string(),
        detail: format!(
            "The following paths appear more than once: {}{}",
            listed.join(", "),
            ellipsis
        ),
    })
}

fn reduced_profile(doc: &SnapshotDoc) -> Option<Finding> {
    let profile = doc.str_at(&["meta", "profile"])?;
    if !REDUCED_PROFILES.contains(&profile.to_lowercase().as_str()) {
        return None;
    }
    Some(Finding {
        severity: Severity::Info,
        code: CODE_REDUCED_PROFILE.to_string(),
        title: "Profile is not maximal".to_string(),
        detail: format!(
            "profile=\"{profile}\". For coherence checks a maximal profile is \
             usually better (fewer blind spots)."
        ),
    })
}

fn missing_scope(doc: &SnapshotDoc) -> Option<Finding> {
    if !doc.scope().trim().is_empty() {
        return None;
    }
    Some(Finding {
        severity: Severity::Warn,
        code: CODE_NO_SCOPE.to_string(),
        title: "Scope not declared".to_string(),
        detail: "scope is missing or empty. Ambiguity rises: is this a single-repo \
                 or a multi-repo snapshot?"
            .to_string(),
    })
}

// ── Expected-marker rules ──────────────────────────────────────
// The merge usually carries file paths only; directories show up
// indirectly as path prefixes.

fn has_prefix(paths: &BTreeSet<&str>, prefix: &str) -> bool {
    let wanted = format!("{}/", prefix.trim_end_matches('/'));
    paths.iter().any(|p| p.starts_with(&wanted))
}

fn no_ai_context(paths: &BTreeSet<&str>) -> Option<Finding> {
    if paths.contains(".ai-context.yml") || has_prefix(paths, ".ai-context.yml") {
        return None;
    }
    Some(Finding {
        severity: Severity::Warn,
        code: CODE_NO_AI_CONTEXT.to_string(),
        title: "No .ai-context.yml visible".to_string(),
        detail: "Fleet repositories use .ai-context.yml as an orientation anchor. \
                 It is missing here, or a filter excluded it."
            .to_string(),
    })
}

fn no_wgx(paths: &BTreeSet<&str>) -> Option<Finding> {
    // Deliberately prefix-only: an exact `.wgx` file path does not count.
    if has_prefix(paths, ".wgx") {
        return None;
    }
    Some(Finding {
        severity: Severity::Warn,
        code: CODE_NO_WGX.to_string(),
        title: "No .wgx/ visible".to_string(),
        detail: "WGX tooling is absent from the snapshot (or was filtered out). \
                 If the repository belongs to the fleet, this is a drift signal."
            .to_string(),
    })
}

fn no_contracts(paths: &BTreeSet<&str>) -> Option<Finding> {
    if has_prefix(paths, "contracts") {
        return None;
    }
    Some(Finding {
        severity: Severity::Info,
        code: CODE_NO_CONTRACTS.to_string(),
        title: "No contracts/ visible".to_string(),
        detail: "Not every repository needs contracts. For central repositories \
                 the absence can hint at semantic decoupling."
            .to_string(),
    })
}

fn no_docs(paths: &BTreeSet<&str>) -> Option<Finding> {
    if has_prefix(paths, "docs") || has_prefix(paths, "doc") {
        return None;
    }
    Some(Finding {
        severity: Severity::Info,
        code: CODE_NO_DOCS.to_string(),
        title: "No docs/ visible".to_string(),
        detail: "Documentation is absent from the snapshot (or was filtered out). \
                 Not wrong per se, but it raises integration risk."
            .to_string(),
    })
}

fn no_workflows(paths: &BTreeSet<&str>) -> Option<Finding> {
    if has_prefix(paths, ".github/workflows") {
        return None;
    }
    Some(Finding {
        severity: Severity::Info,
        code: CODE_NO_WORKFLOWS.to_string(),
        title: "No GitHub workflows visible".to_string(),
        detail: "No CI visible. For a production repository that can indicate \
                 technical debt, or the snapshot is heavily filtered."
            .to_string(),
    })
}
