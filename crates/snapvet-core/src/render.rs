//! Report rendering: markdown for humans, JSON mirror for machines.
//!
//! Both renderers are pure; they consume the report record and never
//! touch I/O.

use snapvet_types::{Finding, Report, Severity};

/// Sections render in descending urgency; findings keep their original
/// evaluation order inside each section.
const SECTIONS: &[(Severity, &str)] = &[
    (Severity::Crit, "Critical"),
    (Severity::Warn, "Warnings"),
    (Severity::Info, "Informational"),
];

pub fn render_markdown(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", report.agent));

    out.push_str(&format!("- generated_at: `{}`\n", report.generated_at));
    out.push_str(&format!("- input: `{}`\n", report.input_path));
    if !report.scope.is_empty() {
        out.push_str(&format!("- scope: `{}`\n", report.scope));
    }
    if let Some(coverage) = report.coverage_pct {
        out.push_str(&format!("- coverage_pct: `{coverage}`\n"));
    }
    if let Some(total) = report.files_total {
        out.push_str(&format!("- total_files(meta): `{total}`\n"));
    }
    out.push('\n');

    for (severity, title) in SECTIONS {
        let bucket: Vec<&Finding> = report
            .findings
            .iter()
            .filter(|f| f.severity == *severity)
            .collect();
        out.push_str(&format!("## {title} ({})\n", bucket.len()));
        if bucket.is_empty() {
            out.push_str("_None._\n\n");
            continue;
        }
        for f in bucket {
            out.push_str(&format!("- **{}** — {}\n", f.code, f.title));
            out.push_str(&format!("  - {}\n", f.detail));
        }
        out.push('\n');
    }

    out.push_str("## Uncertainty\n");
    out.push_str(&format!("- score: `{}`\n", report.uncertainty.score));
    out.push_str("- causes:\n");
    for cause in &report.uncertainty.causes {
        out.push_str(&format!("  - {cause}\n"));
    }
    out.push_str(&format!("- note: {}\n\n", report.uncertainty.note));

    out.push_str("## Synthesis\n");
    out.push_str("Snapshot findings are maps, not court records.\n\n");
    out.push_str("## Closing note\n");
    out.push_str(
        "If every merge were perfectly coherent this vetter would have nothing to do, \
         and the fleet would probably be dead. Congratulations on the living disorder.\n",
    );

    out
}

/// Serializes the report record as-is; parses back into an identical
/// [`Report`].
pub fn render_json(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
