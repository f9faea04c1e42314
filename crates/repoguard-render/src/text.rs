use repoguard_types::{RunSummary, Severity, SeverityCounts};

const RULE: &str = "============================================================";
const SUBRULE: &str = "------------------------------------------------------------";

/// Render the per-document sections and trailing summary table printed to the
/// terminal. One section per scanned document, findings in evaluation order.
pub fn render_text(summary: &RunSummary, validator: &str) -> String {
    let mut out = String::new();

    out.push_str(&format!("Validating {validator}...\n"));
    out.push_str(RULE);
    out.push('\n');

    for result in &summary.results {
        out.push_str(&format!("\nChecking {}\n", result.path.as_str()));
        out.push_str(SUBRULE);
        out.push('\n');

        if result.findings.is_empty() {
            out.push_str("  ok: no issues found\n");
            continue;
        }

        for finding in &result.findings {
            let marker = severity_marker(finding.severity);
            let line_suffix = finding
                .location
                .as_ref()
                .and_then(|loc| loc.line)
                .map(|line| format!(" (line {line})"))
                .unwrap_or_default();
            out.push_str(&format!("  {marker} {}{line_suffix}\n", finding.message));
        }
    }

    out.push_str(&format!("\nSUMMARY\n{RULE}\n"));
    for result in &summary.results {
        let counts = SeverityCounts::from_findings(&result.findings);
        let status = if result.findings.is_empty() {
            "ok  "
        } else if counts.error > 0 {
            "FAIL"
        } else {
            "WARN"
        };
        out.push_str(&format!(
            "{status} {}: {} issue(s)\n",
            result.path.as_str(),
            result.findings.len()
        ));
    }
    out.push_str(&format!(
        "\nTotal: {} issue(s) across {} file(s)\n",
        summary.total_finding_count(),
        summary.results.len()
    ));

    out
}

fn severity_marker(severity: Severity) -> &'static str {
    match severity {
        Severity::Warning => "[WARN] ",
        Severity::Error => "[ERROR]",
    }
}
