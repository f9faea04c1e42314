use repoguard_types::{RepoguardReport, Severity, Verdict};

pub fn render_markdown(report: &RepoguardReport) -> String {
    let mut out = String::new();

    out.push_str("# Repoguard report\n\n");
    let verdict = match report.verdict {
        Verdict::Pass => "PASS",
        Verdict::Warn => "WARN",
        Verdict::Fail => "FAIL",
    };
    out.push_str(&format!(
        "- Validator: {}\n- Verdict: **{}**\n- Findings: {} (emitted) / {} (total)\n\n",
        report.data.validator, verdict, report.data.findings_emitted, report.data.findings_total
    ));

    if let Some(r) = &report.data.truncated_reason {
        out.push_str(&format!("> Note: {}\n\n", r));
    }

    if report.findings.is_empty() {
        out.push_str("No findings.\n");
        return out;
    }

    out.push_str("## Findings\n\n");

    for f in &report.findings {
        let sev = match f.severity {
            Severity::Warning => "WARN",
            Severity::Error => "ERROR",
        };

        if let Some(loc) = &f.location {
            let line = loc.line.map(|l| format!(":{l}")).unwrap_or_default();
            out.push_str(&format!(
                "- [{}] `{}` / `{}` - {} (`{}`{})\n",
                sev,
                f.check_id,
                f.code,
                f.message,
                loc.path.as_str(),
                line
            ));
        } else {
            out.push_str(&format!(
                "- [{}] `{}` / `{}` - {}\n",
                sev, f.check_id, f.code, f.message
            ));
        }

        if let Some(help) = &f.help {
            out.push_str(&format!("  - help: {}\n", help));
        }
    }

    out
}
