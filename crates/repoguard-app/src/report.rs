use anyhow::Context;
use camino::Utf8Path;
use repoguard_types::{
    ids, Finding, RepoguardData, RepoguardReport, Severity, ToolMeta, Verdict, SCHEMA_REPORT_V1,
};
use time::OffsetDateTime;

pub(crate) fn build_report(
    validator: &str,
    started_at: OffsetDateTime,
    finished_at: OffsetDateTime,
    verdict: Verdict,
    findings: Vec<Finding>,
    documents_scanned: u32,
    max_findings: usize,
) -> RepoguardReport {
    let total = findings.len() as u32;

    let mut emitted = findings;
    let mut truncated_reason: Option<String> = None;
    if emitted.len() > max_findings {
        emitted.truncate(max_findings);
        truncated_reason = Some(format!("findings truncated to max_findings={max_findings}"));
    }

    RepoguardReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at,
        finished_at,
        verdict,
        data: RepoguardData {
            validator: validator.to_string(),
            documents_scanned,
            findings_total: total,
            findings_emitted: emitted.len() as u32,
            truncated_reason,
        },
        findings: emitted,
    }
}

/// Report emitted when the tool itself fails (missing directory, unreadable
/// file, bad config). Keeps the artifact contract intact on the error path.
pub fn runtime_error_report(validator: &str, message: &str) -> RepoguardReport {
    let now = OffsetDateTime::now_utc();
    RepoguardReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at: now,
        finished_at: now,
        verdict: Verdict::Fail,
        findings: vec![Finding {
            severity: Severity::Error,
            check_id: ids::CHECK_TOOL_RUNTIME.to_string(),
            code: ids::CODE_RUNTIME_ERROR.to_string(),
            message: message.to_string(),
            location: None,
            help: Some("Fix the tool error and re-run repoguard.".to_string()),
            fingerprint: None,
            data: serde_json::Value::Null,
        }],
        data: RepoguardData {
            validator: validator.to_string(),
            documents_scanned: 0,
            findings_total: 1,
            findings_emitted: 1,
            truncated_reason: None,
        },
    }
}

pub fn serialize_report(report: &RepoguardReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn write_report(path: &Utf8Path, report: &RepoguardReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report)?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn tool_meta() -> ToolMeta {
    ToolMeta {
        name: "repoguard".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}
