//! The `check` use case: scan a directory, evaluate every document, produce a report.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use repoguard_domain::model::DocumentKind;
use repoguard_domain::{compute_verdict, evaluate};
use repoguard_repo::{load_document, scan_documents, LoadError};
use repoguard_settings::{Overrides, ResolvedConfig};
use repoguard_types::{
    ids, EvaluationResult, Finding, Location, RepoguardReport, RunSummary, Severity, Verdict,
};
use time::OffsetDateTime;

use crate::report::build_report;

/// Which document family a run validates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Validator {
    Rulesets,
    Workflows,
}

impl Validator {
    pub fn as_str(self) -> &'static str {
        match self {
            Validator::Rulesets => "rulesets",
            Validator::Workflows => "workflows",
        }
    }

    pub fn default_dir(self) -> &'static str {
        match self {
            Validator::Rulesets => ".github/rulesets",
            Validator::Workflows => ".github/workflows",
        }
    }

    fn kind(self) -> DocumentKind {
        match self {
            Validator::Rulesets => DocumentKind::Ruleset,
            Validator::Workflows => DocumentKind::Workflow,
        }
    }
}

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Repository root path.
    pub repo_root: &'a Utf8Path,
    /// Scan directory override; resolved against `repo_root` when relative.
    pub dir: Option<&'a Utf8Path>,
    pub validator: Validator,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    /// Per-document results, in scan order.
    pub summary: RunSummary,
    /// The generated report artifact.
    pub report: RepoguardReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run one validator: resolve config, scan, load and evaluate every document.
///
/// A document that fails to parse stays in the summary with a single error
/// finding; the rest of the directory is still evaluated. A missing scan
/// directory is a hard error. An empty workflows directory is also a hard
/// error, while an empty rulesets directory yields a clean, empty run.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        repoguard_settings::RepoguardConfigV1::default()
    } else {
        repoguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };
    let resolved = repoguard_settings::resolve_config(cfg, input.overrides.clone())
        .context("resolve config")?;

    let scan_dir = resolve_scan_dir(input.repo_root, input.dir, input.validator);
    let kind = input.validator.kind();

    let names = scan_documents(&scan_dir, kind)?;
    if names.is_empty() && input.validator == Validator::Workflows {
        anyhow::bail!("no workflow files found in {scan_dir}");
    }

    let mut summary = RunSummary::default();
    for name in &names {
        match load_document(&scan_dir, name, kind) {
            Ok(doc) => {
                let findings = evaluate(&doc, &resolved.effective);
                summary.results.push(EvaluationResult {
                    path: name.clone(),
                    findings,
                    parse_error: None,
                });
            }
            Err(LoadError::Parse { message, .. }) => {
                summary.results.push(EvaluationResult {
                    path: name.clone(),
                    findings: vec![parse_error_finding(name, kind, &message)],
                    parse_error: Some(message),
                });
            }
            Err(err @ LoadError::Io { .. }) => {
                return Err(err).with_context(|| format!("load {}", name.as_str()));
            }
        }
    }

    let all_findings: Vec<Finding> = summary.all_findings().cloned().collect();
    let verdict = compute_verdict(&all_findings, resolved.effective.fail_on);

    let finished_at = OffsetDateTime::now_utc();
    let report = build_report(
        input.validator.as_str(),
        started_at,
        finished_at,
        verdict,
        all_findings,
        summary.results.len() as u32,
        resolved.effective.max_findings,
    );

    Ok(CheckOutput {
        summary,
        report,
        resolved_config: resolved,
    })
}

fn resolve_scan_dir(
    repo_root: &Utf8Path,
    dir: Option<&Utf8Path>,
    validator: Validator,
) -> Utf8PathBuf {
    match dir {
        Some(d) if d.is_absolute() => d.to_owned(),
        Some(d) => repo_root.join(d),
        None => repo_root.join(validator.default_dir()),
    }
}

fn parse_error_finding(
    path: &repoguard_types::DocPath,
    kind: DocumentKind,
    message: &str,
) -> Finding {
    let message = match kind {
        DocumentKind::Ruleset => format!("Invalid JSON: {message}"),
        DocumentKind::Workflow => format!("YAML parsing error: {message}"),
    };
    Finding {
        severity: Severity::Error,
        check_id: ids::CHECK_DOC_PARSE.to_string(),
        code: ids::CODE_PARSE_ERROR.to_string(),
        message,
        location: Some(Location {
            path: path.clone(),
            line: None,
            col: None,
        }),
        help: Some("Fix the syntax error and re-run.".to_string()),
        fingerprint: None,
        data: serde_json::Value::Null,
    }
}

/// Map verdict to exit code: 0 = pass/warn, 1 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Warn => 0,
        Verdict::Fail => 1,
    }
}
