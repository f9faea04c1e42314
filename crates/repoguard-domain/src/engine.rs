use crate::checks;
use crate::model::Document;
use crate::policy::{EffectiveConfig, FailOn};
use repoguard_types::{ids, Finding, Location, Severity, Verdict};

/// Run the check catalog against one document.
///
/// Findings are returned in catalog declaration order; checks are independent
/// and never short-circuit each other. Evaluating the same document twice
/// yields an identical sequence.
pub fn evaluate(doc: &Document, cfg: &EffectiveConfig) -> Vec<Finding> {
    let mut findings: Vec<Finding> = Vec::new();

    if doc.root.is_null() {
        // Nothing to walk; the empty document is the finding.
        findings.push(Finding {
            severity: Severity::Error,
            check_id: ids::CHECK_DOC_PARSE.to_string(),
            code: ids::CODE_EMPTY_DOCUMENT.to_string(),
            message: format!("Empty or invalid {} file", doc.kind.as_str()),
            location: Some(Location {
                path: doc.path.clone(),
                line: None,
                col: None,
            }),
            help: Some("Add content to the file or delete it.".to_string()),
            fingerprint: None,
            data: serde_json::Value::Null,
        });
        return findings;
    }

    checks::run_all(doc, cfg, &mut findings);

    findings
}

/// Collapse findings into a run verdict.
pub fn compute_verdict(findings: &[Finding], fail_on: FailOn) -> Verdict {
    let has_error = findings.iter().any(|f| f.severity == Severity::Error);
    if has_error {
        return Verdict::Fail;
    }

    let has_warn = findings.iter().any(|f| f.severity == Severity::Warning);
    if has_warn {
        return match fail_on {
            FailOn::Warning => Verdict::Fail,
            FailOn::Error => Verdict::Warn,
        };
    }

    Verdict::Pass
}
