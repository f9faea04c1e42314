use crate::checks::utils;
use crate::model::{Document, Node};
use crate::policy::EffectiveConfig;
use repoguard_types::{ids, Finding};
use serde_json::json;

/// Substring heuristic: a required status check counts as a security gate when
/// its context contains one of these, case-insensitive.
const SECURITY_CONTEXTS: [&str; 3] = ["codeql", "security-scan", "security/codeql"];

pub fn run(doc: &Document, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = cfg.check_policy(ids::CHECK_RULESET_SECURITY_CHECKS) else {
        return;
    };

    let Some(rules) = doc.root.get("rules").and_then(Node::as_sequence) else {
        return;
    };

    let name = doc
        .root
        .get("name")
        .and_then(Node::as_str)
        .unwrap_or_default()
        .to_lowercase();

    let mut has_status_checks = false;
    for rule in rules {
        if rule.get("type").and_then(Node::as_str) != Some("required_status_checks") {
            continue;
        }
        has_status_checks = true;

        let contexts: Vec<&str> = rule
            .get("parameters")
            .and_then(|p| p.get("required_status_checks"))
            .and_then(Node::as_sequence)
            .unwrap_or_default()
            .iter()
            .filter_map(|check| check.get("context").and_then(Node::as_str))
            .collect();

        let has_security = contexts.iter().any(|context| {
            let context = context.to_lowercase();
            SECURITY_CONTEXTS.iter().any(|ctx| context.contains(ctx))
        });

        if !has_security && name.contains("main") {
            out.push(Finding {
                severity: policy.severity,
                check_id: ids::CHECK_RULESET_SECURITY_CHECKS.to_string(),
                code: ids::CODE_MISSING_SECURITY_CONTEXT.to_string(),
                message: "Main branch protection should include security checks".to_string(),
                location: utils::doc_location(&doc.path),
                help: Some(
                    "Require a security scan context (e.g. CodeQL) among the status checks."
                        .to_string(),
                ),
                fingerprint: None,
                data: json!({ "contexts": contexts }),
            });
        }
    }

    if !has_status_checks && doc.root.get("target").and_then(Node::as_str) == Some("branch") {
        out.push(Finding {
            severity: policy.severity,
            check_id: ids::CHECK_RULESET_SECURITY_CHECKS.to_string(),
            code: ids::CODE_MISSING_STATUS_CHECKS.to_string(),
            message: "Branch protection should include status checks".to_string(),
            location: utils::doc_location(&doc.path),
            help: Some("Add a 'required_status_checks' rule to the ruleset.".to_string()),
            fingerprint: None,
            data: serde_json::Value::Null,
        });
    }
}
