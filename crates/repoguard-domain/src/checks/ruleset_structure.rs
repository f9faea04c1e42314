use crate::checks::utils;
use crate::model::{Document, Node};
use crate::policy::EffectiveConfig;
use repoguard_types::{ids, Finding};
use serde_json::json;

const REQUIRED_FIELDS: [&str; 4] = ["name", "target", "enforcement", "rules"];
const VALID_TARGETS: [&str; 2] = ["branch", "tag"];
const VALID_ENFORCEMENTS: [&str; 3] = ["active", "evaluate", "disabled"];

pub fn run(doc: &Document, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = cfg.check_policy(ids::CHECK_RULESET_STRUCTURE) else {
        return;
    };

    for field in REQUIRED_FIELDS {
        if !doc.root.contains_key(field) {
            out.push(Finding {
                severity: policy.severity,
                check_id: ids::CHECK_RULESET_STRUCTURE.to_string(),
                code: ids::CODE_MISSING_REQUIRED_FIELD.to_string(),
                message: format!("Missing required field: {field}"),
                location: utils::doc_location(&doc.path),
                help: Some(format!("Add a '{field}' entry to the ruleset.")),
                fingerprint: None,
                data: json!({ "field": field }),
            });
        }
    }

    if let Some(target) = doc.root.get("target").and_then(Node::as_str) {
        if !VALID_TARGETS.contains(&target) {
            out.push(Finding {
                severity: policy.severity,
                check_id: ids::CHECK_RULESET_STRUCTURE.to_string(),
                code: ids::CODE_INVALID_TARGET.to_string(),
                message: format!("Invalid target: {target}. Must be 'branch' or 'tag'"),
                location: utils::doc_location(&doc.path),
                help: None,
                fingerprint: None,
                data: json!({ "target": target }),
            });
        }
    }

    if let Some(enforcement) = doc.root.get("enforcement").and_then(Node::as_str) {
        if !VALID_ENFORCEMENTS.contains(&enforcement) {
            out.push(Finding {
                severity: policy.severity,
                check_id: ids::CHECK_RULESET_STRUCTURE.to_string(),
                code: ids::CODE_INVALID_ENFORCEMENT.to_string(),
                message: format!("Invalid enforcement: {enforcement}"),
                location: utils::doc_location(&doc.path),
                help: Some("Use one of 'active', 'evaluate', or 'disabled'.".to_string()),
                fingerprint: None,
                data: json!({ "enforcement": enforcement }),
            });
        }
    }

    if let Some(rules) = doc.root.get("rules") {
        match rules.as_sequence() {
            None => out.push(Finding {
                severity: policy.severity,
                check_id: ids::CHECK_RULESET_STRUCTURE.to_string(),
                code: ids::CODE_RULES_NOT_ARRAY.to_string(),
                message: "Rules must be an array".to_string(),
                location: utils::doc_location(&doc.path),
                help: None,
                fingerprint: None,
                data: serde_json::Value::Null,
            }),
            Some([]) => out.push(Finding {
                severity: policy.severity,
                check_id: ids::CHECK_RULESET_STRUCTURE.to_string(),
                code: ids::CODE_RULES_EMPTY.to_string(),
                message: "Rules array is empty".to_string(),
                location: utils::doc_location(&doc.path),
                help: Some("A ruleset with no rules protects nothing.".to_string()),
                fingerprint: None,
                data: serde_json::Value::Null,
            }),
            Some(_) => {}
        }
    }
}
