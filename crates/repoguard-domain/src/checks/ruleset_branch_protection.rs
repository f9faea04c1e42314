use crate::checks::utils;
use crate::model::{Document, Node};
use crate::policy::EffectiveConfig;
use repoguard_types::{ids, Finding};
use serde_json::json;

/// Rule types every protected main/master/release branch must carry.
const CRITICAL_RULES: [&str; 3] = ["deletion", "non_fast_forward", "pull_request"];

const MIN_MAIN_REVIEWS: i64 = 2;

pub fn run(doc: &Document, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = cfg.check_policy(ids::CHECK_RULESET_BRANCH_PROTECTION) else {
        return;
    };

    if doc.root.get("target").and_then(Node::as_str) != Some("branch") {
        return;
    }

    let name = doc
        .root
        .get("name")
        .and_then(Node::as_str)
        .unwrap_or_default()
        .to_lowercase();
    let is_main = name.contains("main") || name.contains("master");
    let is_release = name.contains("release");

    if !is_main && !is_release {
        return;
    }

    let rules = doc
        .root
        .get("rules")
        .and_then(Node::as_sequence)
        .unwrap_or_default();

    let rule_types: Vec<&str> = rules
        .iter()
        .filter_map(|rule| rule.get("type").and_then(Node::as_str))
        .collect();

    let missing: Vec<&str> = CRITICAL_RULES
        .iter()
        .filter(|critical| !rule_types.contains(critical))
        .copied()
        .collect();

    if !missing.is_empty() {
        out.push(Finding {
            severity: policy.severity,
            check_id: ids::CHECK_RULESET_BRANCH_PROTECTION.to_string(),
            code: ids::CODE_MISSING_CRITICAL_RULES.to_string(),
            message: format!(
                "Critical protection missing for {name}: {}",
                missing.join(", ")
            ),
            location: utils::doc_location(&doc.path),
            help: Some("Add the missing rule types to the ruleset.".to_string()),
            fingerprint: None,
            data: json!({ "missing": missing }),
        });
    }

    if !is_main {
        return;
    }

    for rule in rules {
        if rule.get("type").and_then(Node::as_str) != Some("pull_request") {
            continue;
        }
        let review_count = rule
            .get("parameters")
            .and_then(|p| p.get("required_approving_review_count"))
            .and_then(Node::as_i64)
            .unwrap_or(0);

        if review_count < MIN_MAIN_REVIEWS {
            out.push(Finding {
                severity: policy.severity,
                check_id: ids::CHECK_RULESET_BRANCH_PROTECTION.to_string(),
                code: ids::CODE_INSUFFICIENT_REVIEW_COUNT.to_string(),
                message: "Main branch should require at least 2 approving reviews".to_string(),
                location: utils::doc_location(&doc.path),
                help: Some(
                    "Set parameters.required_approving_review_count to 2 or more.".to_string(),
                ),
                fingerprint: None,
                data: json!({ "required_approving_review_count": review_count }),
            });
        }
    }
}
