use crate::checks::utils;
use crate::fingerprint::fingerprint_for_finding;
use crate::model::Document;
use crate::policy::EffectiveConfig;
use regex::Regex;
use repoguard_types::{ids, Finding};
use serde_json::json;
use std::sync::LazyLock;

static USES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"uses:\s+([^@\s]+)@(\S+)").expect("valid uses regex"));

static SHA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-f]{40}$").expect("valid sha regex"));

pub fn run(doc: &Document, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = cfg.check_policy(ids::CHECK_WORKFLOW_ACTION_PINNING) else {
        return;
    };
    let allow = utils::build_allowlist(&policy.allow);

    for (line_no, line) in doc.lines() {
        for caps in USES_RE.captures_iter(line) {
            let action = &caps[1];
            let version = &caps[2];

            // Local actions ship with the repository and need no pin.
            if action.starts_with("./") {
                continue;
            }
            if utils::is_allowed(allow.as_ref(), &format!("{action}@{version}")) {
                continue;
            }

            if !SHA_RE.is_match(version) {
                out.push(Finding {
                    severity: policy.severity,
                    check_id: ids::CHECK_WORKFLOW_ACTION_PINNING.to_string(),
                    code: ids::CODE_UNPINNED_ACTION.to_string(),
                    message: format!(
                        "Action '{action}' not pinned to SHA (using '{version}')"
                    ),
                    location: utils::line_location(&doc.path, line_no),
                    help: Some(
                        "Pin the action to the full 40-character commit SHA.".to_string(),
                    ),
                    fingerprint: Some(fingerprint_for_finding(
                        ids::CHECK_WORKFLOW_ACTION_PINNING,
                        ids::CODE_UNPINNED_ACTION,
                        doc.path.as_str(),
                        &format!("{action}@{version}"),
                    )),
                    data: json!({ "action": action, "version": version }),
                });
            }
        }
    }
}
