use crate::checks::utils;
use crate::fingerprint::fingerprint_for_finding;
use crate::model::{Document, Node};
use crate::policy::EffectiveConfig;
use repoguard_types::{ids, Finding};
use serde_json::json;

/// Labels that mark a self-hosted pool as hardened for untrusted work.
const TRUST_LABELS: [&str; 4] = ["ephemeral", "isolated", "secure", "trusted"];

pub fn run(doc: &Document, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = cfg.check_policy(ids::CHECK_WORKFLOW_RUNNER_LABELS) else {
        return;
    };

    let jobs = doc
        .root
        .get("jobs")
        .and_then(Node::as_mapping)
        .unwrap_or_default();

    for (job_name, job) in jobs {
        let labels: Vec<&str> = match job.get("runs-on") {
            Some(Node::Str(label)) => vec![label.as_str()],
            Some(Node::Sequence(items)) => {
                items.iter().filter_map(Node::as_str).collect()
            }
            _ => continue,
        };

        if !labels.contains(&"self-hosted") {
            continue;
        }

        let has_trust_label = labels
            .iter()
            .any(|label| TRUST_LABELS.contains(label));

        if !has_trust_label {
            out.push(Finding {
                severity: policy.severity,
                check_id: ids::CHECK_WORKFLOW_RUNNER_LABELS.to_string(),
                code: ids::CODE_MISSING_TRUST_LABEL.to_string(),
                message: format!("Job '{job_name}' uses self-hosted without security labels"),
                location: utils::doc_location(&doc.path),
                help: Some(
                    "Add a trust label (ephemeral, isolated, secure, or trusted) to runs-on."
                        .to_string(),
                ),
                fingerprint: Some(fingerprint_for_finding(
                    ids::CHECK_WORKFLOW_RUNNER_LABELS,
                    ids::CODE_MISSING_TRUST_LABEL,
                    doc.path.as_str(),
                    job_name,
                )),
                data: json!({ "job": job_name, "runs_on": labels }),
            });
        }
    }
}
