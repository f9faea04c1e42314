use crate::checks::utils;
use crate::model::{Document, Node};
use crate::policy::EffectiveConfig;
use repoguard_types::{ids, Finding, Severity};
use serde_json::json;

pub fn run(doc: &Document, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = cfg.check_policy(ids::CHECK_WORKFLOW_PULL_REQUEST_TARGET) else {
        return;
    };

    // Only mapping-form triggers are inspected; `on: [pull_request_target]`
    // flow sequences slip through, as they did in the tooling this replaces.
    let Some(triggers) = doc.root.get("on").filter(|t| t.as_mapping().is_some()) else {
        return;
    };
    if !triggers.contains_key("pull_request_target") {
        return;
    }

    out.push(Finding {
        severity: policy.severity,
        check_id: ids::CHECK_WORKFLOW_PULL_REQUEST_TARGET.to_string(),
        code: ids::CODE_UNSAFE_TRIGGER.to_string(),
        message: "Uses 'pull_request_target' - ensure proper isolation".to_string(),
        location: utils::doc_location(&doc.path),
        help: Some("Prefer the 'pull_request' trigger unless base-repo secrets are required.".to_string()),
        fingerprint: None,
        data: serde_json::Value::Null,
    });

    let jobs = doc
        .root
        .get("jobs")
        .and_then(Node::as_mapping)
        .unwrap_or_default();

    for (job_name, job) in jobs {
        let steps = job.get("steps").and_then(Node::as_sequence).unwrap_or_default();
        for step in steps {
            let uses = step.get("uses").and_then(Node::as_str).unwrap_or_default();
            if !uses.contains("actions/checkout") {
                continue;
            }
            let refspec = step
                .get("with")
                .and_then(|w| w.get("ref"))
                .and_then(Node::as_str)
                .unwrap_or_default();

            if refspec.contains("github.event.pull_request") {
                out.push(Finding {
                    severity: Severity::Error,
                    check_id: ids::CHECK_WORKFLOW_PULL_REQUEST_TARGET.to_string(),
                    code: ids::CODE_UNTRUSTED_CHECKOUT.to_string(),
                    message: format!(
                        "Job '{job_name}' checks out untrusted PR code with pull_request_target"
                    ),
                    location: utils::doc_location(&doc.path),
                    help: Some(
                        "Never check out the PR head in a privileged workflow; split untrusted \
                         code into a job without secrets."
                            .to_string(),
                    ),
                    fingerprint: None,
                    data: json!({ "job": job_name, "ref": refspec }),
                });
            }
        }
    }
}
