use crate::checks::utils;
use crate::model::{Document, Node};
use crate::policy::EffectiveConfig;
use repoguard_types::{ids, Finding};
use serde_json::json;

/// A step counts as validation when its name contains one of these,
/// case-insensitive. Naming heuristic, not data-flow analysis.
const VALIDATION_MARKERS: [&str; 2] = ["validat", "check"];

pub fn run(doc: &Document, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = cfg.check_policy(ids::CHECK_WORKFLOW_INPUT_VALIDATION) else {
        return;
    };

    let inputs = doc
        .root
        .get("on")
        .and_then(|t| t.get("workflow_dispatch"))
        .and_then(|d| d.get("inputs"))
        .and_then(Node::as_mapping)
        .unwrap_or_default();
    if inputs.is_empty() {
        return;
    }

    let jobs = doc
        .root
        .get("jobs")
        .and_then(Node::as_mapping)
        .unwrap_or_default();

    let has_validation = jobs.iter().any(|(_, job)| {
        job.get("steps")
            .and_then(Node::as_sequence)
            .unwrap_or_default()
            .iter()
            .any(|step| {
                let name = step
                    .get("name")
                    .and_then(Node::as_str)
                    .unwrap_or_default()
                    .to_lowercase();
                VALIDATION_MARKERS.iter().any(|marker| name.contains(marker))
            })
    });

    if !has_validation {
        let input_names: Vec<&str> = inputs.iter().map(|(k, _)| k.as_str()).collect();
        out.push(Finding {
            severity: policy.severity,
            check_id: ids::CHECK_WORKFLOW_INPUT_VALIDATION.to_string(),
            code: ids::CODE_UNVALIDATED_INPUTS.to_string(),
            message: "Has workflow_dispatch inputs but no validation step found".to_string(),
            location: utils::doc_location(&doc.path),
            help: Some(
                "Add an early step named e.g. 'Validate inputs' that rejects unexpected values."
                    .to_string(),
            ),
            fingerprint: None,
            data: json!({ "inputs": input_names }),
        });
    }
}
