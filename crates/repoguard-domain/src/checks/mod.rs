use crate::model::{Document, DocumentKind};
use crate::policy::EffectiveConfig;
use repoguard_types::Finding;

mod ruleset_branch_protection;
mod ruleset_security_checks;
mod ruleset_structure;
mod utils;
mod workflow_action_pinning;
mod workflow_input_validation;
mod workflow_permissions;
mod workflow_pull_request_target;
mod workflow_runner_labels;
mod workflow_secrets;

#[cfg(test)]
mod tests;

/// Run every check applicable to the document's family, in catalog order.
pub fn run_all(doc: &Document, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    match doc.kind {
        DocumentKind::Ruleset => {
            ruleset_structure::run(doc, cfg, out);
            ruleset_security_checks::run(doc, cfg, out);
            ruleset_branch_protection::run(doc, cfg, out);
        }
        DocumentKind::Workflow => {
            workflow_permissions::run(doc, cfg, out);
            workflow_action_pinning::run(doc, cfg, out);
            workflow_pull_request_target::run(doc, cfg, out);
            workflow_secrets::run(doc, cfg, out);
            workflow_input_validation::run(doc, cfg, out);
            workflow_runner_labels::run(doc, cfg, out);
        }
    }
}
