use crate::checks::utils;
use crate::model::{Document, Node};
use crate::policy::EffectiveConfig;
use repoguard_types::{ids, Finding, Severity};
use serde_json::json;

/// Scopes where a blanket `write` grant is worth calling out.
const RISKY_WRITE_SCOPES: [&str; 3] = ["contents", "packages", "deployments"];

pub fn run(doc: &Document, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = cfg.check_policy(ids::CHECK_WORKFLOW_PERMISSIONS) else {
        return;
    };

    let Some(permissions) = doc.root.get("permissions") else {
        out.push(Finding {
            severity: policy.severity,
            check_id: ids::CHECK_WORKFLOW_PERMISSIONS.to_string(),
            code: ids::CODE_MISSING_PERMISSIONS.to_string(),
            message: "No 'permissions' field defined - defaults to all".to_string(),
            location: utils::doc_location(&doc.path),
            help: Some("Declare a least-privilege permissions block.".to_string()),
            fingerprint: None,
            data: serde_json::Value::Null,
        });
        return;
    };

    match permissions {
        Node::Str(value) if value == "write-all" => {
            // Always an error regardless of configured base severity.
            out.push(Finding {
                severity: Severity::Error,
                check_id: ids::CHECK_WORKFLOW_PERMISSIONS.to_string(),
                code: ids::CODE_WRITE_ALL_PERMISSIONS.to_string(),
                message: "Uses 'permissions: write-all' - too permissive".to_string(),
                location: utils::doc_location(&doc.path),
                help: Some("Grant only the scopes the workflow needs.".to_string()),
                fingerprint: None,
                data: serde_json::Value::Null,
            });
        }
        Node::Mapping(entries) => {
            for (scope, value) in entries {
                if value.as_str() == Some("write")
                    && RISKY_WRITE_SCOPES.contains(&scope.as_str())
                {
                    out.push(Finding {
                        severity: policy.severity,
                        check_id: ids::CHECK_WORKFLOW_PERMISSIONS.to_string(),
                        code: ids::CODE_BROAD_WRITE_PERMISSION.to_string(),
                        message: format!(
                            "Has write permission for '{scope}' - ensure necessary"
                        ),
                        location: utils::doc_location(&doc.path),
                        help: Some(format!(
                            "Drop '{scope}: write' or move it to the single job that needs it."
                        )),
                        fingerprint: None,
                        data: json!({ "scope": scope }),
                    });
                }
            }
        }
        _ => {}
    }
}
