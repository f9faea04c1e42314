use super::{
    ruleset_branch_protection, ruleset_security_checks, ruleset_structure,
    workflow_action_pinning, workflow_input_validation, workflow_permissions,
    workflow_pull_request_target, workflow_runner_labels, workflow_secrets,
};
use crate::model::{Document, DocumentKind, Node};
use crate::policy::{CheckPolicy, EffectiveConfig, FailOn};
use repoguard_types::{ids, DocPath, Severity};
use serde_json::json;
use std::collections::BTreeMap;

fn ruleset_doc(root: serde_json::Value) -> Document {
    Document {
        path: DocPath::new("main.json"),
        kind: DocumentKind::Ruleset,
        source: root.to_string(),
        root: Node::from(root),
    }
}

/// Workflow documents carry both a tree and the raw source because some
/// checks walk the tree and others scan text.
fn workflow_doc(source: &str, root: serde_json::Value) -> Document {
    Document {
        path: DocPath::new("ci.yml"),
        kind: DocumentKind::Workflow,
        source: source.to_string(),
        root: Node::from(root),
    }
}

fn config_with_check(check_id: &str, severity: Severity) -> EffectiveConfig {
    config_with_check_allow(check_id, severity, Vec::new())
}

fn config_with_check_allow(
    check_id: &str,
    severity: Severity,
    allow: Vec<&str>,
) -> EffectiveConfig {
    let mut checks = BTreeMap::new();
    checks.insert(
        check_id.to_string(),
        CheckPolicy {
            enabled: true,
            severity,
            allow: allow.into_iter().map(String::from).collect(),
        },
    );
    EffectiveConfig {
        profile: "strict".to_string(),
        fail_on: FailOn::Warning,
        max_findings: 200,
        checks,
    }
}

#[test]
fn structure_accepts_a_fully_valid_ruleset() {
    let cfg = config_with_check(ids::CHECK_RULESET_STRUCTURE, Severity::Warning);
    let doc = ruleset_doc(json!({
        "name": "main-protection",
        "target": "branch",
        "enforcement": "active",
        "rules": [{ "type": "deletion" }]
    }));

    let mut out = Vec::new();
    ruleset_structure::run(&doc, &cfg, &mut out);
    assert!(out.is_empty(), "unexpected findings: {out:?}");
}

#[test]
fn structure_reports_each_missing_field_once() {
    let cfg = config_with_check(ids::CHECK_RULESET_STRUCTURE, Severity::Warning);
    let doc = ruleset_doc(json!({ "name": "main-protection" }));

    let mut out = Vec::new();
    ruleset_structure::run(&doc, &cfg, &mut out);

    let missing: Vec<&str> = out
        .iter()
        .filter(|f| f.code == ids::CODE_MISSING_REQUIRED_FIELD)
        .filter_map(|f| f.data.get("field").and_then(|v| v.as_str()))
        .collect();
    assert_eq!(missing, vec!["target", "enforcement", "rules"]);
}

#[test]
fn structure_rejects_bad_enums_and_rule_shapes() {
    let cfg = config_with_check(ids::CHECK_RULESET_STRUCTURE, Severity::Warning);

    let doc = ruleset_doc(json!({
        "name": "x",
        "target": "repository",
        "enforcement": "maybe",
        "rules": {}
    }));
    let mut out = Vec::new();
    ruleset_structure::run(&doc, &cfg, &mut out);
    let codes: Vec<&str> = out.iter().map(|f| f.code.as_str()).collect();
    assert_eq!(
        codes,
        vec![
            ids::CODE_INVALID_TARGET,
            ids::CODE_INVALID_ENFORCEMENT,
            ids::CODE_RULES_NOT_ARRAY
        ]
    );
    assert!(out[0].message.contains("Must be 'branch' or 'tag'"));

    let doc = ruleset_doc(json!({
        "name": "x",
        "target": "tag",
        "enforcement": "evaluate",
        "rules": []
    }));
    let mut out = Vec::new();
    ruleset_structure::run(&doc, &cfg, &mut out);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].code, ids::CODE_RULES_EMPTY);
}

#[test]
fn security_checks_wants_status_checks_on_branch_targets() {
    let cfg = config_with_check(ids::CHECK_RULESET_SECURITY_CHECKS, Severity::Warning);
    let doc = ruleset_doc(json!({
        "name": "feature-freeze",
        "target": "branch",
        "rules": [{ "type": "pull_request" }]
    }));

    let mut out = Vec::new();
    ruleset_security_checks::run(&doc, &cfg, &mut out);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].code, ids::CODE_MISSING_STATUS_CHECKS);
}

#[test]
fn security_checks_requires_security_context_for_main() {
    let cfg = config_with_check(ids::CHECK_RULESET_SECURITY_CHECKS, Severity::Warning);

    let doc = ruleset_doc(json!({
        "name": "main-protection",
        "target": "branch",
        "rules": [{
            "type": "required_status_checks",
            "parameters": { "required_status_checks": [{ "context": "unit-tests" }] }
        }]
    }));
    let mut out = Vec::new();
    ruleset_security_checks::run(&doc, &cfg, &mut out);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].code, ids::CODE_MISSING_SECURITY_CONTEXT);

    // Case-insensitive substring match on the context satisfies the check.
    let doc = ruleset_doc(json!({
        "name": "main-protection",
        "target": "branch",
        "rules": [{
            "type": "required_status_checks",
            "parameters": { "required_status_checks": [{ "context": "Security/CodeQL analysis" }] }
        }]
    }));
    let mut out = Vec::new();
    ruleset_security_checks::run(&doc, &cfg, &mut out);
    assert!(out.is_empty(), "unexpected findings: {out:?}");
}

#[test]
fn security_checks_tolerates_plain_contexts_on_other_branches() {
    let cfg = config_with_check(ids::CHECK_RULESET_SECURITY_CHECKS, Severity::Warning);
    let doc = ruleset_doc(json!({
        "name": "develop",
        "target": "branch",
        "rules": [{
            "type": "required_status_checks",
            "parameters": { "required_status_checks": [{ "context": "unit-tests" }] }
        }]
    }));

    let mut out = Vec::new();
    ruleset_security_checks::run(&doc, &cfg, &mut out);
    assert!(out.is_empty());
}

#[test]
fn branch_protection_flags_missing_critical_rules_and_review_count() {
    let cfg = config_with_check(ids::CHECK_RULESET_BRANCH_PROTECTION, Severity::Warning);
    let doc = ruleset_doc(json!({
        "name": "main-protection",
        "target": "branch",
        "enforcement": "active",
        "rules": [{
            "type": "pull_request",
            "parameters": { "required_approving_review_count": 1 }
        }]
    }));

    let mut out = Vec::new();
    ruleset_branch_protection::run(&doc, &cfg, &mut out);

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].code, ids::CODE_MISSING_CRITICAL_RULES);
    assert!(out[0].message.contains("deletion, non_fast_forward"));
    assert_eq!(out[1].code, ids::CODE_INSUFFICIENT_REVIEW_COUNT);
}

#[test]
fn branch_protection_release_needs_critical_rules_but_not_two_reviews() {
    let cfg = config_with_check(ids::CHECK_RULESET_BRANCH_PROTECTION, Severity::Warning);
    let doc = ruleset_doc(json!({
        "name": "release-guard",
        "target": "branch",
        "rules": [{
            "type": "pull_request",
            "parameters": { "required_approving_review_count": 1 }
        }]
    }));

    let mut out = Vec::new();
    ruleset_branch_protection::run(&doc, &cfg, &mut out);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].code, ids::CODE_MISSING_CRITICAL_RULES);
}

#[test]
fn branch_protection_skips_tags_and_unimportant_branches() {
    let cfg = config_with_check(ids::CHECK_RULESET_BRANCH_PROTECTION, Severity::Warning);

    let doc = ruleset_doc(json!({ "name": "main-tags", "target": "tag", "rules": [] }));
    let mut out = Vec::new();
    ruleset_branch_protection::run(&doc, &cfg, &mut out);
    assert!(out.is_empty());

    let doc = ruleset_doc(json!({ "name": "feature-freeze", "target": "branch", "rules": [] }));
    let mut out = Vec::new();
    ruleset_branch_protection::run(&doc, &cfg, &mut out);
    assert!(out.is_empty());
}

#[test]
fn branch_protection_passes_a_complete_main_ruleset() {
    let cfg = config_with_check(ids::CHECK_RULESET_BRANCH_PROTECTION, Severity::Warning);
    let doc = ruleset_doc(json!({
        "name": "main-protection",
        "target": "branch",
        "rules": [
            { "type": "deletion" },
            { "type": "non_fast_forward" },
            {
                "type": "pull_request",
                "parameters": { "required_approving_review_count": 2 }
            }
        ]
    }));

    let mut out = Vec::new();
    ruleset_branch_protection::run(&doc, &cfg, &mut out);
    assert!(out.is_empty(), "unexpected findings: {out:?}");
}

#[test]
fn permissions_missing_block_is_flagged() {
    let cfg = config_with_check(ids::CHECK_WORKFLOW_PERMISSIONS, Severity::Warning);
    let doc = workflow_doc("name: ci\n", json!({ "name": "ci", "jobs": {} }));

    let mut out = Vec::new();
    workflow_permissions::run(&doc, &cfg, &mut out);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].code, ids::CODE_MISSING_PERMISSIONS);
    assert_eq!(out[0].severity, Severity::Warning);
}

#[test]
fn permissions_write_all_is_exactly_one_error() {
    let cfg = config_with_check(ids::CHECK_WORKFLOW_PERMISSIONS, Severity::Warning);
    let doc = workflow_doc(
        "permissions: write-all\n",
        json!({ "permissions": "write-all" }),
    );

    let mut out = Vec::new();
    workflow_permissions::run(&doc, &cfg, &mut out);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].code, ids::CODE_WRITE_ALL_PERMISSIONS);
    assert_eq!(out[0].severity, Severity::Error);
}

#[test]
fn permissions_broad_write_scopes_each_warn() {
    let cfg = config_with_check(ids::CHECK_WORKFLOW_PERMISSIONS, Severity::Warning);
    let doc = workflow_doc(
        "",
        json!({
            "permissions": {
                "packages": "write",
                "contents": "write",
                "issues": "write",
                "deployments": "read"
            }
        }),
    );

    let mut out = Vec::new();
    workflow_permissions::run(&doc, &cfg, &mut out);

    let scopes: Vec<&str> = out
        .iter()
        .filter_map(|f| f.data.get("scope").and_then(|v| v.as_str()))
        .collect();
    assert_eq!(scopes, vec!["contents", "packages"]);
}

#[test]
fn permissions_read_only_block_is_clean() {
    let cfg = config_with_check(ids::CHECK_WORKFLOW_PERMISSIONS, Severity::Warning);
    let doc = workflow_doc("", json!({ "permissions": { "contents": "read" } }));

    let mut out = Vec::new();
    workflow_permissions::run(&doc, &cfg, &mut out);
    assert!(out.is_empty());
}

#[test]
fn action_pinning_flags_tags_with_line_numbers() {
    let cfg = config_with_check(ids::CHECK_WORKFLOW_ACTION_PINNING, Severity::Warning);
    let source = "\
jobs:
  build:
    steps:
      - uses: actions/checkout@v4
      - uses: actions/cache@8f4b7f84864484a7bf31766abe9204da3cbe65b3
      - uses: ./local/action@main
";
    let doc = workflow_doc(source, json!({}));

    let mut out = Vec::new();
    workflow_action_pinning::run(&doc, &cfg, &mut out);

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].code, ids::CODE_UNPINNED_ACTION);
    assert!(out[0].message.contains("actions/checkout"));
    assert!(out[0].message.contains("'v4'"));
    assert_eq!(out[0].location.as_ref().and_then(|l| l.line), Some(4));
    assert!(out[0].fingerprint.is_some());
}

#[test]
fn action_pinning_rejects_short_and_uppercase_hashes() {
    let cfg = config_with_check(ids::CHECK_WORKFLOW_ACTION_PINNING, Severity::Warning);
    let source = "\
      - uses: actions/cache@8f4b7f84
      - uses: actions/setup@8F4B7F84864484A7BF31766ABE9204DA3CBE65B3
";
    let doc = workflow_doc(source, json!({}));

    let mut out = Vec::new();
    workflow_action_pinning::run(&doc, &cfg, &mut out);
    assert_eq!(out.len(), 2);
}

#[test]
fn action_pinning_honors_the_allowlist() {
    let cfg = config_with_check_allow(
        ids::CHECK_WORKFLOW_ACTION_PINNING,
        Severity::Warning,
        vec!["actions/checkout@v*"],
    );
    let source = "      - uses: actions/checkout@v4\n";
    let doc = workflow_doc(source, json!({}));

    let mut out = Vec::new();
    workflow_action_pinning::run(&doc, &cfg, &mut out);
    assert!(out.is_empty());
}

#[test]
fn pull_request_target_trigger_warns_and_checkout_errors() {
    let cfg = config_with_check(ids::CHECK_WORKFLOW_PULL_REQUEST_TARGET, Severity::Warning);
    let doc = workflow_doc(
        "",
        json!({
            "on": { "pull_request_target": {} },
            "jobs": {
                "build": {
                    "steps": [{
                        "uses": "actions/checkout@8f4b7f84864484a7bf31766abe9204da3cbe65b3",
                        "with": { "ref": "${{ github.event.pull_request.head.sha }}" }
                    }]
                }
            }
        }),
    );

    let mut out = Vec::new();
    workflow_pull_request_target::run(&doc, &cfg, &mut out);

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].code, ids::CODE_UNSAFE_TRIGGER);
    assert_eq!(out[0].severity, Severity::Warning);
    assert_eq!(out[1].code, ids::CODE_UNTRUSTED_CHECKOUT);
    assert_eq!(out[1].severity, Severity::Error);
    assert!(out[1].message.contains("'build'"));
}

#[test]
fn pull_request_target_absent_means_silent() {
    let cfg = config_with_check(ids::CHECK_WORKFLOW_PULL_REQUEST_TARGET, Severity::Warning);
    let doc = workflow_doc(
        "",
        json!({
            "on": { "pull_request": {} },
            "jobs": { "build": { "steps": [] } }
        }),
    );

    let mut out = Vec::new();
    workflow_pull_request_target::run(&doc, &cfg, &mut out);
    assert!(out.is_empty());
}

#[test]
fn secrets_in_run_commands_are_flagged_once() {
    let cfg = config_with_check(ids::CHECK_WORKFLOW_SECRETS, Severity::Warning);
    let source = "\
      - run: curl -H \"Auth: ${{ secrets.API_TOKEN }}\" https://example.com
      - run: echo ${{ secrets.OTHER_TOKEN }} done
";
    let doc = workflow_doc(source, json!({}));

    let mut out = Vec::new();
    workflow_secrets::run(&doc, &cfg, &mut out);

    let in_run: Vec<_> = out
        .iter()
        .filter(|f| f.code == ids::CODE_SECRET_IN_RUN)
        .collect();
    assert_eq!(in_run.len(), 1);
    assert_eq!(in_run[0].location.as_ref().and_then(|l| l.line), Some(1));
}

#[test]
fn secrets_hardcoded_credentials_are_flagged_per_kind() {
    let cfg = config_with_check(ids::CHECK_WORKFLOW_SECRETS, Severity::Warning);
    let source = "\
env:
  PASSWORD: \"hunter2\"
  password: 'hunter2'
  api_key: \"abc123\"
  API-KEY: \"abc123\"
";
    let doc = workflow_doc(source, json!({}));

    let mut out = Vec::new();
    workflow_secrets::run(&doc, &cfg, &mut out);

    let kinds: Vec<&str> = out
        .iter()
        .filter(|f| f.code == ids::CODE_HARDCODED_CREDENTIAL)
        .filter_map(|f| f.data.get("kind").and_then(|v| v.as_str()))
        .collect();
    assert_eq!(
        kinds,
        vec!["potential hardcoded password", "potential hardcoded API key"]
    );
}

#[test]
fn secrets_clean_workflow_is_silent() {
    let cfg = config_with_check(ids::CHECK_WORKFLOW_SECRETS, Severity::Warning);
    let source = "\
      - env:
          API_TOKEN: ${{ secrets.API_TOKEN }}
        run: ./call-api.sh
";
    let doc = workflow_doc(source, json!({}));

    let mut out = Vec::new();
    workflow_secrets::run(&doc, &cfg, &mut out);
    assert!(out.is_empty(), "unexpected findings: {out:?}");
}

#[test]
fn input_validation_requires_a_validation_step() {
    let cfg = config_with_check(ids::CHECK_WORKFLOW_INPUT_VALIDATION, Severity::Warning);
    let root = json!({
        "on": { "workflow_dispatch": { "inputs": { "environment": { "type": "string" } } } },
        "jobs": {
            "deploy": { "steps": [{ "run": "./deploy.sh" }] }
        }
    });
    let doc = workflow_doc("", root.clone());

    let mut out = Vec::new();
    workflow_input_validation::run(&doc, &cfg, &mut out);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].code, ids::CODE_UNVALIDATED_INPUTS);

    // A step whose name mentions validation, anywhere, satisfies the check.
    let root = json!({
        "on": { "workflow_dispatch": { "inputs": { "environment": { "type": "string" } } } },
        "jobs": {
            "preflight": { "steps": [{ "name": "Check inputs", "run": "true" }] },
            "deploy": { "steps": [{ "run": "./deploy.sh" }] }
        }
    });
    let doc = workflow_doc("", root);
    let mut out = Vec::new();
    workflow_input_validation::run(&doc, &cfg, &mut out);
    assert!(out.is_empty());
}

#[test]
fn input_validation_ignores_dispatch_without_inputs() {
    let cfg = config_with_check(ids::CHECK_WORKFLOW_INPUT_VALIDATION, Severity::Warning);
    let doc = workflow_doc(
        "",
        json!({
            "on": { "workflow_dispatch": {} },
            "jobs": { "deploy": { "steps": [] } }
        }),
    );

    let mut out = Vec::new();
    workflow_input_validation::run(&doc, &cfg, &mut out);
    assert!(out.is_empty());
}

#[test]
fn runner_labels_wants_a_trust_label_next_to_self_hosted() {
    let cfg = config_with_check(ids::CHECK_WORKFLOW_RUNNER_LABELS, Severity::Warning);
    let doc = workflow_doc(
        "",
        json!({
            "jobs": {
                "bare": { "runs-on": ["self-hosted", "linux"] },
                "hardened": { "runs-on": ["self-hosted", "linux", "ephemeral"] },
                "hosted": { "runs-on": "ubuntu-latest" },
                "bare_string": { "runs-on": "self-hosted" }
            }
        }),
    );

    let mut out = Vec::new();
    workflow_runner_labels::run(&doc, &cfg, &mut out);

    let jobs: Vec<&str> = out
        .iter()
        .filter_map(|f| f.data.get("job").and_then(|v| v.as_str()))
        .collect();
    assert_eq!(jobs, vec!["bare", "bare_string"]);
}

#[test]
fn disabled_checks_produce_nothing() {
    let mut cfg = config_with_check(ids::CHECK_WORKFLOW_PERMISSIONS, Severity::Warning);
    cfg.checks
        .get_mut(ids::CHECK_WORKFLOW_PERMISSIONS)
        .expect("policy present")
        .enabled = false;

    let doc = workflow_doc("name: ci\n", json!({ "name": "ci" }));
    let mut out = Vec::new();
    workflow_permissions::run(&doc, &cfg, &mut out);
    assert!(out.is_empty());
}
