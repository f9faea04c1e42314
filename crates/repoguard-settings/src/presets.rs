use repoguard_domain::policy::{CheckPolicy, EffectiveConfig, FailOn};
use repoguard_types::Severity;
use std::collections::BTreeMap;

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything complex should go into repo config.
pub fn preset(profile: &str) -> EffectiveConfig {
    match profile {
        "lenient" => lenient_profile(),
        // default
        _ => strict_profile(),
    }
}

/// Any finding, warning or error, fails the run. This matches the historical
/// validators, where warnings and errors both exited nonzero.
fn strict_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "strict".to_string(),
        fail_on: FailOn::Warning,
        max_findings: 200,
        checks: default_checks(Severity::Warning),
    }
}

/// Warnings print but only errors fail the run.
fn lenient_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "lenient".to_string(),
        fail_on: FailOn::Error,
        max_findings: 200,
        checks: default_checks(Severity::Warning),
    }
}

fn default_checks(default_severity: Severity) -> BTreeMap<String, CheckPolicy> {
    use repoguard_types::ids::*;
    let mut m = BTreeMap::new();

    m.insert(
        CHECK_RULESET_STRUCTURE.to_string(),
        CheckPolicy::enabled(default_severity),
    );
    m.insert(
        CHECK_RULESET_SECURITY_CHECKS.to_string(),
        CheckPolicy::enabled(default_severity),
    );
    m.insert(
        CHECK_RULESET_BRANCH_PROTECTION.to_string(),
        CheckPolicy::enabled(default_severity),
    );
    m.insert(
        CHECK_WORKFLOW_PERMISSIONS.to_string(),
        CheckPolicy::enabled(default_severity),
    );
    m.insert(
        CHECK_WORKFLOW_ACTION_PINNING.to_string(),
        CheckPolicy::enabled(default_severity),
    );
    m.insert(
        CHECK_WORKFLOW_PULL_REQUEST_TARGET.to_string(),
        CheckPolicy::enabled(default_severity),
    );
    m.insert(
        CHECK_WORKFLOW_SECRETS.to_string(),
        CheckPolicy::enabled(default_severity),
    );
    m.insert(
        CHECK_WORKFLOW_INPUT_VALIDATION.to_string(),
        CheckPolicy::enabled(default_severity),
    );
    m.insert(
        CHECK_WORKFLOW_RUNNER_LABELS.to_string(),
        CheckPolicy::enabled(default_severity),
    );

    m
}
