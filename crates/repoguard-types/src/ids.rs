//! Stable identifiers for checks and finding codes.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Ruleset checks
pub const CHECK_RULESET_STRUCTURE: &str = "ruleset.structure";
pub const CHECK_RULESET_SECURITY_CHECKS: &str = "ruleset.security_checks";
pub const CHECK_RULESET_BRANCH_PROTECTION: &str = "ruleset.branch_protection";

// Workflow checks
pub const CHECK_WORKFLOW_PERMISSIONS: &str = "workflow.permissions";
pub const CHECK_WORKFLOW_ACTION_PINNING: &str = "workflow.action_pinning";
pub const CHECK_WORKFLOW_PULL_REQUEST_TARGET: &str = "workflow.pull_request_target";
pub const CHECK_WORKFLOW_SECRETS: &str = "workflow.secrets";
pub const CHECK_WORKFLOW_INPUT_VALIDATION: &str = "workflow.input_validation";
pub const CHECK_WORKFLOW_RUNNER_LABELS: &str = "workflow.runner_labels";

// Codes: ruleset.structure
pub const CODE_MISSING_REQUIRED_FIELD: &str = "missing_required_field";
pub const CODE_INVALID_TARGET: &str = "invalid_target";
pub const CODE_INVALID_ENFORCEMENT: &str = "invalid_enforcement";
pub const CODE_RULES_NOT_ARRAY: &str = "rules_not_array";
pub const CODE_RULES_EMPTY: &str = "rules_empty";

// Codes: ruleset.security_checks
pub const CODE_MISSING_SECURITY_CONTEXT: &str = "missing_security_context";
pub const CODE_MISSING_STATUS_CHECKS: &str = "missing_status_checks";

// Codes: ruleset.branch_protection
pub const CODE_MISSING_CRITICAL_RULES: &str = "missing_critical_rules";
pub const CODE_INSUFFICIENT_REVIEW_COUNT: &str = "insufficient_review_count";

// Codes: workflow.permissions
pub const CODE_MISSING_PERMISSIONS: &str = "missing_permissions";
pub const CODE_WRITE_ALL_PERMISSIONS: &str = "write_all_permissions";
pub const CODE_BROAD_WRITE_PERMISSION: &str = "broad_write_permission";

// Codes: workflow.action_pinning
pub const CODE_UNPINNED_ACTION: &str = "unpinned_action";

// Codes: workflow.pull_request_target
pub const CODE_UNSAFE_TRIGGER: &str = "unsafe_trigger";
pub const CODE_UNTRUSTED_CHECKOUT: &str = "untrusted_checkout";

// Codes: workflow.secrets
pub const CODE_SECRET_IN_RUN: &str = "secret_in_run";
pub const CODE_HARDCODED_CREDENTIAL: &str = "hardcoded_credential";

// Codes: workflow.input_validation
pub const CODE_UNVALIDATED_INPUTS: &str = "unvalidated_inputs";

// Codes: workflow.runner_labels
pub const CODE_MISSING_TRUST_LABEL: &str = "missing_trust_label";

// Document-level
pub const CHECK_DOC_PARSE: &str = "doc.parse";
pub const CODE_PARSE_ERROR: &str = "parse_error";
pub const CODE_EMPTY_DOCUMENT: &str = "empty_document";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
