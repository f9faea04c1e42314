//! Explain registry for checks and codes.
//!
//! Maps check IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after configuration examples.
    pub examples: ExamplePair,
}

/// Before and after configuration examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Configuration that would trigger a finding.
    pub before: &'static str,
    /// Configuration that passes the check.
    pub after: &'static str,
}

/// Look up an explanation by check_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    // Try check_id first, then code
    match identifier {
        // Check IDs
        ids::CHECK_RULESET_STRUCTURE => Some(explain_ruleset_structure()),
        ids::CHECK_RULESET_SECURITY_CHECKS => Some(explain_security_checks()),
        ids::CHECK_RULESET_BRANCH_PROTECTION => Some(explain_branch_protection()),
        ids::CHECK_WORKFLOW_PERMISSIONS => Some(explain_permissions()),
        ids::CHECK_WORKFLOW_ACTION_PINNING => Some(explain_action_pinning()),
        ids::CHECK_WORKFLOW_PULL_REQUEST_TARGET => Some(explain_pull_request_target()),
        ids::CHECK_WORKFLOW_SECRETS => Some(explain_secrets()),
        ids::CHECK_WORKFLOW_INPUT_VALIDATION => Some(explain_input_validation()),
        ids::CHECK_WORKFLOW_RUNNER_LABELS => Some(explain_runner_labels()),
        ids::CHECK_DOC_PARSE => Some(explain_doc_parse()),
        ids::CHECK_TOOL_RUNTIME => Some(explain_tool_runtime()),

        // Codes
        ids::CODE_MISSING_REQUIRED_FIELD => Some(retitle(explain_ruleset_structure(), "Missing Required Field")),
        ids::CODE_INVALID_TARGET => Some(retitle(explain_ruleset_structure(), "Invalid Target")),
        ids::CODE_INVALID_ENFORCEMENT => Some(retitle(explain_ruleset_structure(), "Invalid Enforcement")),
        ids::CODE_RULES_NOT_ARRAY => Some(retitle(explain_ruleset_structure(), "Rules Must Be an Array")),
        ids::CODE_RULES_EMPTY => Some(retitle(explain_ruleset_structure(), "Empty Rules Array")),
        ids::CODE_MISSING_SECURITY_CONTEXT => Some(retitle(explain_security_checks(), "Missing Security Context")),
        ids::CODE_MISSING_STATUS_CHECKS => Some(retitle(explain_security_checks(), "Missing Status Checks")),
        ids::CODE_MISSING_CRITICAL_RULES => Some(retitle(explain_branch_protection(), "Missing Critical Rules")),
        ids::CODE_INSUFFICIENT_REVIEW_COUNT => Some(retitle(explain_branch_protection(), "Insufficient Review Count")),
        ids::CODE_MISSING_PERMISSIONS => Some(retitle(explain_permissions(), "Missing Permissions Block")),
        ids::CODE_WRITE_ALL_PERMISSIONS => Some(retitle(explain_permissions(), "write-all Permissions")),
        ids::CODE_BROAD_WRITE_PERMISSION => Some(retitle(explain_permissions(), "Broad Write Permission")),
        ids::CODE_UNPINNED_ACTION => Some(retitle(explain_action_pinning(), "Unpinned Action")),
        ids::CODE_UNSAFE_TRIGGER => Some(retitle(explain_pull_request_target(), "Unsafe Trigger")),
        ids::CODE_UNTRUSTED_CHECKOUT => Some(retitle(explain_pull_request_target(), "Untrusted Checkout")),
        ids::CODE_SECRET_IN_RUN => Some(retitle(explain_secrets(), "Secret in Run Command")),
        ids::CODE_HARDCODED_CREDENTIAL => Some(retitle(explain_secrets(), "Hardcoded Credential")),
        ids::CODE_UNVALIDATED_INPUTS => Some(retitle(explain_input_validation(), "Unvalidated Inputs")),
        ids::CODE_MISSING_TRUST_LABEL => Some(retitle(explain_runner_labels(), "Missing Trust Label")),
        ids::CODE_PARSE_ERROR => Some(retitle(explain_doc_parse(), "Parse Error")),
        ids::CODE_EMPTY_DOCUMENT => Some(retitle(explain_doc_parse(), "Empty Document")),
        ids::CODE_RUNTIME_ERROR => Some(retitle(explain_tool_runtime(), "Runtime Error")),

        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[
        ids::CHECK_RULESET_STRUCTURE,
        ids::CHECK_RULESET_SECURITY_CHECKS,
        ids::CHECK_RULESET_BRANCH_PROTECTION,
        ids::CHECK_WORKFLOW_PERMISSIONS,
        ids::CHECK_WORKFLOW_ACTION_PINNING,
        ids::CHECK_WORKFLOW_PULL_REQUEST_TARGET,
        ids::CHECK_WORKFLOW_SECRETS,
        ids::CHECK_WORKFLOW_INPUT_VALIDATION,
        ids::CHECK_WORKFLOW_RUNNER_LABELS,
        ids::CHECK_DOC_PARSE,
    ]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_MISSING_REQUIRED_FIELD,
        ids::CODE_INVALID_TARGET,
        ids::CODE_INVALID_ENFORCEMENT,
        ids::CODE_RULES_NOT_ARRAY,
        ids::CODE_RULES_EMPTY,
        ids::CODE_MISSING_SECURITY_CONTEXT,
        ids::CODE_MISSING_STATUS_CHECKS,
        ids::CODE_MISSING_CRITICAL_RULES,
        ids::CODE_INSUFFICIENT_REVIEW_COUNT,
        ids::CODE_MISSING_PERMISSIONS,
        ids::CODE_WRITE_ALL_PERMISSIONS,
        ids::CODE_BROAD_WRITE_PERMISSION,
        ids::CODE_UNPINNED_ACTION,
        ids::CODE_UNSAFE_TRIGGER,
        ids::CODE_UNTRUSTED_CHECKOUT,
        ids::CODE_SECRET_IN_RUN,
        ids::CODE_HARDCODED_CREDENTIAL,
        ids::CODE_UNVALIDATED_INPUTS,
        ids::CODE_MISSING_TRUST_LABEL,
        ids::CODE_PARSE_ERROR,
        ids::CODE_EMPTY_DOCUMENT,
        ids::CODE_RUNTIME_ERROR,
    ]
}

fn retitle(mut exp: Explanation, title: &'static str) -> Explanation {
    exp.title = title;
    exp
}

// --- Check-level explanations ---

fn explain_ruleset_structure() -> Explanation {
    Explanation {
        title: "Ruleset Structure",
        description: "\
Validates the basic shape of a ruleset document.

A ruleset must declare `name`, `target`, `enforcement`, and `rules`. The
target must be `branch` or `tag`, enforcement must be one of `active`,
`evaluate`, or `disabled`, and `rules` must be a non-empty array. A ruleset
missing any of these is either rejected by GitHub on import or silently
protects nothing.",
        remediation: "\
Add the missing fields and use the documented enum values:
- `target`: \"branch\" or \"tag\"
- `enforcement`: \"active\", \"evaluate\", or \"disabled\"
- `rules`: at least one rule object with a `type`",
        examples: ExamplePair {
            before: r#"{
  "name": "main-protection",
  "rules": []
}"#,
            after: r#"{
  "name": "main-protection",
  "target": "branch",
  "enforcement": "active",
  "rules": [{ "type": "deletion" }]
}"#,
        },
    }
}

fn explain_security_checks() -> Explanation {
    Explanation {
        title: "Security Status Checks",
        description: "\
Checks that branch protection rulesets gate merges on security scanning.

Branch-target rulesets should include a `required_status_checks` rule, and
rulesets protecting a main branch should require at least one security
context (CodeQL, security-scan, or security/codeql) among the required
checks. Without a required security context, code can merge without ever
being scanned.

This is a substring heuristic over check contexts, not a guarantee that the
referenced workflow actually runs a scanner.",
        remediation: "\
Add a `required_status_checks` rule listing your security scan context:

    { \"type\": \"required_status_checks\",
      \"parameters\": { \"required_status_checks\": [
        { \"context\": \"CodeQL\" } ] } }",
        examples: ExamplePair {
            before: r#"{
  "name": "main-protection",
  "target": "branch",
  "rules": [{ "type": "pull_request" }]
}"#,
            after: r#"{
  "name": "main-protection",
  "target": "branch",
  "rules": [
    { "type": "pull_request" },
    { "type": "required_status_checks",
      "parameters": { "required_status_checks": [{ "context": "CodeQL" }] } }
  ]
}"#,
        },
    }
}

fn explain_branch_protection() -> Explanation {
    Explanation {
        title: "Branch Protection Completeness",
        description: "\
Checks that rulesets guarding important branches carry the critical
protection rules.

Rulesets named for main/master/release branches must include `deletion`,
`non_fast_forward`, and `pull_request` rules. Main-branch rulesets must also
require at least 2 approving reviews on pull requests. Missing any of these
leaves the branch open to force pushes, deletion, or single-approver
merges.",
        remediation: "\
Add the missing rule types, and on main-branch rulesets set:

    { \"type\": \"pull_request\",
      \"parameters\": { \"required_approving_review_count\": 2 } }",
        examples: ExamplePair {
            before: r#"{
  "name": "main-protection",
  "target": "branch",
  "rules": [
    { "type": "pull_request",
      "parameters": { "required_approving_review_count": 1 } }
  ]
}"#,
            after: r#"{
  "name": "main-protection",
  "target": "branch",
  "rules": [
    { "type": "deletion" },
    { "type": "non_fast_forward" },
    { "type": "pull_request",
      "parameters": { "required_approving_review_count": 2 } }
  ]
}"#,
        },
    }
}

fn explain_permissions() -> Explanation {
    Explanation {
        title: "Workflow Permissions",
        description: "\
Checks that workflows declare a least-privilege `permissions` block.

A workflow without a `permissions` field runs with the repository default,
which is often write access to everything. `permissions: write-all` grants
every scope explicitly. Write access to `contents`, `packages`, or
`deployments` lets a compromised step push code, publish packages, or
trigger deploys.",
        remediation: "\
Declare the minimal scopes the workflow needs:

    permissions:
      contents: read

Grant write scopes only to the jobs that need them.",
        examples: ExamplePair {
            before: r#"name: ci
on: [push]
permissions: write-all"#,
            after: r#"name: ci
on: [push]
permissions:
  contents: read"#,
        },
    }
}

fn explain_action_pinning() -> Explanation {
    Explanation {
        title: "Action Pinning",
        description: "\
Checks that every third-party action reference is pinned to a full commit
SHA.

Tags and branches are mutable: an attacker who compromises an action
repository can move `v4` to malicious code and every workflow using it runs
that code on the next trigger. A 40-character commit SHA is immutable.
Local `./` actions are exempt since they ship with the repository.",
        remediation: "\
Replace the tag with the commit SHA it currently points to (keep the tag as
a comment for readability):

    uses: actions/checkout@8f4b7f84864484a7bf31766abe9204da3cbe65b3 # v4",
        examples: ExamplePair {
            before: "      - uses: actions/checkout@v4",
            after: "      - uses: actions/checkout@8f4b7f84864484a7bf31766abe9204da3cbe65b3",
        },
    }
}

fn explain_pull_request_target() -> Explanation {
    Explanation {
        title: "pull_request_target Usage",
        description: "\
Flags workflows triggered by `pull_request_target` and, separately, jobs
that check out the pull request head under that trigger.

`pull_request_target` runs with the base repository's secrets and write
token. Checking out the PR head (`ref` containing
`github.event.pull_request...`) and then building it executes untrusted
code with those privileges — a classic secrets-exfiltration vector.",
        remediation: "\
Prefer the `pull_request` trigger. If `pull_request_target` is required,
never check out or execute PR head code in the privileged job; split the
workflow so untrusted code runs without secrets.",
        examples: ExamplePair {
            before: r#"on:
  pull_request_target:
jobs:
  build:
    steps:
      - uses: actions/checkout@8f4b7f84864484a7bf31766abe9204da3cbe65b3
        with:
          ref: ${{ github.event.pull_request.head.sha }}"#,
            after: r#"on:
  pull_request:
jobs:
  build:
    steps:
      - uses: actions/checkout@8f4b7f84864484a7bf31766abe9204da3cbe65b3"#,
        },
    }
}

fn explain_secrets() -> Explanation {
    Explanation {
        title: "Secret Handling",
        description: "\
Heuristic scan for secrets interpolated directly into shell commands and for
literal password/API-key/token assignments in the workflow source.

Secrets expanded inline in `run:` commands can leak through shell tracing,
process listings, and error output. Literal credential assignments should
never appear in a committed workflow at all.

These are regex heuristics over the raw file: they can miss obfuscated
cases and can flag harmless look-alikes. Treat them as a review prompt, not
proof.",
        remediation: "\
Pass secrets through the `env:` map instead of interpolating them:

    env:
      API_TOKEN: ${{ secrets.API_TOKEN }}
    run: ./deploy.sh

Move literal credentials into repository or organization secrets.",
        examples: ExamplePair {
            before: r#"      - run: curl -H "Authorization: ${{ secrets.API_TOKEN }}" https://api.example.com"#,
            after: r#"      - env:
          API_TOKEN: ${{ secrets.API_TOKEN }}
        run: ./call-api.sh"#,
        },
    }
}

fn explain_input_validation() -> Explanation {
    Explanation {
        title: "Dispatch Input Validation",
        description: "\
Checks that workflows declaring `workflow_dispatch` inputs have a validation
step.

Dispatch inputs are attacker-influenced strings that frequently end up in
shell commands. The check looks for at least one step anywhere in the
workflow whose name contains \"validat\" or \"check\" — a naming heuristic,
not a data-flow analysis.",
        remediation: "\
Add an early step that validates each input before it is used:

    - name: Validate inputs
      run: |
        [[ \"${{ inputs.environment }}\" =~ ^(staging|production)$ ]]",
        examples: ExamplePair {
            before: r#"on:
  workflow_dispatch:
    inputs:
      environment:
        type: string
jobs:
  deploy:
    steps:
      - run: ./deploy.sh "${{ inputs.environment }}""#,
            after: r#"on:
  workflow_dispatch:
    inputs:
      environment:
        type: string
jobs:
  deploy:
    steps:
      - name: Validate inputs
        run: |
          [[ "${{ inputs.environment }}" =~ ^(staging|production)$ ]]
      - run: ./deploy.sh "${{ inputs.environment }}""#,
        },
    }
}

fn explain_runner_labels() -> Explanation {
    Explanation {
        title: "Self-Hosted Runner Labels",
        description: "\
Checks that jobs on self-hosted runners carry a hardening label.

Self-hosted runners persist state between jobs by default, so a malicious
job can poison the machine for every later run. Jobs using `self-hosted`
must also carry one of the trust labels `ephemeral`, `isolated`, `secure`,
or `trusted` to signal the runner pool is hardened for untrusted work.",
        remediation: "\
Route the job to a hardened pool:

    runs-on: [self-hosted, ephemeral]

or use GitHub-hosted runners for anything that builds untrusted code.",
        examples: ExamplePair {
            before: "    runs-on: [self-hosted, linux]",
            after: "    runs-on: [self-hosted, linux, ephemeral]",
        },
    }
}

fn explain_doc_parse() -> Explanation {
    Explanation {
        title: "Document Parsing",
        description: "\
Reports documents that could not be parsed, or parsed to nothing.

A ruleset that is not valid JSON, or a workflow that is not valid YAML,
cannot be evaluated against any policy; the parse failure is itself the
finding. An empty document is reported the same way. Other documents in
the directory still get evaluated.",
        remediation: "\
Fix the syntax error at the reported position and re-run. The message
carries the parser's own diagnostic.",
        examples: ExamplePair {
            before: r#"{ "name": "main-protection", }"#,
            after: r#"{ "name": "main-protection" }"#,
        },
    }
}

fn explain_tool_runtime() -> Explanation {
    Explanation {
        title: "Tool Runtime Failure",
        description: "\
Emitted when repoguard itself fails: the document directory is missing, a
file cannot be read, or configuration cannot be resolved. The run aborts
with a nonzero exit and, when a report artifact was requested, a report
carrying this finding.",
        remediation: "\
Fix the environment problem in the message (create the directory, fix file
permissions, correct repoguard.toml) and re-run.",
        examples: ExamplePair {
            before: "repoguard workflows   # .github/workflows does not exist",
            after: "mkdir -p .github/workflows && repoguard workflows",
        },
    }
}
