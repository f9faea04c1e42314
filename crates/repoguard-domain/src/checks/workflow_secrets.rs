use crate::checks::utils;
use crate::model::Document;
use crate::policy::EffectiveConfig;
use regex::{Regex, RegexBuilder};
use repoguard_types::{ids, Finding};
use serde_json::json;
use std::sync::LazyLock;

static SECRET_IN_RUN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"run:.*secrets\.[A-Z_]+[^}]").expect("valid secret-in-run regex")
});

/// (pattern, what the match looks like). All matched case-insensitively.
static CREDENTIAL_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r#"password\s*[:=]\s*["'][^"']+["']"#, "potential hardcoded password"),
        (r#"api[_-]?key\s*[:=]\s*["'][^"']+["']"#, "potential hardcoded API key"),
        (r#"token\s*[:=]\s*["'][^"']+["']"#, "potential hardcoded token"),
    ]
    .into_iter()
    .map(|(pattern, desc)| {
        let re = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .expect("valid credential regex");
        (re, desc)
    })
    .collect()
});

/// Best-effort text heuristics; they flag look-alikes and miss obfuscation.
pub fn run(doc: &Document, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = cfg.check_policy(ids::CHECK_WORKFLOW_SECRETS) else {
        return;
    };

    if let Some(line) = first_matching_line(doc, &SECRET_IN_RUN_RE) {
        out.push(Finding {
            severity: policy.severity,
            check_id: ids::CHECK_WORKFLOW_SECRETS.to_string(),
            code: ids::CODE_SECRET_IN_RUN.to_string(),
            message: "Secrets may be passed directly to commands - use env vars instead"
                .to_string(),
            location: utils::line_location(&doc.path, line),
            help: Some(
                "Expose the secret through the step's env map and reference the variable in the \
                 command."
                    .to_string(),
            ),
            fingerprint: None,
            data: serde_json::Value::Null,
        });
    }

    for (re, desc) in CREDENTIAL_PATTERNS.iter() {
        let Some(line) = first_matching_line(doc, re) else {
            continue;
        };
        out.push(Finding {
            severity: policy.severity,
            check_id: ids::CHECK_WORKFLOW_SECRETS.to_string(),
            code: ids::CODE_HARDCODED_CREDENTIAL.to_string(),
            message: format!("Found {desc} - verify not hardcoded"),
            location: utils::line_location(&doc.path, line),
            help: Some("Move literal credentials into repository secrets.".to_string()),
            fingerprint: None,
            data: json!({ "kind": desc }),
        });
    }
}

fn first_matching_line(doc: &Document, re: &Regex) -> Option<u32> {
    doc.lines()
        .find(|(_, line)| re.is_match(line))
        .map(|(no, _)| no)
}
