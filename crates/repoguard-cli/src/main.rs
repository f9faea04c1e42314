//! CLI entry point for repoguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `repoguard-app` crate.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use repoguard_app::{
    run_check, run_explain, runtime_error_report, verdict_exit_code, write_report, CheckInput,
    ExplainOutput, Validator,
};
use repoguard_render::{render_github_annotations, render_markdown, render_text};
use repoguard_settings::Overrides;

#[derive(Parser, Debug)]
#[command(
    name = "repoguard",
    version,
    about = "Policy guard for GitHub rulesets and Actions workflows"
)]
struct Cli {
    /// Repository root the default scan directories resolve against.
    #[arg(long, default_value = ".")]
    repo_root: Utf8PathBuf,

    /// Path to repoguard config TOML, relative to the repo root.
    #[arg(long, default_value = "repoguard.toml")]
    config: Utf8PathBuf,

    /// Override profile (strict|lenient).
    #[arg(long)]
    profile: Option<String>,

    /// Override which severities fail the run (warning|error).
    #[arg(long)]
    fail_on: Option<String>,

    /// Override maximum findings to emit in the report.
    #[arg(long)]
    max_findings: Option<u32>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate ruleset JSON documents (default: .github/rulesets).
    Rulesets {
        #[command(flatten)]
        opts: ValidateOpts,
    },

    /// Validate GitHub Actions workflow documents (default: .github/workflows).
    Workflows {
        #[command(flatten)]
        opts: ValidateOpts,
    },

    /// Explain a check_id or code with remediation guidance.
    Explain {
        /// The check_id (e.g., "workflow.action_pinning") or code (e.g.,
        /// "unpinned_action") to explain.
        identifier: String,
    },
}

#[derive(Args, Debug)]
struct ValidateOpts {
    /// Directory to scan instead of the validator's default.
    #[arg(long)]
    dir: Option<Utf8PathBuf>,

    /// Where to write the JSON report artifact (no artifact when omitted).
    #[arg(long)]
    report_out: Option<Utf8PathBuf>,

    /// Where to write a Markdown report (no file when omitted).
    #[arg(long)]
    markdown_out: Option<Utf8PathBuf>,

    /// Emit GitHub Actions ::warning/::error annotations after the text output.
    #[arg(long)]
    annotations: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Rulesets { ref opts } => cmd_validate(&cli, Validator::Rulesets, opts),
        Commands::Workflows { ref opts } => cmd_validate(&cli, Validator::Workflows, opts),
        Commands::Explain { ref identifier } => cmd_explain(identifier),
    }
}

fn cmd_validate(cli: &Cli, validator: Validator, opts: &ValidateOpts) -> anyhow::Result<()> {
    let repo_root = cli
        .repo_root
        .canonicalize_utf8()
        .unwrap_or_else(|_| cli.repo_root.clone());

    let result = (|| -> anyhow::Result<i32> {
        // Load config if present; missing file is allowed (defaults apply).
        let cfg_path = repo_root.join(&cli.config);
        let cfg_text = std::fs::read_to_string(&cfg_path).unwrap_or_default();

        let overrides = Overrides {
            profile: cli.profile.clone(),
            fail_on: cli.fail_on.clone(),
            max_findings: cli.max_findings,
        };

        let input = CheckInput {
            repo_root: &repo_root,
            dir: opts.dir.as_deref(),
            validator,
            config_text: &cfg_text,
            overrides,
        };
        let output = run_check(input)?;

        if output.summary.results.is_empty() {
            // Only reachable for rulesets; an empty workflows directory
            // already failed inside run_check.
            println!("Warning: no ruleset JSON files found");
        } else {
            print!("{}", render_text(&output.summary, validator.as_str()));
        }

        if let Some(report_out) = &opts.report_out {
            write_report(report_out, &output.report)?;
        }
        if let Some(markdown_out) = &opts.markdown_out {
            write_text_file(markdown_out, &render_markdown(&output.report))?;
        }
        if opts.annotations {
            for annotation in render_github_annotations(&output.report) {
                println!("{annotation}");
            }
        }

        Ok(verdict_exit_code(output.report.verdict))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            if let Some(report_out) = &opts.report_out {
                let report = runtime_error_report(validator.as_str(), &format!("{err:#}"));
                let _ = write_report(report_out, &report);
            }
            eprintln!("repoguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn write_text_file(path: &camino::Utf8Path, text: &str) -> anyhow::Result<()> {
    use anyhow::Context;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", repoguard_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                repoguard_app::format_not_found(&identifier, available_check_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}
