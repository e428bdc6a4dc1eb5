//! The `validate-commits` workflow
//!
//! Validates either a single literal message (typically a PR title) or every
//! commit on HEAD since it diverged from the base branch.

use clap::Parser;

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::conventional::CommitValidator;
use crate::error::{BumpError, Result};
use crate::git::Repository;
use crate::ui::report;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "validate-commits",
    about = "Validate commit messages or a PR title against Conventional Commits",
    version
)]
pub struct ValidateArgs {
    #[arg(
        short,
        long,
        help = "Validate a single message (e.g. PR title) instead of git log"
    )]
    pub message: Option<String>,

    #[arg(
        long,
        env = "GITHUB_BASE_REF",
        help = "Base branch the commits are compared against [default: main]"
    )]
    pub base_branch: Option<String>,

    #[arg(long, help = "Remote holding the base branch [default: origin]")]
    pub remote: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable debug logging")]
    pub verbose: bool,
}

impl ValidateArgs {
    /// Base branch from the flag or environment, falling back to configuration.
    ///
    /// An empty value (as CI sets on non-PR events) counts as unset.
    pub fn resolved_base_branch(&self, config: &Config) -> String {
        self.base_branch
            .as_deref()
            .map(str::trim)
            .filter(|branch| !branch.is_empty())
            .map_or_else(|| config.validation.base_branch.clone(), str::to_string)
    }

    pub fn resolved_remote(&self, config: &Config) -> String {
        self.remote
            .clone()
            .unwrap_or_else(|| config.validation.remote.clone())
    }
}

/// Outcome of a validation run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationSummary {
    /// Number of messages checked
    pub checked: usize,
    /// Messages that failed validation
    pub invalid: Vec<String>,
}

impl ValidationSummary {
    pub fn is_success(&self) -> bool {
        self.invalid.is_empty()
    }
}

/// Run the validation workflow, printing the report to stdout.
///
/// `repo` is only used when no `--message` is given; `None` or an unreadable
/// history counts as nothing to validate.
pub fn run_validate<R: Repository>(
    args: &ValidateArgs,
    config: &Config,
    repo: Option<&R>,
) -> Result<ValidationSummary> {
    let validator = CommitValidator::new(&config.validation.types)
        .ok_or_else(|| BumpError::config("validation.types must list at least one valid type"))?;

    // An empty message (unset PR title in CI) falls through to the branch commits
    if let Some(message) = args.message.as_deref().filter(|message| !message.is_empty()) {
        return Ok(validate_single_message(&validator, message));
    }

    let base_branch = args.resolved_base_branch(config);
    let remote = args.resolved_remote(config);

    let commits = match repo.map(|repo| repo.commits_since_base(&remote, &base_branch)) {
        Some(Ok(commits)) => commits,
        Some(Err(e)) => {
            report::report_warning(&BoundaryWarning::UnreadableHistory {
                reason: e.to_string(),
            });
            Vec::new()
        }
        None => {
            report::report_warning(&BoundaryWarning::UnreadableHistory {
                reason: "not inside a git repository".to_string(),
            });
            Vec::new()
        }
    };

    if commits.is_empty() {
        report::report_no_commits();
        return Ok(ValidationSummary::default());
    }

    report::report_validating_commits(commits.len());

    let mut summary = ValidationSummary {
        checked: commits.len(),
        invalid: Vec::new(),
    };

    for commit in &commits {
        let validation = validator.validate(&commit.subject);
        report::report_commit(commit, &validation);

        if !validation.valid {
            summary.invalid.push(commit.subject.clone());
        }
    }

    if summary.is_success() {
        report::report_all_valid();
    } else {
        report::report_invalid_commits();
        report::print_conventional_help();
    }

    tracing::debug!(
        checked = summary.checked,
        invalid = summary.invalid.len(),
        "validation finished"
    );

    Ok(summary)
}

fn validate_single_message(validator: &CommitValidator, message: &str) -> ValidationSummary {
    report::report_validating_message(message);

    let validation = validator.validate(message);
    report::report_message_result(&validation);

    let mut summary = ValidationSummary {
        checked: 1,
        invalid: Vec::new(),
    };

    if !validation.valid {
        report::print_conventional_help();
        summary.invalid.push(message.to_string());
    }

    summary
}
