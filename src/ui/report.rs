//! Validation report printed to stdout by `validate-commits`.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::conventional::Validation;
use crate::git::CommitSummary;

/// Subjects longer than this are cut in the per-commit report
pub const SUBJECT_PREVIEW_CHARS: usize = 60;

/// First `max_chars` characters of a subject, never splitting a character.
pub fn truncate_subject(subject: &str, max_chars: usize) -> &str {
    match subject.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &subject[..byte_index],
        None => subject,
    }
}

pub fn report_validating_message(message: &str) {
    println!("🔍 Validating message: \"{}\"...\n", message);
}

pub fn report_message_result(validation: &Validation) {
    if validation.valid {
        println!("{} Message is valid!", style("✅").green());
    } else {
        println!(
            "{} Invalid message format! Reason: {}\n",
            style("❌").red(),
            validation.reason
        );
    }
}

pub fn report_validating_commits(count: usize) {
    println!("🔍 Validating {} commit(s)...\n", count);
}

pub fn report_commit(commit: &CommitSummary, validation: &Validation) {
    let marker = if validation.valid {
        style("✅").green()
    } else {
        style("❌").red()
    };
    println!(
        "{} {}: {}...",
        marker,
        commit.short_hash,
        truncate_subject(&commit.subject, SUBJECT_PREVIEW_CHARS)
    );
}

pub fn report_warning(warning: &BoundaryWarning) {
    println!("{} {}", style("⚠️  Warning:").yellow(), warning);
}

pub fn report_no_commits() {
    println!("✅ No commits to validate (or could not read commits)");
}

pub fn report_invalid_commits() {
    println!("\n{} Invalid commit messages found!\n", style("❌").red());
}

pub fn report_all_valid() {
    println!("\n✅ All commits follow Conventional Commits standard!");
}

/// Conventional Commits cheat sheet shown after a failed validation
pub fn conventional_help() -> String {
    [
        "Please use Conventional Commits format:",
        "",
        "  feat: add new feature",
        "  fix: resolve bug",
        "  docs: update documentation",
        "  chore: maintenance tasks",
        "  refactor: code restructuring",
        "  test: add or update tests",
        "  style: formatting changes",
        "  perf: performance improvements",
        "",
        "With optional scope:",
        "  feat(dashboard): add dark mode",
        "  fix(api): resolve timeout issue",
        "",
        "Breaking changes:",
        "  feat!: breaking API change",
        "  fix(core)!: breaking fix",
        "",
        "For more info: https://www.conventionalcommits.org/",
        "",
    ]
    .join("\n")
}

pub fn print_conventional_help() {
    println!("{}", conventional_help());
}
