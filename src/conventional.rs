//! Conventional Commits rules: bump classification and message validation.

use regex::{Regex, RegexBuilder};
use std::fmt;
use std::sync::LazyLock;

pub use crate::domain::VersionBump;

/// Commit types accepted by the validator unless configured otherwise
pub const DEFAULT_COMMIT_TYPES: [&str; 10] = [
    "feat", "fix", "docs", "style", "refactor", "perf", "test", "chore", "build", "ci",
];

static BREAKING_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"^BREAKING CHANGE:", r"^feat.*!:", r"^fix.*!:"]
        .iter()
        .map(|pattern| case_insensitive(pattern))
        .collect()
});

static FEATURE_FIX_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"^feat(\(.+\))?:", r"^fix(\(.+\))?:"]
        .iter()
        .map(|pattern| case_insensitive(pattern))
        .collect()
});

static DEFAULT_VALIDATOR: LazyLock<CommitValidator> = LazyLock::new(CommitValidator::default);

fn case_insensitive(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("built-in commit pattern is valid")
}

fn is_breaking(subject: &str) -> bool {
    BREAKING_PATTERNS.iter().any(|re| re.is_match(subject))
        || subject.to_uppercase().contains("BREAKING CHANGE")
}

fn is_feature_or_fix(subject: &str) -> bool {
    FEATURE_FIX_PATTERNS.iter().any(|re| re.is_match(subject))
}

/// Decide how far a version moves given the commit subjects since the last release.
///
/// The first breaking marker wins immediately. A `feat`/`fix` header only
/// raises a minor flag, so later commits are still scanned for breaking
/// markers. Empty input (or only empty subjects) yields `VersionBump::None`.
pub fn classify<S: AsRef<str>>(commits: &[S]) -> VersionBump {
    let mut has_feature_or_fix = false;

    for commit in commits {
        let subject = commit.as_ref();

        if is_breaking(subject) {
            return VersionBump::Major;
        }

        if is_feature_or_fix(subject) {
            has_feature_or_fix = true;
        }
    }

    if has_feature_or_fix {
        VersionBump::Minor
    } else {
        VersionBump::None
    }
}

/// Why a message was accepted or rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    Merge,
    Automated,
    Conventional,
    Invalid,
}

impl ValidationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationReason::Merge => "merge",
            ValidationReason::Automated => "automated",
            ValidationReason::Conventional => "conventional",
            ValidationReason::Invalid => "invalid format",
        }
    }
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of checking a single message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validation {
    pub valid: bool,
    pub reason: ValidationReason,
}

impl Validation {
    fn accepted(reason: ValidationReason) -> Self {
        Validation {
            valid: true,
            reason,
        }
    }

    fn rejected() -> Self {
        Validation {
            valid: false,
            reason: ValidationReason::Invalid,
        }
    }
}

/// Checks messages against `type(scope)!: subject`
#[derive(Debug, Clone)]
pub struct CommitValidator {
    pattern: Regex,
}

impl CommitValidator {
    /// Build a validator accepting the given commit types.
    ///
    /// Types are matched literally and case-insensitively. Returns `None` when
    /// the list is empty.
    pub fn new<S: AsRef<str>>(types: &[S]) -> Option<Self> {
        if types.is_empty() {
            return None;
        }

        let alternatives = types
            .iter()
            .map(|t| regex::escape(t.as_ref()))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(r"^({})(\([a-z0-9\-_]+\))?(!)?:\s.{{1,}}", alternatives);

        RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .ok()
            .map(|pattern| CommitValidator { pattern })
    }

    /// Validate a single commit subject or PR title
    pub fn validate(&self, message: &str) -> Validation {
        if message.starts_with("Merge ") {
            return Validation::accepted(ValidationReason::Merge);
        }

        if message.starts_with("chore: bump version") {
            return Validation::accepted(ValidationReason::Automated);
        }

        if self.pattern.is_match(message) {
            return Validation::accepted(ValidationReason::Conventional);
        }

        Validation::rejected()
    }
}

impl Default for CommitValidator {
    fn default() -> Self {
        let pattern = format!(
            r"^({})(\([a-z0-9\-_]+\))?(!)?:\s.{{1,}}",
            DEFAULT_COMMIT_TYPES.join("|")
        );
        CommitValidator {
            pattern: case_insensitive(&pattern),
        }
    }
}

/// Validate a message with the default commit types
pub fn is_conventional(message: &str) -> Validation {
    DEFAULT_VALIDATOR.validate(message)
}
