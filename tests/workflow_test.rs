// tests/workflow_test.rs
use chrono::NaiveDate;
use conventional_bump::cli::{
    run_bump, run_validate, BumpArgs, BumpStatus, RequestedBump, ValidateArgs,
};
use conventional_bump::config::Config;
use conventional_bump::git::MockRepository;
use conventional_bump::sync::{CommandInvocation, CommandOutput, CommandRunner};
use conventional_bump::{BumpError, BumpKind, Result};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CHANGELOG: &str = "# Changelog\n\nAll notable changes to this project.\n\n---\n\n## [3.7] - 2026-01-02\n\n- Previous release\n";

/// Runner that records invocations instead of spawning processes
struct RecordingRunner {
    success: bool,
    calls: RefCell<Vec<CommandInvocation>>,
}

impl RecordingRunner {
    fn succeeding() -> Self {
        RecordingRunner {
            success: true,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        RecordingRunner {
            success: false,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &CommandInvocation) -> Result<CommandOutput> {
        self.calls.borrow_mut().push(invocation.clone());
        Ok(CommandOutput {
            success: self.success,
            code: Some(if self.success { 0 } else { 2 }),
            stdout: "synced\n".to_string(),
            stderr: if self.success {
                String::new()
            } else {
                "version_sync: cannot write package.json".to_string()
            },
        })
    }
}

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new(version: &str) -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("VERSION"), version).unwrap();
        fs::write(dir.path().join("CHANGELOG.md"), CHANGELOG).unwrap();
        Workspace { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn args(&self) -> BumpArgs {
        BumpArgs {
            bump_type: RequestedBump::Auto,
            manual: None,
            dry_run: false,
            version_file: Some(self.path("VERSION")),
            changelog_file: Some(self.path("CHANGELOG.md")),
            no_changelog: false,
            no_sync: false,
            config: None,
            verbose: false,
        }
    }

    fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).unwrap()
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

fn sync_config() -> Config {
    let mut config = Config::default();
    config.sync.command = Some(vec![
        "python3".to_string(),
        "tools/version_sync.py".to_string(),
    ]);
    config
}

fn repo_with(subjects: &[&str]) -> MockRepository {
    let mut repo = MockRepository::new();
    repo.add_commit("chore: initial import").tag_head("3.7");
    for subject in subjects {
        repo.add_commit(*subject);
    }
    repo
}

fn file_unchanged(path: &Path, expected: &str) -> bool {
    fs::read_to_string(path).unwrap() == expected
}

// ============================================================================
// bump-version
// ============================================================================

#[test]
fn test_feature_commit_bumps_minor_and_writes_files() {
    let ws = Workspace::new("3.7\n");
    let repo = repo_with(&["docs: readme", "feat(ui): add toggle"]);
    let runner = RecordingRunner::succeeding();

    let outcome = run_bump(&ws.args(), &sync_config(), Some(&repo), &runner, today()).unwrap();

    assert_eq!(outcome.status, BumpStatus::Applied);
    assert_eq!(outcome.previous.as_str(), "3.7");
    assert_eq!(outcome.version.as_str(), "3.8");
    assert_eq!(outcome.kind, BumpKind::Minor);
    assert_eq!(ws.read("VERSION"), "3.8\n");

    let changelog = ws.read("CHANGELOG.md");
    assert!(changelog.contains("---\n\n## [3.8] - 2026-10-18\n"));
    assert!(changelog.contains("- Automated version bump (minor)"));
    assert!(changelog.contains("## [3.7] - 2026-01-02"));
}

#[test]
fn test_sync_command_receives_version_file() {
    let ws = Workspace::new("3.7\n");
    let repo = repo_with(&["fix: typo"]);
    let runner = RecordingRunner::succeeding();

    run_bump(&ws.args(), &sync_config(), Some(&repo), &runner, today()).unwrap();

    let calls = runner.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].program, "python3");
    assert_eq!(calls[0].args[0], "tools/version_sync.py");
    assert_eq!(calls[0].args[1], "--version-file");
    assert_eq!(PathBuf::from(&calls[0].args[2]), ws.path("VERSION"));
    assert_eq!(
        calls[0].env.get("CONVENTIONAL_BUMP_VERSION"),
        Some(&"3.8".to_string())
    );
}

#[test]
fn test_breaking_change_bumps_major() {
    let ws = Workspace::new("3.7\n");
    let repo = repo_with(&["feat: a", "fix(core)!: drop legacy config"]);
    let runner = RecordingRunner::succeeding();

    let outcome = run_bump(&ws.args(), &Config::default(), Some(&repo), &runner, today()).unwrap();

    assert_eq!(outcome.version.as_str(), "4.0");
    assert_eq!(outcome.kind, BumpKind::Major);
    assert_eq!(ws.read("VERSION"), "4.0\n");
    // Sync not configured: skipped, nothing spawned
    assert!(runner.calls.borrow().is_empty());
}

#[test]
fn test_no_commits_since_tag_leaves_files_alone() {
    let ws = Workspace::new("3.7\n");
    let repo = repo_with(&[]);
    let runner = RecordingRunner::succeeding();

    let outcome = run_bump(&ws.args(), &sync_config(), Some(&repo), &runner, today()).unwrap();

    assert_eq!(outcome.status, BumpStatus::NoCommits);
    assert_eq!(outcome.version.as_str(), "3.7");
    assert!(file_unchanged(&ws.path("VERSION"), "3.7\n"));
    assert!(file_unchanged(&ws.path("CHANGELOG.md"), CHANGELOG));
    assert!(runner.calls.borrow().is_empty());
}

#[test]
fn test_only_housekeeping_commits_is_unchanged() {
    let ws = Workspace::new("3.7\n");
    let repo = repo_with(&["docs: a", "chore: b"]);
    let runner = RecordingRunner::succeeding();

    let outcome = run_bump(&ws.args(), &sync_config(), Some(&repo), &runner, today()).unwrap();

    assert_eq!(outcome.status, BumpStatus::Unchanged);
    assert_eq!(outcome.kind, BumpKind::None);
    assert_eq!(outcome.version.as_str(), "3.7");
    assert!(file_unchanged(&ws.path("VERSION"), "3.7\n"));
}

#[test]
fn test_only_empty_subjects_counts_as_no_commits() {
    let ws = Workspace::new("3.7\n");
    let mut repo = repo_with(&[]);
    repo.add_commit("").add_commit("");
    let runner = RecordingRunner::succeeding();

    let outcome = run_bump(&ws.args(), &sync_config(), Some(&repo), &runner, today()).unwrap();

    assert_eq!(outcome.status, BumpStatus::NoCommits);
    assert_eq!(outcome.kind, BumpKind::None);
    assert!(file_unchanged(&ws.path("VERSION"), "3.7\n"));
    assert!(runner.calls.borrow().is_empty());
}

#[test]
fn test_unreadable_history_is_soft_failure() {
    let ws = Workspace::new("3.7\n");
    let mut repo = repo_with(&["feat: a"]);
    repo.make_unreadable();
    let runner = RecordingRunner::succeeding();

    let outcome = run_bump(&ws.args(), &sync_config(), Some(&repo), &runner, today()).unwrap();
    assert_eq!(outcome.status, BumpStatus::NoCommits);

    let outcome = run_bump(
        &ws.args(),
        &sync_config(),
        None::<&MockRepository>,
        &runner,
        today(),
    )
    .unwrap();
    assert_eq!(outcome.status, BumpStatus::NoCommits);
    assert!(file_unchanged(&ws.path("VERSION"), "3.7\n"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let ws = Workspace::new("3.7\n");
    let repo = repo_with(&["feat: a"]);
    let runner = RecordingRunner::succeeding();
    let mut args = ws.args();
    args.dry_run = true;

    let outcome = run_bump(&args, &sync_config(), Some(&repo), &runner, today()).unwrap();

    assert_eq!(outcome.status, BumpStatus::DryRun);
    assert_eq!(outcome.version.as_str(), "3.8");
    assert!(file_unchanged(&ws.path("VERSION"), "3.7\n"));
    assert!(file_unchanged(&ws.path("CHANGELOG.md"), CHANGELOG));
    assert!(runner.calls.borrow().is_empty());
}

#[test]
fn test_manual_version_bypasses_commits() {
    let ws = Workspace::new("3.7\n");
    let runner = RecordingRunner::succeeding();
    let mut args = ws.args();
    args.manual = Some(" 5.0 ".to_string());
    args.no_sync = true;

    let outcome = run_bump(
        &args,
        &sync_config(),
        None::<&MockRepository>,
        &runner,
        today(),
    )
    .unwrap();

    assert_eq!(outcome.kind, BumpKind::Manual);
    assert_eq!(outcome.version.as_str(), "5.0");
    assert_eq!(ws.read("VERSION"), "5.0\n");
    assert!(ws
        .read("CHANGELOG.md")
        .contains("- Automated version bump (manual)"));
    assert!(runner.calls.borrow().is_empty());
}

#[test]
fn test_empty_manual_version_falls_back_to_commits() {
    let ws = Workspace::new("3.7\n");
    let repo = repo_with(&["feat: x"]);
    let runner = RecordingRunner::succeeding();
    let mut args = ws.args();
    args.manual = Some(String::new());

    let outcome = run_bump(&args, &Config::default(), Some(&repo), &runner, today()).unwrap();

    assert_eq!(outcome.kind, BumpKind::Minor);
    assert_eq!(outcome.version.as_str(), "3.8");
    assert_eq!(ws.read("VERSION"), "3.8\n");
}

#[test]
fn test_manual_version_is_used_verbatim() {
    let ws = Workspace::new("3.7\n");
    let runner = RecordingRunner::succeeding();
    let mut args = ws.args();
    args.manual = Some("3.07".to_string());

    let outcome = run_bump(
        &args,
        &sync_config(),
        None::<&MockRepository>,
        &runner,
        today(),
    )
    .unwrap();

    assert_eq!(outcome.status, BumpStatus::Applied);
    assert_eq!(outcome.version.as_str(), "3.07");
    assert_eq!(ws.read("VERSION"), "3.07\n");
    assert!(ws.read("CHANGELOG.md").contains("## [3.07] - 2026-10-18"));
    assert_eq!(
        runner.calls.borrow()[0].env.get("CONVENTIONAL_BUMP_VERSION"),
        Some(&"3.07".to_string())
    );
}

#[test]
fn test_unchanged_keeps_version_file_text() {
    let ws = Workspace::new("03.7\n");
    let repo = repo_with(&["docs: a"]);
    let runner = RecordingRunner::succeeding();

    let outcome = run_bump(&ws.args(), &sync_config(), Some(&repo), &runner, today()).unwrap();

    assert_eq!(outcome.status, BumpStatus::Unchanged);
    assert_eq!(outcome.version.as_str(), "03.7");
    assert!(file_unchanged(&ws.path("VERSION"), "03.7\n"));
}

#[test]
fn test_manual_version_must_be_well_formed() {
    let ws = Workspace::new("3.7\n");
    let runner = RecordingRunner::succeeding();
    let mut args = ws.args();
    args.manual = Some("3.8.1".to_string());

    let err = run_bump(
        &args,
        &sync_config(),
        None::<&MockRepository>,
        &runner,
        today(),
    )
    .unwrap_err();

    assert!(matches!(err, BumpError::Version(_)));
    assert!(err.to_string().contains("expected X.Y"));
    assert!(file_unchanged(&ws.path("VERSION"), "3.7\n"));
}

#[test]
fn test_forced_major_ignores_history() {
    let ws = Workspace::new("3.7\n");
    let runner = RecordingRunner::succeeding();
    let mut args = ws.args();
    args.bump_type = RequestedBump::Major;
    args.no_changelog = true;

    let outcome = run_bump(
        &args,
        &Config::default(),
        None::<&MockRepository>,
        &runner,
        today(),
    )
    .unwrap();

    assert_eq!(outcome.version.as_str(), "4.0");
    assert!(file_unchanged(&ws.path("CHANGELOG.md"), CHANGELOG));
}

#[test]
fn test_malformed_current_version_is_fatal() {
    let ws = Workspace::new("three.seven\n");
    let repo = repo_with(&["feat: a"]);
    let runner = RecordingRunner::succeeding();

    let err = run_bump(&ws.args(), &sync_config(), Some(&repo), &runner, today()).unwrap_err();

    assert!(err.to_string().contains("Invalid version format 'three.seven'"));
    assert!(file_unchanged(&ws.path("CHANGELOG.md"), CHANGELOG));
}

#[test]
fn test_missing_changelog_is_not_fatal() {
    let ws = Workspace::new("3.7\n");
    fs::remove_file(ws.path("CHANGELOG.md")).unwrap();
    let repo = repo_with(&["feat: a"]);
    let runner = RecordingRunner::succeeding();

    let outcome = run_bump(&ws.args(), &Config::default(), Some(&repo), &runner, today()).unwrap();

    assert_eq!(outcome.status, BumpStatus::Applied);
    assert_eq!(ws.read("VERSION"), "3.8\n");
    assert!(!ws.path("CHANGELOG.md").exists());
}

#[test]
fn test_sync_failure_is_fatal() {
    let ws = Workspace::new("3.7\n");
    let repo = repo_with(&["feat: a"]);
    let runner = RecordingRunner::failing();

    let err = run_bump(&ws.args(), &sync_config(), Some(&repo), &runner, today()).unwrap_err();

    assert!(matches!(err, BumpError::Sync(_)));
    assert!(err.to_string().contains("cannot write package.json"));
    // Earlier writes are not rolled back
    assert_eq!(ws.read("VERSION"), "3.8\n");
    assert!(ws.read("CHANGELOG.md").contains("## [3.8]"));
}

// ============================================================================
// validate-commits
// ============================================================================

fn validate_args(message: Option<&str>) -> ValidateArgs {
    ValidateArgs {
        message: message.map(str::to_string),
        base_branch: Some("main".to_string()),
        remote: Some("origin".to_string()),
        config: None,
        verbose: false,
    }
}

fn branch_repo(subjects: &[&str]) -> MockRepository {
    let mut repo = MockRepository::new();
    repo.add_commit("chore: initial import")
        .set_remote_branch_at_head("origin", "main");
    for subject in subjects {
        repo.add_commit(*subject);
    }
    repo
}

#[test]
fn test_validate_branch_all_valid() {
    let repo = branch_repo(&["feat(ui): add toggle", "Merge branch 'main' into feature"]);
    let summary = run_validate(&validate_args(None), &Config::default(), Some(&repo)).unwrap();

    assert_eq!(summary.checked, 2);
    assert!(summary.is_success());
}

#[test]
fn test_validate_branch_reports_invalid_commits() {
    let repo = branch_repo(&["feat: ok", "update stuff", "WIP"]);
    let summary = run_validate(&validate_args(None), &Config::default(), Some(&repo)).unwrap();

    assert_eq!(summary.checked, 3);
    assert!(!summary.is_success());
    assert_eq!(summary.invalid, vec!["WIP", "update stuff"]);
}

#[test]
fn test_validate_empty_message_checks_branch() {
    let repo = branch_repo(&["feat: ok"]);
    let summary = run_validate(&validate_args(Some("")), &Config::default(), Some(&repo)).unwrap();

    assert_eq!(summary.checked, 1);
    assert!(summary.is_success());
}

#[test]
fn test_validate_missing_base_branch_is_soft() {
    let repo = branch_repo(&["update stuff"]);
    let mut args = validate_args(None);
    args.base_branch = Some("release".to_string());

    let summary = run_validate(&args, &Config::default(), Some(&repo)).unwrap();
    assert_eq!(summary.checked, 0);
    assert!(summary.is_success());
}

#[test]
fn test_validate_message_with_custom_types() {
    let mut config = Config::default();
    config.validation.types = vec!["feat".to_string(), "deps".to_string()];

    let ok = run_validate(
        &validate_args(Some("deps: bump serde")),
        &config,
        None::<&MockRepository>,
    )
    .unwrap();
    assert!(ok.is_success());

    let rejected = run_validate(
        &validate_args(Some("docs: readme")),
        &config,
        None::<&MockRepository>,
    )
    .unwrap();
    assert!(!rejected.is_success());
}
