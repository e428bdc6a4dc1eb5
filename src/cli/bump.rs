//! The `bump-version` workflow
//!
//! Reads the current version, decides the next one (manual, forced or from
//! commit history), then writes the version file, the changelog section and
//! runs the sync step. Nothing is written until the new version is known and
//! valid; `--dry-run` stops right before the first write.

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

use crate::boundary::BoundaryWarning;
use crate::changelog::{update_changelog, ChangelogOutcome};
use crate::config::Config;
use crate::conventional::classify;
use crate::domain::{BumpKind, VersionBump, VersionText};
use crate::error::{BumpError, Result};
use crate::git::{subjects_since_latest_tag, Repository};
use crate::sync::{run_sync, CommandRunner, SyncContext};
use crate::ui;

/// Bump type requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RequestedBump {
    /// Detect from commits since the last tag
    Auto,
    Major,
    Minor,
}

#[derive(Debug, Clone, Parser)]
#[command(
    name = "bump-version",
    about = "Bump the MAJOR.MINOR project version based on conventional commits",
    version
)]
pub struct BumpArgs {
    #[arg(
        long = "type",
        value_enum,
        default_value_t = RequestedBump::Auto,
        help = "Version bump type (auto = detect from commits)"
    )]
    pub bump_type: RequestedBump,

    #[arg(long, value_name = "X.Y", help = "Manually specify version (e.g., 3.8)")]
    pub manual: Option<String>,

    #[arg(long, help = "Show what would happen without making changes")]
    pub dry_run: bool,

    #[arg(long, value_name = "PATH", help = "Path to the version file [default: VERSION]")]
    pub version_file: Option<PathBuf>,

    #[arg(long, value_name = "PATH", help = "Path to the changelog [default: CHANGELOG.md]")]
    pub changelog_file: Option<PathBuf>,

    #[arg(long, help = "Do not add a changelog section")]
    pub no_changelog: bool,

    #[arg(long, help = "Do not run the configured sync command")]
    pub no_sync: bool,

    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable debug logging")]
    pub verbose: bool,
}

/// Where the workflow stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpStatus {
    /// No commits since the last tag
    NoCommits,
    /// Next version equals the current one
    Unchanged,
    /// Version computed, nothing written
    DryRun,
    /// Files written and sync step done
    Applied,
}

/// Result of a bump run; `version` is what gets printed on stdout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpOutcome {
    pub previous: VersionText,
    pub version: VersionText,
    pub kind: BumpKind,
    pub status: BumpStatus,
}

/// Read and validate the version file, keeping its trimmed text
pub fn read_version_file(path: &Path) -> Result<VersionText> {
    if !path.exists() {
        return Err(BumpError::version(format!(
            "VERSION file not found at {}",
            path.display()
        )));
    }

    let content = fs::read_to_string(path)?;
    VersionText::parse(content.trim())
}

/// Write `version` followed by a newline
pub fn write_version_file(path: &Path, version: &VersionText) -> Result<()> {
    fs::write(path, format!("{}\n", version))?;
    Ok(())
}

/// Commit subjects since the last tag, empty when history cannot be read
fn collect_commits<R: Repository>(repo: Option<&R>) -> (Option<String>, Vec<String>) {
    let Some(repo) = repo else {
        ui::display_boundary_warning(&BoundaryWarning::UnreadableHistory {
            reason: "not inside a git repository".to_string(),
        });
        return (None, Vec::new());
    };

    match subjects_since_latest_tag(repo) {
        Ok(found) => found,
        Err(e) => {
            ui::display_boundary_warning(&BoundaryWarning::UnreadableHistory {
                reason: e.to_string(),
            });
            (None, Vec::new())
        }
    }
}

/// Run the bump workflow.
///
/// `repo` is only consulted for `--type auto`; `None` behaves like an
/// unreadable history. `today` dates the changelog section. An empty
/// `--manual` value counts as not given.
///
/// Writes happen in order: version file, changelog, sync command. A failure
/// in a later step returns an error without restoring the files already
/// written, so the version file may hold the new version while the
/// changelog or synced files do not.
pub fn run_bump<R: Repository, C: CommandRunner>(
    args: &BumpArgs,
    config: &Config,
    repo: Option<&R>,
    runner: &C,
    today: NaiveDate,
) -> Result<BumpOutcome> {
    let version_file = args
        .version_file
        .clone()
        .unwrap_or_else(|| config.files.version.clone());
    let changelog_file = args
        .changelog_file
        .clone()
        .unwrap_or_else(|| config.files.changelog.clone());

    let current = read_version_file(&version_file)?;
    ui::display_status(&format!("Current version: {}", current));

    let manual = args.manual.as_deref().filter(|manual| !manual.is_empty());

    let (next, kind) = if let Some(manual) = manual {
        let next = VersionText::parse(manual.trim())?;
        ui::display_status(&format!("Manual version specified: {}", next));
        (next, BumpKind::Manual)
    } else {
        let bump = match args.bump_type {
            RequestedBump::Auto => {
                let (latest_tag, commits) = collect_commits(repo);

                if commits.iter().all(|subject| subject.is_empty()) {
                    ui::display_boundary_warning(&BoundaryWarning::NoNewCommits { latest_tag });
                    return Ok(BumpOutcome {
                        previous: current.clone(),
                        version: current,
                        kind: BumpKind::None,
                        status: BumpStatus::NoCommits,
                    });
                }

                let bump = classify(&commits);
                ui::display_status(&format!("Analyzed {} commit(s)", commits.len()));
                ui::display_status(&format!("Detected bump type: {}", BumpKind::from(bump)));
                bump
            }
            RequestedBump::Major => VersionBump::Major,
            RequestedBump::Minor => VersionBump::Minor,
        };

        if args.bump_type != RequestedBump::Auto {
            ui::display_status(&format!("Bump type specified: {}", BumpKind::from(bump)));
        }

        (current.bump(bump), BumpKind::from(bump))
    };

    let mut outcome = BumpOutcome {
        previous: current.clone(),
        version: next.clone(),
        kind,
        status: BumpStatus::Unchanged,
    };

    if next == current {
        ui::display_success(&format!(
            "No version change needed (staying at {})",
            current
        ));
        return Ok(outcome);
    }

    ui::display_version_change(&current, &next);

    if args.dry_run {
        ui::display_status("DRY RUN - No changes made");
        outcome.status = BumpStatus::DryRun;
        return Ok(outcome);
    }

    write_version_file(&version_file, &next)?;
    ui::display_success(&format!("Updated {} to {}", version_file.display(), next));

    if args.no_changelog {
        tracing::debug!("changelog update disabled");
    } else {
        apply_changelog(&changelog_file, &next, kind, today)?;
    }

    if args.no_sync {
        ui::display_status("Skipping version sync (--no-sync)");
    } else {
        match &config.sync.command {
            Some(command) => {
                let context = SyncContext {
                    version_file: version_file.clone(),
                    previous: current.clone(),
                    version: next.clone(),
                    kind,
                };
                let stdout = run_sync(runner, command, &context)?;
                ui::display_success("Synchronized version across all files");
                ui::display_relayed_output(&stdout);
            }
            None => ui::display_boundary_warning(&BoundaryWarning::SyncNotConfigured),
        }
    }

    ui::display_summary(&current, &next);
    outcome.status = BumpStatus::Applied;
    Ok(outcome)
}

fn apply_changelog(
    path: &Path,
    version: &VersionText,
    kind: BumpKind,
    today: NaiveDate,
) -> Result<()> {
    match update_changelog(path, version, kind, today)? {
        ChangelogOutcome::Updated => ui::display_success(&format!(
            "Updated {} with version {}",
            path.display(),
            version
        )),
        ChangelogOutcome::Missing => {
            ui::display_boundary_warning(&BoundaryWarning::ChangelogMissing {
                path: path.to_path_buf(),
            })
        }
        ChangelogOutcome::AlreadyPresent => {
            ui::display_boundary_warning(&BoundaryWarning::ChangelogEntryExists {
                version: version.to_string(),
            })
        }
        ChangelogOutcome::NoInsertionPoint => {
            ui::display_boundary_warning(&BoundaryWarning::ChangelogNoInsertionPoint {
                path: path.to_path_buf(),
            })
        }
    }
    Ok(())
}
