//! Version synchronization step
//!
//! After the version file is rewritten, an optional external command
//! propagates the new version to other project files. The command receives
//! `--version-file <path>` and a few `CONVENTIONAL_BUMP_*` environment variables.
//! Any failure is fatal to the bump.

pub mod executor;

pub use executor::{CommandInvocation, CommandOutput, CommandRunner, SystemCommandRunner};

use crate::domain::{BumpKind, VersionText};
use crate::error::{BumpError, Result};
use std::collections::HashMap;
use std::path::PathBuf;

/// Information handed to the sync command
#[derive(Debug, Clone)]
pub struct SyncContext {
    /// Version file that was just written
    pub version_file: PathBuf,
    /// Version before the bump
    pub previous: VersionText,
    /// Version after the bump
    pub version: VersionText,
    /// How the version was decided
    pub kind: BumpKind,
}

impl SyncContext {
    /// Map context fields to CONVENTIONAL_BUMP_* environment variables
    pub fn to_env_vars(&self) -> HashMap<String, String> {
        let mut env = HashMap::new();

        env.insert(
            "CONVENTIONAL_BUMP_VERSION".to_string(),
            self.version.to_string(),
        );
        env.insert(
            "CONVENTIONAL_BUMP_PREVIOUS_VERSION".to_string(),
            self.previous.to_string(),
        );
        env.insert("CONVENTIONAL_BUMP_KIND".to_string(), self.kind.to_string());
        env.insert(
            "CONVENTIONAL_BUMP_VERSION_FILE".to_string(),
            self.version_file.display().to_string(),
        );

        env
    }

    /// Build the invocation for a configured argv list
    pub fn invocation(&self, command: &[String]) -> Result<CommandInvocation> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| BumpError::config("sync.command must name a program"))?;

        let mut args = args.to_vec();
        args.push("--version-file".to_string());
        args.push(self.version_file.display().to_string());

        Ok(CommandInvocation {
            program: program.clone(),
            args,
            env: self.to_env_vars(),
            cwd: None,
        })
    }
}

/// Run the sync command and return its standard output.
///
/// Spawn failures and non-zero exits become [BumpError::Sync] carrying the
/// command's stderr.
pub fn run_sync<C: CommandRunner>(
    runner: &C,
    command: &[String],
    context: &SyncContext,
) -> Result<String> {
    let invocation = context.invocation(command)?;
    let output = runner.run(&invocation)?;

    if !output.success {
        let code = output
            .code
            .map_or_else(|| "signal".to_string(), |code| code.to_string());
        return Err(BumpError::sync(format!(
            "'{}' failed with exit code {}\n{}",
            invocation.display(),
            code,
            output.stderr.trim_end()
        )));
    }

    Ok(output.stdout)
}
