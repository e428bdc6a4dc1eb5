use crate::error::{BumpError, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Command;

/// A fully described external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub env: HashMap<String, String>,
    pub cwd: Option<PathBuf>,
}

impl CommandInvocation {
    /// Command line as typed in a shell, for messages
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Captured result of a finished command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Runs external commands to completion
pub trait CommandRunner {
    /// Spawn the command, wait for it and capture its output.
    ///
    /// A command that starts and exits non-zero is `Ok` with `success == false`;
    /// `Err` is reserved for commands that could not be started.
    fn run(&self, invocation: &CommandInvocation) -> Result<CommandOutput>;
}

/// [CommandRunner] backed by `std::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, invocation: &CommandInvocation) -> Result<CommandOutput> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);

        for (key, value) in &invocation.env {
            cmd.env(key, value);
        }

        if let Some(cwd) = &invocation.cwd {
            cmd.current_dir(cwd);
        }

        tracing::debug!(command = %invocation.display(), "running external command");

        let output = cmd.output().map_err(|e| {
            BumpError::sync(format!(
                "Failed to execute '{}': {}",
                invocation.display(),
                e
            ))
        })?;

        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
