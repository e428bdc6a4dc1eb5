//! Diagnostic output for the bump workflow.
//!
//! Everything here goes to stderr so that stdout carries only the final
//! version string for automated callers.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::VersionText;

const BANNER_WIDTH: usize = 60;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().for_stderr(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green().for_stderr(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow().for_stderr(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow().for_stderr(), warning);
}

/// Display the proposed version change.
pub fn display_version_change(current: &VersionText, next: &VersionText) {
    eprintln!(
        "{} {} → {}",
        style("Version bump:").bold().for_stderr(),
        style(current).red().for_stderr(),
        style(next).green().for_stderr()
    );
}

/// Relay output of an external command, indented.
pub fn display_relayed_output(output: &str) {
    for line in output.lines().filter(|line| !line.trim().is_empty()) {
        eprintln!("    {}", line);
    }
}

/// Closing banner after a successful bump.
pub fn display_summary(current: &VersionText, next: &VersionText) {
    let rule = "=".repeat(BANNER_WIDTH);
    eprintln!("\n{}", rule);
    eprintln!(
        "{} Version bumped successfully!",
        style("✓").green().for_stderr()
    );
    eprintln!("{}", rule);
    eprintln!("   {} → {}", current, next);
    eprintln!("{}\n", rule);
}
