use anyhow::{Context, Result};
use clap::Parser;

use conventional_bump::cli::{self, run_bump, BumpArgs};
use conventional_bump::config;
use conventional_bump::git::Git2Repository;
use conventional_bump::sync::SystemCommandRunner;
use conventional_bump::ui;

fn main() {
    let args = BumpArgs::parse();
    cli::init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: &BumpArgs) -> Result<()> {
    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;

    let repo = match Git2Repository::open(".") {
        Ok(repo) => Some(repo),
        Err(e) => {
            tracing::debug!(error = %e, "no git repository found");
            None
        }
    };

    let today = chrono::Local::now().date_naive();
    let outcome = run_bump(args, &config, repo.as_ref(), &SystemCommandRunner, today)?;

    // Only the bare version goes to stdout so CI can capture it
    println!("{}", outcome.version);
    Ok(())
}
