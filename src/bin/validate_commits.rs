use anyhow::{Context, Result};
use clap::Parser;

use conventional_bump::cli::{self, run_validate, ValidateArgs};
use conventional_bump::config;
use conventional_bump::git::Git2Repository;
use conventional_bump::ui;

fn main() {
    let args = ValidateArgs::parse();
    cli::init_tracing(args.verbose);

    match run(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    }
}

fn run(args: &ValidateArgs) -> Result<bool> {
    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;

    let repo = if args.message.is_some() {
        None
    } else {
        match Git2Repository::open(".") {
            Ok(repo) => Some(repo),
            Err(e) => {
                tracing::debug!(error = %e, "no git repository found");
                None
            }
        }
    };

    let summary = run_validate(args, &config, repo.as_ref())?;
    Ok(summary.is_success())
}
