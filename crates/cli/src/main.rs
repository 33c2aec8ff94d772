use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};

use launchpad_core::command_builder::build;
use launchpad_core::discovery::{find_executable, resolve_working_dir};
use launchpad_core::error::Result;
use launchpad_core::launcher::{host_launcher, LaunchOutcome, Launcher};
use launchpad_core::preview::render;
use launchpad_core::quoting::Platform;

use launchpad_cli::cli_args::Args;
use launchpad_cli::confirmation::{confirm_launch, RunChoice};
use launchpad_cli::{output, profile};

fn execute() -> Result<()> {
    let args = Args::parse();

    let profile = profile::load_profile(&args)?;
    profile::save_if_requested(&args, &profile)?;

    let executable = match profile.executable.as_deref().map(str::trim) {
        Some(executable) if !executable.is_empty() => executable.to_string(),
        _ => find_executable(),
    };
    let working_dir = resolve_working_dir(&profile.working_directory);
    debug!(
        "Executable `{}`, working directory `{}`",
        executable,
        working_dir.display()
    );

    let invocation = build(&profile.configuration, &executable);
    let quote_style = args.quote_style.unwrap_or_else(Platform::host);
    output::print_preview(
        &working_dir.display().to_string(),
        &render(&invocation, quote_style),
    )?;

    if args.dry_run {
        println!("Dry run is specified, exiting without launching.");
        return Ok(());
    }

    if !args.force && confirm_launch()? == RunChoice::No {
        info!("Launch cancelled by user");
        return Ok(());
    }

    match host_launcher().launch(&invocation, &working_dir) {
        LaunchOutcome::Failed(e) => Err(e),
        outcome => output::print_outcome(&outcome),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
