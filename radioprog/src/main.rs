mod cli;
mod config;
mod prompt;

use anyhow::{Context, Result};
use clap::Parser;
use radioprog_lib::images::list_images;
use radioprog_lib::ports::discover_usb_ports;
use radioprog_lib::{ChirpRunner, Error, Session, run_session};
use std::process;
use tracing::debug;

use crate::cli::{Cli, merge_config};
use crate::config::RadioProgConfig;
use crate::prompt::TerminalOperator;

fn main() {
    // Initialize tracing, set log level from environment variable
    // Log level can be controlled by setting the RUST_LOG environment variable, e.g.:
    // RUST_LOG=debug, RUST_LOG=radioprog_lib=trace, RUST_LOG=info
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    let args = Cli::parse();

    if let Err(e) = run(&args) {
        report(&e);
        process::exit(1);
    }
}

fn run(args: &Cli) -> Result<()> {
    let config = RadioProgConfig::from_file(&args.config)?;
    let settings = merge_config(args, config)?;
    debug!(?settings, "configuration loaded");

    let ports = discover_usb_ports()?;
    let images = list_images(&settings.images_dir, &settings.image_extension).with_context(
        || {
            format!(
                "Failed to list images in '{}'",
                settings.images_dir.display()
            )
        },
    )?;

    let session = Session::new(ports, settings.models, &settings.images_dir, images)?;
    let mut operator = TerminalOperator::new();
    let mut flasher = ChirpRunner::new(&settings.chirpc);

    let outcome = run_session(
        &session,
        &mut flasher,
        &mut operator,
        &settings.preselection,
    )?;
    println!("{}", outcome);
    Ok(())
}

fn report(e: &anyhow::Error) {
    match e.downcast_ref::<Error>() {
        Some(Error::PromptUnavailable(reason)) => {
            eprintln!(
                "Error: Interactive prompt couldn't be rendered in the current environment."
            );
            debug!(%reason, "prompt failure");
        }
        Some(Error::SequenceAborted { completed, source }) => {
            eprintln!("Error: {}", e);
            eprintln!("  caused by: {}", source);
            eprintln!("{} radio(s) were flashed before the failure.", completed);
        }
        _ => eprintln!("Error: {:#}", e),
    }
}
