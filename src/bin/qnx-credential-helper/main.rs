//! QNX credential helper CLI

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use qnx_credential_helper::util::diagnostic;
use qnx_credential_helper::CredentialError;

fn main() {
    let cli = Cli::parse();

    // Set up logging. Stdout carries the response, so logs go to stderr
    // and stay quiet unless something is wrong.
    let filter = if cli.verbose {
        EnvFilter::new("qnx_credential_helper=debug")
    } else {
        EnvFilter::new("qnx_credential_helper=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let color = !cli.no_color && io::stderr().is_terminal();

    if let Err(e) = run(&cli) {
        match e.downcast_ref::<CredentialError>() {
            Some(err) => diagnostic::emit(&err.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Get) | None => commands::get::execute(cli),
    }
}
