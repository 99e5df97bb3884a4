//! Knotes CLI - seal, open and inspect note envelopes
//!
//! A thin host around `knotes-core`: it reads the server secret and config,
//! then hands note content to the confidentiality engine.

mod app;
mod cli;
mod commands;
mod config;
mod envelope_file;
mod errors;
mod helpers;
mod logging;
#[cfg(test)]
mod test_env;

use clap::{CommandFactory, Parser};

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{inspect, misc, open, seal};
use crate::errors::exit_code_for;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(exit_code_for(&e));
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = AppContext::load(&cli)?;
    logging::init(&ctx.config.logging.level, ctx.quiet);

    match cli.command {
        Some(Commands::Seal(args)) => seal::handle_seal(&ctx, args),
        Some(Commands::Open(args)) => open::handle_open(&ctx, &args),
        Some(Commands::Inspect(args)) => inspect::handle_inspect(&args),
        Some(Commands::Completions(args)) => misc::handle_completions(&args),
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}
