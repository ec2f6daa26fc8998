//! TDMA CLI - Command-line interface for the tridiagonal solver.
//!
//! # Usage
//!
//! ```bash
//! # Solve inline coefficients
//! tdma solve --a 300,200,300 --b 200,200,0 --c 0,200,200 --d 200000,0,120000
//!
//! # Solve a system file and cross-check against dense LU
//! tdma solve rod.json --verify --cross-check
//!
//! # Check a candidate solution
//! tdma residual rod.json --solution 466.67,400,333.33
//!
//! # Solve many files
//! tdma batch cases/*.toml
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod commands;
mod error;
mod input;
mod output;
mod settings;

use cli::{Cli, Commands};
use commands::Context;
use settings::Settings;

fn init_logging(cli: &Cli) {
    let default = if cli.verbose {
        "tdma_cli=debug,tdma_core=debug"
    } else if cli.quiet {
        "error"
    } else {
        "tdma_cli=warn,tdma_core=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let settings_path = Settings::resolve_path(cli.config.as_deref())?;
    let settings = Settings::load(&settings_path)?;

    if !settings.use_colors {
        colored::control::set_override(false);
    }

    let ctx = Context {
        format: cli.format.unwrap_or(settings.default_format),
        quiet: cli.quiet,
        settings,
        settings_path,
    };

    match cli.command {
        Commands::Solve(args) => commands::solve::execute(args, &ctx),
        Commands::Residual(args) => commands::residual::execute(args, &ctx),
        Commands::Batch(args) => commands::batch::execute(args, &ctx),
        Commands::Config(args) => commands::config::execute(args, &ctx),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = run(cli) {
        output::print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
