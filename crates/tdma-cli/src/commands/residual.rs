//! Residual command implementation.
//!
//! Evaluates `a[i]x[i] - b[i]x[i+1] - c[i]x[i-1] - d[i]` for a supplied
//! candidate solution, e.g. one produced by another solver.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use tdma_core::prelude::*;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::input::{load_system, parse_values};
use crate::output::{format_residual, format_value, print_header, print_output, print_single, print_success, Minimal};

/// Arguments for the residual command.
#[derive(Args, Debug)]
pub struct ResidualArgs {
    /// System file (.json, .toml or .csv)
    pub file: PathBuf,

    /// Candidate solution, comma-separated
    #[arg(short, long, allow_hyphen_values = true)]
    pub solution: String,

    /// Fail if the max relative residual exceeds the tolerance
    #[arg(long)]
    pub check: bool,

    /// Relative residual tolerance (overrides the configured value)
    #[arg(long)]
    pub tolerance: Option<f64>,
}

/// One row's residual.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ResidualRow {
    #[tabled(rename = "i")]
    pub index: usize,
    #[tabled(rename = "phi")]
    pub value: String,
    #[tabled(rename = "Residual")]
    pub residual: String,
}

impl Minimal for ResidualRow {
    fn minimal(&self) -> String {
        self.residual.clone()
    }
}

#[derive(Debug, Serialize)]
struct ResidualReport {
    residuals: Vec<f64>,
    worst_row: usize,
    max_relative_residual: f64,
    tolerance: f64,
    passed: bool,
}

/// Execute the residual command.
pub fn execute(args: ResidualArgs, ctx: &Context) -> Result<()> {
    let system = load_system(&args.file)?;
    let phi = parse_values("solution", &args.solution)?;

    let mut config = ctx.settings.solver_config();
    if let Some(tolerance) = args.tolerance {
        config = config.with_residual_tolerance(tolerance);
    }
    config.validate()?;

    let raw = residuals(&system, &phi)?;
    let (worst_row, max_rel) = max_relative_residual(&system, &phi)?;
    let passed = max_rel <= config.residual_tolerance;

    tracing::debug!(worst_row, max_rel, passed, "residual evaluated");

    if ctx.format == OutputFormat::Json {
        print_single(&ResidualReport {
            residuals: raw,
            worst_row,
            max_relative_residual: max_rel,
            tolerance: config.residual_tolerance,
            passed,
        })?;
    } else {
        let rows: Vec<ResidualRow> = phi
            .iter()
            .zip(&raw)
            .enumerate()
            .map(|(index, (value, residual))| ResidualRow {
                index,
                value: format_value(*value, ctx.settings.precision),
                residual: format_residual(*residual),
            })
            .collect();

        if ctx.show_headers() {
            print_header("Residuals");
        }
        print_output(&rows, ctx.format)?;
    }

    if args.check {
        verify_solution(&system, &phi, config.residual_tolerance)?;
        if ctx.show_headers() {
            print_success(&format!(
                "Max relative residual {} within {}",
                format_residual(max_rel),
                format_residual(config.residual_tolerance)
            ));
        }
    }
    Ok(())
}
