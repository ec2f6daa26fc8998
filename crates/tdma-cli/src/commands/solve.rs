//! Solve command implementation.
//!
//! Loads one coefficient system, solves it with the Thomas algorithm and
//! prints the solution with per-row residuals.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use tdma_core::prelude::*;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::error::{CliError, CliResult};
use crate::input::{inline_system, load_system};
use crate::output::{format_residual, format_value, print_header, print_output, print_single, KeyValue, Minimal};

/// Arguments for the solve command.
#[derive(Args, Debug)]
pub struct SolveArgs {
    /// System file (.json, .toml or .csv)
    #[arg(conflicts_with_all = ["a", "b", "c", "d"])]
    pub file: Option<PathBuf>,

    /// Main diagonal, comma-separated
    #[arg(short = 'a', long, requires_all = ["b", "c", "d"], allow_hyphen_values = true)]
    pub a: Option<String>,

    /// Super-diagonal (coefficients of x[i+1]), comma-separated
    #[arg(short = 'b', long, allow_hyphen_values = true)]
    pub b: Option<String>,

    /// Sub-diagonal (coefficients of x[i-1]), comma-separated
    #[arg(short = 'c', long, allow_hyphen_values = true)]
    pub c: Option<String>,

    /// Right-hand side, comma-separated
    #[arg(short = 'd', long, allow_hyphen_values = true)]
    pub d: Option<String>,

    /// Pivot threshold (overrides the configured value)
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Relative residual tolerance (overrides the configured value)
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Fail if the residual check does not pass
    #[arg(long)]
    pub verify: bool,

    /// Compare against a dense LU solve of the same system
    #[arg(long)]
    pub cross_check: bool,
}

impl SolveArgs {
    /// Builds the system from the file or the inline values.
    fn system(&self) -> CliResult<TridiagonalSystem> {
        if let Some(path) = &self.file {
            return load_system(path);
        }
        match (&self.a, &self.b, &self.c, &self.d) {
            (Some(a), Some(b), Some(c), Some(d)) => inline_system(a, b, c, d),
            _ => Err(CliError::MissingArgument(
                "a system FILE or all of --a, --b, --c, --d".into(),
            )),
        }
    }

    fn solver_config(&self, ctx: &Context) -> SolverConfig {
        let mut config = ctx.settings.solver_config().with_verification(self.verify);
        if let Some(epsilon) = self.epsilon {
            config = config.with_pivot_epsilon(epsilon);
        }
        if let Some(tolerance) = self.tolerance {
            config = config.with_residual_tolerance(tolerance);
        }
        config
    }
}

/// One solved unknown.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct SolutionRow {
    #[tabled(rename = "i")]
    pub index: usize,
    #[tabled(rename = "phi")]
    pub value: String,
    #[tabled(rename = "Residual")]
    pub residual: String,
}

impl Minimal for SolutionRow {
    fn minimal(&self) -> String {
        self.value.clone()
    }
}

/// Full machine-readable result.
#[derive(Debug, Serialize)]
struct SolveReport {
    n: usize,
    solution: Vec<f64>,
    residuals: Vec<f64>,
    max_relative_residual: f64,
    diagonally_dominant: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    dense_max_difference: Option<f64>,
}

/// Execute the solve command.
pub fn execute(args: SolveArgs, ctx: &Context) -> Result<()> {
    let system = args.system()?;
    let config = args.solver_config(ctx);
    let solver = TridiagonalSolver::validated(config)?;

    tracing::info!(n = system.len(), "solving tridiagonal system");
    let phi = solver
        .solve(&system)
        .with_context(|| format!("failed to solve system of size {}", system.len()))?;

    let raw = residuals(&system, &phi)?;
    let (_, max_rel) = max_relative_residual(&system, &phi)?;
    let dominance = system.diagonal_dominance();

    let dense_max_difference = if args.cross_check {
        Some(cross_check(&system, &phi, &config)?)
    } else {
        None
    };

    let report = SolveReport {
        n: system.len(),
        solution: phi,
        residuals: raw,
        max_relative_residual: max_rel,
        diagonally_dominant: dominance.is_sufficient(),
        dense_max_difference,
    };

    if ctx.format == OutputFormat::Json {
        return print_single(&report);
    }

    let rows: Vec<SolutionRow> = report
        .solution
        .iter()
        .zip(&report.residuals)
        .enumerate()
        .map(|(index, (value, residual))| SolutionRow {
            index,
            value: format_value(*value, ctx.settings.precision),
            residual: format_residual(*residual),
        })
        .collect();

    if ctx.show_headers() {
        print_header("Solution");
    }
    print_output(&rows, ctx.format)?;

    if ctx.show_headers() {
        let mut summary = vec![
            KeyValue::new("Unknowns", report.n.to_string()),
            KeyValue::new("Diagonal dominance", format!("{dominance:?}")),
            KeyValue::new("Max relative residual", format_residual(max_rel)),
        ];
        if let Some(diff) = report.dense_max_difference {
            summary.push(KeyValue::new("Dense LU max difference", format_residual(diff)));
        }
        print_header("Summary");
        print_output(&summary, ctx.format)?;
    }

    Ok(())
}

/// Solves `system` densely and returns the max relative difference to `phi`.
fn cross_check(system: &TridiagonalSystem, phi: &[f64], config: &SolverConfig) -> Result<f64> {
    let dense = DenseLuSolver::new(config.pivot_epsilon)
        .solve_system(system)
        .context("dense reference solve failed")?;

    let scale = dense.iter().fold(1.0_f64, |m, x| m.max(x.abs()));
    let diff = phi
        .iter()
        .zip(&dense)
        .map(|(t, d)| (t - d).abs() / scale)
        .fold(0.0_f64, f64::max);

    tracing::debug!(diff, "dense cross-check");
    if diff > config.residual_tolerance {
        anyhow::bail!(
            "Thomas and dense LU disagree: max relative difference {diff:.3e} exceeds {:.3e}",
            config.residual_tolerance
        );
    }
    Ok(diff)
}
