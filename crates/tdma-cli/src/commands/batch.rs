//! Batch command implementation.
//!
//! Solves several system files independently. A file that fails to load or
//! solve is reported in its own row and does not stop the others.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use tdma_core::prelude::*;

use crate::commands::Context;
use crate::input::load_system;
use crate::output::{format_residual, print_header, print_output, print_warning, Minimal};

/// Arguments for the batch command.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// System files (.json, .toml or .csv)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Pivot threshold (overrides the configured value)
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Also run the residual check on every solution
    #[arg(long)]
    pub verify: bool,
}

/// Outcome for one file.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct BatchRow {
    #[tabled(rename = "File")]
    pub file: String,
    #[tabled(rename = "N")]
    pub n: usize,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Max Rel Residual")]
    pub max_residual: String,
}

impl Minimal for BatchRow {
    fn minimal(&self) -> String {
        format!("{} {}", self.file, self.status)
    }
}

/// Execute the batch command.
pub fn execute(args: BatchArgs, ctx: &Context) -> Result<()> {
    let mut config = ctx.settings.solver_config().with_verification(args.verify);
    if let Some(epsilon) = args.epsilon {
        config = config.with_pivot_epsilon(epsilon);
    }
    let batch = BatchSolver::new(TridiagonalSolver::validated(config)?);

    let mut rows = Vec::with_capacity(args.files.len());
    let mut systems = Vec::new();
    let mut slots = Vec::new();

    for path in &args.files {
        let file = path.display().to_string();
        match load_system(path) {
            Ok(system) => {
                slots.push(rows.len());
                rows.push(BatchRow {
                    file,
                    n: system.len(),
                    status: String::new(),
                    max_residual: "-".into(),
                });
                systems.push(system);
            }
            Err(e) => {
                tracing::warn!(file = %file, error = %e, "could not load system");
                rows.push(BatchRow {
                    file,
                    n: 0,
                    status: format!("error: {e}"),
                    max_residual: "-".into(),
                });
            }
        }
    }

    tracing::info!(count = systems.len(), "solving batch");
    let results = batch.solve_all(&systems);

    for ((slot, system), result) in slots.into_iter().zip(&systems).zip(results) {
        let row = &mut rows[slot];
        match result.and_then(|phi| max_relative_residual(system, &phi)) {
            Ok((_, max_rel)) => {
                row.status = "ok".into();
                row.max_residual = format_residual(max_rel);
            }
            Err(e) => row.status = format!("error: {e}"),
        }
    }

    if ctx.show_headers() {
        print_header("Batch Results");
    }
    print_output(&rows, ctx.format)?;

    let failed = rows.iter().filter(|r| r.status != "ok").count();
    if failed > 0 {
        if !ctx.quiet {
            print_warning(&format!("{failed} of {} systems failed", rows.len()));
        }
        anyhow::bail!("{failed} system(s) failed");
    }
    Ok(())
}
