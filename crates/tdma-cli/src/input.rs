//! Loading coefficient systems from files and command-line values.
//!
//! JSON and TOML files hold one object with four arrays; CSV files hold one
//! row per equation. Column and key names are `a, b, c, d` or the aliases
//! `main, upper, lower, rhs`.

use std::path::Path;

use serde::Deserialize;
use tdma_core::TridiagonalSystem;

use crate::error::{CliError, CliResult};

/// Whole-system layout for JSON and TOML files.
#[derive(Debug, Deserialize)]
struct SystemFile {
    #[serde(alias = "main")]
    a: Vec<f64>,
    #[serde(alias = "upper")]
    b: Vec<f64>,
    #[serde(alias = "lower")]
    c: Vec<f64>,
    #[serde(alias = "rhs")]
    d: Vec<f64>,
}

/// One equation of a CSV file.
#[derive(Debug, Deserialize)]
struct EquationRow {
    #[serde(alias = "main")]
    a: f64,
    #[serde(alias = "upper")]
    b: f64,
    #[serde(alias = "lower")]
    c: f64,
    #[serde(alias = "rhs")]
    d: f64,
}

impl SystemFile {
    fn into_system(self) -> CliResult<TridiagonalSystem> {
        Ok(TridiagonalSystem::new(self.a, self.b, self.c, self.d)?)
    }
}

/// Loads a system from `path`, choosing the decoder by extension.
pub fn load_system(path: &Path) -> CliResult<TridiagonalSystem> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    tracing::debug!(path = %path.display(), format = %extension, "loading system");

    match extension.as_str() {
        "json" => {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str::<SystemFile>(&content)
                .map_err(|e| CliError::parse(path, e))?
                .into_system()
        }
        "toml" => {
            let content = std::fs::read_to_string(path)?;
            toml::from_str::<SystemFile>(&content)
                .map_err(|e| CliError::parse(path, e))?
                .into_system()
        }
        "csv" => load_csv(path),
        other => Err(CliError::UnsupportedFormat(if other.is_empty() {
            path.display().to_string()
        } else {
            format!(".{other}")
        })),
    }
}

fn load_csv(path: &Path) -> CliResult<TridiagonalSystem> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| CliError::parse(path, e))?;

    let mut file = SystemFile {
        a: Vec::new(),
        b: Vec::new(),
        c: Vec::new(),
        d: Vec::new(),
    };
    for record in reader.deserialize::<EquationRow>() {
        let row = record.map_err(|e| CliError::parse(path, e))?;
        file.a.push(row.a);
        file.b.push(row.b);
        file.c.push(row.c);
        file.d.push(row.d);
    }
    file.into_system()
}

/// Parses a comma-separated list of numbers.
pub fn parse_values(sequence: &str, input: &str) -> CliResult<Vec<f64>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>().map_err(|_| CliError::InvalidNumber {
                sequence: sequence.to_string(),
                value: s.to_string(),
            })
        })
        .collect()
}

/// Builds a system from four comma-separated lists.
pub fn inline_system(a: &str, b: &str, c: &str, d: &str) -> CliResult<TridiagonalSystem> {
    Ok(TridiagonalSystem::new(
        parse_values("a", a)?,
        parse_values("b", b)?,
        parse_values("c", c)?,
        parse_values("d", d)?,
    )?)
}
