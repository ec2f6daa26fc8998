//! Persisted CLI settings.
//!
//! Stored as TOML at `<config_dir>/tdma/config.toml` unless `--config` or
//! `TDMA_CONFIG` points elsewhere. Missing keys fall back to defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tdma_core::config::{DEFAULT_PIVOT_EPSILON, DEFAULT_RESIDUAL_TOLERANCE};
use tdma_core::SolverConfig;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

/// CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Output format when `--format` is not given.
    pub default_format: OutputFormat,
    /// Pivot threshold passed to the solver.
    pub pivot_epsilon: f64,
    /// Relative residual tolerance for verification.
    pub residual_tolerance: f64,
    /// Decimal places in table output.
    pub precision: usize,
    /// Colored terminal output.
    pub use_colors: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Table,
            pivot_epsilon: DEFAULT_PIVOT_EPSILON,
            residual_tolerance: DEFAULT_RESIDUAL_TOLERANCE,
            precision: 6,
            use_colors: true,
        }
    }
}

/// Settings keys accepted by `tdma config`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    /// Default output format
    DefaultFormat,
    /// Pivot epsilon
    PivotEpsilon,
    /// Residual tolerance
    ResidualTolerance,
    /// Output precision
    Precision,
    /// Colors
    UseColors,
}

impl SettingKey {
    /// Parses a key name or its short alias.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default_format" | "format" => Some(Self::DefaultFormat),
            "pivot_epsilon" | "epsilon" => Some(Self::PivotEpsilon),
            "residual_tolerance" | "tolerance" => Some(Self::ResidualTolerance),
            "precision" => Some(Self::Precision),
            "use_colors" | "colors" => Some(Self::UseColors),
            _ => None,
        }
    }

    /// Canonical key name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DefaultFormat => "default_format",
            Self::PivotEpsilon => "pivot_epsilon",
            Self::ResidualTolerance => "residual_tolerance",
            Self::Precision => "precision",
            Self::UseColors => "use_colors",
        }
    }

    /// One-line description.
    pub fn description(self) -> &'static str {
        match self {
            Self::DefaultFormat => "Default output format (table, json, csv, minimal)",
            Self::PivotEpsilon => "Pivots with |p| <= epsilon are singular",
            Self::ResidualTolerance => "Relative residual tolerance for --verify",
            Self::Precision => "Decimal places in table output (0-17)",
            Self::UseColors => "Enable colored output (true, false)",
        }
    }

    /// All keys in display order.
    pub fn all() -> &'static [Self] {
        &[
            Self::DefaultFormat,
            Self::PivotEpsilon,
            Self::ResidualTolerance,
            Self::Precision,
            Self::UseColors,
        ]
    }
}

impl Settings {
    /// Default settings file location.
    pub fn default_path() -> CliResult<PathBuf> {
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| CliError::Config("could not determine config directory".into()))?;
        Ok(base.join("tdma").join("config.toml"))
    }

    /// Resolves the explicit path or falls back to the default location.
    pub fn resolve_path(explicit: Option<&Path>) -> CliResult<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Loads settings, returning defaults if the file does not exist.
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let settings: Self = toml::from_str(&content).map_err(|e| CliError::parse(path, e))?;
        settings.solver_config().validate()?;
        Ok(settings)
    }

    /// Writes settings, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> CliResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Solver configuration derived from these settings.
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig::new(self.pivot_epsilon, self.residual_tolerance)
    }

    /// Returns the value of `key` as text.
    pub fn get(&self, key: SettingKey) -> String {
        match key {
            SettingKey::DefaultFormat => self.default_format.as_str().to_string(),
            SettingKey::PivotEpsilon => format!("{:e}", self.pivot_epsilon),
            SettingKey::ResidualTolerance => format!("{:e}", self.residual_tolerance),
            SettingKey::Precision => self.precision.to_string(),
            SettingKey::UseColors => self.use_colors.to_string(),
        }
    }

    /// Parses and stores `value` under `key`.
    pub fn set(&mut self, key: SettingKey, value: &str) -> CliResult<()> {
        let invalid = || CliError::Config(format!("invalid value for {}: {value}", key.as_str()));
        match key {
            SettingKey::DefaultFormat => {
                self.default_format = match value.to_lowercase().as_str() {
                    "table" => OutputFormat::Table,
                    "json" => OutputFormat::Json,
                    "csv" => OutputFormat::Csv,
                    "minimal" => OutputFormat::Minimal,
                    _ => return Err(invalid()),
                };
            }
            SettingKey::PivotEpsilon => {
                let v: f64 = value.parse().map_err(|_| invalid())?;
                SolverConfig::default().with_pivot_epsilon(v).validate()?;
                self.pivot_epsilon = v;
            }
            SettingKey::ResidualTolerance => {
                let v: f64 = value.parse().map_err(|_| invalid())?;
                SolverConfig::default().with_residual_tolerance(v).validate()?;
                self.residual_tolerance = v;
            }
            SettingKey::Precision => {
                let v: usize = value.parse().map_err(|_| invalid())?;
                if v > 17 {
                    return Err(invalid());
                }
                self.precision = v;
            }
            SettingKey::UseColors => {
                self.use_colors = value.parse().map_err(|_| invalid())?;
            }
        }
        Ok(())
    }

    /// Restores the default value of `key`.
    pub fn reset(&mut self, key: SettingKey) {
        let defaults = Self::default();
        match key {
            SettingKey::DefaultFormat => self.default_format = defaults.default_format,
            SettingKey::PivotEpsilon => self.pivot_epsilon = defaults.pivot_epsilon,
            SettingKey::ResidualTolerance => self.residual_tolerance = defaults.residual_tolerance,
            SettingKey::Precision => self.precision = defaults.precision,
            SettingKey::UseColors => self.use_colors = defaults.use_colors,
        }
    }
}
