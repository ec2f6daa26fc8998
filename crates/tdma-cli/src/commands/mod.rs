//! CLI command implementations.

pub mod batch;
pub mod config;
pub mod residual;
pub mod solve;

// Re-export submodules for convenience
pub use batch::BatchArgs;
pub use config::ConfigArgs;
pub use residual::ResidualArgs;
pub use solve::SolveArgs;

use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::settings::Settings;

/// State shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective output format.
    pub format: OutputFormat,
    /// Suppress headers and informational lines.
    pub quiet: bool,
    /// Loaded settings.
    pub settings: Settings,
    /// Where the settings came from (or would be written to).
    pub settings_path: PathBuf,
}

impl Context {
    /// True when section headers should be printed.
    pub fn show_headers(&self) -> bool {
        self.format == OutputFormat::Table && !self.quiet
    }
}
