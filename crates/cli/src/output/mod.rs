//! Output formatting utilities
//!
//! This module provides formatters for CLI output in both human-readable
//! and JSON formats.

mod formatter;

pub use formatter::Formatter;

use s3upload_core::Defaults;

/// Output configuration derived from CLI flags
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Use JSON output format
    pub json: bool,
    /// Disable colored output
    pub no_color: bool,
    /// Suppress non-error output
    pub quiet: bool,
}

impl OutputConfig {
    /// Fill in settings the flags left at their defaults from the config file
    pub fn apply_defaults(&mut self, defaults: &Defaults) {
        self.json |= defaults.json_output();
        self.no_color |= defaults.color_disabled();
    }
}
