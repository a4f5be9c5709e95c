//! Layered configuration for the ridgeline call graph extractor.
//!
//! Values are merged from built-in defaults, an optional TOML file, the
//! `RIDGELINE_` environment variables, and finally command-line flags, with
//! later layers winning. The keyword catalogue that maps file extensions to
//! defining keywords lives in [`keywords`].

mod defaults;
pub mod keywords;
mod logging;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_OUTPUT_PATH, default_log_filter_string, default_log_format,
    default_output_path,
};
pub use keywords::{KeywordCatalogue, KeywordCatalogueError};
pub use logging::LogFormat;

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "RIDGELINE")]
pub struct Config {
    /// Tracing filter expression, e.g. `info` or `ridgeline=debug`.
    #[serde(default = "default_log_filter_string")]
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format of diagnostic logs.
    #[serde(default = "default_log_format")]
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// JSON keyword catalogue replacing the built-in one.
    #[serde(default)]
    pub keywords_path: Option<Utf8PathBuf>,
    /// Where the DOT document is written when `--output` is absent.
    #[serde(default = "default_output_path")]
    #[ortho_config(default = default_output_path())]
    pub output_path: Utf8PathBuf,
}

impl Config {
    /// Returns the tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the configured keyword catalogue path, if any.
    #[must_use]
    pub fn keywords_path(&self) -> Option<&Utf8Path> {
        self.keywords_path.as_deref()
    }

    /// Returns the default DOT output path.
    #[must_use]
    pub fn output_path(&self) -> &Utf8Path {
        &self.output_path
    }

    /// Loads the keyword catalogue this configuration points at.
    ///
    /// # Errors
    /// Returns [`KeywordCatalogueError`] when a configured catalogue cannot be
    /// read or parsed.
    pub fn keyword_catalogue(&self) -> Result<KeywordCatalogue, KeywordCatalogueError> {
        KeywordCatalogue::load_or_builtin(self.keywords_path())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            keywords_path: None,
            output_path: default_output_path(),
        }
    }
}
