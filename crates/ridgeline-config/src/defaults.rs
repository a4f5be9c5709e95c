use camino::Utf8PathBuf;

use crate::logging::LogFormat;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Default path of the rendered DOT document.
pub const DEFAULT_OUTPUT_PATH: &str = "graph.dot";

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Default location of the rendered graph.
#[must_use]
pub fn default_output_path() -> Utf8PathBuf {
    Utf8PathBuf::from(DEFAULT_OUTPUT_PATH)
}
