//! Error types for the CLI runtime.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use camino::Utf8PathBuf;
use ridgeline_config::KeywordCatalogueError;
use ridgeline_graph::GraphError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Keywords(#[from] KeywordCatalogueError),
    #[error("root directory '{path}' does not exist or is not a directory")]
    MissingRoot { path: Utf8PathBuf },
    #[error("invalid extension pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: globset::Error,
    },
    #[error("failed to walk '{root}': {source}")]
    Walk {
        root: Utf8PathBuf,
        source: walkdir::Error,
    },
    #[error("path '{}' is not valid UTF-8", path.display())]
    NonUtf8Path { path: PathBuf },
    #[error("no files with extensions [{extensions}] found under '{root}'")]
    NoInputFiles {
        root: Utf8PathBuf,
        extensions: String,
    },
    #[error("failed to read source file '{path}': {source}")]
    ReadSource { path: Utf8PathBuf, source: io::Error },
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("failed to write graph to '{path}': {source}")]
    WriteGraph { path: Utf8PathBuf, source: io::Error },
    #[error("failed to write report: {0}")]
    Report(io::Error),
}
