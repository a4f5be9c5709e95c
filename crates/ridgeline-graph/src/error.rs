//! Error types for call graph extraction.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors returned by call graph extraction.
///
/// Every variant is fatal: the run is aborted rather than retried.
#[derive(Debug, Error)]
pub enum GraphError {
    /// None of the candidate indent units occurs in the scanned text.
    #[error("no indentation unit found in the scanned files (tried {candidates})")]
    NoIndentUnit {
        /// Human-readable list of the candidates that were tried.
        candidates: String,
    },

    /// An indent unit was empty or mixed several whitespace characters.
    #[error("invalid indentation unit {unit:?}: {reason}")]
    InvalidIndentUnit {
        /// The rejected unit as supplied.
        unit: String,
        /// Why the unit was rejected.
        reason: &'static str,
    },

    /// A defining keyword could not be turned into a line pattern.
    #[error("invalid defining keyword {keyword:?}: {message}")]
    InvalidKeyword {
        /// The rejected keyword.
        keyword: String,
        /// Description of the failure.
        message: String,
    },

    /// A bare name could not be turned into a reference pattern.
    #[error("invalid reference pattern for {alias:?}: {message}")]
    InvalidAlias {
        /// The bare name.
        alias: String,
        /// Description of the failure.
        message: String,
    },

    /// A symbol with the same scope path was already recorded.
    ///
    /// This means the scope stack desynchronised from the symbol table.
    #[error("duplicate symbol path '{path}' defined at line {line}")]
    DuplicatePath {
        /// Dotted rendering of the repeated path.
        path: String,
        /// One-based line of the second definition.
        line: usize,
    },

    /// Wraps an error raised while scanning a particular file.
    #[error("{path}: {source}")]
    InFile {
        /// File that was being scanned.
        path: Utf8PathBuf,
        /// The underlying failure.
        #[source]
        source: Box<Self>,
    },
}

impl GraphError {
    /// Creates a new `InvalidIndentUnit` error.
    #[must_use]
    pub fn invalid_indent_unit(unit: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidIndentUnit {
            unit: unit.into(),
            reason,
        }
    }

    /// Creates a new `InvalidKeyword` error.
    #[must_use]
    pub fn invalid_keyword(keyword: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidKeyword {
            keyword: keyword.into(),
            message: message.into(),
        }
    }

    /// Creates a new `InvalidAlias` error.
    #[must_use]
    pub fn invalid_alias(alias: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidAlias {
            alias: alias.into(),
            message: message.into(),
        }
    }

    /// Attributes this error to the file being scanned.
    #[must_use]
    pub fn in_file(self, path: impl Into<Utf8PathBuf>) -> Self {
        Self::InFile {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping file attribution.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::InFile { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
