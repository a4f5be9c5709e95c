//! Catalogue mapping file extensions to their defining keywords.
//!
//! The catalogue is a JSON object whose keys are extensions (without the
//! leading dot) and whose values are ordered keyword lists:
//!
//! ```json
//! { "py": ["def", "class"], "rs": ["fn", "struct"] }
//! ```
//!
//! Keyword order matters: the first keyword whose pattern matches a line
//! names the definition.

use std::collections::BTreeMap;
use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUILTIN_KEYWORDS: &[(&str, &[&str])] = &[
    ("go", &["func", "type"]),
    ("js", &["function", "class"]),
    ("kt", &["fun", "class", "object", "interface"]),
    ("py", &["def", "class"]),
    ("rb", &["def", "class", "module"]),
    ("rs", &["fn", "struct", "enum", "trait", "mod"]),
    ("swift", &["func", "class", "struct", "enum", "protocol"]),
    ("ts", &["function", "class", "interface"]),
];

/// Errors raised while loading or querying a [`KeywordCatalogue`].
#[derive(Debug, Error)]
pub enum KeywordCatalogueError {
    /// The catalogue file could not be read.
    #[error("failed to read keyword catalogue '{path}': {source}")]
    Read {
        /// Catalogue location.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The catalogue text is not a JSON object of string lists.
    #[error("failed to parse keyword catalogue '{origin}': {source}")]
    Parse {
        /// Where the text came from.
        origin: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// An extension maps to an empty keyword list.
    #[error("extension '{extension}' has no defining keywords")]
    EmptyKeywords {
        /// Offending extension.
        extension: String,
    },
    /// A requested extension has no catalogue entry.
    #[error("no defining keywords known for extension '{extension}'")]
    UnknownExtension {
        /// Requested extension.
        extension: String,
    },
}

/// Ordered defining keywords per file extension.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct KeywordCatalogue(BTreeMap<String, Vec<String>>);

impl KeywordCatalogue {
    /// Returns the catalogue shipped with the binary.
    #[must_use]
    pub fn builtin() -> Self {
        Self(
            BUILTIN_KEYWORDS
                .iter()
                .map(|(extension, keywords)| {
                    let owned = keywords.iter().map(|&keyword| keyword.to_owned()).collect();
                    ((*extension).to_owned(), owned)
                })
                .collect(),
        )
    }

    /// Parses a catalogue from JSON text.
    ///
    /// Extensions are normalised by dropping a leading dot and lowercasing.
    ///
    /// # Errors
    /// Returns [`KeywordCatalogueError::Parse`] for malformed JSON and
    /// [`KeywordCatalogueError::EmptyKeywords`] when an extension lists no
    /// keywords.
    pub fn from_json(origin: &str, text: &str) -> Result<Self, KeywordCatalogueError> {
        let raw: BTreeMap<String, Vec<String>> =
            serde_json::from_str(text).map_err(|source| KeywordCatalogueError::Parse {
                origin: origin.to_owned(),
                source,
            })?;

        let mut entries = BTreeMap::new();
        for (extension, keywords) in raw {
            let normalised = normalise_extension(&extension);
            if keywords.iter().all(|keyword| keyword.trim().is_empty()) {
                return Err(KeywordCatalogueError::EmptyKeywords {
                    extension: normalised,
                });
            }
            entries.insert(normalised, keywords);
        }
        Ok(Self(entries))
    }

    /// Reads and parses a catalogue file.
    ///
    /// # Errors
    /// Returns [`KeywordCatalogueError::Read`] if the file cannot be read,
    /// otherwise any error from [`KeywordCatalogue::from_json`].
    pub fn load(path: &Utf8Path) -> Result<Self, KeywordCatalogueError> {
        let text = fs::read_to_string(path).map_err(|source| KeywordCatalogueError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(path.as_str(), &text)
    }

    /// Loads the catalogue at `path`, or the built-in one when `path` is
    /// `None`.
    ///
    /// # Errors
    /// Propagates any error from [`KeywordCatalogue::load`].
    pub fn load_or_builtin(path: Option<&Utf8Path>) -> Result<Self, KeywordCatalogueError> {
        path.map_or_else(|| Ok(Self::builtin()), Self::load)
    }

    /// Returns the keywords registered for `extension`.
    #[must_use]
    pub fn keywords_for(&self, extension: &str) -> Option<&[String]> {
        self.0
            .get(&normalise_extension(extension))
            .map(Vec::as_slice)
    }

    /// Iterates over the known extensions in sorted order.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Merges the keyword lists of several extensions.
    ///
    /// Keywords keep the order of first appearance and repeat only once.
    ///
    /// # Errors
    /// Returns [`KeywordCatalogueError::UnknownExtension`] for the first
    /// extension without an entry.
    pub fn keywords_for_all<'a, I>(&self, extensions: I) -> Result<Vec<String>, KeywordCatalogueError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut merged: Vec<String> = Vec::new();
        for extension in extensions {
            let keywords = self.keywords_for(extension).ok_or_else(|| {
                KeywordCatalogueError::UnknownExtension {
                    extension: normalise_extension(extension),
                }
            })?;
            for keyword in keywords {
                if !merged.contains(keyword) {
                    merged.push(keyword.clone());
                }
            }
        }
        Ok(merged)
    }
}

impl Default for KeywordCatalogue {
    fn default() -> Self {
        Self::builtin()
    }
}

fn normalise_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_ascii_lowercase()
}
