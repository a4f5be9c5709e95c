//! Indentation units and nesting depth.

use std::fmt;
use std::str::FromStr;

use crate::error::GraphError;

/// Candidate units tried, in order, when sniffing a source tree.
pub const DEFAULT_INDENT_CANDIDATES: [&str; 2] = ["    ", "\t"];

/// A literal run of one repeated whitespace character that makes up one
/// level of indentation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndentUnit(String);

impl IndentUnit {
    /// Creates an indent unit from its literal text.
    ///
    /// # Errors
    /// Returns `GraphError::InvalidIndentUnit` when `unit` is empty, contains
    /// non-whitespace, or mixes more than one character.
    pub fn new(unit: impl Into<String>) -> Result<Self, GraphError> {
        let text = unit.into();
        let mut chars = text.chars();
        let Some(first) = chars.next() else {
            return Err(GraphError::invalid_indent_unit(text, "unit is empty"));
        };
        if !first.is_whitespace() {
            return Err(GraphError::invalid_indent_unit(
                text,
                "unit must be whitespace",
            ));
        }
        if chars.any(|ch| ch != first) {
            return Err(GraphError::invalid_indent_unit(
                text,
                "unit must repeat a single character",
            ));
        }
        Ok(Self(text))
    }

    /// An indent unit of `count` spaces.
    ///
    /// A `count` of zero is treated as one.
    #[must_use]
    pub fn spaces(count: usize) -> Self {
        Self(" ".repeat(count.max(1)))
    }

    /// A single tab.
    #[must_use]
    pub fn tab() -> Self {
        Self("\t".to_owned())
    }

    /// Returns the literal text of the unit.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Counts how many times the unit repeats as a prefix of `line`.
    ///
    /// Callers skip blank lines before asking for their depth.
    #[must_use]
    pub fn depth(&self, line: &str) -> usize {
        let mut rest = line;
        let mut count = 0;
        while let Some(stripped) = rest.strip_prefix(self.0.as_str()) {
            rest = stripped;
            count += 1;
        }
        count
    }

    /// Picks the first candidate that literally occurs in any of `texts`.
    ///
    /// # Errors
    /// Returns `GraphError::NoIndentUnit` when no candidate occurs anywhere.
    pub fn detect<S: AsRef<str>>(candidates: &[Self], texts: &[S]) -> Result<Self, GraphError> {
        candidates
            .iter()
            .find(|candidate| {
                texts
                    .iter()
                    .any(|text| text.as_ref().contains(candidate.as_str()))
            })
            .cloned()
            .ok_or_else(|| GraphError::NoIndentUnit {
                candidates: candidates
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// The default candidates in priority order.
    #[must_use]
    pub fn default_candidates() -> Vec<Self> {
        DEFAULT_INDENT_CANDIDATES
            .iter()
            .map(|unit| Self((*unit).to_owned()))
            .collect()
    }
}

impl fmt::Display for IndentUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.0.chars().count();
        if self.0.starts_with('\t') {
            if len == 1 {
                f.write_str("tab")
            } else {
                write!(f, "{len} tabs")
            }
        } else if self.0.starts_with(' ') {
            if len == 1 {
                f.write_str("1 space")
            } else {
                write!(f, "{len} spaces")
            }
        } else {
            write!(f, "{:?}", self.0)
        }
    }
}

impl FromStr for IndentUnit {
    type Err = GraphError;

    /// Parses `tab` or a number of spaces, such as `2` or `4`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("tab") {
            return Ok(Self::tab());
        }
        match trimmed.parse::<usize>() {
            Ok(0) => Err(GraphError::invalid_indent_unit(
                value,
                "indent width must be at least one space",
            )),
            Ok(count) => Ok(Self::spaces(count)),
            Err(_) => Err(GraphError::invalid_indent_unit(
                value,
                "expected 'tab' or a number of spaces",
            )),
        }
    }
}
