//! Detection of symbol references in body lines.

use std::collections::HashSet;

use regex::Regex;

use crate::error::GraphError;
use crate::symbols::SymbolTable;

/// One run of word characters; the same class that captures definition names.
const WORD_PATTERN: &str = r"\w+";

#[derive(Debug, Clone)]
struct CompoundAlias {
    alias: String,
    pattern: Regex,
}

/// Finds the bare names of known symbols mentioned in a line.
///
/// Names made only of word characters are found as whole `\w+` runs. Names
/// holding other characters, such as the file root `util.py`, cannot be a
/// single run, so each is searched for on its own between non-word
/// characters or line ends.
#[derive(Debug, Clone)]
pub(crate) struct ReferenceFinder {
    word: Regex,
    compound: Vec<CompoundAlias>,
}

impl ReferenceFinder {
    /// Prepares the patterns for every bare name in `symbols`.
    pub(crate) fn new(symbols: &SymbolTable) -> Result<Self, GraphError> {
        let word = Regex::new(WORD_PATTERN)
            .map_err(|error| GraphError::invalid_alias(WORD_PATTERN, error.to_string()))?;

        let mut aliases: Vec<&str> = symbols
            .aliases()
            .filter(|alias| {
                word.find(alias)
                    .is_none_or(|found| found.range() != (0..alias.len()))
            })
            .collect();
        aliases.sort_unstable();

        let compound = aliases
            .into_iter()
            .map(|alias| {
                let source = format!(r"(?:^|\W){}(?:\W|$)", regex::escape(alias));
                Regex::new(&source)
                    .map(|pattern| CompoundAlias {
                        alias: alias.to_owned(),
                        pattern,
                    })
                    .map_err(|error| GraphError::invalid_alias(alias, error.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { word, compound })
    }

    /// Returns the distinct candidate names mentioned in `line`.
    ///
    /// Word runs come first in order of appearance, followed by the compound
    /// names found on the line in sorted order.
    pub(crate) fn references<'a>(&'a self, line: &'a str) -> Vec<&'a str> {
        let mut seen = HashSet::new();
        let mut names: Vec<&str> = self
            .word
            .find_iter(line)
            .map(|found| found.as_str())
            .filter(|token| seen.insert(*token))
            .collect();
        names.extend(
            self.compound
                .iter()
                .filter(|entry| entry.pattern.is_match(line))
                .map(|entry| entry.alias.as_str()),
        );
        names
    }
}
