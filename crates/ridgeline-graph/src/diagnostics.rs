//! Calls that could not be attributed to a single symbol.

use std::collections::BTreeMap;
use std::fmt;

use camino::Utf8PathBuf;

/// Location of a call reference.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CallSite {
    /// File containing the reference.
    pub path: Utf8PathBuf,
    /// Zero-based line of the reference.
    pub line: usize,
}

impl CallSite {
    /// Creates a new call site.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>, line: usize) -> Self {
        Self {
            path: path.into(),
            line,
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.line + 1)
    }
}

/// Ambiguous bare names met while resolving calls, with the call sites that
/// were dropped because of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    ambiguous: BTreeMap<String, Vec<CallSite>>,
}

impl Diagnostics {
    /// Creates an empty set of diagnostics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a reference to an ambiguous name.
    pub fn record_ambiguous(&mut self, alias: &str, site: CallSite) {
        self.ambiguous
            .entry(alias.to_owned())
            .or_default()
            .push(site);
    }

    /// Returns the ambiguous names in sorted order.
    pub fn ambiguous_names(&self) -> impl Iterator<Item = &str> {
        self.ambiguous.keys().map(String::as_str)
    }

    /// Returns the dropped call sites for an ambiguous name.
    #[must_use]
    pub fn call_sites(&self, alias: &str) -> &[CallSite] {
        self.ambiguous.get(alias).map_or(&[], Vec::as_slice)
    }

    /// Returns whether the given name was reported as ambiguous.
    #[must_use]
    pub fn is_ambiguous(&self, alias: &str) -> bool {
        self.ambiguous.contains_key(alias)
    }

    /// Returns the number of distinct ambiguous names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ambiguous.len()
    }

    /// Returns whether no ambiguous reference was met.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ambiguous.is_empty()
    }

    /// Returns the total number of dropped call sites.
    #[must_use]
    pub fn dropped_calls(&self) -> usize {
        self.ambiguous.values().map(Vec::len).sum()
    }
}
