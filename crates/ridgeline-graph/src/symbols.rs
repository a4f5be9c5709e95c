//! Symbol table keyed by scope path with a bare-name index.

use std::collections::HashMap;

use crate::error::GraphError;
use crate::node::{Symbol, SymbolPath};

/// Entry of the bare-name index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasEntry {
    /// Exactly one symbol carries the name.
    Unique(SymbolPath),
    /// Two or more symbols carry the name. This state is terminal.
    Ambiguous,
}

/// Result of looking a bare name up in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasLookup<'a> {
    /// No symbol carries the name.
    Unknown,
    /// Exactly one symbol carries the name.
    Unique(&'a Symbol),
    /// Several symbols carry the name; calls to it cannot be attributed.
    Ambiguous,
}

/// All symbols discovered during a run.
///
/// The table is append-only. It is filled during symbol collection and then
/// only read while calls are resolved.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    /// Symbols in insertion order.
    symbols: Vec<Symbol>,
    /// Index into `symbols` for each scope path.
    by_path: HashMap<SymbolPath, usize>,
    /// Bare name to its unique symbol path, or the ambiguity marker.
    by_alias: HashMap<String, AliasEntry>,
}

impl SymbolTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a symbol.
    ///
    /// The first symbol with a given bare name claims it; any later symbol
    /// with the same bare name marks it ambiguous for the rest of the run.
    ///
    /// # Errors
    /// Returns `GraphError::DuplicatePath` if a symbol with the same path was
    /// already recorded. The table is left unchanged in that case.
    pub fn insert(&mut self, symbol: Symbol) -> Result<(), GraphError> {
        if self.by_path.contains_key(symbol.path()) {
            return Err(GraphError::DuplicatePath {
                path: symbol.path().to_string(),
                line: symbol.defined_at_line() + 1,
            });
        }

        self.by_alias
            .entry(symbol.alias().to_owned())
            .and_modify(|entry| *entry = AliasEntry::Ambiguous)
            .or_insert_with(|| AliasEntry::Unique(symbol.path().clone()));
        self.by_path.insert(symbol.path().clone(), self.symbols.len());
        self.symbols.push(symbol);
        Ok(())
    }

    /// Returns the symbol with the given path.
    #[must_use]
    pub fn get(&self, path: &SymbolPath) -> Option<&Symbol> {
        self.by_path
            .get(path)
            .and_then(|&index| self.symbols.get(index))
    }

    /// Returns the raw index entry for a bare name.
    #[must_use]
    pub fn alias_entry(&self, alias: &str) -> Option<&AliasEntry> {
        self.by_alias.get(alias)
    }

    /// Resolves a bare name to the symbol it designates.
    #[must_use]
    pub fn resolve_alias(&self, alias: &str) -> AliasLookup<'_> {
        match self.by_alias.get(alias) {
            None => AliasLookup::Unknown,
            Some(AliasEntry::Ambiguous) => AliasLookup::Ambiguous,
            Some(AliasEntry::Unique(path)) => self
                .get(path)
                .map_or(AliasLookup::Unknown, AliasLookup::Unique),
        }
    }

    /// Returns every bare name in the table, unique or not.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.by_alias.keys().map(String::as_str)
    }

    /// Returns the bare names shared by more than one symbol, sorted.
    #[must_use]
    pub fn ambiguous_aliases(&self) -> Vec<&str> {
        let mut aliases: Vec<&str> = self
            .by_alias
            .iter()
            .filter(|(_, entry)| matches!(entry, AliasEntry::Ambiguous))
            .map(|(alias, _)| alias.as_str())
            .collect();
        aliases.sort_unstable();
        aliases
    }

    /// Returns an iterator over all symbols in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    /// Returns the number of symbols.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns whether the table holds no symbols.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
