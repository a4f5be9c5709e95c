//! Per-file stack of enclosing symbols.

use crate::node::{ScopeDepth, Symbol, SymbolPath};

/// Tracks which symbol encloses the line being scanned.
///
/// The stack always bottoms out at the file root. Symbols above it have
/// strictly increasing depth from bottom to top.
#[derive(Debug, Clone)]
pub struct ScopeTracker {
    root: Symbol,
    open: Vec<Symbol>,
}

impl ScopeTracker {
    /// Starts tracking a file whose root symbol is `root`.
    #[must_use]
    pub const fn new(root: Symbol) -> Self {
        Self {
            root,
            open: Vec::new(),
        }
    }

    /// Closes every scope that the line at depth `indents` falls outside of.
    ///
    /// After this call the enclosing symbol is defined strictly shallower
    /// than `indents`.
    pub fn enter_line(&mut self, indents: usize) {
        let depth = ScopeDepth::Level(indents);
        while self
            .open
            .last()
            .is_some_and(|symbol| symbol.depth() >= depth)
        {
            self.open.pop();
        }
    }

    /// Opens the scope of a newly defined symbol.
    pub fn push(&mut self, symbol: Symbol) {
        self.open.push(symbol);
    }

    /// Returns the innermost enclosing symbol.
    #[must_use]
    pub fn current(&self) -> &Symbol {
        self.open.last().unwrap_or(&self.root)
    }

    /// Returns the path a symbol named `name` would get in the current scope.
    #[must_use]
    pub fn child_path(&self, name: &str) -> SymbolPath {
        self.current().path().child(name)
    }

    /// Returns the enclosing symbols from the file root to the innermost.
    pub fn stack(&self) -> impl Iterator<Item = &Symbol> {
        std::iter::once(&self.root).chain(self.open.iter())
    }
}
