//! Line-by-line scan shared by both extraction phases.

use tracing::trace;

use crate::analysis::SourceFile;
use crate::error::GraphError;
use crate::indent::IndentUnit;
use crate::matcher::DefinitionMatcher;
use crate::node::{ScopeDepth, Symbol};
use crate::scope::ScopeTracker;

/// Receives the events of a file scan.
///
/// Each phase implements this trait and only performs its own side effects.
pub(crate) trait ScanVisitor {
    /// Called once per file with the synthetic root symbol.
    fn file_root(&mut self, root: &Symbol) -> Result<(), GraphError>;

    /// Called for every defining line, before its scope is opened.
    fn definition(&mut self, symbol: &Symbol) -> Result<(), GraphError>;

    /// Called for every non-blank line that defines nothing.
    fn body_line(&mut self, caller: &Symbol, line_index: usize, text: &str);
}

/// Walks the lines of a file while tracking the enclosing scope.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scanner<'a> {
    indent: &'a IndentUnit,
    matcher: &'a DefinitionMatcher,
}

impl<'a> Scanner<'a> {
    pub(crate) const fn new(indent: &'a IndentUnit, matcher: &'a DefinitionMatcher) -> Self {
        Self { indent, matcher }
    }

    /// Scans one file, starting from a fresh scope stack.
    pub(crate) fn scan<V: ScanVisitor>(
        &self,
        source: &SourceFile,
        visitor: &mut V,
    ) -> Result<(), GraphError> {
        let root = Symbol::file_root(source.root_name());
        visitor.file_root(&root)?;
        let mut scope = ScopeTracker::new(root);

        for (line_index, line) in source.text().lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let indents = self.indent.depth(line);
            scope.enter_line(indents);

            if let Some(definition) = self.matcher.match_line(line) {
                let symbol = Symbol::new(
                    scope.child_path(definition.name),
                    ScopeDepth::Level(indents),
                    line_index,
                    definition.keyword,
                );
                trace!(
                    target: "ridgeline::scan",
                    path = %symbol.path(),
                    line = line_index + 1,
                    "definition"
                );
                visitor.definition(&symbol)?;
                scope.push(symbol);
            } else {
                visitor.body_line(scope.current(), line_index, line);
            }
        }
        Ok(())
    }
}
