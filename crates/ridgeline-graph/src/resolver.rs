//! Resolution of bare-name references into call edges.

use camino::Utf8Path;
use tracing::trace;

use crate::diagnostics::{CallSite, Diagnostics};
use crate::error::GraphError;
use crate::graph::CallGraph;
use crate::node::Symbol;
use crate::reference::ReferenceFinder;
use crate::scan::ScanVisitor;
use crate::symbols::{AliasLookup, SymbolTable};

/// Turns the body lines of one file into call edges.
///
/// Every distinct whole-word name on a line that names a known symbol adds
/// one call from the enclosing symbol. Ambiguous names are never guessed:
/// the reference is dropped and reported instead.
pub(crate) struct CallResolver<'a> {
    symbols: &'a SymbolTable,
    references: &'a ReferenceFinder,
    graph: &'a mut CallGraph,
    diagnostics: &'a mut Diagnostics,
    path: &'a Utf8Path,
}

impl<'a> CallResolver<'a> {
    pub(crate) const fn new(
        symbols: &'a SymbolTable,
        references: &'a ReferenceFinder,
        graph: &'a mut CallGraph,
        diagnostics: &'a mut Diagnostics,
        path: &'a Utf8Path,
    ) -> Self {
        Self {
            symbols,
            references,
            graph,
            diagnostics,
            path,
        }
    }
}

impl ScanVisitor for CallResolver<'_> {
    fn file_root(&mut self, _root: &Symbol) -> Result<(), GraphError> {
        Ok(())
    }

    fn definition(&mut self, _symbol: &Symbol) -> Result<(), GraphError> {
        Ok(())
    }

    fn body_line(&mut self, caller: &Symbol, line_index: usize, text: &str) {
        for name in self.references.references(text) {
            match self.symbols.resolve_alias(name) {
                AliasLookup::Unknown => {}
                AliasLookup::Ambiguous => {
                    self.diagnostics
                        .record_ambiguous(name, CallSite::new(self.path, line_index));
                }
                AliasLookup::Unique(callee) => {
                    let label = self.graph.record_call(caller, callee, line_index);
                    trace!(
                        target: "ridgeline::resolve",
                        caller = %caller.path(),
                        callee = %callee.path(),
                        %label,
                        "call"
                    );
                }
            }
        }
    }
}
