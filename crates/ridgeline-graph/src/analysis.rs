//! Two-phase orchestration of symbol collection and call resolution.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

use crate::diagnostics::Diagnostics;
use crate::error::GraphError;
use crate::graph::CallGraph;
use crate::indent::IndentUnit;
use crate::matcher::DefinitionMatcher;
use crate::node::Symbol;
use crate::reference::ReferenceFinder;
use crate::resolver::CallResolver;
use crate::scan::{ScanVisitor, Scanner};
use crate::symbols::SymbolTable;

/// A source file handed to the analysis.
///
/// The analysis never touches the filesystem; callers read the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: Utf8PathBuf,
    /// Name of the synthetic root symbol.
    root_name: String,
    text: String,
}

impl SourceFile {
    /// Creates a source file whose root symbol is named after the file's
    /// base name.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>, text: impl Into<String>) -> Self {
        let path = path.into();
        let root_name = path.file_name().unwrap_or(path.as_str()).to_owned();
        Self {
            path,
            root_name,
            text: text.into(),
        }
    }

    /// Overrides the name of the root symbol.
    #[must_use]
    pub fn with_root_name(mut self, root_name: impl Into<String>) -> Self {
        self.root_name = root_name.into();
        self
    }

    /// Returns the path of the file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the name of the root symbol.
    #[must_use]
    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    /// Returns the file contents.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Everything produced by a run.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    symbols: SymbolTable,
    graph: CallGraph,
    diagnostics: Diagnostics,
}

impl AnalysisReport {
    /// Returns the symbols collected in the first phase.
    #[must_use]
    pub const fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Returns the resolved call graph.
    #[must_use]
    pub const fn graph(&self) -> &CallGraph {
        &self.graph
    }

    /// Returns the ambiguous references met during resolution.
    #[must_use]
    pub const fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Splits the report into its parts.
    #[must_use]
    pub fn into_parts(self) -> (SymbolTable, CallGraph, Diagnostics) {
        (self.symbols, self.graph, self.diagnostics)
    }
}

/// Configured two-phase extraction.
#[derive(Debug, Clone)]
pub struct Analysis {
    indent: IndentUnit,
    matcher: DefinitionMatcher,
}

impl Analysis {
    /// Creates an analysis using the given indent unit and keywords.
    #[must_use]
    pub const fn new(indent: IndentUnit, matcher: DefinitionMatcher) -> Self {
        Self { indent, matcher }
    }

    /// Returns the indent unit in use.
    #[must_use]
    pub const fn indent(&self) -> &IndentUnit {
        &self.indent
    }

    /// Returns the definition matcher in use.
    #[must_use]
    pub const fn matcher(&self) -> &DefinitionMatcher {
        &self.matcher
    }

    /// Runs both phases over `sources`.
    ///
    /// Every file is scanned for symbols before any call is resolved, so a
    /// call may name a symbol defined later in the file or in another file.
    ///
    /// # Errors
    /// Returns `GraphError::InFile` wrapping `GraphError::DuplicatePath` when
    /// two symbols end up with the same scope path.
    pub fn run(&self, sources: &[SourceFile]) -> Result<AnalysisReport, GraphError> {
        let symbols = self.collect_symbols(sources)?;
        let (graph, diagnostics) = self.resolve_calls(&symbols, sources)?;
        Ok(AnalysisReport {
            symbols,
            graph,
            diagnostics,
        })
    }

    /// First phase: records every file root and definition.
    ///
    /// # Errors
    /// Returns `GraphError::InFile` wrapping `GraphError::DuplicatePath` when
    /// a scope path repeats.
    pub fn collect_symbols(&self, sources: &[SourceFile]) -> Result<SymbolTable, GraphError> {
        let scanner = Scanner::new(&self.indent, &self.matcher);
        let mut symbols = SymbolTable::new();
        for source in sources {
            debug!(target: "ridgeline::analysis", path = %source.path(), "collecting symbols");
            let mut collector = SymbolCollector {
                symbols: &mut symbols,
            };
            scanner
                .scan(source, &mut collector)
                .map_err(|error| error.in_file(source.path()))?;
        }
        info!(
            target: "ridgeline::analysis",
            files = sources.len(),
            symbols = symbols.len(),
            "symbol collection finished"
        );
        Ok(symbols)
    }

    /// Second phase: resolves calls against a complete symbol table.
    ///
    /// Every symbol becomes a node, whether or not it takes part in a call.
    ///
    /// # Errors
    /// Returns `GraphError::InvalidAlias` if a bare name cannot be searched
    /// for, or `GraphError::InFile` if scanning a file fails.
    pub fn resolve_calls(
        &self,
        symbols: &SymbolTable,
        sources: &[SourceFile],
    ) -> Result<(CallGraph, Diagnostics), GraphError> {
        let scanner = Scanner::new(&self.indent, &self.matcher);
        let references = ReferenceFinder::new(symbols)?;
        let mut graph = CallGraph::new();
        let mut diagnostics = Diagnostics::new();
        for symbol in symbols.iter() {
            graph.add_node(symbol.node_label());
        }

        for source in sources {
            debug!(target: "ridgeline::analysis", path = %source.path(), "resolving calls");
            let mut resolver = CallResolver::new(
                symbols,
                &references,
                &mut graph,
                &mut diagnostics,
                source.path(),
            );
            scanner
                .scan(source, &mut resolver)
                .map_err(|error| error.in_file(source.path()))?;
        }
        info!(
            target: "ridgeline::analysis",
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            ambiguous = diagnostics.len(),
            "call resolution finished"
        );
        Ok((graph, diagnostics))
    }
}

/// First-phase visitor that fills the symbol table.
struct SymbolCollector<'a> {
    symbols: &'a mut SymbolTable,
}

impl ScanVisitor for SymbolCollector<'_> {
    fn file_root(&mut self, root: &Symbol) -> Result<(), GraphError> {
        self.symbols.insert(root.clone())
    }

    fn definition(&mut self, symbol: &Symbol) -> Result<(), GraphError> {
        self.symbols.insert(symbol.clone())
    }

    fn body_line(&mut self, _caller: &Symbol, _line_index: usize, _text: &str) {}
}
