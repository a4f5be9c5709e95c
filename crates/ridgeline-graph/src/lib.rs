//! Indentation-scoped call graph extraction for the Ridgeline toolchain.
//!
//! This crate derives a call graph from raw source lines without parsing
//! them. Indentation stands in for lexical scope and a configurable list of
//! defining keywords (for example `def` or `fn`) marks where symbols begin.
//! Extraction runs in two phases over every source file:
//!
//! - **Symbol collection** walks each file with a [`ScopeTracker`] and records
//!   every definition in the [`SymbolTable`], keyed by its full scope path.
//! - **Call resolution** walks the files again and, now that every symbol is
//!   known, turns whole-word references to bare names (file roots such as
//!   `util.py` included) into [`CallEdge`]s of a
//!   [`CallGraph`]. Repeat calls between the same pair collapse into a single
//!   counted edge.
//!
//! Bare names shared by more than one symbol cannot be attributed to a unique
//! target. Such references are dropped and collected in [`Diagnostics`] for
//! reporting once the run has finished.
//!
//! # Example
//!
//! ```
//! use ridgeline_graph::{Analysis, DefinitionMatcher, IndentUnit, SourceFile};
//!
//! let source = SourceFile::new(
//!     "src/app.py",
//!     "def a():\n    def b():\n        pass\n    b()\n",
//! );
//! let analysis = Analysis::new(IndentUnit::spaces(4), DefinitionMatcher::new(["def"])?);
//! let report = analysis.run(&[source])?;
//!
//! assert_eq!(report.symbols().len(), 3);
//! let edge = report.graph().edges().next().expect("a calls b");
//! assert_eq!(edge.label().to_string(), "L4(3)");
//! # Ok::<(), ridgeline_graph::GraphError>(())
//! ```

mod analysis;
mod diagnostics;
mod edge;
mod error;
mod graph;
mod indent;
mod matcher;
mod node;
mod reference;
mod resolver;
mod scan;
mod scope;
mod symbols;

pub use analysis::{Analysis, AnalysisReport, SourceFile};
pub use diagnostics::{CallSite, Diagnostics};
pub use edge::{CallEdge, EdgeLabel};
pub use error::GraphError;
pub use graph::CallGraph;
pub use indent::{DEFAULT_INDENT_CANDIDATES, IndentUnit};
pub use matcher::{Definition, DefinitionMatcher};
pub use node::{FILE_ROOT_KIND, NodeLabel, ScopeDepth, Symbol, SymbolPath};
pub use scope::ScopeTracker;
pub use symbols::{AliasEntry, AliasLookup, SymbolTable};

#[cfg(test)]
mod tests;
