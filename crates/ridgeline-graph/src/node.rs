//! Symbols discovered in source files and their display labels.

use std::fmt;

/// Kind recorded for the synthetic symbol that stands for a whole file.
pub const FILE_ROOT_KIND: &str = "file";

/// Nesting level at which a symbol was defined.
///
/// `Root` orders below every `Level`, so the file root always encloses the
/// lines of its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScopeDepth {
    /// The synthetic file root, one level shallower than column zero.
    Root,
    /// A definition found after the given number of indent units.
    Level(usize),
}

impl fmt::Display for ScopeDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("-1"),
            Self::Level(level) => write!(f, "{level}"),
        }
    }
}

/// Ordered chain of names from a file root down to a symbol.
///
/// The path is the unique key of a symbol in the [`crate::SymbolTable`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolPath(Vec<String>);

impl SymbolPath {
    /// Creates the path of a file root.
    #[must_use]
    pub fn root(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    /// Returns this path extended by one name.
    #[must_use]
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.into());
        Self(segments)
    }

    /// Returns the bare name: the last element of the path.
    #[must_use]
    pub fn alias(&self) -> &str {
        self.0.last().map_or("", String::as_str)
    }

    /// Returns the individual names in the path.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for SymbolPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for SymbolPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// Display label that identifies a symbol as a node of the call graph.
///
/// The format is `{kind} {dotted path} L{one-based line}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeLabel(String);

impl NodeLabel {
    /// Returns the label text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named scope discovered in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    path: SymbolPath,
    depth: ScopeDepth,
    /// Zero-based index of the defining line.
    defined_at_line: usize,
    /// Keyword that introduced the symbol.
    kind: String,
}

impl Symbol {
    /// Creates a symbol introduced by `kind` on the given zero-based line.
    #[must_use]
    pub fn new(
        path: SymbolPath,
        depth: ScopeDepth,
        defined_at_line: usize,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            path,
            depth,
            defined_at_line,
            kind: kind.into(),
        }
    }

    /// Creates the synthetic root symbol of a file.
    #[must_use]
    pub fn file_root(name: impl Into<String>) -> Self {
        Self::new(SymbolPath::root(name), ScopeDepth::Root, 0, FILE_ROOT_KIND)
    }

    /// Returns the full scope path.
    #[must_use]
    pub const fn path(&self) -> &SymbolPath {
        &self.path
    }

    /// Returns the bare name.
    #[must_use]
    pub fn alias(&self) -> &str {
        self.path.alias()
    }

    /// Returns the nesting level of the definition.
    #[must_use]
    pub const fn depth(&self) -> ScopeDepth {
        self.depth
    }

    /// Returns the zero-based defining line.
    #[must_use]
    pub const fn defined_at_line(&self) -> usize {
        self.defined_at_line
    }

    /// Returns the keyword that introduced the symbol.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns whether this is the synthetic root of a file.
    #[must_use]
    pub fn is_file_root(&self) -> bool {
        self.depth == ScopeDepth::Root
    }

    /// Builds the call graph label for this symbol.
    #[must_use]
    pub fn node_label(&self) -> NodeLabel {
        NodeLabel(format!(
            "{} {} L{}",
            self.kind,
            self.path,
            self.defined_at_line + 1
        ))
    }
}
