//! Call graph edge representation.

use std::fmt;

use crate::node::NodeLabel;

/// Label carried by a call edge.
///
/// The first call between two symbols records where it happened. Every
/// further call between the same pair only bumps a counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeLabel {
    /// A single call site.
    Site {
        /// Zero-based line of the call.
        line: usize,
        /// Distance from the caller's defining line to the call.
        offset: usize,
    },
    /// Number of calls seen, always at least two.
    Count(u32),
}

impl EdgeLabel {
    /// Label for the first call on `line` from a caller defined on
    /// `caller_line`.
    #[must_use]
    pub const fn first_call(line: usize, caller_line: usize) -> Self {
        Self::Site {
            line,
            offset: line.saturating_sub(caller_line),
        }
    }

    /// Label after one more call between the same pair.
    #[must_use]
    pub const fn repeated(self) -> Self {
        match self {
            Self::Site { .. } => Self::Count(2),
            Self::Count(count) => Self::Count(count.saturating_add(1)),
        }
    }

    /// Number of calls this label accounts for.
    #[must_use]
    pub const fn calls(self) -> u32 {
        match self {
            Self::Site { .. } => 1,
            Self::Count(count) => count,
        }
    }
}

impl fmt::Display for EdgeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Site { line, offset } => write!(f, "L{}({offset})", line + 1),
            Self::Count(count) => write!(f, "x{count}"),
        }
    }
}

/// A directed call relationship between two symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallEdge {
    /// Label of the calling symbol.
    caller: NodeLabel,
    /// Label of the called symbol.
    callee: NodeLabel,
    label: EdgeLabel,
}

impl CallEdge {
    /// Creates a new call edge.
    #[must_use]
    pub const fn new(from_caller: NodeLabel, to_callee: NodeLabel, label: EdgeLabel) -> Self {
        Self {
            caller: from_caller,
            callee: to_callee,
            label,
        }
    }

    /// Returns the caller node label.
    #[must_use]
    pub const fn caller(&self) -> &NodeLabel {
        &self.caller
    }

    /// Returns the callee node label.
    #[must_use]
    pub const fn callee(&self) -> &NodeLabel {
        &self.callee
    }

    /// Returns the current edge label.
    #[must_use]
    pub const fn label(&self) -> EdgeLabel {
        self.label
    }

    /// Returns whether the edge starts and ends at the same symbol.
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.caller == self.callee
    }

    pub(crate) const fn record_repeat(&mut self) {
        self.label = self.label.repeated();
    }
}
