//! CLI argument definitions for the ridgeline call graph extractor.

use camino::Utf8PathBuf;
use clap::Parser;
use ridgeline_graph::IndentUnit;

/// Verbosity at and above which edges carry their labels.
pub(crate) const LABELLED_VERBOSITY: u8 = 1;

/// Command-line interface for the ridgeline call graph extractor.
#[derive(Parser, Debug)]
#[command(
    name = "ridgeline",
    version,
    about = "Derive a call graph from indentation-scoped source files"
)]
pub(crate) struct Cli {
    /// Directory scanned recursively for source files.
    #[arg(short = 'i', long, value_name = "DIR")]
    pub(crate) root: Utf8PathBuf,
    /// File extensions to scan (default: every catalogued extension).
    #[arg(short = 't', long, value_name = "EXT", num_args = 1.., value_delimiter = ',')]
    pub(crate) extensions: Vec<String>,
    /// Keywords that introduce a definition, in priority order (default:
    /// the catalogued keywords of the selected extensions).
    #[arg(short = 'k', long, value_name = "KEYWORD", num_args = 1.., value_delimiter = ',')]
    pub(crate) keywords: Vec<String>,
    /// Indentation unit: a number of spaces or `tab` (default: sniffed).
    #[arg(long, value_name = "N|tab")]
    pub(crate) indent: Option<IndentUnit>,
    /// Graph verbosity; 0 drops edge labels.
    #[arg(short = 'v', long, value_name = "LEVEL", default_value_t = 2)]
    pub(crate) verbose: u8,
    /// DOT output file (default: the configured output path).
    #[arg(short = 'o', long, value_name = "FILE")]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Names file roots by their path relative to the root directory.
    #[arg(long)]
    pub(crate) qualified_roots: bool,
}

impl Cli {
    /// Returns true when edges should be rendered with their labels.
    pub(crate) const fn labelled_edges(&self) -> bool {
        self.verbose >= LABELLED_VERBOSITY
    }
}
