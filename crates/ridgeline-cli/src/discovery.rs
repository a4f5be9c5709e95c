//! Source file discovery beneath the scan root.
//!
//! Files are selected by extension with `**/*.<ext>` glob patterns. The
//! default exclusions always apply, and results are sorted by their path
//! relative to the root so runs are deterministic.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ridgeline_graph::SourceFile;
use tracing::debug;
use walkdir::WalkDir;

use crate::AppError;

/// Directory patterns that are never scanned.
pub(crate) const DEFAULT_EXCLUSIONS: &[&str] = &[
    "**/.git/**",
    "**/__pycache__/**",
    "**/venv/**",
    "**/.venv/**",
    "**/node_modules/**",
    "**/target/**",
];

/// Extension-based file selection.
#[derive(Debug)]
pub(crate) struct SourceFilter {
    inclusions: GlobSet,
    exclusions: GlobSet,
}

impl SourceFilter {
    pub(crate) fn for_extensions<S: AsRef<str>>(extensions: &[S]) -> Result<Self, AppError> {
        let patterns: Vec<String> = extensions
            .iter()
            .map(|extension| {
                let extension = extension.as_ref().trim().trim_start_matches('.');
                format!("**/*.{extension}")
            })
            .collect();
        Ok(Self {
            inclusions: build_glob_set(&patterns)?,
            exclusions: build_glob_set(DEFAULT_EXCLUSIONS)?,
        })
    }

    /// Tests a path relative to the scan root.
    pub(crate) fn matches(&self, relative: &Utf8Path) -> bool {
        self.inclusions.is_match(relative) && !self.exclusions.is_match(relative)
    }
}

fn build_glob_set<S: AsRef<str>>(patterns: &[S]) -> Result<GlobSet, AppError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        let glob = Glob::new(pattern).map_err(|source| AppError::InvalidPattern {
            pattern: pattern.to_owned(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| AppError::InvalidPattern {
        pattern: String::from("<combined>"),
        source,
    })
}

/// A file selected for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DiscoveredFile {
    pub(crate) path: Utf8PathBuf,
    pub(crate) relative: Utf8PathBuf,
}

/// Walks `root` and returns the matching files in relative-path order.
pub(crate) fn discover(
    root: &Utf8Path,
    filter: &SourceFilter,
) -> Result<Vec<DiscoveredFile>, AppError> {
    if !root.is_dir() {
        return Err(AppError::MissingRoot {
            path: root.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|source| AppError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = Utf8PathBuf::from_path_buf(entry.into_path())
            .map_err(|path| AppError::NonUtf8Path { path })?;
        let Ok(relative) = path.strip_prefix(root).map(Utf8Path::to_path_buf) else {
            continue;
        };
        if filter.matches(&relative) {
            files.push(DiscoveredFile { path, relative });
        }
    }

    files.sort_by(|left, right| left.relative.cmp(&right.relative));
    debug!(target: "ridgeline::discovery", %root, files = files.len(), "discovered sources");
    Ok(files)
}

/// Reads every discovered file into a [`SourceFile`] keyed by its relative
/// path.
///
/// Roots are named after the file's base name, or after the whole relative
/// path when `qualified_roots` is set.
pub(crate) fn read_sources(
    files: &[DiscoveredFile],
    qualified_roots: bool,
) -> Result<Vec<SourceFile>, AppError> {
    files
        .iter()
        .map(|file| {
            let text = fs::read_to_string(&file.path).map_err(|source| AppError::ReadSource {
                path: file.path.clone(),
                source,
            })?;
            let source = SourceFile::new(file.relative.clone(), text);
            Ok(if qualified_roots {
                source.with_root_name(file.relative.as_str())
            } else {
                source
            })
        })
        .collect()
}
