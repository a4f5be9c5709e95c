//! Command-line runtime for the ridgeline call graph extractor.
//!
//! The runtime splits configuration flags from extraction arguments, loads
//! the layered configuration, discovers sources beneath the root, runs the
//! two-phase extraction, and writes the graph as DOT. It can be driven from
//! the binary entrypoint or from tests with substituted IO streams and
//! configuration loaders.

use std::fs;
use std::io::Write;
use std::process::ExitCode;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use clap::error::ErrorKind;
use ridgeline_config::{Config, KeywordCatalogue};
use ridgeline_graph::{Analysis, AnalysisReport, DefinitionMatcher, Diagnostics, IndentUnit};
use tracing::{info, warn};

mod cli;
mod config;
mod discovery;
mod errors;
mod render;
mod telemetry;

use cli::Cli;
use config::split_config_arguments;
pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
use discovery::{SourceFilter, discover, read_sources};
pub(crate) use errors::AppError;
use render::render_dot;

/// CLI flags recognised by the configuration loader.
///
/// MAINTENANCE: keep in sync with the fields of `ridgeline_config::Config`.
const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--log-filter",
    "--log-format",
    "--keywords-path",
    "--output-path",
];

/// Bundles the IO streams provided to the CLI runtime.
pub(crate) struct IoStreams<'a, W: Write, E: Write> {
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
}

impl<'a, W: Write, E: Write> IoStreams<'a, W, E> {
    pub(crate) const fn new(stdout: &'a mut W, stderr: &'a mut E) -> Self {
        Self { stdout, stderr }
    }
}

struct CliRunner<'a, W: Write, E: Write, L: ConfigLoader> {
    io: &'a mut IoStreams<'a, W, E>,
    loader: &'a L,
}

impl<'a, W, E, L> CliRunner<'a, W, E, L>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    const fn new(io: &'a mut IoStreams<'a, W, E>, loader: &'a L) -> Self {
        Self { io, loader }
    }

    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = std::ffi::OsString>,
    {
        let args: Vec<_> = args.into_iter().collect();
        let split = split_config_arguments(&args);

        let cli = match Cli::try_parse_from(&split.cli_arguments) {
            Ok(cli) => cli,
            Err(error) if is_informational(&error) => {
                let _ = write!(self.io.stdout, "{error}");
                return ExitCode::SUCCESS;
            }
            Err(error) => {
                let _ = write!(self.io.stderr, "{}", AppError::CliUsage(error));
                return ExitCode::FAILURE;
            }
        };

        let result = self
            .loader
            .load(&split.config_arguments)
            .and_then(|config| {
                telemetry::initialise(&config)?;
                self.extract(&cli, &config)
            });

        match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(error) => {
                let _ = writeln!(self.io.stderr, "{error}");
                ExitCode::FAILURE
            }
        }
    }

    fn extract(&mut self, cli: &Cli, config: &Config) -> Result<(), AppError> {
        let catalogue = config.keyword_catalogue()?;
        let extensions = selected_extensions(cli, &catalogue);
        let keywords = if cli.keywords.is_empty() {
            catalogue.keywords_for_all(extensions.iter().map(String::as_str))?
        } else {
            cli.keywords.clone()
        };
        let matcher = DefinitionMatcher::new(keywords)?;

        let filter = SourceFilter::for_extensions(&extensions)?;
        let files = discover(&cli.root, &filter)?;
        if files.is_empty() {
            return Err(AppError::NoInputFiles {
                root: cli.root.clone(),
                extensions: extensions.join(", "),
            });
        }
        let sources = read_sources(&files, cli.qualified_roots)?;

        let indent = match &cli.indent {
            Some(indent) => indent.clone(),
            None => {
                let texts: Vec<&str> = sources.iter().map(|source| source.text()).collect();
                IndentUnit::detect(&IndentUnit::default_candidates(), &texts)?
            }
        };
        info!(
            target: "ridgeline::cli",
            files = sources.len(),
            %indent,
            keywords = ?matcher.keywords().collect::<Vec<_>>(),
            "starting extraction"
        );

        let report = Analysis::new(indent, matcher).run(&sources)?;
        let output = cli
            .output
            .clone()
            .unwrap_or_else(|| config.output_path().to_path_buf());
        write_graph(&output, &render_dot(report.graph(), cli.labelled_edges()))?;
        self.emit_report(&report, &output)
    }

    fn emit_report(&mut self, report: &AnalysisReport, output: &Utf8Path) -> Result<(), AppError> {
        let graph = report.graph();
        writeln!(
            self.io.stdout,
            "CallGraph with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        )
        .and_then(|()| writeln!(self.io.stdout, "wrote {output}"))
        .map_err(AppError::Report)?;

        let diagnostics = report.diagnostics();
        if !diagnostics.is_empty() {
            warn!(
                target: "ridgeline::cli",
                names = diagnostics.len(),
                dropped = diagnostics.dropped_calls(),
                "ambiguous names left calls unresolved"
            );
            write_ambiguity_summary(&mut *self.io.stderr, diagnostics).map_err(AppError::Report)?;
        }
        Ok(())
    }
}

fn is_informational(error: &clap::Error) -> bool {
    matches!(
        error.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    )
}

fn selected_extensions(cli: &Cli, catalogue: &KeywordCatalogue) -> Vec<String> {
    if cli.extensions.is_empty() {
        catalogue.extensions().map(str::to_owned).collect()
    } else {
        cli.extensions.clone()
    }
}

fn write_graph(path: &Utf8Path, dot: &str) -> Result<(), AppError> {
    let write_error = |source| AppError::WriteGraph {
        path: Utf8PathBuf::from(path),
        source,
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, dot).map_err(write_error)
}

fn write_ambiguity_summary<E: Write>(
    stderr: &mut E,
    diagnostics: &Diagnostics,
) -> std::io::Result<()> {
    writeln!(
        stderr,
        "warning: {} ambiguous name(s) dropped {} call(s):",
        diagnostics.len(),
        diagnostics.dropped_calls()
    )?;
    for name in diagnostics.ambiguous_names() {
        let sites: Vec<String> = diagnostics
            .call_sites(name)
            .iter()
            .map(ToString::to_string)
            .collect();
        writeln!(stderr, "  {name}: {}", sites.join(", "))?;
    }
    Ok(())
}

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = std::ffi::OsString>,
    W: Write,
    E: Write,
{
    let mut io = IoStreams::new(stdout, stderr);
    run_with_loader(args, &mut io, &OrthoConfigLoader)
}

pub(crate) fn run_with_loader<'a, I, W, E, L>(
    args: I,
    io: &'a mut IoStreams<'a, W, E>,
    loader: &'a L,
) -> ExitCode
where
    I: IntoIterator<Item = std::ffi::OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    CliRunner::new(io, loader).run(args)
}
