//! Configuration loading helpers for the ridgeline CLI.
//!
//! Configuration flags are split out of argv so `ortho_config` only sees the
//! flags it owns while `clap` parses the remaining extraction arguments.

use std::ffi::{OsStr, OsString};

use ortho_config::OrthoConfig;
use ridgeline_config::Config;

use crate::AppError;

pub(crate) trait ConfigLoader {
    /// Loads configuration for the CLI.
    ///
    /// `args` holds the program name followed by the configuration flags
    /// (listed in `CONFIG_CLI_FLAGS`) and their values.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

#[derive(Debug, Clone, Copy)]
enum FlagAction {
    Include { needs_value: bool },
    Skip,
}

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

impl OrthoConfigLoader {
    fn process_config_flag(argument: &OsStr) -> FlagAction {
        let argument_text = argument.to_string_lossy();
        if !argument_text.starts_with("--") {
            return FlagAction::Skip;
        }

        let (flag, has_inline_value) = match argument_text.split_once('=') {
            Some((flag, _)) => (flag, true),
            None => (argument_text.as_ref(), false),
        };

        if super::CONFIG_CLI_FLAGS.contains(&flag) {
            return FlagAction::Include {
                needs_value: !has_inline_value,
            };
        }

        FlagAction::Skip
    }
}

/// argv partitioned between the configuration loader and the command parser.
///
/// Both halves keep the program name as their first element.
#[derive(Debug, Default)]
pub(crate) struct ConfigArgumentSplit {
    pub(crate) config_arguments: Vec<OsString>,
    pub(crate) cli_arguments: Vec<OsString>,
}

pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let mut iter = args.iter();
    let Some(program) = iter.next() else {
        return ConfigArgumentSplit::default();
    };

    let mut split = ConfigArgumentSplit {
        config_arguments: vec![program.clone()],
        cli_arguments: vec![program.clone()],
    };

    while let Some(argument) = iter.next() {
        if argument == "--" {
            split.cli_arguments.push(argument.clone());
            split.cli_arguments.extend(iter.by_ref().cloned());
            break;
        }

        match OrthoConfigLoader::process_config_flag(argument.as_os_str()) {
            FlagAction::Include { needs_value } => {
                split.config_arguments.push(argument.clone());
                if needs_value {
                    if let Some(value) = iter.next() {
                        split.config_arguments.push(value.clone());
                    }
                }
            }
            FlagAction::Skip => split.cli_arguments.push(argument.clone()),
        }
    }

    split
}
