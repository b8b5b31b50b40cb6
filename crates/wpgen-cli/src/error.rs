//! Error types for the wpgen CLI.

use std::path::PathBuf;

use miette::Report;
use thiserror::Error;
use wpgen_config::ConfigError;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Generation failed in the core
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// `wpgen.toml` or a `WPGEN_*` variable could not be read
    #[error("invalid project settings: {0}")]
    Settings(Box<figment::Error>),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Settings(Box::new(err))
    }
}

/// Convert a CLI error into a miette report, attaching a hint where one helps.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match &err {
        CliError::Config(ConfigError::UnresolvedPaths { var }) => miette::miette!(
            help = format!("Export `{var}` as a colon-separated list of node_modules directories"),
            "{}",
            err
        ),
        CliError::Config(ConfigError::NonUtf8Var { var }) => miette::miette!(
            help = format!("Re-export `{var}` with UTF-8 directory names"),
            "{}",
            err
        ),
        CliError::Config(ConfigError::UnsupportedEntryShape { .. }) => miette::miette!(
            help = "`wpgen library` takes one ENTRY path; `wpgen dev` takes NAME=PATH pairs",
            "{}",
            err
        ),
        CliError::Settings(_) => miette::miette!(
            help = "Check wpgen.toml syntax and WPGEN_* environment variables",
            "{}",
            err
        ),
        _ => miette::miette!("{}", err),
    }
}
