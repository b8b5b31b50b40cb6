//! Error types for configuration generation.

use std::path::PathBuf;

use thiserror::Error;

use crate::entry::EntryShape;
use crate::template::TemplateKind;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The module search path variable was unset or empty.
    #[error("module resolution path is empty: `{var}` is unset or blank")]
    UnresolvedPaths { var: String },

    #[error("`{var}` is not valid UTF-8")]
    NonUtf8Var { var: String },

    /// Paths end up as JS string literals, so they must be UTF-8.
    #[error("path is not valid UTF-8: {}", path.display())]
    NonUtf8Path { path: PathBuf },

    #[error("{template} template requires a binding for {placeholder}")]
    MissingBinding {
        template: TemplateKind,
        placeholder: &'static str,
    },

    #[error("{template} template expects {expected} entry points")]
    UnsupportedEntryShape {
        template: TemplateKind,
        expected: EntryShape,
    },

    #[error("invalid file matcher /{pattern}/: {error}")]
    InvalidMatcher {
        pattern: String,
        #[source]
        error: regex::Error,
    },

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}
