use std::path::PathBuf;

use serde::{Serialize, Serializer};

use crate::resolution::{ModuleResolutionPath, RESOLVE_EXTENSIONS};

/// Build mode passed to the bundler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    #[default]
    Production,
}

impl BuildMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
        }
    }
}

/// Runtime environment the bundle targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Web,
}

impl Target {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
        }
    }
}

/// Built-in devtool setting.
///
/// Always disabled: source maps come from an explicit plugin instead, which
/// controls the map filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Devtool {
    #[default]
    Disabled,
}

impl Serialize for Devtool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Disabled => serializer.serialize_bool(false),
        }
    }
}

/// Optimization switches. Both stay off in every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Optimization {
    pub minimize: bool,
    pub used_exports: bool,
}

impl Optimization {
    pub const DISABLED: Self = Self {
        minimize: false,
        used_exports: false,
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolveSettings {
    pub modules: ModuleResolutionPath,
    pub extensions: &'static [&'static str],
}

impl ResolveSettings {
    pub fn new(modules: ModuleResolutionPath) -> Self {
        Self {
            modules,
            extensions: RESOLVE_EXTENSIONS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputSettings {
    pub path: PathBuf,

    /// Fixed output filename. Absent when each entry names its own file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// Exposed library name, usually the `[name]` template
    pub library: String,
}
