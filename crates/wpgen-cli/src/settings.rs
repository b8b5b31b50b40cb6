//! Project settings.
//!
//! Priority: CLI flags > `WPGEN_*` environment variables > `wpgen.toml` > defaults.
//! Flags are applied by the commands; this module layers the rest.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use wpgen_config::{MODULE_PATH_VAR, TemplateKind};

use crate::error::Result;

/// Settings file looked up in the project directory.
pub const SETTINGS_FILE: &str = "wpgen.toml";

const ENV_PREFIX: &str = "WPGEN_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSettings {
    /// Directory bundles are emitted into, relative to the project directory
    pub output_dir: PathBuf,

    /// Where the library config module is written
    pub config_file: PathBuf,

    /// Where the dev-server config module is written
    pub dev_config_file: PathBuf,

    /// Environment variable holding the module search path
    pub module_path_var: String,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("build/webpack"),
            config_file: PathBuf::from("build/webpack.config.js"),
            dev_config_file: PathBuf::from("build/webpack-dev.config.js"),
            module_path_var: MODULE_PATH_VAR.to_string(),
        }
    }
}

impl ProjectSettings {
    /// Layer defaults, `<project_dir>/wpgen.toml`, and `WPGEN_*` variables.
    ///
    /// A missing `wpgen.toml` is not an error; the defaults apply.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Settings`](crate::error::CliError::Settings) when the file is not valid TOML or a
    /// layer has a value of the wrong type.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use std::path::Path;
    /// use wpgen_cli::settings::ProjectSettings;
    ///
    /// let settings = ProjectSettings::load(Path::new("."))?;
    /// println!("writing to {}", settings.config_file.display());
    /// # Ok::<(), wpgen_cli::error::CliError>(())
    /// ```
    pub fn load(project_dir: &Path) -> Result<Self> {
        Ok(Self::figment(project_dir)
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()?)
    }

    /// Layer defaults and `<project_dir>/wpgen.toml` only.
    pub fn load_file(project_dir: &Path) -> Result<Self> {
        Ok(Self::figment(project_dir).extract()?)
    }

    fn figment(project_dir: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(project_dir.join(SETTINGS_FILE)))
    }

    pub fn config_file_for(&self, kind: TemplateKind) -> &Path {
        match kind {
            TemplateKind::Library => &self.config_file,
            TemplateKind::Dev => &self.dev_config_file,
        }
    }
}
