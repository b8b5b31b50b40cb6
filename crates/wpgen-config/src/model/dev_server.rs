//! Local static file server settings.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Port the local server listens on in every mode.
pub const DEV_SERVER_PORT: u16 = 8089;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DevServerSettings {
    pub dev: DevMiddleware,

    #[serde(rename = "static")]
    pub static_files: StaticFiles,

    pub port: u16,
}

/// Settings of the in-memory bundle middleware
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevMiddleware {
    /// URL prefix bundles are served under. Independent of the on-disk layout.
    pub public_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticFiles {
    pub directory: PathBuf,
    pub serve_index: bool,
    pub watch: bool,
}

impl DevServerSettings {
    fn new(directory: impl Into<PathBuf>, public_path: impl Into<String>) -> Self {
        Self {
            dev: DevMiddleware {
                public_path: public_path.into(),
            },
            static_files: StaticFiles {
                directory: directory.into(),
                serve_index: true,
                watch: true,
            },
            port: DEV_SERVER_PORT,
        }
    }

    /// Library builds serve the project's static build tree under `/build`.
    pub fn library() -> Self {
        Self::new("build/static", "/build")
    }

    pub fn dev() -> Self {
        Self::new("static/", "/build/webpack/")
    }

    pub fn public_path(&self) -> &str {
        &self.dev.public_path
    }

    pub fn static_root(&self) -> &Path {
        &self.static_files.directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dev_settings_shape() {
        let settings = DevServerSettings::dev();
        assert_eq!(
            serde_json::to_value(&settings).unwrap(),
            json!({
                "dev": { "publicPath": "/build/webpack/" },
                "static": { "directory": "static/", "serveIndex": true, "watch": true },
                "port": 8089
            })
        );
    }

    #[test]
    fn public_path_is_decoupled_from_static_root() {
        for settings in [DevServerSettings::library(), DevServerSettings::dev()] {
            assert_ne!(Path::new(settings.public_path()), settings.static_root());
            assert_eq!(settings.port, DEV_SERVER_PORT);
        }
    }
}
