//! Typed webpack configuration object.

mod dev_server;
mod loader;
mod rule;
mod types;

use serde::Serialize;

use crate::entry::EntryPoints;

pub use dev_server::{DEV_SERVER_PORT, DevMiddleware, DevServerSettings, StaticFiles};
pub use loader::{Loader, LoaderRef, Plugin};
pub use rule::{Enforce, LoaderOptions, Matcher, ModuleRules, Rule, UseEntry};
pub use types::{BuildMode, Devtool, Optimization, OutputSettings, ResolveSettings, Target};

/// Complete configuration handed to the bundler runtime.
///
/// Serializes with the bundler's own field names (`devServer`, `usedExports`,
/// and so on).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebpackConfig {
    pub mode: BuildMode,
    pub devtool: Devtool,
    pub entry: EntryPoints,
    pub plugins: Vec<Plugin>,
    pub resolve: ResolveSettings,
    pub output: OutputSettings,
    pub module: ModuleRules,
    pub optimization: Optimization,
    pub dev_server: DevServerSettings,
    pub target: Target,
}

impl WebpackConfig {
    /// Convert to serde_json::Value
    pub fn to_value(&self) -> crate::error::Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
