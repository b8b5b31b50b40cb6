//! Configuration generator for both build modes.
//!
//! Everything the modes share (build mode, resolution rules, optimization
//! switches, target) is fixed here once. The modes only diverge in entry and
//! output naming, plugins, loader rules, and dev-server layout.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::debug;

use crate::entry::EntryPoints;
use crate::error::Result;
use crate::model::{
    BuildMode, DevServerSettings, Devtool, Enforce, Loader, LoaderOptions, Matcher, ModuleRules,
    Optimization, OutputSettings, Plugin, ResolveSettings, Rule, Target, UseEntry, WebpackConfig,
};
use crate::resolution::ModuleResolutionPath;
use crate::template::TemplateKind;

/// Output filename of a library build.
pub const LIBRARY_FILENAME: &str = "bundle.js";

/// Library name template; each bundle is exposed under its entry name.
pub const LIBRARY_NAME: &str = "[name]";

/// Subdirectory of the output path that fonts are emitted into.
pub const FONT_OUTPUT_PATH: &str = "fonts";

const DEV_SOURCE_MAP_FILENAME: &str = "[file].map";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryMode {
    pub entry: PathBuf,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevMode {
    pub entries: IndexMap<String, PathBuf>,
    pub output_dir: PathBuf,
}

/// Fully substituted generator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Library(LibraryMode),
    Dev(DevMode),
}

impl Mode {
    pub fn kind(&self) -> TemplateKind {
        match self {
            Self::Library(_) => TemplateKind::Library,
            Self::Dev(_) => TemplateKind::Dev,
        }
    }

    pub fn output_dir(&self) -> &Path {
        match self {
            Self::Library(mode) => &mode.output_dir,
            Self::Dev(mode) => &mode.output_dir,
        }
    }

    fn entry_points(&self) -> EntryPoints {
        match self {
            Self::Library(mode) => EntryPoints::Single(mode.entry.clone()),
            Self::Dev(mode) => EntryPoints::Named(mode.entries.clone()),
        }
    }
}

/// Build the configuration for `mode`.
///
/// Pure apart from logging: the same inputs always produce an equal value.
///
/// # Arguments
///
/// * `mode` - Substituted template input, usually from [`TemplateKind::substitute`]
/// * `modules` - Directories copied verbatim into `resolve.modules`
///
/// # Errors
///
/// Returns [`ConfigError::InvalidMatcher`](crate::ConfigError::InvalidMatcher)
/// if a built-in rule pattern fails to compile.
///
/// # Examples
///
/// ```rust
/// use wpgen_config::{generate, LibraryMode, Mode, ModuleResolutionPath};
///
/// let modules = ModuleResolutionPath::parse("NODE_PATH", Some("/repo/node_modules"))?;
/// let mode = Mode::Library(LibraryMode {
///     entry: "./src/index.ts".into(),
///     output_dir: "/out".into(),
/// });
/// let config = generate(&mode, &modules)?;
/// assert_eq!(config.module.len(), 1);
/// # Ok::<(), wpgen_config::ConfigError>(())
/// ```
pub fn generate(mode: &Mode, modules: &ModuleResolutionPath) -> Result<WebpackConfig> {
    // Plugins come first: the stylesheet rule refers to the extraction plugin's loader.
    let plugins = plugins(mode);
    let rules = rules(mode)?;

    let config = WebpackConfig {
        mode: BuildMode::Production,
        devtool: Devtool::Disabled,
        entry: mode.entry_points(),
        plugins,
        resolve: ResolveSettings::new(modules.clone()),
        output: output(mode),
        module: ModuleRules::new(rules),
        optimization: Optimization::DISABLED,
        dev_server: dev_server(mode),
        target: Target::Web,
    };

    debug!(
        template = %mode.kind(),
        rules = config.module.len(),
        plugins = config.plugins.len(),
        search_dirs = modules.dirs().len(),
        "generated webpack configuration"
    );
    Ok(config)
}

fn plugins(mode: &Mode) -> Vec<Plugin> {
    match mode {
        Mode::Library(_) => vec![Plugin::SourceMapDevTool {
            filename: format!("{LIBRARY_FILENAME}.map"),
        }],
        Mode::Dev(_) => vec![
            Plugin::SourceMapDevTool {
                filename: DEV_SOURCE_MAP_FILENAME.to_string(),
            },
            Plugin::MiniCssExtract,
        ],
    }
}

fn rules(mode: &Mode) -> Result<Vec<Rule>> {
    let rules = match mode {
        Mode::Library(_) => vec![
            Rule::loader(Matcher::case_insensitive(r"\.(ts|js)($|\?)")?, Loader::SourceMap)
                .enforce(Enforce::Pre),
        ],
        Mode::Dev(_) => vec![
            Rule::loader(Matcher::new(r"\.tsx?$")?, Loader::TypeScript),
            Rule::chain(
                Matcher::case_insensitive(r"\.s[ac]ss$")?,
                vec![Loader::CssExtract, Loader::Css, Loader::Sass],
            ),
            Rule::loader(Matcher::new(r"\.svg$")?, Loader::SvgInline),
            Rule::nested(
                Matcher::new(r"\.(eot|ttf|woff|woff2)$")?,
                vec![
                    UseEntry::new(Loader::File)
                        .with_options(LoaderOptions::output_path(FONT_OUTPUT_PATH)),
                ],
            ),
        ],
    };
    Ok(rules)
}

fn output(mode: &Mode) -> OutputSettings {
    let filename = match mode {
        Mode::Library(_) => Some(LIBRARY_FILENAME.to_string()),
        Mode::Dev(_) => None,
    };
    OutputSettings {
        path: mode.output_dir().to_path_buf(),
        filename,
        library: LIBRARY_NAME.to_string(),
    }
}

fn dev_server(mode: &Mode) -> DevServerSettings {
    match mode {
        Mode::Library(_) => DevServerSettings::library(),
        Mode::Dev(_) => DevServerSettings::dev(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modules() -> ModuleResolutionPath {
        ModuleResolutionPath::parse("NODE_PATH", Some("/repo/node_modules")).unwrap()
    }

    fn library() -> Mode {
        Mode::Library(LibraryMode {
            entry: PathBuf::from("./src/index.ts"),
            output_dir: PathBuf::from("/out"),
        })
    }

    fn dev() -> Mode {
        Mode::Dev(DevMode {
            entries: IndexMap::from([("app".to_string(), PathBuf::from("./src/app.ts"))]),
            output_dir: PathBuf::from("/build"),
        })
    }

    #[test]
    fn shared_constants_hold_in_both_modes() {
        for mode in [library(), dev()] {
            let config = generate(&mode, &modules()).unwrap();
            assert_eq!(config.mode, BuildMode::Production);
            assert_eq!(config.target, Target::Web);
            assert_eq!(config.optimization, Optimization::DISABLED);
            assert_eq!(config.resolve.extensions, &[".js", ".ts", ".json"]);
            assert_eq!(config.dev_server.port, 8089);
            assert_eq!(config.output.library, "[name]");
        }
    }

    #[test]
    fn library_source_map_is_named_after_bundle() {
        let config = generate(&library(), &modules()).unwrap();
        assert_eq!(
            config.plugins,
            vec![Plugin::SourceMapDevTool {
                filename: "bundle.js.map".to_string()
            }]
        );
    }

    #[test]
    fn extraction_plugin_is_registered_before_use() {
        let config = generate(&dev(), &modules()).unwrap();
        assert!(config.module.references(Loader::CssExtract));
        assert_eq!(config.plugins.last(), Some(&Plugin::MiniCssExtract));
        assert_eq!(config.output.filename, None);
    }
}
