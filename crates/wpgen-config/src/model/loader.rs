//! Loaders and plugins referenced by the generated configuration.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// How a config module refers to a loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderRef {
    /// Package name string, resolved by the bundler from its own search path
    Bare(&'static str),
    /// `require.resolve("<package>")`, resolved relative to the config module
    Resolved(&'static str),
    /// A loader exposed as a property of a plugin binding
    PluginHandle {
        binding: &'static str,
        property: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Loader {
    /// Reads upstream source maps and merges them into the bundle's map
    SourceMap,
    TypeScript,
    /// Runtime loader of the stylesheet extraction plugin
    CssExtract,
    Css,
    Sass,
    /// Inlines SVG markup as a string
    SvgInline,
    /// Emits the file as a separate asset and exports its path
    File,
}

impl Loader {
    /// npm package providing the loader
    pub fn package(self) -> &'static str {
        match self {
            Self::SourceMap => "source-map-loader",
            Self::TypeScript => "ts-loader",
            Self::CssExtract => "mini-css-extract-plugin",
            Self::Css => "css-loader",
            Self::Sass => "sass-loader",
            Self::SvgInline => "svg-inline-loader",
            Self::File => "file-loader",
        }
    }

    pub fn reference(self) -> LoaderRef {
        match self {
            Self::TypeScript => LoaderRef::Bare(self.package()),
            Self::CssExtract => LoaderRef::PluginHandle {
                binding: Plugin::MiniCssExtract.binding(),
                property: "loader",
            },
            _ => LoaderRef::Resolved(self.package()),
        }
    }
}

impl LoaderRef {
    /// Reference style as it appears in the JSON form
    pub fn style(self) -> &'static str {
        match self {
            Self::Bare(_) => "bare",
            Self::Resolved(_) => "resolve",
            Self::PluginHandle { .. } => "pluginHandle",
        }
    }
}

/// `{"package": ..., "reference": ...}`, plus the handle expression for plugin loaders.
impl Serialize for Loader {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let reference = self.reference();
        let handle = match reference {
            LoaderRef::PluginHandle { binding, property } => Some(format!("{binding}.{property}")),
            LoaderRef::Bare(_) | LoaderRef::Resolved(_) => None,
        };

        let len = if handle.is_some() { 3 } else { 2 };
        let mut state = serializer.serialize_struct("Loader", len)?;
        state.serialize_field("package", self.package())?;
        state.serialize_field("reference", reference.style())?;
        if let Some(handle) = &handle {
            state.serialize_field("handle", handle)?;
        }
        state.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "plugin")]
pub enum Plugin {
    /// Writes each output's source map to a separate file
    #[serde(rename = "SourceMapDevToolPlugin")]
    SourceMapDevTool { filename: String },
    /// Extracts stylesheets into separate CSS files
    #[serde(rename = "MiniCssExtractPlugin")]
    MiniCssExtract,
}

impl Plugin {
    /// Module the plugin constructor is required from
    pub fn module(&self) -> &'static str {
        match self {
            Self::SourceMapDevTool { .. } => "webpack",
            Self::MiniCssExtract => "mini-css-extract-plugin",
        }
    }

    /// Local name the required module is bound to
    pub fn binding(&self) -> &'static str {
        match self {
            Self::SourceMapDevTool { .. } => "webpack",
            Self::MiniCssExtract => "MiniCssExtractPlugin",
        }
    }

    /// Constructor expression, relative to the binding
    pub fn constructor(&self) -> String {
        match self {
            Self::SourceMapDevTool { .. } => format!("{}.SourceMapDevToolPlugin", self.binding()),
            Self::MiniCssExtract => self.binding().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ts_loader_is_referenced_by_name() {
        assert_eq!(Loader::TypeScript.reference(), LoaderRef::Bare("ts-loader"));
        assert_eq!(
            Loader::Sass.reference(),
            LoaderRef::Resolved("sass-loader")
        );
    }

    #[test]
    fn extract_loader_goes_through_plugin_binding() {
        assert_eq!(
            serde_json::to_value(Loader::CssExtract).unwrap(),
            json!({
                "package": "mini-css-extract-plugin",
                "reference": "pluginHandle",
                "handle": "MiniCssExtractPlugin.loader"
            })
        );
    }

    #[test]
    fn json_form_records_reference_style() {
        assert_eq!(
            serde_json::to_value(Loader::TypeScript).unwrap(),
            json!({"package": "ts-loader", "reference": "bare"})
        );
        assert_eq!(
            serde_json::to_value(Loader::Css).unwrap(),
            json!({"package": "css-loader", "reference": "resolve"})
        );
    }

    #[test]
    fn plugins_serialize_with_tag() {
        let plugin = Plugin::SourceMapDevTool {
            filename: "[file].map".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&plugin).unwrap(),
            json!({"plugin": "SourceMapDevToolPlugin", "filename": "[file].map"})
        );
        assert_eq!(plugin.constructor(), "webpack.SourceMapDevToolPlugin");
        assert_eq!(Plugin::MiniCssExtract.module(), "mini-css-extract-plugin");
    }
}
