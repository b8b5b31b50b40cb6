//! Placeholder substitution.
//!
//! Each template declares the placeholders it needs. Substitution checks every
//! one of them against the supplied bindings, validates the entry shape, and
//! only then yields a [`Mode`] for the generator. Nothing is produced when a
//! binding is missing or has the wrong shape.

use std::fmt;
use std::path::PathBuf;

use tracing::trace;

use crate::entry::{EntryPoints, EntryShape};
use crate::error::{ConfigError, Result};
use crate::generator::{self, DevMode, LibraryMode, Mode};
use crate::model::WebpackConfig;
use crate::resolution::ModuleResolutionPath;

/// Named slot in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Entries,
    OutputDir,
}

/// Which of the two templates to instantiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// Single `bundle.js` library output
    Library,
    /// Per-entry outputs with the full loader chain
    Dev,
}

impl TemplateKind {
    pub const ALL: [Self; 2] = [Self::Library, Self::Dev];

    pub fn placeholders(self) -> &'static [Placeholder] {
        &[Placeholder::Entries, Placeholder::OutputDir]
    }

    /// Token a placeholder is written as in this template.
    pub fn token(self, placeholder: Placeholder) -> &'static str {
        match (self, placeholder) {
            (Self::Library, Placeholder::Entries) => "__ENTRY_POINT__",
            (Self::Dev, Placeholder::Entries) => "__ENTRY_POINTS__",
            (_, Placeholder::OutputDir) => "__OUTPUT_DIR__",
        }
    }

    pub fn entry_shape(self) -> EntryShape {
        match self {
            Self::Library => EntryShape::Single,
            Self::Dev => EntryShape::Named,
        }
    }

    /// Resolve every placeholder of this template against `bindings`.
    pub fn substitute(self, bindings: &Bindings) -> Result<Mode> {
        let entries = bindings
            .entries
            .as_ref()
            .ok_or_else(|| self.missing(Placeholder::Entries))?;
        let output_dir = bindings
            .output_dir
            .as_ref()
            .ok_or_else(|| self.missing(Placeholder::OutputDir))?;
        for &placeholder in self.placeholders() {
            trace!(template = %self, token = self.token(placeholder), "placeholder bound");
        }

        let mode = match (self, entries) {
            (Self::Library, EntryPoints::Single(entry)) => Mode::Library(LibraryMode {
                entry: entry.clone(),
                output_dir: output_dir.clone(),
            }),
            (Self::Dev, EntryPoints::Named(entries)) => Mode::Dev(DevMode {
                entries: entries.clone(),
                output_dir: output_dir.clone(),
            }),
            _ => {
                return Err(ConfigError::UnsupportedEntryShape {
                    template: self,
                    expected: self.entry_shape(),
                });
            }
        };
        Ok(mode)
    }

    fn missing(self, placeholder: Placeholder) -> ConfigError {
        ConfigError::MissingBinding {
            template: self,
            placeholder: self.token(placeholder),
        }
    }

    /// Substitute `bindings` and generate the configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use wpgen_config::{Bindings, ModuleResolutionPath, TemplateKind};
    ///
    /// let modules = ModuleResolutionPath::parse("NODE_PATH", Some("/repo/node_modules")).unwrap();
    /// let bindings = Bindings::new().entry_point("./src/index.ts").output_dir("/out");
    /// let config = TemplateKind::Library.instantiate(&bindings, &modules).unwrap();
    /// assert_eq!(config.output.filename.as_deref(), Some("bundle.js"));
    /// ```
    pub fn instantiate(
        self,
        bindings: &Bindings,
        modules: &ModuleResolutionPath,
    ) -> Result<WebpackConfig> {
        let mode = self.substitute(bindings)?;
        generator::generate(&mode, modules)
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Library => f.write_str("library"),
            Self::Dev => f.write_str("dev"),
        }
    }
}

/// Values supplied for a template's placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    entries: Option<EntryPoints>,
    output_dir: Option<PathBuf>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(mut self, entries: EntryPoints) -> Self {
        self.entries = Some(entries);
        self
    }

    pub fn entry_point(self, path: impl Into<PathBuf>) -> Self {
        self.entries(EntryPoints::single(path))
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_output_dir_names_the_token() {
        let bindings = Bindings::new().entry_point("index.ts");
        let err = TemplateKind::Library.substitute(&bindings).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingBinding {
                template: TemplateKind::Library,
                placeholder: "__OUTPUT_DIR__"
            }
        ));
    }

    #[test]
    fn missing_entries_uses_template_token() {
        let err = TemplateKind::Dev
            .substitute(&Bindings::new().output_dir("/build"))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingBinding {
                placeholder: "__ENTRY_POINTS__",
                ..
            }
        ));
    }

    #[test]
    fn shape_mismatch_is_rejected_both_ways() {
        let named = Bindings::new()
            .entries(EntryPoints::named([("app", "app.ts")]))
            .output_dir("/out");
        assert!(matches!(
            TemplateKind::Library.substitute(&named).unwrap_err(),
            ConfigError::UnsupportedEntryShape {
                expected: EntryShape::Single,
                ..
            }
        ));

        let single = Bindings::new().entry_point("index.ts").output_dir("/out");
        assert!(matches!(
            TemplateKind::Dev.substitute(&single).unwrap_err(),
            ConfigError::UnsupportedEntryShape {
                expected: EntryShape::Named,
                ..
            }
        ));
    }

    #[test]
    fn substitution_yields_matching_mode() {
        let bindings = Bindings::new().entry_point("index.ts").output_dir("/out");
        let mode = TemplateKind::Library.substitute(&bindings).unwrap();
        assert_eq!(mode.kind(), TemplateKind::Library);
        assert_eq!(mode.output_dir(), std::path::Path::new("/out"));
    }

    #[test]
    fn display_names() {
        assert_eq!(TemplateKind::Library.to_string(), "library");
        assert_eq!(TemplateKind::Dev.to_string(), "dev");
    }
}
