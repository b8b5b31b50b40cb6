//! Module resolution search path.
//!
//! The search path arrives as a colon-joined environment variable. It is read
//! once by the caller and handed to the generator as a parsed value, so the
//! generator itself never touches the process environment.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::{ConfigError, Result};

/// Variable the search path is conventionally read from.
pub const MODULE_PATH_VAR: &str = "NODE_PATH";

/// Extensions tried for extension-less imports, in order.
pub const RESOLVE_EXTENSIONS: &[&str] = &[".js", ".ts", ".json"];

const PATH_SEPARATOR: char = ':';

/// Ordered directories searched for non-relative imports. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModuleResolutionPath(Vec<PathBuf>);

impl ModuleResolutionPath {
    /// Parse the raw value of `var`. An unset or empty value is fatal.
    ///
    /// Segments are kept exactly as split, so the first directory keeps
    /// resolution priority.
    ///
    /// # Example
    ///
    /// ```
    /// use wpgen_config::ModuleResolutionPath;
    ///
    /// let path = ModuleResolutionPath::parse("NODE_PATH", Some("/a/node_modules:/b")).unwrap();
    /// assert_eq!(path.dirs().len(), 2);
    /// assert!(ModuleResolutionPath::parse("NODE_PATH", None).is_err());
    /// ```
    pub fn parse(var: &str, value: Option<&str>) -> Result<Self> {
        let value = match value {
            Some(value) if !value.is_empty() => value,
            _ => {
                return Err(ConfigError::UnresolvedPaths {
                    var: var.to_string(),
                });
            }
        };

        let dirs: Vec<PathBuf> = value.split(PATH_SEPARATOR).map(PathBuf::from).collect();
        debug!(var, dirs = dirs.len(), "parsed module resolution path");
        Ok(Self(dirs))
    }

    /// Read and parse `var` from the process environment.
    ///
    /// A value that is not valid UTF-8 is rejected rather than rewritten, since
    /// the rendered module can only carry the directories as JS strings.
    pub fn from_env(var: &str) -> Result<Self> {
        let value = std::env::var_os(var)
            .map(|value| {
                value.into_string().map_err(|_| ConfigError::NonUtf8Var {
                    var: var.to_string(),
                })
            })
            .transpose()?;
        Self::parse(var, value.as_deref())
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.0.iter().map(PathBuf::as_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn preserves_order() {
        let path = ModuleResolutionPath::parse(MODULE_PATH_VAR, Some("/z:/a:/m")).unwrap();
        assert_eq!(
            path.dirs(),
            &[PathBuf::from("/z"), PathBuf::from("/a"), PathBuf::from("/m")]
        );
    }

    #[test]
    fn keeps_empty_segments() {
        let path = ModuleResolutionPath::parse(MODULE_PATH_VAR, Some("/a::/b")).unwrap();
        assert_eq!(path.dirs().len(), 3);
        assert_eq!(path.dirs()[1], PathBuf::new());
    }

    #[test]
    fn rejects_unset_and_empty() {
        for value in [None, Some("")] {
            let err = ModuleResolutionPath::parse("MY_PATH", value).unwrap_err();
            assert!(matches!(err, ConfigError::UnresolvedPaths { ref var } if var == "MY_PATH"));
        }
    }

    #[test]
    #[serial]
    fn reads_process_environment() {
        let var = "WPGEN_TEST_MODULE_PATH";
        unsafe {
            std::env::set_var(var, "/one:/two");
        }
        let path = ModuleResolutionPath::from_env(var).unwrap();
        assert_eq!(path.iter().collect::<Vec<_>>(), vec![Path::new("/one"), Path::new("/two")]);

        unsafe {
            std::env::remove_var(var);
        }
        assert!(ModuleResolutionPath::from_env(var).is_err());
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn non_utf8_value_is_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let var = "WPGEN_TEST_NON_UTF8_PATH";
        unsafe {
            std::env::set_var(var, OsStr::from_bytes(b"/good:/bad\xff/node_modules"));
        }
        let err = ModuleResolutionPath::from_env(var).unwrap_err();
        unsafe {
            std::env::remove_var(var);
        }

        assert!(matches!(err, ConfigError::NonUtf8Var { ref var } if var == "WPGEN_TEST_NON_UTF8_PATH"));
        assert!(err.to_string().contains("not valid UTF-8"));
    }
}
