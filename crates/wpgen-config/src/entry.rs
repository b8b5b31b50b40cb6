//! Entry point sets bound into a template.

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Entry points of a bundle.
///
/// Library builds take one unnamed entry. Dev builds take named entries, where
/// each name becomes the output library name of its bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryPoints {
    Single(PathBuf),
    Named(IndexMap<String, PathBuf>),
}

impl EntryPoints {
    pub fn single(path: impl Into<PathBuf>) -> Self {
        Self::Single(path.into())
    }

    /// Build a named set, keeping the order the pairs are supplied in.
    ///
    /// # Example
    ///
    /// ```
    /// use wpgen_config::EntryPoints;
    ///
    /// let entries = EntryPoints::named([("app", "./src/app.ts"), ("admin", "./src/admin.ts")]);
    /// assert_eq!(entries.names().collect::<Vec<_>>(), vec!["app", "admin"]);
    /// ```
    pub fn named<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<PathBuf>,
    {
        Self::Named(
            entries
                .into_iter()
                .map(|(name, path)| (name.into(), path.into()))
                .collect(),
        )
    }

    pub fn shape(&self) -> EntryShape {
        match self {
            Self::Single(_) => EntryShape::Single,
            Self::Named(_) => EntryShape::Named,
        }
    }

    /// Names of the entries. A single entry is unnamed and yields nothing.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        let names = match self {
            Self::Single(_) => None,
            Self::Named(map) => Some(map.keys().map(String::as_str)),
        };
        names.into_iter().flatten()
    }

    pub fn paths(&self) -> Vec<&Path> {
        match self {
            Self::Single(path) => vec![path.as_path()],
            Self::Named(map) => map.values().map(PathBuf::as_path).collect(),
        }
    }
}

/// Shape an entry parameter takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryShape {
    Single,
    Named,
}

impl fmt::Display for EntryShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => f.write_str("a single path for its"),
            Self::Named => f.write_str("a name-to-path mapping for its"),
        }
    }
}
