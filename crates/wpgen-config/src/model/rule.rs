//! Module rules: which loaders apply to which files.

use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::{Serialize, Serializer};

use crate::error::{ConfigError, Result};
use crate::model::loader::Loader;

/// File-type test written as a regular expression over the module path.
#[derive(Debug, Clone)]
pub struct Matcher {
    pattern: String,
    case_insensitive: bool,
    regex: Regex,
}

impl Matcher {
    pub fn new(pattern: &str) -> Result<Self> {
        Self::build(pattern, false)
    }

    pub fn case_insensitive(pattern: &str) -> Result<Self> {
        Self::build(pattern, true)
    }

    fn build(pattern: &str, case_insensitive: bool) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|error| ConfigError::InvalidMatcher {
                pattern: pattern.to_string(),
                error,
            })?;
        Ok(Self {
            pattern: pattern.to_string(),
            case_insensitive,
            regex,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// Regex literal flags, `"i"` or `""`
    pub fn flags(&self) -> &'static str {
        if self.case_insensitive { "i" } else { "" }
    }

    pub fn is_match(&self, path: &Path) -> bool {
        self.regex.is_match(&path.to_string_lossy())
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.case_insensitive == other.case_insensitive
    }
}

impl Eq for Matcher {}

impl Serialize for Matcher {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(&format_args!("/{}/{}", self.pattern, self.flags()))
    }
}

/// Stage a rule is forced into ahead of the normal loaders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Enforce {
    Pre,
}

impl Enforce {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pre => "pre",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoaderOptions {
    /// Output subdirectory for emitted files, relative to the output path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
}

impl LoaderOptions {
    pub fn output_path(path: impl Into<String>) -> Self {
        Self {
            output_path: Some(path.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.output_path.is_none()
    }
}

/// A loader with its options, nested inside a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UseEntry {
    pub loader: Loader,
    #[serde(skip_serializing_if = "LoaderOptions::is_empty")]
    pub options: LoaderOptions,
}

impl UseEntry {
    pub fn new(loader: Loader) -> Self {
        Self {
            loader,
            options: LoaderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: LoaderOptions) -> Self {
        self.options = options;
        self
    }
}

/// A file-type matcher paired with the loader chain applied to matching files.
///
/// A rule carries exactly one of: a single loader, a `use` chain, or nested
/// sub-rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    test: Matcher,

    #[serde(skip_serializing_if = "Option::is_none")]
    enforce: Option<Enforce>,

    #[serde(skip_serializing_if = "Option::is_none")]
    loader: Option<Loader>,

    #[serde(rename = "use", skip_serializing_if = "Vec::is_empty")]
    chain: Vec<Loader>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    rules: Vec<UseEntry>,
}

impl Rule {
    pub fn loader(test: Matcher, loader: Loader) -> Self {
        Self {
            test,
            enforce: None,
            loader: Some(loader),
            chain: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Chain of loaders, written outermost first.
    pub fn chain(test: Matcher, chain: Vec<Loader>) -> Self {
        Self {
            test,
            enforce: None,
            loader: None,
            chain,
            rules: Vec::new(),
        }
    }

    pub fn nested(test: Matcher, rules: Vec<UseEntry>) -> Self {
        Self {
            test,
            enforce: None,
            loader: None,
            chain: Vec::new(),
            rules,
        }
    }

    pub fn enforce(mut self, enforce: Enforce) -> Self {
        self.enforce = Some(enforce);
        self
    }

    pub fn test(&self) -> &Matcher {
        &self.test
    }

    pub fn enforced(&self) -> Option<Enforce> {
        self.enforce
    }

    pub fn single_loader(&self) -> Option<Loader> {
        self.loader
    }

    pub fn use_chain(&self) -> &[Loader] {
        &self.chain
    }

    pub fn sub_rules(&self) -> &[UseEntry] {
        &self.rules
    }

    pub fn matches(&self, path: &Path) -> bool {
        self.test.is_match(path)
    }

    /// Loaders in declaration order, nested sub-rules included.
    pub fn loader_chain(&self) -> Vec<Loader> {
        self.loader
            .into_iter()
            .chain(self.chain.iter().copied())
            .chain(self.rules.iter().map(|entry| entry.loader))
            .collect()
    }

    /// Loaders in the order the bundler runs them: the last declared loader
    /// sees the source first.
    pub fn invocation_order(&self) -> Vec<Loader> {
        let mut chain = self.loader_chain();
        chain.reverse();
        chain
    }

    pub fn options_for(&self, loader: Loader) -> Option<&LoaderOptions> {
        self.rules
            .iter()
            .find(|entry| entry.loader == loader)
            .map(|entry| &entry.options)
            .filter(|options| !options.is_empty())
    }

    pub fn references(&self, loader: Loader) -> bool {
        self.loader_chain().contains(&loader)
    }
}

/// Ordered rule list. The first rule whose test matches a file wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModuleRules {
    pub rules: Vec<Rule>,
}

impl ModuleRules {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// First matching rule, or `None` when the bundler's default handling
    /// applies.
    pub fn first_match(&self, path: impl AsRef<Path>) -> Option<&Rule> {
        let path = path.as_ref();
        self.rules.iter().find(|rule| rule.matches(path))
    }

    pub fn references(&self, loader: Loader) -> bool {
        self.rules.iter().any(|rule| rule.references(loader))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
