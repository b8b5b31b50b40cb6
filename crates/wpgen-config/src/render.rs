//! Rendering of a configuration as a `webpack.config.js` module or as JSON.
//!
//! The module form is built as a JavaScript AST and printed with the code
//! generator: plugins become constructor calls, matchers become regex
//! literals, and loaders are referenced the way each one expects to be found.

use std::path::Path;

use indexmap::IndexMap;
use oxc_allocator::{Allocator, Vec as ArenaVec};
use oxc_ast::ast::{
    Argument, ArrayExpressionElement, AssignmentOperator, AssignmentTarget, Expression,
    NumberBase, Program, PropertyKey, PropertyKind, RegExp, RegExpFlags, RegExpPattern,
    SimpleAssignmentTarget, Statement, VariableDeclarationKind,
};
use oxc_ast::{AstBuilder, NONE};
use oxc_codegen::Codegen;
use oxc_span::{SPAN, SourceType};

use crate::entry::EntryPoints;
use crate::error::{ConfigError, Result};
use crate::model::{
    DevServerSettings, Loader, LoaderOptions, LoaderRef, Matcher, Plugin, Rule, UseEntry,
    WebpackConfig,
};

/// Render `config` as a CommonJS module.
///
/// Every module the config refers to is bound by a `require` at the top, in
/// first-use order, followed by the `module.exports` assignment.
///
/// # Errors
///
/// Returns [`ConfigError::NonUtf8Path`] when an entry, output, or search path
/// cannot be written as a JavaScript string.
///
/// # Example
///
/// ```
/// use wpgen_config::{render_module, Bindings, ModuleResolutionPath, TemplateKind};
///
/// let modules = ModuleResolutionPath::parse("NODE_PATH", Some("/repo/node_modules")).unwrap();
/// let bindings = Bindings::new().entry_point("./src/index.ts").output_dir("/out");
/// let config = TemplateKind::Library.instantiate(&bindings, &modules).unwrap();
///
/// let module = render_module(&config).unwrap();
/// assert!(module.starts_with("const webpack = require(\"webpack\");"));
/// assert!(module.contains("filename: \"bundle.js\""));
/// ```
pub fn render_module(config: &WebpackConfig) -> Result<String> {
    let allocator = Allocator::default();
    let program = ModuleBuilder::new(&allocator).program(config)?;
    Ok(Codegen::new().build(&program).code)
}

/// Render `config` as pretty-printed JSON.
pub fn render_json(config: &WebpackConfig) -> Result<String> {
    let mut json = serde_json::to_string_pretty(config)?;
    json.push('\n');
    Ok(json)
}

/// Module bindings the config refers to, in first-use order.
fn required_modules(config: &WebpackConfig) -> IndexMap<&'static str, &'static str> {
    let mut modules = IndexMap::new();
    modules.insert("webpack", "webpack");
    for plugin in &config.plugins {
        modules.insert(plugin.binding(), plugin.module());
    }
    if config.module.references(Loader::CssExtract) {
        let plugin = Plugin::MiniCssExtract;
        modules.insert(plugin.binding(), plugin.module());
    }
    modules
}

struct ModuleBuilder<'a> {
    ast: AstBuilder<'a>,
}

impl<'a> ModuleBuilder<'a> {
    fn new(allocator: &'a Allocator) -> Self {
        Self {
            ast: AstBuilder::new(allocator),
        }
    }

    fn program(&self, config: &WebpackConfig) -> Result<Program<'a>> {
        let mut body: Vec<Statement<'a>> = required_modules(config)
            .into_iter()
            .map(|(binding, module)| self.require_decl(binding, module))
            .collect();
        body.push(self.module_exports(self.config(config)?));

        Ok(self.ast.program(
            SPAN,
            SourceType::cjs(),
            "",
            self.ast.vec(),
            None,
            self.ast.vec(),
            self.ast.vec_from_iter(body),
        ))
    }

    /// `const <binding> = require("<module>");`
    fn require_decl(&self, binding: &'static str, module: &str) -> Statement<'a> {
        let init = self.call(self.ident("require"), vec![self.string(module)]);
        let declarator = self.ast.variable_declarator(
            SPAN,
            VariableDeclarationKind::Const,
            self.ast.binding_pattern(
                self.ast.binding_pattern_kind_binding_identifier(SPAN, binding),
                NONE,
                false,
            ),
            Some(init),
            false,
        );
        Statement::from(self.ast.declaration_variable(
            SPAN,
            VariableDeclarationKind::Const,
            self.ast.vec1(declarator),
            false,
        ))
    }

    /// `module.exports = <value>;`
    fn module_exports(&self, value: Expression<'a>) -> Statement<'a> {
        let target = self.ast.member_expression_static(
            SPAN,
            self.ident("module"),
            self.ast.identifier_name(SPAN, "exports"),
            false,
        );
        self.ast.statement_expression(
            SPAN,
            self.ast.expression_assignment(
                SPAN,
                AssignmentOperator::Assign,
                AssignmentTarget::from(SimpleAssignmentTarget::from(target)),
                value,
            ),
        )
    }

    fn config(&self, config: &WebpackConfig) -> Result<Expression<'a>> {
        let mut output = vec![("path", self.path(&config.output.path)?)];
        if let Some(filename) = &config.output.filename {
            output.push(("filename", self.string(filename)));
        }
        output.push(("library", self.string(&config.output.library)));

        let modules = config
            .resolve
            .modules
            .iter()
            .map(|dir| self.path(dir))
            .collect::<Result<Vec<_>>>()?;
        let extensions = config
            .resolve
            .extensions
            .iter()
            .map(|ext| self.string(ext))
            .collect();

        Ok(self.fields(vec![
            ("mode", self.string(config.mode.as_str())),
            ("devtool", self.ast.expression_boolean_literal(SPAN, false)),
            ("entry", self.entry(&config.entry)?),
            (
                "plugins",
                self.array(config.plugins.iter().map(|p| self.plugin(p)).collect()),
            ),
            (
                "resolve",
                self.fields(vec![
                    ("modules", self.array(modules)),
                    ("extensions", self.array(extensions)),
                ]),
            ),
            ("output", self.fields(output)),
            (
                "module",
                self.fields(vec![(
                    "rules",
                    self.array(config.module.rules.iter().map(|r| self.rule(r)).collect()),
                )]),
            ),
            (
                "optimization",
                self.fields(vec![
                    (
                        "minimize",
                        self.ast
                            .expression_boolean_literal(SPAN, config.optimization.minimize),
                    ),
                    (
                        "usedExports",
                        self.ast
                            .expression_boolean_literal(SPAN, config.optimization.used_exports),
                    ),
                ]),
            ),
            ("devServer", self.dev_server(&config.dev_server)?),
            ("target", self.string(config.target.as_str())),
        ]))
    }

    fn entry(&self, entry: &EntryPoints) -> Result<Expression<'a>> {
        match entry {
            EntryPoints::Single(path) => self.path(path),
            // Entry names are caller supplied, so keys are always quoted.
            EntryPoints::Named(entries) => {
                let props = entries
                    .iter()
                    .map(|(name, path)| -> Result<(PropertyKey<'a>, Expression<'a>)> {
                        Ok((PropertyKey::from(self.string(name)), self.path(path)?))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(self.object(props))
            }
        }
    }

    fn plugin(&self, plugin: &Plugin) -> Expression<'a> {
        let callee = match plugin {
            Plugin::SourceMapDevTool { .. } => {
                self.member(self.ident(plugin.binding()), "SourceMapDevToolPlugin")
            }
            Plugin::MiniCssExtract => self.ident(plugin.binding()),
        };
        let args = match plugin {
            Plugin::SourceMapDevTool { filename } => {
                vec![self.fields(vec![("filename", self.string(filename))])]
            }
            Plugin::MiniCssExtract => Vec::new(),
        };
        self.ast.expression_new(SPAN, callee, NONE, self.arguments(args))
    }

    fn loader(&self, loader: Loader) -> Expression<'a> {
        match loader.reference() {
            LoaderRef::Bare(name) => self.string(name),
            LoaderRef::Resolved(name) => self.call(
                self.member(self.ident("require"), "resolve"),
                vec![self.string(name)],
            ),
            LoaderRef::PluginHandle { binding, property } => {
                self.member(self.ident(binding), property)
            }
        }
    }

    fn matcher(&self, matcher: &Matcher) -> Expression<'a> {
        let flags = if matcher.is_case_insensitive() {
            RegExpFlags::I
        } else {
            RegExpFlags::empty()
        };
        let regex = RegExp {
            pattern: RegExpPattern {
                text: self.ast.atom(matcher.pattern()),
                pattern: None,
            },
            flags,
        };
        self.ast.expression_reg_exp_literal(SPAN, regex, None)
    }

    fn options(&self, options: &LoaderOptions) -> Expression<'a> {
        let mut props = Vec::new();
        if let Some(path) = &options.output_path {
            props.push(("outputPath", self.string(path)));
        }
        self.fields(props)
    }

    fn use_entry(&self, entry: &UseEntry) -> Expression<'a> {
        let mut props = vec![("loader", self.loader(entry.loader))];
        if !entry.options.is_empty() {
            props.push(("options", self.options(&entry.options)));
        }
        self.fields(props)
    }

    fn rule(&self, rule: &Rule) -> Expression<'a> {
        let mut props = vec![("test", self.matcher(rule.test()))];
        if let Some(enforce) = rule.enforced() {
            props.push(("enforce", self.string(enforce.as_str())));
        }
        if let Some(loader) = rule.single_loader() {
            props.push(("loader", self.loader(loader)));
        }
        if !rule.use_chain().is_empty() {
            let chain = rule.use_chain().iter().map(|l| self.loader(*l)).collect();
            props.push(("use", self.array(chain)));
        }
        if !rule.sub_rules().is_empty() {
            let nested = rule.sub_rules().iter().map(|e| self.use_entry(e)).collect();
            props.push(("rules", self.array(nested)));
        }
        self.fields(props)
    }

    fn dev_server(&self, settings: &DevServerSettings) -> Result<Expression<'a>> {
        let files = &settings.static_files;
        Ok(self.fields(vec![
            (
                "dev",
                self.fields(vec![("publicPath", self.string(settings.public_path()))]),
            ),
            (
                "static",
                self.fields(vec![
                    ("directory", self.path(settings.static_root())?),
                    (
                        "serveIndex",
                        self.ast.expression_boolean_literal(SPAN, files.serve_index),
                    ),
                    ("watch", self.ast.expression_boolean_literal(SPAN, files.watch)),
                ]),
            ),
            (
                "port",
                self.ast.expression_numeric_literal(
                    SPAN,
                    f64::from(settings.port),
                    None,
                    NumberBase::Decimal,
                ),
            ),
        ]))
    }

    fn string(&self, value: &str) -> Expression<'a> {
        self.ast
            .expression_string_literal(SPAN, self.ast.atom(value), None)
    }

    fn path(&self, path: &Path) -> Result<Expression<'a>> {
        let value = path.to_str().ok_or_else(|| ConfigError::NonUtf8Path {
            path: path.to_path_buf(),
        })?;
        Ok(self.string(value))
    }

    fn ident(&self, name: &'static str) -> Expression<'a> {
        self.ast.expression_identifier(SPAN, name)
    }

    fn member(&self, object: Expression<'a>, property: &'static str) -> Expression<'a> {
        Expression::from(self.ast.member_expression_static(
            SPAN,
            object,
            self.ast.identifier_name(SPAN, property),
            false,
        ))
    }

    fn call(&self, callee: Expression<'a>, args: Vec<Expression<'a>>) -> Expression<'a> {
        self.ast
            .expression_call(SPAN, callee, NONE, self.arguments(args), false)
    }

    fn arguments(&self, args: Vec<Expression<'a>>) -> ArenaVec<'a, Argument<'a>> {
        self.ast.vec_from_iter(args.into_iter().map(Argument::from))
    }

    fn array(&self, items: Vec<Expression<'a>>) -> Expression<'a> {
        self.ast.expression_array(
            SPAN,
            self.ast
                .vec_from_iter(items.into_iter().map(ArrayExpressionElement::from)),
        )
    }

    /// Object literal with identifier keys.
    fn fields(&self, props: Vec<(&'static str, Expression<'a>)>) -> Expression<'a> {
        self.object(
            props
                .into_iter()
                .map(|(key, value)| (self.ast.property_key_static_identifier(SPAN, key), value))
                .collect(),
        )
    }

    fn object(&self, props: Vec<(PropertyKey<'a>, Expression<'a>)>) -> Expression<'a> {
        let props = props.into_iter().map(|(key, value)| {
            self.ast.object_property_kind_object_property(
                SPAN,
                PropertyKind::Init,
                key,
                value,
                false,
                false,
                false,
            )
        });
        self.ast.expression_object(SPAN, self.ast.vec_from_iter(props))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModuleRules;
    use crate::{ModuleResolutionPath, generate, DevMode, LibraryMode, Mode};

    fn modules() -> ModuleResolutionPath {
        ModuleResolutionPath::parse("NODE_PATH", Some("/nm")).unwrap()
    }

    fn dev_config(entries: &[(&str, &str)]) -> WebpackConfig {
        let mode = Mode::Dev(DevMode {
            entries: entries
                .iter()
                .map(|(name, path)| (name.to_string(), path.into()))
                .collect(),
            output_dir: "/build".into(),
        });
        generate(&mode, &modules()).unwrap()
    }

    #[test]
    fn loaders_render_by_reference_style() {
        let module = render_module(&dev_config(&[("app", "./src/app.ts")])).unwrap();
        assert!(module.contains("loader: \"ts-loader\""));
        assert!(module.contains("require.resolve(\"css-loader\")"));
        assert!(module.contains("MiniCssExtractPlugin.loader"));
        assert!(!module.contains("require.resolve(\"ts-loader\")"));
    }

    #[test]
    fn entry_names_are_quoted() {
        let module = render_module(&dev_config(&[("my-app", "./src/app.ts")])).unwrap();
        assert!(module.contains("\"my-app\": \"./src/app.ts\""));
    }

    #[test]
    fn extraction_plugin_is_required_only_when_used() {
        let mut config = dev_config(&[("app", "./src/app.ts")]);
        assert_eq!(
            required_modules(&config).keys().copied().collect::<Vec<_>>(),
            ["webpack", "MiniCssExtractPlugin"]
        );

        config.plugins.truncate(1);
        config.module = ModuleRules::new(Vec::new());
        assert_eq!(
            required_modules(&config).keys().copied().collect::<Vec<_>>(),
            ["webpack"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_entry_is_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let entry = Path::new(OsStr::from_bytes(b"/src/bad\xff.ts")).to_path_buf();
        let mode = Mode::Library(LibraryMode {
            entry: entry.clone(),
            output_dir: "/out".into(),
        });
        let config = generate(&mode, &modules()).unwrap();

        let err = render_module(&config).unwrap_err();
        assert!(matches!(err, ConfigError::NonUtf8Path { ref path } if *path == entry));
    }
}
