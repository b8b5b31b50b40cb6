//! Tests for the library template.

use std::path::{Path, PathBuf};

use serde_json::json;
use wpgen_config::{
    Bindings, ConfigError, EntryPoints, EntryShape, Enforce, Loader, ModuleResolutionPath,
    Optimization, Plugin, TemplateKind,
};

fn modules() -> ModuleResolutionPath {
    ModuleResolutionPath::parse("NODE_PATH", Some("/work/node_modules:/deps/node_modules"))
        .expect("module path")
}

fn library_bindings() -> Bindings {
    Bindings::new().entry_point("./src/index.ts").output_dir("/out")
}

#[test]
fn library_output_is_a_single_bundle() {
    let config = TemplateKind::Library
        .instantiate(&library_bindings(), &modules())
        .expect("generate");

    assert_eq!(config.output.filename.as_deref(), Some("bundle.js"));
    assert_eq!(config.output.path, PathBuf::from("/out"));
    assert_eq!(config.output.library, "[name]");
    assert_eq!(config.entry, EntryPoints::single("./src/index.ts"));
    assert_eq!(config.optimization, Optimization::DISABLED);
    assert!(!config.optimization.minimize);
}

#[test]
fn library_has_only_the_pre_source_map_rule() {
    let config = TemplateKind::Library
        .instantiate(&library_bindings(), &modules())
        .expect("generate");

    assert_eq!(config.module.len(), 1);
    let rule = &config.module.rules[0];
    assert_eq!(rule.enforced(), Some(Enforce::Pre));
    assert_eq!(rule.loader_chain(), vec![Loader::SourceMap]);

    for source in ["src/index.ts", "lib/util.js", "lib/UTIL.JS", "vendor/dep.js?inline"] {
        assert!(rule.matches(Path::new(source)), "{source} should match");
    }
    for other in ["styles/site.scss", "src/index.tsx", "data.json"] {
        assert!(!rule.matches(Path::new(other)), "{other} should not match");
    }
}

#[test]
fn library_source_map_goes_to_external_file() {
    let config = TemplateKind::Library
        .instantiate(&library_bindings(), &modules())
        .expect("generate");

    assert_eq!(
        config.plugins,
        vec![Plugin::SourceMapDevTool {
            filename: "bundle.js.map".to_string()
        }]
    );
    assert_eq!(config.to_value().expect("value")["devtool"], json!(false));
}

#[test]
fn library_dev_server_serves_build_tree() {
    let config = TemplateKind::Library
        .instantiate(&library_bindings(), &modules())
        .expect("generate");

    assert_eq!(config.dev_server.port, 8089);
    assert_eq!(config.dev_server.public_path(), "/build");
    assert_eq!(config.dev_server.static_root(), Path::new("build/static"));
    assert!(config.dev_server.static_files.serve_index);
    assert!(config.dev_server.static_files.watch);
}

#[test]
fn library_rejects_named_entries() {
    let bindings = Bindings::new()
        .entries(EntryPoints::named([("app", "./src/app.ts")]))
        .output_dir("/out");

    let err = TemplateKind::Library
        .instantiate(&bindings, &modules())
        .expect_err("wrong shape");
    assert!(matches!(
        err,
        ConfigError::UnsupportedEntryShape {
            template: TemplateKind::Library,
            expected: EntryShape::Single,
        }
    ));
}

#[test]
fn library_requires_both_bindings() {
    let no_entry = Bindings::new().output_dir("/out");
    assert!(matches!(
        TemplateKind::Library.instantiate(&no_entry, &modules()),
        Err(ConfigError::MissingBinding {
            placeholder: "__ENTRY_POINT__",
            ..
        })
    ));

    let no_output = Bindings::new().entry_point("./src/index.ts");
    assert!(matches!(
        TemplateKind::Library.instantiate(&no_output, &modules()),
        Err(ConfigError::MissingBinding {
            placeholder: "__OUTPUT_DIR__",
            ..
        })
    ));
}
