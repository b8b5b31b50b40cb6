//! Webpack configuration generation.
//!
//! Builds the configuration object for one of two templates: a library build
//! producing a single `bundle.js`, or a dev build producing one bundle per named
//! entry with the full loader chain and a local static file server.
//!
//! ```
//! use wpgen_config::{Bindings, EntryPoints, ModuleResolutionPath, TemplateKind};
//!
//! let modules = ModuleResolutionPath::parse("NODE_PATH", Some("/repo/node_modules")).unwrap();
//! let bindings = Bindings::new()
//!     .entries(EntryPoints::named([("app", "./src/app.ts")]))
//!     .output_dir("/build");
//!
//! let config = TemplateKind::Dev.instantiate(&bindings, &modules).unwrap();
//! assert_eq!(config.module.len(), 4);
//! assert_eq!(config.dev_server.port, 8089);
//! ```

pub mod entry;
pub mod error;
pub mod generator;
pub mod model;
pub mod render;
pub mod resolution;
pub mod template;

pub use entry::{EntryPoints, EntryShape};
pub use error::{ConfigError, Result};
pub use generator::{
    DevMode, FONT_OUTPUT_PATH, LIBRARY_FILENAME, LIBRARY_NAME, LibraryMode, Mode, generate,
};
pub use model::*;
pub use render::{render_json, render_module};
pub use resolution::{MODULE_PATH_VAR, ModuleResolutionPath, RESOLVE_EXTENSIONS};
pub use template::{Bindings, Placeholder, TemplateKind};
