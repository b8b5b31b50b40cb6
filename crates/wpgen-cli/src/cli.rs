//! Command-line interface definition.
//!
//! - `wpgen library <ENTRY>` - single-bundle library config
//! - `wpgen dev <NAME=PATH>...` - per-entry dev-server config

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// wpgen - generate webpack configuration for library and dev builds
#[derive(Parser, Debug)]
#[command(
    name = "wpgen",
    version,
    about = "Generate webpack configuration for library and dev builds",
    long_about = "Generates a webpack config module from entry points and an output directory.\n\
                  The module search path is read from NODE_PATH (or the variable named by\n\
                  `module_path_var` in wpgen.toml)."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Project directory; wpgen.toml and relative paths resolve against it
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a library config producing a single `bundle.js`
    Library(LibraryArgs),

    /// Generate a dev-server config with one bundle per named entry
    Dev(DevArgs),
}

#[derive(Args, Debug)]
pub struct LibraryArgs {
    /// Entry point of the library
    #[arg(value_name = "ENTRY")]
    pub entry: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct DevArgs {
    /// Named entry points; each name becomes the bundle's library name
    ///
    /// Examples:
    ///   wpgen dev app=./src/app.ts
    ///   wpgen dev app=./src/app.ts admin=./src/admin.ts
    #[arg(required = true, value_name = "NAME=PATH", value_parser = parse_named_entry)]
    pub entries: Vec<(String, PathBuf)>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Directory bundles are emitted into [default: build/webpack]
    #[arg(short = 'd', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Config file to write, or `-` for stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Format of the written config
    #[arg(short, long, value_enum, default_value = "js")]
    pub format: ConfigFormat,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum ConfigFormat {
    /// CommonJS `webpack.config.js` module
    #[value(name = "js")]
    Js,

    /// JSON document, for inspection
    #[value(name = "json")]
    Json,
}

/// Parse a `NAME=PATH` dev entry.
pub fn parse_named_entry(value: &str) -> Result<(String, PathBuf), String> {
    let (name, path) = value
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=PATH, got `{value}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("entry name is empty in `{value}`"));
    }
    if path.is_empty() {
        return Err(format!("entry path is empty in `{value}`"));
    }
    Ok((name.to_string(), PathBuf::from(path)))
}
