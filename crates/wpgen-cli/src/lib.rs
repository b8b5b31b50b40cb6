//! Command-line front end for `wpgen-config`.
//!
//! This is the orchestration side of config generation: it layers project
//! settings, reads the module search path from the environment exactly once,
//! binds the template placeholders, and writes the rendered config file.
//!
//! - [`cli`] - argument definitions
//! - [`commands`] - command execution
//! - [`settings`] - project settings (`wpgen.toml` and `WPGEN_*` variables)
//! - [`error`] - error types and diagnostic conversion
//! - [`logger`] - tracing subscriber setup

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod settings;
