//! Command execution.

use std::collections::HashSet;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use wpgen_config::{
    Bindings, EntryPoints, ModuleResolutionPath, TemplateKind, WebpackConfig, render_json,
    render_module,
};

use crate::cli::{Cli, Command, ConfigFormat, OutputArgs};
use crate::error::{CliError, Result};
use crate::settings::ProjectSettings;

const STDOUT: &str = "-";

/// Run a parsed command line.
pub fn execute(cli: Cli) -> Result<()> {
    let project_dir = resolve_project_dir(cli.project_dir)?;
    let settings = ProjectSettings::load(&project_dir)?;
    debug!(project = %project_dir.display(), ?settings, "loaded project settings");

    // Read once here; the generator only ever sees the parsed value.
    let modules = ModuleResolutionPath::from_env(&settings.module_path_var)?;

    let (kind, entries, output) = match cli.command {
        Command::Library(args) => (
            TemplateKind::Library,
            EntryPoints::single(args.entry),
            args.output,
        ),
        Command::Dev(args) => {
            check_unique_names(&args.entries)?;
            (TemplateKind::Dev, EntryPoints::named(args.entries), args.output)
        }
    };

    let config = build_config(kind, entries, &output, &project_dir, &settings, &modules)?;
    let rendered = render(&config, output.format)?;

    let destination = output
        .out
        .clone()
        .unwrap_or_else(|| settings.config_file_for(kind).to_path_buf());
    if destination.as_os_str() == STDOUT {
        std::io::stdout().write_all(rendered.as_bytes())?;
        return Ok(());
    }

    let destination = absolutize(&project_dir, &destination);
    write_config(&destination, &rendered)?;
    info!(template = %kind, path = %destination.display(), "wrote webpack configuration");
    Ok(())
}

/// Bind placeholders and generate the configuration for `kind`.
///
/// # Arguments
///
/// * `kind` - Template to instantiate
/// * `entries` - A single path for the library template, named paths for dev
/// * `output` - Output flags; `--output-dir` overrides the settings value
/// * `project_dir` - Base for a relative output directory
/// * `settings` - Loaded project settings
/// * `modules` - Search path already read from the environment
///
/// # Errors
///
/// Returns [`CliError::Config`] when `entries` does not have the shape the
/// template expects.
///
/// # Examples
///
/// ```rust
/// use std::path::Path;
/// use wpgen_cli::cli::{ConfigFormat, OutputArgs};
/// use wpgen_cli::commands::build_config;
/// use wpgen_cli::settings::ProjectSettings;
/// use wpgen_config::{EntryPoints, ModuleResolutionPath, TemplateKind};
///
/// let modules = ModuleResolutionPath::parse("NODE_PATH", Some("/repo/node_modules"))?;
/// let output = OutputArgs { output_dir: None, out: None, format: ConfigFormat::Js };
/// let config = build_config(
///     TemplateKind::Library,
///     EntryPoints::single("./src/index.ts"),
///     &output,
///     Path::new("/proj"),
///     &ProjectSettings::default(),
///     &modules,
/// )?;
/// assert_eq!(config.output.path, Path::new("/proj/build/webpack"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn build_config(
    kind: TemplateKind,
    entries: EntryPoints,
    output: &OutputArgs,
    project_dir: &Path,
    settings: &ProjectSettings,
    modules: &ModuleResolutionPath,
) -> Result<WebpackConfig> {
    let output_dir = output
        .output_dir
        .as_deref()
        .unwrap_or(settings.output_dir.as_path());
    let bindings = Bindings::new()
        .entries(entries)
        .output_dir(absolutize(project_dir, output_dir));
    Ok(kind.instantiate(&bindings, modules)?)
}

pub fn render(config: &WebpackConfig, format: ConfigFormat) -> Result<String> {
    let rendered = match format {
        ConfigFormat::Js => render_module(config)?,
        ConfigFormat::Json => render_json(config)?,
    };
    Ok(rendered)
}

fn check_unique_names(entries: &[(String, PathBuf)]) -> Result<()> {
    let mut seen = HashSet::new();
    for (name, _) in entries {
        if !seen.insert(name.as_str()) {
            return Err(CliError::InvalidArgument(format!(
                "entry name `{name}` is given more than once"
            )));
        }
    }
    Ok(())
}

fn write_config(path: &Path, contents: &str) -> Result<()> {
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
    };
    write().map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn resolve_project_dir(dir: Option<PathBuf>) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match dir {
        Some(dir) => absolutize(&cwd, &dir),
        None => cwd,
    })
}

fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn modules() -> ModuleResolutionPath {
        ModuleResolutionPath::parse("NODE_PATH", Some("/nm")).unwrap()
    }

    fn output_args(output_dir: Option<&str>) -> OutputArgs {
        OutputArgs {
            output_dir: output_dir.map(PathBuf::from),
            out: None,
            format: ConfigFormat::Js,
        }
    }

    #[test]
    fn relative_output_dir_resolves_against_project() {
        let config = build_config(
            TemplateKind::Library,
            EntryPoints::single("./src/index.ts"),
            &output_args(None),
            Path::new("/proj"),
            &ProjectSettings::default(),
            &modules(),
        )
        .unwrap();
        assert_eq!(config.output.path, PathBuf::from("/proj/build/webpack"));
    }

    #[test]
    fn absolute_output_dir_is_kept() {
        let config = build_config(
            TemplateKind::Dev,
            EntryPoints::named([("app", "./src/app.ts")]),
            &output_args(Some("/srv/out")),
            Path::new("/proj"),
            &ProjectSettings::default(),
            &modules(),
        )
        .unwrap();
        assert_eq!(config.output.path, PathBuf::from("/srv/out"));
    }

    #[test]
    fn duplicate_entry_names_are_rejected() {
        let entries = vec![
            ("app".to_string(), PathBuf::from("a.ts")),
            ("app".to_string(), PathBuf::from("b.ts")),
        ];
        assert!(matches!(
            check_unique_names(&entries),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn write_config_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("build/nested/webpack.config.js");
        write_config(&path, "module.exports = {};\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "module.exports = {};\n");
    }

    #[test]
    fn render_honors_format() {
        let config = build_config(
            TemplateKind::Library,
            EntryPoints::single("./src/index.ts"),
            &output_args(Some("/out")),
            Path::new("/proj"),
            &ProjectSettings::default(),
            &modules(),
        )
        .unwrap();
        assert!(render(&config, ConfigFormat::Js).unwrap().contains("module.exports = {"));
        assert!(render(&config, ConfigFormat::Json).unwrap().starts_with('{'));
    }
}
