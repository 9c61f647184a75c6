//! Configuration management for the XLIFF validator.
//!
//! Handles:
//! - Command-line argument parsing
//! - Project and user TOML config files
//! - Locating the master schema

use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ValidateError;
use crate::schema::SchemaLocation;

/// Project config file name, looked up in the invocation directory.
pub const PROJECT_CONFIG_FILE: &str = ".xliff-validate.toml";

/// Command-line arguments for the XLIFF validator
#[derive(Debug, Parser)]
#[command(name = "xliff-validate")]
#[command(about = "Validate an XLIFF 2.2 file against OASIS schemas.")]
#[command(version)]
pub struct Args {
    /// Path to the .xlf or .xliff file to validate
    pub file: PathBuf,

    /// Master schema to validate against
    #[arg(long, help = "Master XSD to use instead of the bundled XLIFF 2.2 core schema")]
    pub schema: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, help = "Output format [default: text]")]
    pub format: Option<OutputFormat>,

    /// Log level for diagnostics on stderr
    #[arg(
        long,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Contents of a project or user config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub schema: Option<PathBuf>,
    pub format: Option<OutputFormat>,
}

/// Where the schema path came from, for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    Cli,
    Project(PathBuf),
    User(PathBuf),
    Bundled,
}

/// Places to look for config files and the bundled schema.
#[derive(Debug, Clone)]
pub struct ConfigSources {
    pub project_dir: Option<PathBuf>,
    pub user_config_dir: Option<PathBuf>,
    pub bundle_dirs: Vec<PathBuf>,
}

impl ConfigSources {
    /// The invocation directory, the platform config dir, and the bundle
    /// next to the executable with the crate directory as fallback.
    pub fn from_env() -> Self {
        let mut bundle_dirs = Vec::new();
        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            bundle_dirs.push(exe_dir);
        }
        bundle_dirs.push(PathBuf::from(env!("CARGO_MANIFEST_DIR")));

        Self {
            project_dir: std::env::current_dir().ok(),
            user_config_dir: dirs::config_dir().map(|dir| dir.join("xliff-validate")),
            bundle_dirs,
        }
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Document under test
    pub file: PathBuf,
    /// Master schema path, not yet checked for existence
    pub schema: PathBuf,
    pub schema_source: SchemaSource,
    pub format: OutputFormat,
}

impl Config {
    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args, sources: &ConfigSources) -> Result<Self, ValidateError> {
        let project = match &sources.project_dir {
            Some(dir) => load_config_file(&dir.join(PROJECT_CONFIG_FILE))?,
            None => None,
        };
        let user = match &sources.user_config_dir {
            Some(dir) => load_config_file(&dir.join("config.toml"))?,
            None => None,
        };

        let (schema, schema_source) = if let Some(schema) = args.schema {
            (schema, SchemaSource::Cli)
        } else if let Some((path, schema)) = schema_from(&project) {
            (schema, SchemaSource::Project(path))
        } else if let Some((path, schema)) = schema_from(&user) {
            (schema, SchemaSource::User(path))
        } else {
            (bundled_schema(&sources.bundle_dirs), SchemaSource::Bundled)
        };

        let format = args
            .format
            .or_else(|| project.as_ref().and_then(|(_, c)| c.format))
            .or_else(|| user.as_ref().and_then(|(_, c)| c.format))
            .unwrap_or_default();

        log::debug!("using schema {} ({:?})", schema.display(), schema_source);

        Ok(Config {
            file: args.file,
            schema,
            schema_source,
            format,
        })
    }
}

/// Read a config file; `Ok(None)` when it does not exist.
fn load_config_file(path: &Path) -> Result<Option<(PathBuf, ConfigFile)>, ValidateError> {
    if !path.is_file() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|e| ValidateError::io(path, e))?;
    let parsed: ConfigFile = toml::from_str(&content).map_err(|e| ValidateError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    log::debug!("loaded config {}", path.display());
    Ok(Some((path.to_path_buf(), parsed)))
}

/// Schema path from a loaded config, relative paths anchored at the file.
fn schema_from(loaded: &Option<(PathBuf, ConfigFile)>) -> Option<(PathBuf, PathBuf)> {
    let (path, config) = loaded.as_ref()?;
    let schema = config.schema.as_ref()?;
    let anchored = match path.parent() {
        Some(dir) if schema.is_relative() => dir.join(schema),
        _ => schema.clone(),
    };
    Some((path.clone(), anchored))
}

/// First bundle that actually holds the master schema, else the first candidate.
fn bundled_schema(bundle_dirs: &[PathBuf]) -> PathBuf {
    let candidates: Vec<PathBuf> = bundle_dirs.iter().map(SchemaLocation::bundled_in).collect();
    match candidates.iter().find(|path| path.is_file()) {
        Some(found) => found.clone(),
        None => {
            log::warn!("no bundled schema found in {:?}", bundle_dirs);
            candidates
                .into_iter()
                .next()
                .unwrap_or_else(|| SchemaLocation::bundled_in("."))
        }
    }
}
