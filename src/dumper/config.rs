//! Dump settings from files and the environment
//!
//! Every key has a value in `defaults/graph-dump.default.toml`, which is
//! compiled in, so a [`DumpConfig`] always deserializes. Patterns stay
//! strings until [`DumpConfig::to_options`] compiles them; `sink.level` picks
//! the level of the [`LogSink`] that `gdump --log` writes through.

use super::error::{DumpError, Result};
use super::options::{compile, DumpOptions};
use super::sink::LogSink;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, ValueKind};
use log::debug;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/graph-dump.default.toml");

const ENV_PREFIX: &str = "GRAPH_DUMP";
const LIST_KEYS: [&str; 3] = ["fields.include", "fields.exclude", "opaque_types"];

#[derive(Debug, Clone, Deserialize)]
pub struct DumpConfig {
    pub no_fields: bool,
    #[serde(default)]
    pub max_depth: Option<usize>,
    pub opaque_types: Vec<String>,
    pub fields: FieldsConfig,
    pub sink: SinkConfig,
}

/// Field-name patterns applied to composite fields.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldsConfig {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SinkConfig {
    pub level: SinkLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SinkLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl SinkConfig {
    /// A log sink forwarding at the configured level.
    pub fn log_sink(&self) -> LogSink {
        LogSink::new(self.level.into())
    }
}

impl From<SinkLevel> for log::Level {
    fn from(level: SinkLevel) -> Self {
        match level {
            SinkLevel::Error => log::Level::Error,
            SinkLevel::Warn => log::Level::Warn,
            SinkLevel::Info => log::Level::Info,
            SinkLevel::Debug => log::Level::Debug,
            SinkLevel::Trace => log::Level::Trace,
        }
    }
}

impl DumpConfig {
    /// Compile the configured patterns into dump options.
    pub fn to_options(&self) -> Result<DumpOptions> {
        let mut options = DumpOptions {
            no_fields: self.no_fields,
            max_depth: self.max_depth,
            ..DumpOptions::default()
        };
        for pattern in &self.fields.include {
            options.field_filter.include.push(compile(pattern)?);
        }
        for pattern in &self.fields.exclude {
            options.field_filter.exclude.push(compile(pattern)?);
        }
        for pattern in &self.opaque_types {
            options.opaque_types.push(compile(pattern)?);
        }
        Ok(options)
    }
}

impl TryFrom<&DumpConfig> for DumpOptions {
    type Error = DumpError;

    fn try_from(config: &DumpConfig) -> Result<Self> {
        config.to_options()
    }
}

/// Builds a [`DumpConfig`] from layered sources. Later layers override
/// earlier ones, and the embedded defaults always sit at the bottom.
///
/// ```rust
/// let options = Loader::new()
///     .with_optional_file("graph-dump.toml")
///     .with_env()
///     .build()?
///     .to_options()?;
/// ```
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        Loader {
            builder: Config::builder()
                .add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml)),
        }
    }

    /// A TOML file that must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.toml_file(path.as_ref(), true)
    }

    /// A TOML file that is skipped when missing.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.toml_file(path.as_ref(), false)
    }

    fn toml_file(mut self, path: &Path, required: bool) -> Self {
        debug!("config layer: {} (required: {required})", path.display());
        let file = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(file);
        self
    }

    /// `GRAPH_DUMP_*` variables of this process.
    pub fn with_env(mut self) -> Self {
        self.builder = self.builder.add_source(environment());
        self
    }

    /// `GRAPH_DUMP_*` variables taken from `vars`.
    pub fn with_env_source(mut self, vars: config::Map<String, String>) -> Self {
        self.builder = self.builder.add_source(environment().source(Some(vars)));
        self
    }

    /// Pin one key, above every other layer. `gdump` maps its flags here.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<DumpConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Loader::new()
    }
}

/// `GRAPH_DUMP_NO_FIELDS`, `GRAPH_DUMP_FIELDS__EXCLUDE=a,b`, ...
fn environment() -> Environment {
    LIST_KEYS.iter().fold(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .try_parsing(true),
        |env, key| env.with_list_parse_key(key),
    )
}

/// The embedded defaults alone.
pub fn load_defaults() -> Result<DumpConfig, ConfigError> {
    Loader::new().build()
}
