//! Configuration file.
//!
//! Loaded from `--config <path>` (or `$DFAMAP_CONFIG`); without one, the
//! built-in defaults apply. Every section and key is optional. Command-line
//! flags override what is loaded here.

use std::path::{Path, PathBuf};

use dfamap_compiler::{CompileOptions, RegexOptions};
use serde::{Deserialize, Serialize};

pub const CONFIG_ENV: &str = "DFAMAP_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub map: MapConfig,

    #[serde(default)]
    pub compile: CompileConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the XDP loader pins the inspection map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_pin_basedir")]
    pub pin_basedir: PathBuf,

    #[serde(default = "default_map_name")]
    pub name: String,
}

/// Automaton source and compiler settings.
///
/// The option structs are flattened, so their keys sit directly under
/// `[compile]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileConfig {
    /// Pattern compiled when none is given on the command line.
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// `anchored`, `minimize`.
    #[serde(flatten)]
    pub regex: RegexOptions,

    /// `max_states`.
    #[serde(flatten)]
    pub limits: CompileOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_pin_basedir() -> PathBuf {
    PathBuf::from("/sys/fs/bpf")
}

fn default_map_name() -> String {
    "ids_inspect_map".to_string()
}

fn default_pattern() -> String {
    "(dog)|(cat)".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            pin_basedir: default_pin_basedir(),
            name: default_map_name(),
        }
    }
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
            regex: RegexOptions::default(),
            limits: CompileOptions::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl MapConfig {
    /// `<pin_basedir>/<ifname>/<name>`.
    pub fn pin_path(&self, ifname: &str) -> PathBuf {
        self.pin_basedir.join(ifname).join(&self.name)
    }
}

impl CompileConfig {
    pub fn regex_options(&self) -> RegexOptions {
        self.regex
    }

    pub fn compile_options(&self) -> CompileOptions {
        self.limits
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Config {
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        match toml::from_str(&contents) {
            Ok(config) => Ok(config),
            Err(source) => Err(ConfigError::Parse { path, source }),
        }
    }

    /// Load from `path`, or fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

/// Report where the configuration came from. Needs the subscriber installed.
pub fn log_source(path: Option<&Path>) {
    match path {
        Some(path) => tracing::info!(path = %path.display(), "loaded config"),
        None => tracing::debug!("no config file, using defaults"),
    }
}
