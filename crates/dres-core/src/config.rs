//! Configuration loading and typed goal definitions for the resolver.
//!
//! A resolver is described by a single YAML document: resolver settings,
//! logging, and the goal table. Each goal is an ordered list of action
//! calls. Variable names in arguments are kept as text here and interned
//! when the document is loaded into a [`Dres`].
//!
//! ```yaml
//! max_depth: 32
//! logging:
//!   level: debug
//! goals:
//!   main:
//!     - name: dres
//!       args:
//!         - string: greet
//!       locals:
//!         who: { string: world }
//!   greet:
//!     - name: echo
//!       args:
//!         - string: hello
//!         - dresvar: "&who"
//! ```
//!
//! [`Dres`]: crate::resolver::Dres

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::resolver::DEFAULT_MAX_DEPTH;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level resolver configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResolverConfig {
    /// Deepest nesting of `dres` calls before goal evaluation is refused.
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Goal table: goal name to its rule body.
    ///
    /// Arguments are written as single-key maps (`- integer: 42`), which
    /// serde_yml only accepts for nested enums through `singleton_map`.
    #[serde(
        default,
        deserialize_with = "serde_yml::with::singleton_map_recursive::deserialize"
    )]
    pub goals: BTreeMap<String, Vec<ActionSpec>>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            logging: LoggingConfig::default(),
            goals: BTreeMap::new(),
        }
    }
}

impl ResolverConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// One action call inside a goal's rule body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActionSpec {
    /// Action name.
    pub name: String,

    /// Arguments in call order.
    #[serde(default)]
    pub args: Vec<ArgSpec>,

    /// Local variables pushed by recursing actions, keyed without sigil.
    #[serde(default)]
    pub locals: BTreeMap<String, ArgSpec>,
}

/// A tagged argument as written in the goal file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgSpec {
    /// Integer literal.
    Integer(i64),
    /// Floating point literal.
    Double(f64),
    /// String literal.
    String(String),
    /// Resolver variable, sigil included (e.g. `&x`).
    DresVar(String),
    /// Fact store variable, sigil included (e.g. `$battery`).
    FactVar(String),
}

fn default_max_depth() -> u32 {
    DEFAULT_MAX_DEPTH
}

fn default_log_level() -> String {
    "info".to_owned()
}
