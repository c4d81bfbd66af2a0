//! Configuration types for the runner.
//!
//! All configuration is loaded from environment variables. The goal file
//! itself (goals, recursion limit, log level) is YAML and is parsed by
//! `dres-core`.

use std::path::PathBuf;

use crate::error::RunnerError;

/// Goal resolved when `DRES_GOAL` is not set.
const DEFAULT_GOAL: &str = "main";

/// Complete runner configuration loaded from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Path to the YAML goal file.
    pub config_path: PathBuf,
    /// Goal to resolve.
    pub goal: String,
    /// When true, unknown actions are logged and treated as successful
    /// instead of failing the goal.
    pub lenient: bool,
}

impl RunnerConfig {
    /// Load configuration from environment variables.
    ///
    /// Required variables:
    /// - `DRES_CONFIG` -- path to the YAML goal file
    ///
    /// Optional variables:
    /// - `DRES_GOAL` -- goal to resolve (default `main`)
    /// - `DRES_LENIENT` -- install a permissive fallback (default `false`)
    pub fn from_env() -> Result<Self, RunnerError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RunnerError> {
        let config_path = lookup("DRES_CONFIG")
            .map(PathBuf::from)
            .ok_or_else(|| RunnerError::Config("missing required env var DRES_CONFIG".to_owned()))?;

        let goal = lookup("DRES_GOAL").unwrap_or_else(|| DEFAULT_GOAL.to_owned());

        let lenient: bool = lookup("DRES_LENIENT")
            .unwrap_or_else(|| "false".to_owned())
            .parse()
            .map_err(|e| RunnerError::Config(format!("invalid DRES_LENIENT: {e}")))?;

        Ok(Self {
            config_path,
            goal,
            lenient,
        })
    }
}
