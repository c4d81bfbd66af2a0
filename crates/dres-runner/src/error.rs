//! Error types for the runner.
//!
//! Uses `thiserror` for typed errors that surface while starting up:
//! environment configuration, goal file loading, builtin registration.

use dres_core::ConfigError;
use dres_types::DresError;

/// Errors that can occur before the requested goal is evaluated.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Environment configuration is invalid or missing.
    #[error("config error: {0}")]
    Config(String),

    /// The goal file could not be read or parsed.
    #[error("goal file error: {0}")]
    GoalFile(#[from] ConfigError),

    /// The kernel refused a builtin during registration.
    #[error("builtin registration failed: {0}")]
    Registration(#[source] DresError),

    /// The requested goal is not defined in the goal file.
    #[error("goal {0} is not defined")]
    MissingGoal(String),
}
