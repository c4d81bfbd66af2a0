//! Resolver host entry point.
//!
//! The runner loads a YAML goal file, registers the builtin actions, and
//! resolves a single goal. Anything the goal prints through `echo` goes to
//! standard output; diagnostics go through `tracing`.
//!
//! # Architecture
//!
//! ```text
//! env --> RunnerConfig --> goal file (YAML) --> Dres + builtins --> update_goal
//! ```
//!
//! The process exits with 0 when the goal resolves, otherwise with the
//! goal's errno-like status.

mod config;
mod error;

use std::path::Path;
use std::process::ExitCode;

use dres_builtins::{Resolver, register_builtins, set_fallback};
use dres_core::{Dres, ResolverConfig};
use dres_types::{Action, HandlerResult};
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt, reload};

use crate::config::RunnerConfig;
use crate::error::RunnerError;

/// Log level used until the goal file has been read.
const DEFAULT_LOG_LEVEL: &str = "info";

/// Fallback installed in lenient mode: unknown actions become no-ops.
fn lenient_fallback(
    _dres: &mut dyn Resolver,
    name: &str,
    action: Option<&Action>,
) -> HandlerResult {
    if action.is_some() {
        warn!(action = name, "ignoring unknown action");
    }
    Ok(None)
}

/// Map a goal status to a process exit status in `1..=255`.
fn exit_status(status: i32) -> u8 {
    u8::try_from(status)
        .ok()
        .filter(|code| *code != 0)
        .unwrap_or(1)
}

/// Read and parse the goal file, logging any failure.
fn load_goal_file(path: &Path) -> Result<ResolverConfig, RunnerError> {
    ResolverConfig::from_file(path)
        .map_err(RunnerError::from)
        .inspect_err(|err| error!(path = %path.display(), %err, "failed to load goal file"))
}

/// Application entry point.
///
/// Installs logging first, then loads configuration from the environment
/// and the goal file and resolves the configured goal once.
///
/// # Errors
///
/// Returns an error if configuration, the goal file, or builtin
/// registration fails. Goal failures are reported through the exit code.
fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Initialize structured logging; RUST_LOG wins over the goal file.
    let env_filter = EnvFilter::try_from_default_env().ok();
    let filter_from_env = env_filter.is_some();
    let (filter, filter_handle) =
        reload::Layer::new(env_filter.unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL)));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();

    let config =
        RunnerConfig::from_env().inspect_err(|err| error!(%err, "invalid runner environment"))?;
    let resolver_config = load_goal_file(&config.config_path)?;

    if !filter_from_env {
        let level = EnvFilter::new(&resolver_config.logging.level);
        if let Err(err) = filter_handle.reload(level) {
            warn!(%err, "could not apply goal file log level");
        }
    }

    info!(
        config_path = %config.config_path.display(),
        goal = config.goal,
        lenient = config.lenient,
        goals = resolver_config.goals.len(),
        max_depth = resolver_config.max_depth,
        "dres-runner starting"
    );

    let mut dres = Dres::from_config(&resolver_config, Box::new(std::io::stdout()));
    register_builtins(&mut dres).map_err(RunnerError::Registration)?;
    if config.lenient {
        set_fallback(&mut dres, lenient_fallback);
    }

    if !dres.has_goal(&config.goal) {
        error!(goal = config.goal, "goal is not defined in the goal file");
        return Err(RunnerError::MissingGoal(config.goal).into());
    }

    match dres.update_goal(&config.goal) {
        Ok(()) => {
            info!(goal = config.goal, "goal resolved");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!(goal = config.goal, status = err.status(), %err, "goal failed");
            Ok(ExitCode::from(exit_status(err.status())))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use dres_types::Value;

    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn goal_file_failure_is_logged() {
        let logs = SharedBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let result = tracing::subscriber::with_default(subscriber, || {
            load_goal_file(Path::new("/nonexistent/dres.yaml"))
        });

        assert!(matches!(result, Err(RunnerError::GoalFile(_))));
        let logs = String::from_utf8_lossy(&logs.0.lock().unwrap()).into_owned();
        assert!(logs.contains("failed to load goal file"));
        assert!(logs.contains("/nonexistent/dres.yaml"));
    }

    #[test]
    fn exit_status_uses_status_when_it_fits() {
        assert_eq!(exit_status(22), 22);
        assert_eq!(exit_status(0), 1);
        assert_eq!(exit_status(-1), 1);
        assert_eq!(exit_status(1000), 1);
    }

    #[test]
    fn lenient_mode_turns_unknown_actions_into_no_ops() {
        let mut dres = Dres::with_output(Box::new(std::io::sink()));
        register_builtins(&mut dres).unwrap();
        set_fallback(&mut dres, lenient_fallback);
        dres.add_goal(
            "main",
            vec![
                Action::new("notify").with_arg(Value::from("battery low")),
                Action::new("shell").with_arg("reboot"),
            ],
        );

        assert_eq!(dres.update_goal("main"), Ok(()));
    }

    #[test]
    fn strict_mode_fails_on_unknown_actions() {
        let mut dres = Dres::with_output(Box::new(std::io::sink()));
        register_builtins(&mut dres).unwrap();
        dres.add_goal("main", vec![Action::new("notify")]);

        let err = dres.update_goal("main").unwrap_err();
        assert_eq!(exit_status(err.status()), 22);
    }
}
