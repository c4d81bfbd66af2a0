//! Error types shared by the resolver kernel and its action handlers.
//!
//! Handlers return [`HandlerResult`]. A successful call yields an optional
//! owned value; a failed call yields a [`DresError`] whose [`status`]
//! is the errno-like code the resolver propagates to rule-body evaluation.
//!
//! [`status`]: DresError::status

use crate::value::Value;

/// Errno-like status codes used by the resolver.
pub mod errno {
    /// No such goal.
    pub const ENOENT: i32 = 2;
    /// Name already registered.
    pub const EEXIST: i32 = 17;
    /// Misuse or malformed call.
    pub const EINVAL: i32 = 22;
    /// Recursion limit exceeded.
    pub const ELOOP: i32 = 40;
}

/// The outcome of invoking an action handler.
///
/// `Ok(None)` is success with an absent result, `Ok(Some(_))` is success with
/// a freshly owned value. There is no result to read on `Err`.
pub type HandlerResult = Result<Option<Value>, DresError>;

/// Errors surfaced by action handlers and the resolver kernel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DresError {
    /// A builtin was called without an argument it requires.
    #[error("action {action} requires at least one argument")]
    MissingArgument {
        /// Name the action was invoked under.
        action: String,
    },

    /// The `fail` builtin aborted the rule body.
    #[error("action {action} failed")]
    Failed {
        /// Name the action was invoked under.
        action: String,
    },

    /// No handler and no fallback exist for the action.
    #[error("unknown action {name}")]
    UnknownAction {
        /// The unresolved action name.
        name: String,
    },

    /// A handler is already registered under the name.
    #[error("handler already registered: {name}")]
    DuplicateHandler {
        /// The conflicting handler name.
        name: String,
    },

    /// The goal is not defined in the resolver.
    #[error("unknown goal {goal}")]
    UnknownGoal {
        /// The requested goal name.
        goal: String,
    },

    /// Recursive goal evaluation went deeper than the configured limit.
    #[error("recursion limit reached while resolving {goal} (depth {depth})")]
    RecursionLimit {
        /// The goal whose evaluation was refused.
        goal: String,
        /// The recursion depth at the time of the refusal.
        depth: u32,
    },

    /// A host-supplied handler failed with a raw status code.
    #[error("action failed with status {0}")]
    Status(i32),
}

impl DresError {
    /// The errno-like status code for this error.
    pub const fn status(&self) -> i32 {
        match self {
            Self::MissingArgument { .. } | Self::Failed { .. } | Self::UnknownAction { .. } => {
                errno::EINVAL
            }
            Self::DuplicateHandler { .. } => errno::EEXIST,
            Self::UnknownGoal { .. } => errno::ENOENT,
            Self::RecursionLimit { .. } => errno::ELOOP,
            Self::Status(status) => *status,
        }
    }
}
