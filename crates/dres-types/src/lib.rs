//! Shared type definitions for the dres resolver.
//!
//! This crate is the single source of truth for the data that flows between
//! the resolver kernel and its action handlers: parsed actions, tagged values,
//! variable identifiers, and the error type every handler returns.
//!
//! # Modules
//!
//! - [`ids`] -- Interned symbol identifiers for resolver and fact variables
//! - [`value`] -- Tagged values and fixed-capacity rendering
//! - [`action`] -- Parsed action call sites, arguments, and local scopes
//! - [`error`] -- Handler error type and errno-like status codes

pub mod action;
pub mod error;
pub mod ids;
pub mod value;

// Re-export all public types at crate root for convenience.
pub use action::{Action, Argument, Locals};
pub use error::{DresError, HandlerResult, errno};
pub use ids::VarId;
pub use value::{
    GOAL_NAME_CAPACITY, VALUE_CAPACITY, VAR_NAME_CAPACITY, Value, ValueType, truncate_to_capacity,
};
