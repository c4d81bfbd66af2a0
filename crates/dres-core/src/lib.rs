//! Reference resolver kernel for dres.
//!
//! This crate owns the per-instance resolver state the builtin layer talks
//! to: the handler registry, the fallback slot, the scope stack, the symbol
//! table, the goal table and the recursion-depth counter.
//!
//! # Modules
//!
//! - [`config`] -- Goal files and resolver settings loaded from YAML.
//! - [`resolver`] -- The [`Dres`] context and its [`Resolver`] implementation.
//! - [`scope`] -- The LIFO scope stack ([`ScopeStack`]).
//! - [`symbols`] -- Variable name interning ([`SymbolTable`]).
//!
//! [`Resolver`]: dres_builtins::Resolver

pub mod config;
pub mod resolver;
pub mod scope;
pub mod symbols;

pub use config::{ActionSpec, ArgSpec, ConfigError, LoggingConfig, ResolverConfig};
pub use resolver::{DEFAULT_MAX_DEPTH, Dres};
pub use scope::ScopeStack;
pub use symbols::SymbolTable;
