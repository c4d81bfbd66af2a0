//! Builtin action handlers for the dres resolver.
//!
//! Every resolver instance understands a small fixed set of actions before
//! any host code is loaded: recursive goal resolution (`dres`, `resolve`),
//! diagnostic output (`echo`), unconditional failure (`fail`), the reserved
//! `shell` stub, and the `unknown` trampoline that hands unrecognised
//! actions to a host-installed fallback.
//!
//! The kernel itself (goal evaluation, scope storage, symbol rendering) is an
//! external collaborator reached through the [`Resolver`] trait.
//!
//! # Modules
//!
//! - [`resolver`] -- The kernel seam ([`Resolver`]) and the handler calling
//!   convention ([`Handler`], [`HandlerDescriptor`]).
//! - [`registry`] -- The builtin table, [`register_builtins`] and
//!   [`set_fallback`].
//! - [`builtins`] -- The handler implementations and [`RecursionFrame`].
//!
//! [`RecursionFrame`]: builtins::RecursionFrame

pub mod builtins;
pub mod registry;
pub mod resolver;

#[cfg(test)]
mod mock;

pub use registry::{
    BUILTINS, DRES_BUILTIN_UNKNOWN, FALLBACK_NAME, UNRESOLVED, register_builtins, set_fallback,
};
pub use resolver::{Handler, HandlerDescriptor, Resolver};
