//! The resolver kernel seam and the handler calling convention.
//!
//! Builtins never see the kernel's concrete type. Everything they need --
//! registration, goal evaluation, scopes, symbol and value rendering, the
//! recursion counter, and standard output -- is reached through
//! [`Resolver`], which is object safe so that handlers can be plain
//! function pointers over `&mut dyn Resolver`.

use std::io::Write;

use dres_types::{Action, DresError, HandlerResult, Locals, Value, VarId};

/// An action handler.
///
/// Receives the resolver, the action name as presented at the call site, and
/// the parsed action. `action` is `None` when the resolver probes for a
/// handler without dispatching a real call. The name is passed separately so
/// one implementation can serve several names.
pub type Handler = fn(&mut dyn Resolver, &str, Option<&Action>) -> HandlerResult;

/// A handler bound to the name it is registered under.
#[derive(Debug, Clone, Copy)]
pub struct HandlerDescriptor {
    /// The registered name.
    pub name: &'static str,
    /// The handler function.
    pub handler: Handler,
}

impl HandlerDescriptor {
    /// Bind `handler` to `name`.
    pub const fn new(name: &'static str, handler: Handler) -> Self {
        Self { name, handler }
    }
}

/// Services the builtin layer consumes from the resolver kernel.
///
/// A resolver context is owned by one execution flow at a time. Handlers run
/// to completion; `dres` re-enters the kernel through [`update_goal`] on the
/// same flow.
///
/// [`update_goal`]: Resolver::update_goal
pub trait Resolver {
    /// Associate `name` with `handler` in the kernel's registry.
    ///
    /// The duplicate-name policy belongs to the kernel.
    fn register_handler(&mut self, name: &str, handler: Handler) -> Result<(), DresError>;

    /// Install `fallback` in the single fallback slot, replacing any
    /// previous one.
    fn set_fallback(&mut self, fallback: HandlerDescriptor);

    /// The installed fallback, if any.
    fn fallback(&self) -> Option<HandlerDescriptor>;

    /// Evaluate the named goal under the current scope stack.
    fn update_goal(&mut self, goal: &str) -> Result<(), DresError>;

    /// Push a new scope built from `locals` and make it current.
    fn scope_push(&mut self, locals: &Locals);

    /// Pop the current scope, restoring the previous one.
    fn scope_pop(&mut self);

    /// Look up a variable by sigil-stripped name in the current scope.
    fn scope_getvar(&self, name: &str) -> Option<&Value>;

    /// Render an interned symbol, sigil included, truncated to `capacity`.
    fn name(&self, id: VarId, capacity: usize) -> String;

    /// Render a value as text, truncated to `capacity`.
    fn print_value(&self, value: &Value, capacity: usize) -> String;

    /// Write a human-readable dump of `action` to standard output.
    fn dump_action(&mut self, action: &Action);

    /// Current recursion depth of nested `dres` calls.
    fn depth(&self) -> u32;

    /// Overwrite the recursion depth counter.
    fn set_depth(&mut self, depth: u32);

    /// The resolver's standard output.
    fn output(&mut self) -> &mut dyn Write;
}
