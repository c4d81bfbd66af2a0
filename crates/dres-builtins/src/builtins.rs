//! Builtin handler implementations.
//!
//! All handlers follow the [`Handler`] calling convention. None of them keep
//! state of their own: the fallback slot, the scope stack and the recursion
//! counter live on the resolver.
//!
//! [`Handler`]: crate::resolver::Handler

use dres_types::{
    Action, DresError, GOAL_NAME_CAPACITY, HandlerResult, Locals, VALUE_CAPACITY,
    VAR_NAME_CAPACITY, Value,
};
use tracing::{debug, trace, warn};

use crate::registry::UNRESOLVED;
use crate::resolver::Resolver;

// ---------------------------------------------------------------------------
// Recursion bracketing
// ---------------------------------------------------------------------------

/// A pushed scope plus one level of recursion depth.
///
/// Entering increments the depth counter and pushes the action's locals.
/// Dropping pops the scope and decrements the counter, so both stay balanced
/// on every exit path, including unwinding.
pub struct RecursionFrame<'a> {
    dres: &'a mut dyn Resolver,
}

impl<'a> RecursionFrame<'a> {
    /// Enter a new recursion level with `locals` as the current scope.
    pub fn enter(dres: &'a mut dyn Resolver, locals: &Locals) -> Self {
        let depth = dres.depth().saturating_add(1);
        dres.set_depth(depth);
        dres.scope_push(locals);
        Self { dres }
    }

    /// The resolver, with the frame's scope current.
    pub fn resolver(&mut self) -> &mut dyn Resolver {
        &mut *self.dres
    }
}

impl Drop for RecursionFrame<'_> {
    fn drop(&mut self) {
        self.dres.scope_pop();
        let depth = self.dres.depth().saturating_sub(1);
        self.dres.set_depth(depth);
    }
}

// ---------------------------------------------------------------------------
// dres / resolve
// ---------------------------------------------------------------------------

/// Recursively resolve the goal named by the first argument.
///
/// Additional arguments are ignored. The result is always absent.
pub(crate) fn builtin_dres(
    dres: &mut dyn Resolver,
    name: &str,
    action: Option<&Action>,
) -> HandlerResult {
    let Some((action, first)) = action.and_then(|a| a.first_arg().map(|arg| (a, arg))) else {
        return Err(DresError::MissingArgument {
            action: name.to_owned(),
        });
    };

    let goal = dres.print_value(&first.value, GOAL_NAME_CAPACITY);

    debug!(goal = %goal, depth = dres.depth(), "DRES recursing for goal {goal}");
    let status = {
        let mut frame = RecursionFrame::enter(dres, &action.locals);
        frame.resolver().update_goal(&goal)
    };
    debug!(goal = %goal, depth = dres.depth(), "DRES back from goal {goal}");

    status.map(|()| None)
}

/// Alias of [`builtin_dres`].
pub(crate) fn builtin_resolve(
    dres: &mut dyn Resolver,
    name: &str,
    action: Option<&Action>,
) -> HandlerResult {
    builtin_dres(dres, name, action)
}

// ---------------------------------------------------------------------------
// echo
// ---------------------------------------------------------------------------

/// Render one echo argument, or `None` when it cannot be rendered.
fn render_argument(dres: &dyn Resolver, value: &Value) -> Option<String> {
    if value.is_literal() {
        return Some(dres.print_value(value, VALUE_CAPACITY));
    }
    if let Value::DresVar(id) = value {
        let var = dres.name(*id, VAR_NAME_CAPACITY);
        return dres
            .scope_getvar(strip_sigil(&var))
            .map(|bound| dres.print_value(bound, VALUE_CAPACITY));
    }
    trace!(tag = ?value.value_type(), "argument not readable from echo");
    None
}

/// Drop the leading sigil of a rendered variable name.
fn strip_sigil(var: &str) -> &str {
    let mut chars = var.chars();
    chars.next();
    chars.as_str()
}

/// Print every argument followed by a space, then a newline.
///
/// Unbound variables and fact variables print as `???`. Always succeeds.
pub(crate) fn builtin_echo(
    dres: &mut dyn Resolver,
    _name: &str,
    action: Option<&Action>,
) -> HandlerResult {
    let mut line = String::new();
    for arg in action.map(|a| a.args.as_slice()).unwrap_or_default() {
        match render_argument(&*dres, &arg.value) {
            Some(text) => line.push_str(&text),
            None => line.push_str(UNRESOLVED),
        }
        line.push(' ');
    }
    line.push('\n');

    if let Err(err) = dres.output().write_all(line.as_bytes()) {
        warn!(%err, "echo output failed");
    }
    Ok(None)
}

// ---------------------------------------------------------------------------
// fail / shell / unknown
// ---------------------------------------------------------------------------

/// Abort the current rule body.
pub(crate) fn builtin_fail(
    _dres: &mut dyn Resolver,
    name: &str,
    _action: Option<&Action>,
) -> HandlerResult {
    Err(DresError::Failed {
        action: name.to_owned(),
    })
}

/// Reserved name; never spawns a process. Delegates to [`builtin_unknown`].
pub(crate) fn builtin_shell(
    dres: &mut dyn Resolver,
    name: &str,
    action: Option<&Action>,
) -> HandlerResult {
    builtin_unknown(dres, name, action)
}

/// Hand the call to the host fallback, or diagnose it.
///
/// Without a fallback an absent action is a presence probe and succeeds; a
/// real action is dumped to standard output and rejected.
pub(crate) fn builtin_unknown(
    dres: &mut dyn Resolver,
    name: &str,
    action: Option<&Action>,
) -> HandlerResult {
    if let Some(fallback) = dres.fallback() {
        return (fallback.handler)(dres, name, action);
    }

    let Some(action) = action else {
        return Ok(None);
    };

    debug!(action = name, "unknown action {name}");
    if let Err(err) = writeln!(dres.output(), "*** unknown action {name}") {
        warn!(%err, "unknown action diagnostic failed");
    }
    dres.dump_action(action);

    Err(DresError::UnknownAction {
        name: name.to_owned(),
    })
}
