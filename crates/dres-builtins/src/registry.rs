//! The builtin table and its registration protocol.
//!
//! [`BUILTINS`] is a closed, ordered set fixed at compile time. Registration
//! walks it in order and stops at the first status the kernel rejects. The
//! fallback is wired separately and never takes part in name lookup.

use dres_types::DresError;
use tracing::debug;

use crate::builtins::{
    builtin_dres, builtin_echo, builtin_fail, builtin_resolve, builtin_shell, builtin_unknown,
};
use crate::resolver::{Handler, HandlerDescriptor, Resolver};

/// Reserved name of the unknown-action trampoline.
pub const DRES_BUILTIN_UNKNOWN: &str = "unknown";

/// Name recorded for the host fallback in diagnostics.
pub const FALLBACK_NAME: &str = "fallback";

/// Text printed by `echo` for values it cannot render.
pub const UNRESOLVED: &str = "???";

/// Every builtin, in registration order.
pub const BUILTINS: [HandlerDescriptor; 6] = [
    HandlerDescriptor::new("dres", builtin_dres),
    HandlerDescriptor::new("resolve", builtin_resolve),
    HandlerDescriptor::new("echo", builtin_echo),
    HandlerDescriptor::new("shell", builtin_shell),
    HandlerDescriptor::new("fail", builtin_fail),
    HandlerDescriptor::new(DRES_BUILTIN_UNKNOWN, builtin_unknown),
];

/// Register every builtin with the resolver.
///
/// # Errors
///
/// Returns the first error produced by [`Resolver::register_handler`];
/// builtins after the failing entry are not registered.
pub fn register_builtins(dres: &mut dyn Resolver) -> Result<(), DresError> {
    for builtin in &BUILTINS {
        dres.register_handler(builtin.name, builtin.handler)?;
        debug!(name = builtin.name, "registered builtin handler");
    }
    Ok(())
}

/// Install `handler` as the resolver's fallback for unknown actions.
///
/// Any previously installed fallback is replaced.
pub fn set_fallback(dres: &mut dyn Resolver, handler: Handler) {
    dres.set_fallback(HandlerDescriptor::new(FALLBACK_NAME, handler));
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use dres_types::{Action, DresError, HandlerResult, Value, errno};

    use super::*;
    use crate::mock::MockResolver;

    fn answer(_dres: &mut dyn Resolver, _name: &str, _action: Option<&Action>) -> HandlerResult {
        Ok(Some(Value::Integer(1)))
    }

    fn other_answer(
        _dres: &mut dyn Resolver,
        _name: &str,
        _action: Option<&Action>,
    ) -> HandlerResult {
        Ok(Some(Value::Integer(2)))
    }

    #[test]
    fn table_order_is_fixed() {
        let names: Vec<_> = BUILTINS.iter().map(|b| b.name).collect();
        assert_eq!(
            names,
            vec!["dres", "resolve", "echo", "shell", "fail", "unknown"]
        );
    }

    #[test]
    fn register_installs_every_builtin() {
        let mut dres = MockResolver::new();
        register_builtins(&mut dres).unwrap();

        for name in ["dres", "resolve", "echo", "shell", "fail", "unknown"] {
            assert!(dres.handlers.contains_key(name), "missing builtin {name}");
        }
        assert_eq!(dres.registration_order, vec![
            "dres", "resolve", "echo", "shell", "fail", "unknown"
        ]);
    }

    #[test]
    fn register_stops_at_first_rejection() {
        let mut dres = MockResolver::new();
        dres.handlers.insert(String::from("echo"), answer);

        let err = register_builtins(&mut dres).unwrap_err();
        assert_eq!(
            err,
            DresError::DuplicateHandler {
                name: String::from("echo")
            }
        );
        assert_eq!(err.status(), errno::EEXIST);
        assert!(dres.handlers.contains_key("resolve"));
        assert!(!dres.handlers.contains_key("shell"));
        assert!(!dres.handlers.contains_key("unknown"));
    }

    #[test]
    fn fallback_is_recorded_under_reserved_name() {
        let mut dres = MockResolver::new();
        set_fallback(&mut dres, answer);

        let fallback = dres.fallback.unwrap();
        assert_eq!(fallback.name, FALLBACK_NAME);
        assert!(!dres.handlers.contains_key(FALLBACK_NAME));
    }

    #[test]
    fn second_fallback_replaces_first() {
        let mut dres = MockResolver::new();
        set_fallback(&mut dres, answer);
        set_fallback(&mut dres, other_answer);

        let fallback = dres.fallback.unwrap();
        let result = (fallback.handler)(&mut dres, "foo", None).unwrap();
        assert_eq!(result, Some(Value::Integer(2)));
    }
}
