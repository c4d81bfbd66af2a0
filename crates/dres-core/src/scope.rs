//! LIFO stack of variable scopes.
//!
//! The stack always holds a root scope. Lookups only consult the current
//! (topmost) frame.

use dres_types::{Locals, Value};
use tracing::warn;

/// A stack of variable environments.
#[derive(Debug, Clone)]
pub struct ScopeStack {
    frames: Vec<Locals>,
}

impl ScopeStack {
    /// A stack holding only an empty root scope.
    pub fn new() -> Self {
        Self {
            frames: vec![Locals::new()],
        }
    }

    /// Push a copy of `locals` as the new current scope.
    pub fn push(&mut self, locals: &Locals) {
        self.frames.push(locals.clone());
    }

    /// Pop the current scope.
    ///
    /// Returns `false` and leaves the stack untouched when only the root
    /// scope remains.
    pub fn pop(&mut self) -> bool {
        if self.frames.len() <= 1 {
            warn!("ignoring pop of the root scope");
            return false;
        }
        self.frames.pop().is_some()
    }

    /// Look up `name` (without sigil) in the current scope.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.frames.last().and_then(|frame| frame.get(name))
    }

    /// Bind `name` (without sigil) in the current scope.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name.into(), value);
        }
    }

    /// Number of frames, root included.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_root_scope() {
        let scopes = ScopeStack::new();
        assert_eq!(scopes.depth(), 1);
        assert!(scopes.get("x").is_none());
    }

    #[test]
    fn push_shadows_and_pop_restores() {
        let mut scopes = ScopeStack::new();
        scopes.set("x", Value::Integer(1));

        let mut locals = Locals::new();
        locals.insert(String::from("y"), Value::Integer(2));
        scopes.push(&locals);

        assert_eq!(scopes.depth(), 2);
        assert_eq!(scopes.get("y"), Some(&Value::Integer(2)));
        assert!(scopes.get("x").is_none());

        assert!(scopes.pop());
        assert_eq!(scopes.get("x"), Some(&Value::Integer(1)));
        assert!(scopes.get("y").is_none());
    }

    #[test]
    fn root_scope_is_never_popped() {
        let mut scopes = ScopeStack::new();
        assert!(!scopes.pop());
        assert_eq!(scopes.depth(), 1);
    }

    #[test]
    fn set_binds_in_current_frame_only() {
        let mut scopes = ScopeStack::new();
        scopes.push(&Locals::new());
        scopes.set("z", Value::from("inner"));
        assert!(scopes.pop());
        assert!(scopes.get("z").is_none());
    }
}
