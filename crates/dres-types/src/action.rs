//! Parsed action call sites.
//!
//! An [`Action`] is one call inside a rule body: a name, an ordered list of
//! arguments, and the local variables the parser prepared for it. Handlers
//! only borrow actions; the kernel owns them for the lifetime of the goal.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Local variables attached to an action, keyed by name without sigil.
pub type Locals = BTreeMap<String, Value>;

/// A single action argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    /// The tagged argument value.
    pub value: Value,
}

impl Argument {
    /// Wrap a value as an argument.
    pub const fn new(value: Value) -> Self {
        Self { value }
    }
}

impl From<Value> for Argument {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

/// A parsed action call site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// The action name as written at the call site.
    pub name: String,
    /// Arguments in call order.
    #[serde(default)]
    pub args: Vec<Argument>,
    /// Local scope pushed by actions that recurse into the resolver.
    #[serde(default)]
    pub locals: Locals,
}

impl Action {
    /// Create an action with no arguments and no locals.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            locals: Locals::new(),
        }
    }

    /// Append an argument.
    #[must_use]
    pub fn with_arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(Argument::new(value.into()));
        self
    }

    /// Bind a local variable (name given without sigil).
    #[must_use]
    pub fn with_local(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.locals.insert(name.into(), value.into());
        self
    }

    /// The first argument, if any.
    pub fn first_arg(&self) -> Option<&Argument> {
        self.args.first()
    }
}
