//! The resolver context.
//!
//! [`Dres`] owns everything a resolver instance needs at dispatch time and
//! implements [`Resolver`] so the builtin layer can reach back into it. A
//! context is single-threaded: one execution flow drives it, and nested
//! `dres` calls re-enter it on that same flow.
//!
//! Dispatch looks an action name up in the registry. Names with no handler
//! are routed to the handler registered under [`DRES_BUILTIN_UNKNOWN`], which
//! in turn consults the fallback slot.

use std::collections::BTreeMap;
use std::io::Write;
use std::rc::Rc;

use dres_builtins::{DRES_BUILTIN_UNKNOWN, Handler, HandlerDescriptor, Resolver};
use dres_types::{
    Action, Argument, DresError, HandlerResult, Locals, Value, VarId, truncate_to_capacity,
};
use tracing::{trace, warn};

use crate::config::{ActionSpec, ArgSpec, ResolverConfig};
use crate::scope::ScopeStack;
use crate::symbols::SymbolTable;

/// Default limit on nested `dres` calls.
pub const DEFAULT_MAX_DEPTH: u32 = 64;

/// Rendering of a [`VarId`] the symbol table does not know.
const INVALID_SYMBOL: &str = "<invalid>";

/// A resolver instance.
pub struct Dres {
    handlers: BTreeMap<String, Handler>,
    fallback: Option<HandlerDescriptor>,
    scopes: ScopeStack,
    symbols: SymbolTable,
    goals: BTreeMap<String, Rc<[Action]>>,
    depth: u32,
    max_depth: u32,
    output: Box<dyn Write>,
}

impl Dres {
    /// An empty resolver writing to the process's standard output.
    pub fn new() -> Self {
        Self::with_output(Box::new(std::io::stdout()))
    }

    /// An empty resolver writing its standard output to `output`.
    pub fn with_output(output: Box<dyn Write>) -> Self {
        Self {
            handlers: BTreeMap::new(),
            fallback: None,
            scopes: ScopeStack::new(),
            symbols: SymbolTable::new(),
            goals: BTreeMap::new(),
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            output,
        }
    }

    /// A resolver loaded with the goals and limits of `config`.
    ///
    /// No handlers are registered; call
    /// [`register_builtins`](dres_builtins::register_builtins) afterwards.
    pub fn from_config(config: &ResolverConfig, output: Box<dyn Write>) -> Self {
        let mut dres = Self::with_output(output);
        dres.max_depth = config.max_depth;
        for (goal, specs) in &config.goals {
            let actions = specs.iter().map(|spec| dres.build_action(spec)).collect();
            dres.add_goal(goal, actions);
        }
        dres
    }

    /// Define (or redefine) `goal` with the given rule body.
    pub fn add_goal(&mut self, goal: &str, actions: Vec<Action>) {
        trace!(goal, actions = actions.len(), "goal defined");
        self.goals.insert(goal.to_owned(), Rc::from(actions));
    }

    /// Whether `goal` is defined.
    pub fn has_goal(&self, goal: &str) -> bool {
        self.goals.contains_key(goal)
    }

    /// Intern a variable name (sigil included).
    pub fn intern(&mut self, name: &str) -> VarId {
        self.symbols.intern(name)
    }

    /// Bind a variable (name without sigil) in the current scope.
    pub fn set_var(&mut self, name: &str, value: Value) {
        self.scopes.set(name, value);
    }

    /// The handler registered under `name`.
    pub fn handler(&self, name: &str) -> Option<Handler> {
        self.handlers.get(name).copied()
    }

    /// Number of scope frames, root included.
    pub fn scope_depth(&self) -> usize {
        self.scopes.depth()
    }

    /// The configured recursion limit.
    pub const fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Change the recursion limit.
    pub const fn set_max_depth(&mut self, max_depth: u32) {
        self.max_depth = max_depth;
    }

    /// Invoke the handler for `name`.
    ///
    /// Unregistered names go to the `unknown` trampoline. `action` may be
    /// `None` to probe for a handler without performing a call.
    ///
    /// # Errors
    ///
    /// Returns whatever the handler returns, or
    /// [`DresError::UnknownAction`] when neither `name` nor the trampoline
    /// is registered.
    pub fn dispatch(&mut self, name: &str, action: Option<&Action>) -> HandlerResult {
        let handler = self
            .handlers
            .get(name)
            .or_else(|| self.handlers.get(DRES_BUILTIN_UNKNOWN))
            .copied();
        match handler {
            Some(handler) => handler(self, name, action),
            None => Err(DresError::UnknownAction {
                name: name.to_owned(),
            }),
        }
    }

    /// Turn a goal-file action into a parsed action, interning variables.
    fn build_action(&mut self, spec: &ActionSpec) -> Action {
        let args = spec
            .args
            .iter()
            .map(|arg| Argument::new(self.build_value(arg)))
            .collect();
        let locals: Locals = spec
            .locals
            .iter()
            .map(|(name, arg)| (name.clone(), self.build_value(arg)))
            .collect();
        Action {
            name: spec.name.clone(),
            args,
            locals,
        }
    }

    fn build_value(&mut self, arg: &ArgSpec) -> Value {
        match arg {
            ArgSpec::Integer(i) => Value::Integer(*i),
            ArgSpec::Double(d) => Value::Double(*d),
            ArgSpec::String(s) => Value::String(s.clone()),
            ArgSpec::DresVar(name) => Value::DresVar(self.symbols.intern(name)),
            ArgSpec::FactVar(name) => Value::FactVar(self.symbols.intern(name)),
        }
    }

    /// Render an argument for an action dump: strings are quoted.
    fn dump_value(&self, value: &Value) -> String {
        match value {
            Value::String(s) => format!("\"{s}\""),
            other => self.print_value(other, dres_types::VALUE_CAPACITY),
        }
    }
}

impl Default for Dres {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Dres {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dres")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .field("fallback", &self.fallback.map(|fallback| fallback.name))
            .field("scopes", &self.scopes.depth())
            .field("goals", &self.goals.keys().collect::<Vec<_>>())
            .field("depth", &self.depth)
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}

impl Resolver for Dres {
    fn register_handler(&mut self, name: &str, handler: Handler) -> Result<(), DresError> {
        if self.handlers.contains_key(name) {
            return Err(DresError::DuplicateHandler {
                name: name.to_owned(),
            });
        }
        self.handlers.insert(name.to_owned(), handler);
        trace!(name, "handler registered");
        Ok(())
    }

    fn set_fallback(&mut self, fallback: HandlerDescriptor) {
        trace!(name = fallback.name, "fallback installed");
        self.fallback = Some(fallback);
    }

    fn fallback(&self) -> Option<HandlerDescriptor> {
        self.fallback
    }

    fn update_goal(&mut self, goal: &str) -> Result<(), DresError> {
        if self.depth > self.max_depth {
            return Err(DresError::RecursionLimit {
                goal: goal.to_owned(),
                depth: self.depth,
            });
        }
        let Some(actions) = self.goals.get(goal).cloned() else {
            return Err(DresError::UnknownGoal {
                goal: goal.to_owned(),
            });
        };

        trace!(goal, depth = self.depth, "updating goal");
        for action in actions.iter() {
            self.dispatch(&action.name, Some(action))?;
        }
        Ok(())
    }

    fn scope_push(&mut self, locals: &Locals) {
        self.scopes.push(locals);
    }

    fn scope_pop(&mut self) {
        self.scopes.pop();
    }

    fn scope_getvar(&self, name: &str) -> Option<&Value> {
        self.scopes.get(name)
    }

    fn name(&self, id: VarId, capacity: usize) -> String {
        let mut text = self
            .symbols
            .resolve(id)
            .unwrap_or(INVALID_SYMBOL)
            .to_owned();
        truncate_to_capacity(&mut text, capacity);
        text
    }

    fn print_value(&self, value: &Value, capacity: usize) -> String {
        let mut text = match value {
            Value::Integer(i) => i.to_string(),
            Value::Double(d) => d.to_string(),
            Value::String(s) => s.clone(),
            Value::DresVar(id) | Value::FactVar(id) => self.name(*id, capacity),
        };
        truncate_to_capacity(&mut text, capacity);
        text
    }

    fn dump_action(&mut self, action: &Action) {
        let args: Vec<String> = action
            .args
            .iter()
            .map(|arg| self.dump_value(&arg.value))
            .collect();
        let mut line = format!("    {}({})", action.name, args.join(", "));
        if !action.locals.is_empty() {
            let locals: Vec<String> = action
                .locals
                .iter()
                .map(|(name, value)| format!("{name}={}", self.dump_value(value)))
                .collect();
            line.push_str(&format!(" [{}]", locals.join(", ")));
        }
        if let Err(err) = writeln!(self.output, "{line}") {
            warn!(%err, "action dump failed");
        }
    }

    fn depth(&self) -> u32 {
        self.depth
    }

    fn set_depth(&mut self, depth: u32) {
        self.depth = depth;
    }

    fn output(&mut self) -> &mut dyn Write {
        &mut *self.output
    }
}
