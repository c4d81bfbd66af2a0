//! In-memory [`Resolver`] used by the unit tests of this crate.
//!
//! Goals succeed unless listed in `failing_goals`. Every `update_goal` call
//! records the goal name and the scope state it observed.

use std::collections::BTreeMap;
use std::io::Write;

use dres_types::{Action, DresError, Locals, Value, VarId, truncate_to_capacity};

use crate::resolver::{Handler, HandlerDescriptor, Resolver};

/// Recording resolver double.
#[derive(Debug, Default)]
pub struct MockResolver {
    pub handlers: BTreeMap<String, Handler>,
    pub registration_order: Vec<String>,
    pub fallback: Option<HandlerDescriptor>,
    pub scopes: Vec<Locals>,
    pub depth: u32,
    pub max_depth_seen: u32,
    pub symbols: Vec<String>,
    pub failing_goals: BTreeMap<String, DresError>,
    pub goals_requested: Vec<String>,
    pub scope_depth_during_goal: Vec<usize>,
    pub scope_during_goal: Vec<Locals>,
    pub dumped: usize,
    pub out: Vec<u8>,
}

impl MockResolver {
    /// A resolver with a single root scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![Locals::new()],
            ..Self::default()
        }
    }

    /// Intern a variable name and return its id.
    pub fn intern(&mut self, name: &str) -> VarId {
        let index = u32::try_from(self.symbols.len()).unwrap_or(u32::MAX);
        self.symbols.push(name.to_owned());
        VarId(index)
    }

    /// Bind a variable in the current scope.
    pub fn bind(&mut self, name: &str, value: Value) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_owned(), value);
        }
    }

    /// Everything written to standard output so far.
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.out).into_owned()
    }
}

impl Resolver for MockResolver {
    fn register_handler(&mut self, name: &str, handler: Handler) -> Result<(), DresError> {
        if self.handlers.contains_key(name) {
            return Err(DresError::DuplicateHandler {
                name: name.to_owned(),
            });
        }
        self.handlers.insert(name.to_owned(), handler);
        self.registration_order.push(name.to_owned());
        Ok(())
    }

    fn set_fallback(&mut self, fallback: HandlerDescriptor) {
        self.fallback = Some(fallback);
    }

    fn fallback(&self) -> Option<HandlerDescriptor> {
        self.fallback
    }

    fn update_goal(&mut self, goal: &str) -> Result<(), DresError> {
        self.goals_requested.push(goal.to_owned());
        self.scope_depth_during_goal.push(self.scopes.len());
        self.scope_during_goal
            .push(self.scopes.last().cloned().unwrap_or_default());
        self.max_depth_seen = self.max_depth_seen.max(self.depth);
        match self.failing_goals.get(goal) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn scope_push(&mut self, locals: &Locals) {
        self.scopes.push(locals.clone());
    }

    fn scope_pop(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    fn scope_getvar(&self, name: &str) -> Option<&Value> {
        self.scopes.last().and_then(|scope| scope.get(name))
    }

    fn name(&self, id: VarId, capacity: usize) -> String {
        let index = usize::try_from(id.into_inner()).unwrap_or(usize::MAX);
        let mut text = self
            .symbols
            .get(index)
            .cloned()
            .unwrap_or_else(|| String::from("<invalid>"));
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
        self.dumped = self.dumped.saturating_add(1);
        let _ = writeln!(self.out, "    {}(...)", action.name);
    }

    fn depth(&self) -> u32 {
        self.depth
    }

    fn set_depth(&mut self, depth: u32) {
        self.depth = depth;
    }

    fn output(&mut self) -> &mut dyn Write {
        &mut self.out
    }
}
