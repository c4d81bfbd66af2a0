//! Variable name interning.

use std::collections::HashMap;

use dres_types::VarId;

/// Maps variable names (sigil included) to [`VarId`]s and back.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    names: Vec<String>,
    index: HashMap<String, VarId>,
}

impl SymbolTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id of `name`, interning it on first use.
    pub fn intern(&mut self, name: &str) -> VarId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = VarId(u32::try_from(self.names.len()).unwrap_or(u32::MAX));
        self.names.push(name.to_owned());
        self.index.insert(name.to_owned(), id);
        id
    }

    /// The name interned under `id`.
    pub fn resolve(&self, id: VarId) -> Option<&str> {
        let index = usize::try_from(id.into_inner()).ok()?;
        self.names.get(index).map(String::as_str)
    }

    /// Number of interned names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no names are interned.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
