//! Type-safe identifier for interned variable symbols.
//!
//! The parser interns every `&local` and `$fact` variable name into the
//! resolver's symbol table. Arguments carry the resulting [`VarId`] instead
//! of the name; the kernel renders it back to text on demand.

use serde::{Deserialize, Serialize};

/// Identifier of an interned variable name (sigil included).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VarId(pub u32);

impl VarId {
    /// Return the inner index.
    pub const fn into_inner(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for VarId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for VarId {
    fn from(index: u32) -> Self {
        Self(index)
    }
}

impl From<VarId> for u32 {
    fn from(id: VarId) -> Self {
        id.0
    }
}
