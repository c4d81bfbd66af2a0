//! Tagged values carried by action arguments and scope variables.
//!
//! Every value has one of five tags. Literals (`Integer`, `Double`,
//! `String`) carry their payload directly; `DresVar` and `FactVar` refer to
//! a variable by its interned [`VarId`].
//!
//! Rendering a value to text always goes through a fixed capacity. Output
//! that does not fit is truncated, never reported as an error.

use serde::{Deserialize, Serialize};

use crate::ids::VarId;

// ---------------------------------------------------------------------------
// Rendering capacities
// ---------------------------------------------------------------------------

/// Capacity used when rendering the goal argument of `dres`/`resolve`.
pub const GOAL_NAME_CAPACITY: usize = 64;

/// Capacity used when rendering a variable name before scope lookup.
pub const VAR_NAME_CAPACITY: usize = 128;

/// Capacity used when rendering a single echoed value.
pub const VALUE_CAPACITY: usize = 1024;

/// Truncate `text` so it fits a buffer of `capacity` units.
///
/// One unit is reserved for the terminator, so at most `capacity - 1` bytes
/// are kept. The cut always lands on a UTF-8 character boundary.
pub fn truncate_to_capacity(text: &mut String, capacity: usize) {
    let max_len = capacity.saturating_sub(1);
    if text.len() <= max_len {
        return;
    }
    let mut cut = max_len;
    while !text.is_char_boundary(cut) {
        cut = cut.saturating_sub(1);
    }
    text.truncate(cut);
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// The tag of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// Signed integer literal.
    Integer,
    /// Floating point literal.
    Double,
    /// String literal.
    String,
    /// Reference to a resolver (local) variable.
    DresVar,
    /// Reference into the fact store.
    FactVar,
}

/// A tagged value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// Signed integer literal.
    Integer(i64),
    /// Floating point literal.
    Double(f64),
    /// String literal.
    String(String),
    /// Reference to a resolver variable by interned name.
    DresVar(VarId),
    /// Reference to a fact store variable by interned name.
    FactVar(VarId),
}

impl Value {
    /// The tag of this value.
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Integer(_) => ValueType::Integer,
            Self::Double(_) => ValueType::Double,
            Self::String(_) => ValueType::String,
            Self::DresVar(_) => ValueType::DresVar,
            Self::FactVar(_) => ValueType::FactVar,
        }
    }

    /// Whether this value is a literal (integer, double or string).
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Double(_) | Self::String(_))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}
