//! Scalar values: the leaves of every compared structure.
//!
//! A [`ScalarValue`] is the normalized form a leaf exposes to the engine.
//! Integers widen to 128 bits, floats keep their width so that their
//! representation matches what the user wrote.

use std::fmt;

/// The normalized value of a scalar leaf.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScalarValue<'a> {
    Unit,
    Bool(bool),
    Int(i128),
    UInt(u128),
    F32(f32),
    F64(f64),
    Char(char),
    /// A string value, rendered quoted.
    Str(&'a str),
    /// A bare identifier (e.g. a fieldless enum variant), rendered unquoted.
    Symbol(&'a str),
}

impl ScalarValue<'_> {
    /// Structural equality of two scalars.
    ///
    /// Floats compare with IEEE semantics, so `NaN` is never equal to itself.
    pub fn same(&self, other: &ScalarValue<'_>) -> bool {
        self == other
    }
}

impl fmt::Display for ScalarValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Unit => f.write_str("()"),
            ScalarValue::Bool(b) => write!(f, "{b}"),
            ScalarValue::Int(i) => write!(f, "{i}"),
            ScalarValue::UInt(u) => write!(f, "{u}"),
            ScalarValue::F32(x) => write!(f, "{x:?}"),
            ScalarValue::F64(x) => write!(f, "{x:?}"),
            ScalarValue::Char(c) => write!(f, "{c:?}"),
            ScalarValue::Str(s) => write!(f, "{s:?}"),
            ScalarValue::Symbol(s) => f.write_str(s),
        }
    }
}
