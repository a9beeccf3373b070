//! The runtime value domain and the static types that classify it.

use std::fmt;

/// The static type of an expression or variable.
///
/// The display names are part of the diagnostic text, e.g.
/// `Error: Cannot convert type Int32 to Boolean`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeSymbol {
    Int32,
    Boolean,
}

impl TypeSymbol {
    pub fn name(self) -> &'static str {
        match self {
            TypeSymbol::Int32 => "Int32",
            TypeSymbol::Boolean => "Boolean",
        }
    }
}

impl fmt::Display for TypeSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value produced by evaluation or held by a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Value {
    Int32(i32),
    Boolean(bool),
}

impl Value {
    /// The static type this value inhabits.
    pub fn ty(&self) -> TypeSymbol {
        match self {
            Value::Int32(_) => TypeSymbol::Int32,
            Value::Boolean(_) => TypeSymbol::Boolean,
        }
    }

    pub fn as_int32(self) -> Option<i32> {
        match self {
            Value::Int32(v) => Some(v),
            Value::Boolean(_) => None,
        }
    }

    pub fn as_boolean(self) -> Option<bool> {
        match self {
            Value::Boolean(v) => Some(v),
            Value::Int32(_) => None,
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int32(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int32(v) => write!(f, "{}", v),
            Value::Boolean(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_types() {
        assert_eq!(Value::from(3).ty(), TypeSymbol::Int32);
        assert_eq!(Value::from(true).ty(), TypeSymbol::Boolean);
        assert_eq!(Value::Int32(7).as_int32(), Some(7));
        assert_eq!(Value::Int32(7).as_boolean(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Int32(-4).to_string(), "-4");
        assert_eq!(Value::Boolean(false).to_string(), "false");
        assert_eq!(TypeSymbol::Boolean.to_string(), "Boolean");
    }
}
