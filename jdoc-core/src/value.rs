//! JSON value model with strict syntactic typing.
//!
//! A [`Value`] is a closed sum over the seven JSON shapes. Integers and
//! doubles are distinct variants - a number keeps the representation its
//! literal had, and the two never compare equal. Objects are backed by a
//! `BTreeMap` so member iteration is always in ascending key order,
//! independent of insertion order; the printer relies on this.

use std::collections::BTreeMap;

use thiserror::Error;

/// Ordered sequence of values.
pub type Array = Vec<Value>;

/// Key-to-value mapping with unique keys, iterated in ascending key order.
pub type Object = BTreeMap<String, Value>;

/// Absolute tolerance used when comparing two pure doubles, to absorb
/// formatting round-off across print/parse cycles.
const DOUBLE_EQ_TOLERANCE: f64 = 1e-9;

/// Error returned by a typed accessor used against the wrong variant.
///
/// This is a contract violation in the calling code, not a recoverable
/// condition: the operation that triggered it fails outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("type mismatch: expected {expected}, found {actual}")]
pub struct TypeMismatch {
    pub expected: &'static str,
    pub actual: &'static str,
}

/// One JSON datum.
///
/// Exactly one variant is active at a time; a value's payload is fixed at
/// construction and only replaced wholesale.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// JSON `null` literal.
    #[default]
    Null,
    /// Number written without fraction or exponent: `42`, `-7`.
    Int(i64),
    /// Number written with a fraction or exponent: `3.14`, `5e0`.
    Double(f64),
    /// `true` or `false`.
    Bool(bool),
    /// Owned text.
    String(String),
    /// Ordered sequence.
    Array(Array),
    /// Mapping with unique keys in ascending order.
    Object(Object),
}

impl Value {
    /// Check if this is null.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this is a boolean.
    #[inline]
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Check if this is an integer.
    #[inline]
    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    /// Check if this is a double that came from a non-integral literal.
    #[inline]
    pub fn is_pure_double(&self) -> bool {
        matches!(self, Value::Double(_))
    }

    /// Check if this is numeric: an integer or a pure double.
    #[inline]
    pub fn is_double(&self) -> bool {
        self.is_int() || self.is_pure_double()
    }

    /// Check if this is a string.
    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Check if this is an array.
    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Check if this is an object.
    #[inline]
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Get the integer payload.
    pub fn as_int(&self) -> Result<i64, TypeMismatch> {
        match self {
            Value::Int(n) => Ok(*n),
            other => Err(other.mismatch("int")),
        }
    }

    /// Get the boolean payload.
    pub fn as_bool(&self) -> Result<bool, TypeMismatch> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(other.mismatch("bool")),
        }
    }

    /// Get the numeric payload as floating point.
    ///
    /// The one widening accessor: an `Int` is accepted and converted.
    pub fn as_double(&self) -> Result<f64, TypeMismatch> {
        match self {
            Value::Double(d) => Ok(*d),
            Value::Int(n) => Ok(*n as f64),
            other => Err(other.mismatch("double")),
        }
    }

    /// Get the string payload.
    pub fn as_str(&self) -> Result<&str, TypeMismatch> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(other.mismatch("string")),
        }
    }

    /// Get the array payload.
    pub fn as_array(&self) -> Result<&Array, TypeMismatch> {
        match self {
            Value::Array(a) => Ok(a),
            other => Err(other.mismatch("array")),
        }
    }

    /// Get the object payload.
    pub fn as_object(&self) -> Result<&Object, TypeMismatch> {
        match self {
            Value::Object(o) => Ok(o),
            other => Err(other.mismatch("object")),
        }
    }

    /// Look up an object member by key. `None` for non-objects.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Look up an array element by index. `None` for non-arrays.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(arr) => arr.get(index),
            _ => None,
        }
    }

    /// The active variant's name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) => "int",
            Value::Double(_) => "double",
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    fn mismatch(&self, expected: &'static str) -> TypeMismatch {
        TypeMismatch {
            expected,
            actual: self.type_name(),
        }
    }
}

/// Structural equality with strict tags.
///
/// Pure doubles compare with an absolute tolerance of 1e-9; every other
/// variant compares payload-exact. `Int` and `Double` are never equal to
/// each other even when numerically identical - only [`Value::as_double`]
/// bridges the two.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => (a - b).abs() <= DOUBLE_EQ_TOLERANCE,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Value::Array(a)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(o)
    }
}
