//! Dynamic result values produced by a successful parse.
//!
//! Every symbol contributes zero, one, or many values upward; `Value` is the
//! payload those contributions are made of. It is purely data, created fresh
//! per parse, with no persistent identity.

use im::HashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dynamically shaped parse result: scalar, flat sequence, or nested
/// structure, depending on which combinators produced it.
///
/// Integer and real literals stay distinct (`Int` vs `Float`); character and
/// byte input produce `Char`/`Str` and `Byte`/`Bytes` scalars respectively.
///
/// # Examples
///
/// ```rust
/// use tantu::Value;
/// let n = Value::Int(42);
/// assert_eq!(n.type_name(), "Int");
/// assert_eq!(n.as_int(), Some(42));
/// let nil = Value::default();
/// assert!(nil.is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Char(char),
    Byte(u8),
    Str(String),
    Bytes(Vec<u8>),
    Seq(Vec<Value>),
    Map(HashMap<String, Value>),
}

impl Value {
    /// Returns the type name of the value as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::Char(_) => "Char",
            Value::Byte(_) => "Byte",
            Value::Str(_) => "Str",
            Value::Bytes(_) => "Bytes",
            Value::Seq(_) => "Seq",
            Value::Map(_) => "Map",
        }
    }

    /// Returns true if the value is Null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the contained integer if this is an Int value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the contained float if this is a Float value.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the contained bool if this is a Bool value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the contained string if this is a Str value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the contained sequence if this is a Seq value.
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the contained map if this is a Map value.
    pub fn as_map(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Converts this value into the equivalent `serde_json` value.
    ///
    /// `Char` becomes a one-character string, `Byte` a number, and `Bytes`
    /// an array of numbers; a `Float` that JSON cannot represent (NaN,
    /// infinity) becomes null.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Int(n) => Json::Number((*n).into()),
            Value::Float(n) => serde_json::Number::from_f64(*n)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::Char(c) => Json::String(c.to_string()),
            Value::Byte(b) => Json::Number((*b).into()),
            Value::Str(s) => Json::String(s.clone()),
            Value::Bytes(bytes) => {
                Json::Array(bytes.iter().map(|b| Json::Number((*b).into())).collect())
            }
            Value::Seq(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            Value::Map(map) => {
                let mut obj = serde_json::Map::new();
                let mut keys: Vec<&String> = map.keys().collect();
                keys.sort();
                for key in keys {
                    if let Some(val) = map.get(key) {
                        obj.insert(key.clone(), val.to_json());
                    }
                }
                Json::Object(obj)
            }
        }
    }

    // ------------------------------------------------------------------------
    // Display formatting helpers
    // ------------------------------------------------------------------------

    fn fmt_seq(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "]")
    }

    fn fmt_map(f: &mut fmt::Formatter<'_>, map: &HashMap<String, Value>) -> fmt::Result {
        // Sorted for deterministic output.
        let mut keys: Vec<&String> = map.keys().collect();
        keys.sort();
        write!(f, "{{")?;
        for (i, key) in keys.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}: ", key)?;
            if let Some(val) = map.get(*key) {
                write!(f, "{}", val)?;
            }
        }
        write!(f, "}}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Char(c) => write!(f, "{:?}", c),
            Value::Byte(b) => write!(f, "{}", b),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Bytes(bytes) => {
                write!(f, "b[")?;
                for (i, b) in bytes.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", b)?;
                }
                write!(f, "]")
            }
            Value::Seq(items) => Self::fmt_seq(f, items),
            Value::Map(map) => Self::fmt_map(f, map),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Seq(items)
    }
}
