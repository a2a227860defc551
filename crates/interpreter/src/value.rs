use crate::environment::Environment;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use syntax::ast::{Block, Identifier};

/// A runtime value. `ReturnValue` and `Error` are ordinary variants: they
/// travel through evaluation like any other value and double as the unwind
/// and failure sentinels, so the evaluator never needs a side channel.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Integer(i64),
    Boolean(bool),
    String(String),
    ReturnValue(Box<Value>),
    Error(String),
    Function(Rc<Function>),
    Builtin(Builtin),
    Array(Rc<Vec<Value>>),
    Hash(Rc<HashMap<HashKey, HashPair>>),
}

/// A user function: its parameter list, body, and the environment it closed
/// over at definition time.
pub struct Function {
    pub parameters: Vec<Identifier>,
    pub body: Block,
    pub env: Rc<RefCell<Environment>>,
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The captured environment may contain this very function; leave it
        // out rather than recurse.
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

/// A native function exposed to programs by name.
#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: fn(&[Value]) -> Value,
}

/// The key a hashable value reduces to: its type tag plus a 64-bit payload.
/// Keeping the tag separates `1`, `true`, and `"1"` into distinct keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    pub tag: &'static str,
    pub payload: u64,
}

/// A hash entry retains the original key value alongside the mapped value,
/// since the `HashKey` alone cannot be displayed back.
#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: Value,
    pub value: Value,
}

impl Value {
    pub fn type_tag(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Integer(_) => "INTEGER",
            Value::Boolean(_) => "BOOLEAN",
            Value::String(_) => "STRING",
            Value::ReturnValue(_) => "RETURN_VALUE",
            Value::Error(_) => "ERROR",
            Value::Function(_) => "FUNCTION",
            Value::Builtin(_) => "BUILTIN",
            Value::Array(_) => "ARRAY",
            Value::Hash(_) => "HASH",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Reduces a hashable value (boolean, integer, string) to its key.
    /// Everything else has no key and cannot index or populate a hash.
    pub fn hash_key(&self) -> Option<HashKey> {
        let payload = match self {
            Value::Boolean(b) => *b as u64,
            Value::Integer(i) => *i as u64,
            Value::String(s) => fnv1a64(s.as_bytes()),
            _ => return None,
        };
        Some(HashKey {
            tag: self.type_tag(),
            payload,
        })
    }
}

/// 64-bit FNV-1a over the string bytes.
fn fnv1a64(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    let mut hash = OFFSET;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

impl PartialEq for Value {
    /// Structural equality, except that functions compare by identity: a
    /// closure bound into the environment it captured would otherwise send
    /// the comparison in a circle.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::ReturnValue(a), Value::ReturnValue(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => a.name == b.name,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Hash(a), Value::Hash(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Integer(value) => write!(f, "{}", value),
            Value::Boolean(value) => write!(f, "{}", value),
            Value::String(value) => f.write_str(value),
            Value::ReturnValue(value) => write!(f, "{}", value),
            Value::Error(message) => write!(f, "ERROR: {}", message),
            Value::Function(function) => {
                write!(f, "fn(")?;
                for (i, param) in function.parameters.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, ") {{\n{}\n}}", function.body)
            }
            Value::Builtin(_) => f.write_str("builtin function"),
            Value::Array(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "]")
            }
            Value::Hash(pairs) => {
                write!(f, "{{")?;
                for (i, pair) in pairs.values().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", pair.key, pair.value)?;
                }
                write!(f, "}}")
            }
        }
    }
}
