use crate::value::{Builtin, Value};
use std::rc::Rc;

/// The native function table, consulted when an identifier is not bound in
/// any environment frame.
pub fn lookup(name: &str) -> Option<Value> {
    let builtin = match name {
        "len" => Builtin { name: "len", func: len },
        "first" => Builtin { name: "first", func: first },
        "last" => Builtin { name: "last", func: last },
        "rest" => Builtin { name: "rest", func: rest },
        "push" => Builtin { name: "push", func: push },
        _ => return None,
    };
    Some(Value::Builtin(builtin))
}

fn len(args: &[Value]) -> Value {
    if args.len() != 1 {
        return Value::Error(format!(
            "len: wrong number of args. expected=1. got={}",
            args.len()
        ));
    }
    match &args[0] {
        Value::String(s) => Value::Integer(s.len() as i64),
        Value::Array(elements) => Value::Integer(elements.len() as i64),
        other => Value::Error(format!(
            "len: Unsupported argument. expected=STRING. got={}",
            other.type_tag()
        )),
    }
}

fn first(args: &[Value]) -> Value {
    if args.len() != 1 {
        return Value::Error(format!(
            "first: Got wrong number of args. Expected=1. Got={}",
            args.len()
        ));
    }
    match &args[0] {
        Value::Array(elements) => elements.first().cloned().unwrap_or(Value::Null),
        other => Value::Error(format!(
            "first: No implementation for argument type {}. Expected=ARRAY",
            other.type_tag()
        )),
    }
}

fn last(args: &[Value]) -> Value {
    if args.len() != 1 {
        return Value::Error(format!(
            "last: Got wrong number of args. Expected=1. Got={}",
            args.len()
        ));
    }
    match &args[0] {
        Value::Array(elements) => elements.last().cloned().unwrap_or(Value::Null),
        other => Value::Error(format!(
            "last: No implementation for argument type {}. Expected=ARRAY",
            other.type_tag()
        )),
    }
}

/// Everything but the head, as a fresh array. An empty input has no rest.
fn rest(args: &[Value]) -> Value {
    if args.len() != 1 {
        return Value::Error(format!(
            "rest: Got wrong number of args. Expected=1. Got={}",
            args.len()
        ));
    }
    match &args[0] {
        Value::Array(elements) => {
            if elements.is_empty() {
                Value::Null
            } else {
                Value::Array(Rc::new(elements[1..].to_vec()))
            }
        }
        other => Value::Error(format!(
            "rest: No implementation for argument type {}. Expected=ARRAY",
            other.type_tag()
        )),
    }
}

/// Returns a new array; the input is never mutated.
fn push(args: &[Value]) -> Value {
    if args.len() != 2 {
        return Value::Error(format!(
            "push: Got wrong number of args. Expected=2. Got={}",
            args.len()
        ));
    }
    match &args[0] {
        Value::Array(elements) => {
            let mut extended = elements.as_ref().clone();
            extended.push(args[1].clone());
            Value::Array(Rc::new(extended))
        }
        other => Value::Error(format!(
            "push: No implementation for argument type {}. Expected=ARRAY",
            other.type_tag()
        )),
    }
}
