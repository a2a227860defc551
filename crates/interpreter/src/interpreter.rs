use crate::builtins;
use crate::environment::Environment;
use crate::value::{Function, HashPair, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use syntax::ast::{Block, Expr, Program, Stmt};

/// A tree-walking evaluator. Holds the global environment so a REPL can
/// interpret one program after another against the same bindings.
///
/// Failures never abort: a runtime problem becomes a `Value::Error` that
/// every evaluation step passes outward untouched, and `return` rides a
/// `Value::ReturnValue` wrapper through nested blocks until a function
/// boundary (or the program itself) unwraps it.
pub struct Interpreter {
    environment: Rc<RefCell<Environment>>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter {
            environment: Rc::new(RefCell::new(Environment::new())),
        }
    }

    pub fn interpret(&mut self, program: &Program) -> Value {
        let env = self.environment.clone();
        self.eval_program(program, &env)
    }

    fn eval_program(&self, program: &Program, env: &Rc<RefCell<Environment>>) -> Value {
        let mut result = Value::Null;
        for stmt in &program.statements {
            let value = self.eval_statement(stmt, env);
            if let Value::ReturnValue(inner) = value {
                return *inner;
            }
            if value.is_error() {
                return value;
            }
            // A let only binds; the program's result stays with the last
            // value-producing statement.
            if !matches!(stmt, Stmt::Let { .. }) {
                result = value;
            }
        }
        result
    }

    /// Like `eval_program`, except a `ReturnValue` passes through still
    /// wrapped so enclosing blocks keep unwinding.
    fn eval_block(&self, block: &Block, env: &Rc<RefCell<Environment>>) -> Value {
        let mut result = Value::Null;
        for stmt in &block.statements {
            let value = self.eval_statement(stmt, env);
            if matches!(value, Value::ReturnValue(_)) || value.is_error() {
                return value;
            }
            if !matches!(stmt, Stmt::Let { .. }) {
                result = value;
            }
        }
        result
    }

    fn eval_statement(&self, stmt: &Stmt, env: &Rc<RefCell<Environment>>) -> Value {
        match stmt {
            Stmt::Expression { expression, .. } => self.eval_expression(expression, env),
            Stmt::Let { name, value, .. } => {
                let value = self.eval_expression(value, env);
                if value.is_error() {
                    return value;
                }
                env.borrow_mut().define(name.value.clone(), value);
                Value::Null
            }
            Stmt::Return { value, .. } => {
                let value = self.eval_expression(value, env);
                if value.is_error() {
                    return value;
                }
                Value::ReturnValue(Box::new(value))
            }
        }
    }

    fn eval_expression(&self, expr: &Expr, env: &Rc<RefCell<Environment>>) -> Value {
        match expr {
            Expr::IntegerLiteral { value, .. } => Value::Integer(*value),
            Expr::StringLiteral { value, .. } => Value::String(value.clone()),
            Expr::BooleanLiteral { value, .. } => Value::Boolean(*value),
            Expr::Identifier(ident) => self.eval_identifier(&ident.value, env),
            Expr::Prefix {
                operator, right, ..
            } => {
                let right = self.eval_expression(right, env);
                if right.is_error() {
                    return right;
                }
                eval_prefix(operator, right)
            }
            Expr::Infix {
                operator,
                left,
                right,
                ..
            } => {
                let left = self.eval_expression(left, env);
                if left.is_error() {
                    return left;
                }
                let right = self.eval_expression(right, env);
                if right.is_error() {
                    return right;
                }
                eval_infix(operator, left, right)
            }
            Expr::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                let condition = self.eval_expression(condition, env);
                if condition.is_error() {
                    return condition;
                }
                if is_truthy(&condition) {
                    self.eval_block(consequence, env)
                } else if let Some(alternative) = alternative {
                    self.eval_block(alternative, env)
                } else {
                    Value::Null
                }
            }
            Expr::ArrayLiteral { elements, .. } => match self.eval_expressions(elements, env) {
                Ok(elements) => Value::Array(Rc::new(elements)),
                Err(error) => error,
            },
            Expr::HashLiteral { pairs, .. } => self.eval_hash_literal(pairs, env),
            Expr::Index { left, index, .. } => {
                let left = self.eval_expression(left, env);
                if left.is_error() {
                    return left;
                }
                let index = self.eval_expression(index, env);
                if index.is_error() {
                    return index;
                }
                eval_index(left, index)
            }
            Expr::FunctionLiteral {
                parameters, body, ..
            } => Value::Function(Rc::new(Function {
                parameters: parameters.clone(),
                body: body.clone(),
                env: env.clone(),
            })),
            Expr::Call {
                function,
                arguments,
                ..
            } => {
                let function = self.eval_expression(function, env);
                if function.is_error() {
                    return function;
                }
                let arguments = match self.eval_expressions(arguments, env) {
                    Ok(arguments) => arguments,
                    Err(error) => return error,
                };
                self.apply_function(function, arguments)
            }
        }
    }

    fn eval_identifier(&self, name: &str, env: &Rc<RefCell<Environment>>) -> Value {
        if let Some(value) = env.borrow().get(name) {
            return value;
        }
        if let Some(builtin) = builtins::lookup(name) {
            return builtin;
        }
        Value::Error(format!("identifier not found: {}", name))
    }

    /// Left-to-right, stopping at the first error.
    fn eval_expressions(
        &self,
        exprs: &[Expr],
        env: &Rc<RefCell<Environment>>,
    ) -> Result<Vec<Value>, Value> {
        let mut values = Vec::with_capacity(exprs.len());
        for expr in exprs {
            let value = self.eval_expression(expr, env);
            if value.is_error() {
                return Err(value);
            }
            values.push(value);
        }
        Ok(values)
    }

    fn eval_hash_literal(&self, pairs: &[(Expr, Expr)], env: &Rc<RefCell<Environment>>) -> Value {
        let mut map = HashMap::new();
        for (key_expr, value_expr) in pairs {
            let key = self.eval_expression(key_expr, env);
            if key.is_error() {
                return key;
            }
            let hash_key = match key.hash_key() {
                Some(hash_key) => hash_key,
                None => return invalid_hash_key(&key),
            };
            let value = self.eval_expression(value_expr, env);
            if value.is_error() {
                return value;
            }
            map.insert(hash_key, HashPair { key, value });
        }
        Value::Hash(Rc::new(map))
    }

    fn apply_function(&self, function: Value, arguments: Vec<Value>) -> Value {
        match function {
            Value::Function(function) => {
                if arguments.len() != function.parameters.len() {
                    return Value::Error(format!(
                        "wrong number of arguments. expected={}. got={}",
                        function.parameters.len(),
                        arguments.len()
                    ));
                }
                let mut scope = Environment::enclosed(function.env.clone());
                for (param, argument) in function.parameters.iter().zip(arguments) {
                    scope.define(param.value.clone(), argument);
                }
                let env = Rc::new(RefCell::new(scope));
                match self.eval_block(&function.body, &env) {
                    Value::ReturnValue(inner) => *inner,
                    other => other,
                }
            }
            Value::Builtin(builtin) => (builtin.func)(&arguments),
            other => Value::Error(format!("not a function: {}", other.type_tag())),
        }
    }
}

/// Everything is truthy except `false` and `null`.
fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Boolean(false) | Value::Null)
}

fn eval_prefix(operator: &str, right: Value) -> Value {
    match operator {
        "!" => eval_bang(right),
        "-" => eval_negation(right),
        _ => Value::Error(format!("unknown operator: {}{}", operator, right.type_tag())),
    }
}

fn eval_bang(right: Value) -> Value {
    Value::Boolean(!is_truthy(&right))
}

fn eval_negation(right: Value) -> Value {
    match right {
        Value::Integer(value) => Value::Integer(value.wrapping_neg()),
        other => Value::Error(format!("unknown operator: -{}", other.type_tag())),
    }
}

fn eval_infix(operator: &str, left: Value, right: Value) -> Value {
    match (&left, &right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(operator, *l, *r),
        (Value::String(l), Value::String(r)) => {
            if operator == "+" {
                Value::String(format!("{}{}", l, r))
            } else {
                Value::Error(format!("unknown operator: STRING {} STRING", operator))
            }
        }
        _ => {
            if operator == "==" {
                return Value::Boolean(identity_eq(&left, &right));
            }
            if operator == "!=" {
                return Value::Boolean(!identity_eq(&left, &right));
            }
            if left.type_tag() != right.type_tag() {
                Value::Error(format!(
                    "type mismatch: {} {} {}",
                    left.type_tag(),
                    operator,
                    right.type_tag()
                ))
            } else {
                Value::Error(format!(
                    "unknown operator: {} {} {}",
                    left.type_tag(),
                    operator,
                    right.type_tag()
                ))
            }
        }
    }
}

/// The `==`/`!=` fallback once both-integer and both-string are ruled out.
/// Booleans and nulls compare as the singletons they stand for; composites
/// compare as references, so only the same underlying value is equal to
/// itself.
fn identity_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Boolean(l), Value::Boolean(r)) => l == r,
        (Value::Null, Value::Null) => true,
        (Value::Array(l), Value::Array(r)) => Rc::ptr_eq(l, r),
        (Value::Hash(l), Value::Hash(r)) => Rc::ptr_eq(l, r),
        (Value::Function(l), Value::Function(r)) => Rc::ptr_eq(l, r),
        _ => false,
    }
}

fn eval_integer_infix(operator: &str, left: i64, right: i64) -> Value {
    match operator {
        "+" => Value::Integer(left.wrapping_add(right)),
        "-" => Value::Integer(left.wrapping_sub(right)),
        "*" => Value::Integer(left.wrapping_mul(right)),
        "/" => {
            if right == 0 {
                Value::Error("division by zero".to_string())
            } else {
                Value::Integer(left.wrapping_div(right))
            }
        }
        "<" => Value::Boolean(left < right),
        ">" => Value::Boolean(left > right),
        "==" => Value::Boolean(left == right),
        "!=" => Value::Boolean(left != right),
        _ => Value::Error(format!("unknown operator: INTEGER {} INTEGER", operator)),
    }
}

fn eval_index(left: Value, index: Value) -> Value {
    match (&left, &index) {
        (Value::Array(elements), Value::Integer(i)) => {
            if *i < 0 || *i as usize >= elements.len() {
                Value::Null
            } else {
                elements[*i as usize].clone()
            }
        }
        (Value::Hash(pairs), _) => match index.hash_key() {
            Some(hash_key) => pairs
                .get(&hash_key)
                .map(|pair| pair.value.clone())
                .unwrap_or(Value::Null),
            None => invalid_hash_key(&index),
        },
        _ => Value::Error(format!(
            "Index operator not supported: {}[{}]",
            left.type_tag(),
            index.type_tag()
        )),
    }
}

fn invalid_hash_key(key: &Value) -> Value {
    Value::Error(format!(
        "Invalid HashKey: {:?}. Type {:?} is unsupported.",
        key.to_string(),
        key.type_tag()
    ))
}
