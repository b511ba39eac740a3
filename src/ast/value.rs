use std::fmt::Display;

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

/// A concrete value: either a literal carried by the tree or the result of
/// folding an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    None,
    Int(i64),
    /// Integer that doesn't fit in i64.
    BigInt(BigInt),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
}

impl Value {
    /// Parses the text of a number token. Integers wider than i64 become
    /// big integers.
    pub fn parse_number(text: &str) -> Option<Value> {
        if text.contains('.') {
            text.parse().ok().map(Value::Float)
        } else {
            text.parse::<BigInt>().ok().map(Value::from)
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Int(value) => *value != 0,
            Value::BigInt(value) => !value.is_zero(),
            Value::Float(value) => *value != 0.0,
            Value::Str(value) => !value.is_empty(),
            Value::List(items) | Value::Tuple(items) => !items.is_empty(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "None",
            Value::Int(_) | Value::BigInt(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Int(value as i64)
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        match value.to_i64() {
            Some(value) => Value::Int(value),
            None => Value::BigInt(value),
        }
    }
}

fn join(items: &[Value]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Int(value) => write!(f, "{}", value),
            Value::BigInt(value) => write!(f, "{}", value),
            Value::Float(value) => write!(f, "{}", value),
            Value::Str(value) => write!(f, "'{}'", value),
            Value::List(items) => write!(f, "[{}]", join(items)),
            Value::Tuple(items) => write!(f, "({})", join(items)),
        }
    }
}
