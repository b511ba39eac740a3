//! Constant folding of assignment right-hand sides.
//!
//! Parsing only records assignments as pending bindings. This pass runs
//! afterwards, walks the module in source order and asks an [`Evaluator`]
//! for the value of every assignment. Successes become value bindings,
//! failures become unresolved bindings; neither aborts the pass.

use num_bigint::{BigInt, Sign};
use num_traits::{ToPrimitive, Zero};

use crate::{
    ast::{ast::Node, value::Value},
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::scope::{Binding, Scope};

/// Computes the value of a tree against a scope.
pub trait Evaluator {
    fn evaluate(&self, node: &Node, scope: &Scope) -> Result<Value, Error>;
}

/// Outcome of folding one assignment.
#[derive(Debug, Clone)]
pub struct Folded {
    pub name: String,
    pub outcome: Result<Value, Error>,
}

#[derive(Debug, Clone, Default)]
pub struct FoldReport {
    pub entries: Vec<Folded>,
}

impl FoldReport {
    pub fn unresolved(&self) -> impl Iterator<Item = &Folded> {
        self.entries.iter().filter(|entry| entry.outcome.is_err())
    }

    pub fn is_clean(&self) -> bool {
        self.unresolved().next().is_none()
    }
}

pub fn fold_constants(module: &Node, scope: &mut Scope, evaluator: &dyn Evaluator) -> FoldReport {
    let mut report = FoldReport::default();
    fold_node(module, scope, evaluator, &mut report);
    report
}

fn fold_node(node: &Node, scope: &mut Scope, evaluator: &dyn Evaluator, report: &mut FoldReport) {
    for child in node.children() {
        fold_node(child, scope, evaluator, report);
    }

    let Node::Assign { target, value, .. } = node else {
        return;
    };
    let Some(name) = target.as_name() else {
        return;
    };

    let outcome = evaluator.evaluate(value, scope);
    let binding = match &outcome {
        Ok(value) => Binding::Value(value.clone()),
        Err(error) => Binding::Unresolved(error.to_string()),
    };

    scope.reserve(name, binding);
    report.entries.push(Folded {
        name: name.to_string(),
        outcome,
    });
}

fn evaluation_error(message: String) -> Error {
    Error::new(ErrorImpl::Evaluation { message }, Position::null())
}

/// Default evaluator: arithmetic, comparison, logic and container literals
/// over values already bound in scope.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantFolder;

impl Evaluator for ConstantFolder {
    fn evaluate(&self, node: &Node, scope: &Scope) -> Result<Value, Error> {
        match node {
            Node::Literal(value) => Ok(value.clone()),
            Node::Name(name) => match scope.lookup(name)? {
                Binding::Value(value) => Ok(value.clone()),
                Binding::Void => Ok(Value::None),
                Binding::Pending(_) => {
                    Err(evaluation_error(format!("`{}` has not been evaluated", name)))
                }
                Binding::Unresolved(_) => {
                    Err(evaluation_error(format!("`{}` could not be resolved", name)))
                }
            },
            Node::UnaryOp { op, operand } => unary(op, self.evaluate(operand, scope)?),
            Node::BinaryOp { op, left, right } => {
                let left = self.evaluate(left, scope)?;
                match op.as_str() {
                    "And" if !left.is_truthy() => Ok(left),
                    "Or" if left.is_truthy() => Ok(left),
                    "And" | "Or" => self.evaluate(right, scope),
                    _ => binary(op, left, self.evaluate(right, scope)?),
                }
            }
            // Chained assignment takes the inner value.
            Node::Assign { value, .. } => self.evaluate(value, scope),
            Node::IfExpr {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition, scope)?.is_truthy() {
                    self.evaluate(then_branch, scope)
                } else {
                    match else_branch {
                        Some(branch) => self.evaluate(branch, scope),
                        None => Ok(Value::None),
                    }
                }
            }
            Node::ListLiteral(items) => Ok(Value::List(self.evaluate_all(items, scope)?)),
            Node::TupleLiteral(items) => Ok(Value::Tuple(self.evaluate_all(items, scope)?)),
            Node::Access { base, index } => {
                access(self.evaluate(base, scope)?, self.evaluate(index, scope)?)
            }
            other => Err(evaluation_error(format!("{} is not a constant expression", other))),
        }
    }
}

impl ConstantFolder {
    fn evaluate_all(&self, items: &[Node], scope: &Scope) -> Result<Vec<Value>, Error> {
        items.iter().map(|item| self.evaluate(item, scope)).collect()
    }
}

/// Longest string a fold may build.
const MAX_STRING_LEN: usize = 1 << 20;
/// Largest integer result, in bits, a fold may build.
const MAX_INT_BITS: u64 = 1 << 20;

fn unsupported(op: &str, left: &Value, right: &Value) -> Error {
    evaluation_error(format!(
        "unsupported operand types for {}: {} and {}",
        op,
        left.type_name(),
        right.type_name()
    ))
}

fn too_large(what: &str) -> Error {
    evaluation_error(format!("{} too large", what))
}

fn division_by_zero() -> Error {
    evaluation_error(String::from("division by zero"))
}

fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Int(value) => Some(*value as f64),
        Value::BigInt(value) => value.to_f64(),
        Value::Float(value) => Some(*value),
        _ => None,
    }
}

fn as_big(value: &Value) -> Option<BigInt> {
    match value {
        Value::Int(value) => Some(BigInt::from(*value)),
        Value::BigInt(value) => Some(value.clone()),
        _ => None,
    }
}

fn unary(op: &str, operand: Value) -> Result<Value, Error> {
    match (op, &operand) {
        ("Not", _) => Ok(Value::from(!operand.is_truthy())),
        ("UnaryAdd", Value::Int(_) | Value::BigInt(_) | Value::Float(_)) => Ok(operand),
        ("UnarySub", Value::Int(value)) => Ok(value
            .checked_neg()
            .map(Value::Int)
            .unwrap_or_else(|| Value::from(-BigInt::from(*value)))),
        ("UnarySub", Value::BigInt(value)) => Ok(Value::from(-value.clone())),
        ("UnarySub", Value::Float(value)) => Ok(Value::Float(-value)),
        _ => Err(evaluation_error(format!(
            "unsupported operand type for {}: {}",
            op,
            operand.type_name()
        ))),
    }
}

fn binary(op: &str, left: Value, right: Value) -> Result<Value, Error> {
    match op {
        "Add" | "Sub" | "Mul" | "Div" | "Mod" | "Power" => arithmetic(op, left, right),
        "Lt" | "LtE" | "Gt" | "GtE" => compare(op, &left, &right),
        "Eq" => Ok(Value::from(equals(&left, &right))),
        "NotEq" => Ok(Value::from(!equals(&left, &right))),
        "Bitor" | "Bitxor" | "Bitand" | "LeftShift" | "RightShift" => bitwise(op, left, right),
        _ => Err(unsupported(op, &left, &right)),
    }
}

fn arithmetic(op: &str, left: Value, right: Value) -> Result<Value, Error> {
    match (op, &left, &right) {
        ("Add", Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{}{}", a, b))),
        ("Add", Value::List(a), Value::List(b)) => Ok(Value::List([a.clone(), b.clone()].concat())),
        ("Mul", Value::Str(a), Value::Int(n)) => repeat(a, *n),
        ("Mul", Value::Str(_), Value::BigInt(_)) => Err(too_large("repeat count")),
        ("Div" | "Mod", _, Value::Int(0)) => Err(division_by_zero()),
        ("Div" | "Mod", _, Value::Float(b)) if *b == 0.0 => Err(division_by_zero()),
        (_, Value::Int(a), Value::Int(b)) => integer_arithmetic(op, *a, *b),
        _ => match (as_big(&left), as_big(&right)) {
            (Some(a), Some(b)) => big_arithmetic(op, a, b),
            _ => match (as_float(&left), as_float(&right)) {
                (Some(a), Some(b)) => Ok(float_arithmetic(op, a, b)),
                _ => Err(unsupported(op, &left, &right)),
            },
        },
    }
}

fn repeat(text: &str, count: i64) -> Result<Value, Error> {
    let count = usize::try_from(count).unwrap_or(0);

    match text.len().checked_mul(count) {
        Some(len) if len <= MAX_STRING_LEN => Ok(Value::Str(text.repeat(count))),
        _ => Err(too_large("repeat count")),
    }
}

fn float_arithmetic(op: &str, a: f64, b: f64) -> Value {
    Value::Float(match op {
        "Add" => a + b,
        "Sub" => a - b,
        "Mul" => a * b,
        "Div" => a / b,
        "Mod" => a - b * (a / b).floor(),
        _ => a.powf(b),
    })
}

fn integer_arithmetic(op: &str, a: i64, b: i64) -> Result<Value, Error> {
    let result = match op {
        "Add" => a.checked_add(b),
        "Sub" => a.checked_sub(b),
        "Mul" => a.checked_mul(b),
        "Div" => return Ok(float_arithmetic(op, a as f64, b as f64)),
        // Result takes the sign of the divisor.
        "Mod" => a.checked_rem(b).map(|rem| {
            if rem != 0 && (rem < 0) != (b < 0) {
                rem + b
            } else {
                rem
            }
        }),
        _ if b < 0 => return Ok(float_arithmetic(op, a as f64, b as f64)),
        _ => u32::try_from(b).ok().and_then(|exponent| a.checked_pow(exponent)),
    };

    match result {
        Some(value) => Ok(Value::Int(value)),
        // Overflow promotes to a big integer.
        None => big_arithmetic(op, BigInt::from(a), BigInt::from(b)),
    }
}

fn big_arithmetic(op: &str, a: BigInt, b: BigInt) -> Result<Value, Error> {
    let result = match op {
        "Add" => a + b,
        "Sub" => a - b,
        "Mul" => a * b,
        "Div" | "Mod" if b.is_zero() => return Err(division_by_zero()),
        "Div" => return Ok(float_arithmetic(op, big_to_f64(&a), big_to_f64(&b))),
        "Mod" => {
            let rem = &a % &b;
            if !rem.is_zero() && rem.sign() != b.sign() {
                rem + b
            } else {
                rem
            }
        }
        _ if b.sign() == Sign::Minus => {
            return Ok(float_arithmetic(op, big_to_f64(&a), big_to_f64(&b)))
        }
        _ => {
            let exponent = b
                .to_u32()
                .filter(|exponent| a.bits().saturating_mul(u64::from(*exponent)) <= MAX_INT_BITS)
                .ok_or_else(|| too_large("exponent"))?;
            a.pow(exponent)
        }
    };

    Ok(Value::from(result))
}

fn big_to_f64(value: &BigInt) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

fn compare(op: &str, left: &Value, right: &Value) -> Result<Value, Error> {
    let ordering = match (left, right) {
        (Value::Str(a), Value::Str(b)) => a.partial_cmp(b),
        _ => match (as_big(left), as_big(right)) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => match (as_float(left), as_float(right)) {
                (Some(a), Some(b)) => a.partial_cmp(&b),
                _ => return Err(unsupported(op, left, right)),
            },
        },
    };

    let Some(ordering) = ordering else {
        return Ok(Value::from(false));
    };

    Ok(Value::from(match op {
        "Lt" => ordering.is_lt(),
        "LtE" => ordering.is_le(),
        "Gt" => ordering.is_gt(),
        _ => ordering.is_ge(),
    }))
}

fn equals(left: &Value, right: &Value) -> bool {
    if let (Some(a), Some(b)) = (as_big(left), as_big(right)) {
        return a == b;
    }

    match (as_float(left), as_float(right)) {
        (Some(a), Some(b)) => a == b,
        _ => left == right,
    }
}

fn bitwise(op: &str, left: Value, right: Value) -> Result<Value, Error> {
    let (Some(a), Some(b)) = (as_big(&left), as_big(&right)) else {
        return Err(unsupported(op, &left, &right));
    };

    let result = match op {
        "Bitor" => a | b,
        "Bitxor" => a ^ b,
        "Bitand" => a & b,
        _ => {
            let shift = b
                .to_u64()
                .filter(|shift| *shift <= MAX_INT_BITS)
                .and_then(|shift| usize::try_from(shift).ok())
                .ok_or_else(|| evaluation_error(format!("invalid shift count {}", b)))?;
            if op == "LeftShift" {
                a << shift
            } else {
                a >> shift
            }
        }
    };

    Ok(Value::from(result))
}

fn access(base: Value, index: Value) -> Result<Value, Error> {
    let (Value::List(items) | Value::Tuple(items)) = &base else {
        return Err(evaluation_error(format!("{} is not indexable", base.type_name())));
    };

    let item = match &index {
        Value::Int(position) => usize::try_from(*position)
            .ok()
            .and_then(|position| items.get(position)),
        Value::BigInt(_) => None,
        _ => {
            return Err(evaluation_error(format!(
                "index must be an int, not {}",
                index.type_name()
            )))
        }
    };

    item.cloned()
        .ok_or_else(|| evaluation_error(format!("index {} out of range", index)))
}
