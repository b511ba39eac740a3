//! Canonical textual rendering of the tree.
//!
//! Leaves render as `Const (1)` / `Name (x)`, everything else as
//! `Op(child,child)` with absent children omitted and sequences in
//! brackets.

use std::fmt::{Display, Formatter, Result};

use super::ast::Node;

fn sequence(items: &[Node]) -> String {
    let items: Vec<String> = items.iter().map(|item| item.to_string()).collect();
    format!("[{}]", items.join(","))
}

fn operation(f: &mut Formatter<'_>, name: &str, children: &[String]) -> Result {
    write!(f, "{}({})", name, children.join(","))
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Node::Literal(value) => write!(f, "Const ({})", value),
            Node::Name(name) => write!(f, "Name ({})", name),
            Node::UnaryOp { op, operand } => operation(f, op, &[operand.to_string()]),
            Node::BinaryOp { op, left, right } => {
                operation(f, op, &[left.to_string(), right.to_string()])
            }
            Node::Assign {
                kind,
                target,
                value,
            } => operation(
                f,
                kind.display_name(),
                &[target.to_string(), value.to_string()],
            ),
            Node::IfExpr {
                condition,
                then_branch,
                else_branch,
            } => {
                let mut children = vec![condition.to_string(), then_branch.to_string()];
                children.extend(else_branch.iter().map(|branch| branch.to_string()));
                operation(f, "IfExp", &children)
            }
            Node::IfStmt {
                condition,
                then_block,
                else_block,
            } => {
                let mut children = vec![condition.to_string(), then_block.to_string()];
                children.extend(else_block.iter().map(|block| block.to_string()));
                operation(f, "If", &children)
            }
            Node::WhileStmt { condition, body } => {
                operation(f, "While", &[condition.to_string(), body.to_string()])
            }
            Node::ListLiteral(items) => operation(f, "List", &[sequence(items)]),
            Node::TupleLiteral(items) => operation(f, "Tuple", &[sequence(items)]),
            Node::Access { base, index } => {
                operation(f, "Access", &[base.to_string(), index.to_string()])
            }
            Node::Lambda { params, body } => {
                let params: Vec<String> = params
                    .iter()
                    .map(|param| format!("Name ({})", param))
                    .collect();
                operation(
                    f,
                    "Lambda",
                    &[format!("[{}]", params.join(",")), body.to_string()],
                )
            }
            Node::FunctionDecl {
                name,
                params,
                returns,
                body,
            } => {
                let mut children = vec![
                    format!("Name ({})", name),
                    sequence(params),
                    returns.to_string(),
                ];
                children.extend(body.iter().map(|body| body.to_string()));
                operation(f, "Function", &children)
            }
            Node::FunctionCall { name, args } => {
                operation(f, "CallFunc", &[format!("Name ({})", name), sequence(args)])
            }
            Node::Global(name) => write!(f, "Global(Name ({}))", name),
            Node::Block(statements) => write!(f, "{}", sequence(statements)),
            Node::Module(statements) => operation(f, "Module", &[sequence(statements)]),
        }
    }
}
