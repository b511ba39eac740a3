use super::value::Value;

/// Which assignment operator produced an [`Node::Assign`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignKind {
    /// `name: value`
    Assign,
    /// `name := value`
    Let,
}

impl AssignKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            AssignKind::Assign => "Assign",
            AssignKind::Let => "Let",
        }
    }
}

/// Abstract syntax tree node.
///
/// One variant per construct; each variant owns exactly the children it
/// needs. Operator display names (`Add`, `UnarySub`, ...) come from the
/// grammar registry.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Literal(Value),
    Name(String),
    UnaryOp {
        op: String,
        operand: Box<Node>,
    },
    BinaryOp {
        op: String,
        left: Box<Node>,
        right: Box<Node>,
    },
    Assign {
        kind: AssignKind,
        target: Box<Node>,
        value: Box<Node>,
    },
    /// `if` nested inside an expression.
    IfExpr {
        condition: Box<Node>,
        then_branch: Box<Node>,
        else_branch: Option<Box<Node>>,
    },
    /// `if` at the head of a statement.
    IfStmt {
        condition: Box<Node>,
        then_block: Box<Node>,
        else_block: Option<Box<Node>>,
    },
    WhileStmt {
        condition: Box<Node>,
        body: Box<Node>,
    },
    ListLiteral(Vec<Node>),
    TupleLiteral(Vec<Node>),
    Access {
        base: Box<Node>,
        index: Box<Node>,
    },
    Lambda {
        params: Vec<String>,
        body: Box<Node>,
    },
    FunctionDecl {
        name: String,
        params: Vec<Node>,
        returns: Box<Node>,
        body: Option<Box<Node>>,
    },
    FunctionCall {
        name: String,
        args: Vec<Node>,
    },
    Global(String),
    /// Two or more statements, or none. A single statement is never wrapped.
    Block(Vec<Node>),
    Module(Vec<Node>),
}

impl Node {
    /// Collapses a statement list: one statement stands alone, anything
    /// else becomes a block.
    pub fn from_statements(mut statements: Vec<Node>) -> Node {
        if statements.len() == 1 {
            statements.remove(0)
        } else {
            Node::Block(statements)
        }
    }

    pub fn is_empty_block(&self) -> bool {
        matches!(self, Node::Block(statements) if statements.is_empty())
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Node::Name(name) => Some(name),
            _ => None,
        }
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Literal(_) | Node::Name(_) | Node::Global(_) => vec![],
            Node::UnaryOp { operand, .. } => vec![&**operand],
            Node::BinaryOp { left, right, .. } => vec![&**left, &**right],
            Node::Assign { target, value, .. } => vec![&**target, &**value],
            Node::IfExpr {
                condition,
                then_branch: then,
                else_branch: otherwise,
            }
            | Node::IfStmt {
                condition,
                then_block: then,
                else_block: otherwise,
            } => {
                let mut children = vec![&**condition, &**then];
                children.extend(otherwise.as_deref());
                children
            }
            Node::WhileStmt { condition, body } => vec![&**condition, &**body],
            Node::ListLiteral(items)
            | Node::TupleLiteral(items)
            | Node::Block(items)
            | Node::Module(items) => items.iter().collect(),
            Node::Access { base, index } => vec![&**base, &**index],
            Node::Lambda { body, .. } => vec![&**body],
            Node::FunctionDecl {
                params,
                returns,
                body,
                ..
            } => {
                let mut children: Vec<&Node> = params.iter().collect();
                children.push(returns);
                children.extend(body.as_deref());
                children
            }
            Node::FunctionCall { args, .. } => args.iter().collect(),
        }
    }
}
