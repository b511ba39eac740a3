use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    ast::{ast::Node, value::Value},
    errors::errors::Error,
    lexer::tokens::{Token, CONST, END, INDENT, NAME, NEWLINE, SEMICOLON, TAB},
};

use super::{expr::*, parser::Parser, stmt::*};

/// Binding power used for `if`/`while` conditions.
pub const CONDITION_BP: u32 = 20;

pub type NUDHandler = fn(&mut Parser, Token) -> Result<Node, Error>;
pub type LEDHandler = fn(&mut Parser, Token, Node, u32) -> Result<Node, Error>;

lazy_static! {
    pub static ref DISPLAY_NAMES: HashMap<&'static str, &'static str> = {
        let mut map = HashMap::new();
        map.insert("+", "Add");
        map.insert("-", "Sub");
        map.insert("*", "Mul");
        map.insert("/", "Div");
        map.insert("%", "Mod");
        map.insert("**", "Power");
        map.insert("and", "And");
        map.insert("or", "Or");
        map.insert("not", "Not");
        map.insert("|", "Bitor");
        map.insert("^", "Bitxor");
        map.insert("&", "Bitand");
        map.insert("<<", "LeftShift");
        map.insert(">>", "RightShift");
        map.insert("<", "Lt");
        map.insert("<=", "LtE");
        map.insert(">", "Gt");
        map.insert(">=", "GtE");
        map.insert("=", "Eq");
        map.insert("==", "Eq");
        map.insert("!=", "NotEq");
        map.insert("<>", "NotEq");
        map.insert("<-", "Data");
        map
    };
}

/// Name an operator renders under; unknown symbols render as themselves.
pub fn display_name(id: &str) -> String {
    DISPLAY_NAMES
        .get(id)
        .map(|name| name.to_string())
        .unwrap_or_else(|| id.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Leaf,
    Unary,
    Binary,
    Call,
    Statement,
    Ternary,
}

/// Behavior when a symbol starts an expression.
#[derive(Clone)]
pub enum Nud {
    /// Literal or name taken from the token itself.
    Leaf,
    Prefix { bp: u32, name: String },
    Constant(Value),
    Custom(NUDHandler),
}

/// Behavior when a symbol follows a parsed left operand.
#[derive(Clone, Copy)]
pub enum Led {
    /// Right operand parsed at the symbol's own binding power.
    Infix,
    /// Right operand parsed one below the symbol's binding power.
    InfixRight,
    Custom(LEDHandler),
}

#[derive(Clone)]
pub struct Symbol {
    pub id: String,
    pub lbp: u32,
    pub arity: Arity,
    pub nud: Option<Nud>,
    pub led: Option<Led>,
}

impl Symbol {
    fn new(id: &str) -> Self {
        Symbol {
            id: id.to_string(),
            lbp: 0,
            arity: Arity::Leaf,
            nud: None,
            led: None,
        }
    }
}

/// Grammar registry: symbol identity to binding power and parsing behavior.
#[derive(Clone, Default)]
pub struct Grammar {
    symbols: HashMap<String, Symbol>,
}

impl Grammar {
    /// An empty registry.
    pub fn new() -> Self {
        Grammar {
            symbols: HashMap::new(),
        }
    }

    /// The registry for the full language.
    pub fn standard() -> Self {
        let mut grammar = Grammar::new();
        create_token_lookups(&mut grammar);
        grammar
    }

    /// Returns the symbol for `id`, creating it if needed. Binding power only
    /// ever widens: the stored value becomes `max(existing, bp)`.
    pub fn register(&mut self, id: &str, bp: u32) -> &mut Symbol {
        let symbol = self
            .symbols
            .entry(id.to_string())
            .or_insert_with(|| Symbol::new(id));
        symbol.lbp = symbol.lbp.max(bp);
        symbol
    }

    pub fn get(&self, id: &str) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.symbols.contains_key(id)
    }

    pub fn binding_power(&self, id: &str) -> u32 {
        self.get(id).map(|symbol| symbol.lbp).unwrap_or(0)
    }

    pub fn leaf(&mut self, id: &str) {
        let symbol = self.register(id, 0);
        symbol.nud = Some(Nud::Leaf);
        symbol.arity = Arity::Leaf;
    }

    /// Registers a unary prefix behavior. The operand binds at `bp`, which is
    /// independent of the symbol's left binding power.
    pub fn prefix(&mut self, id: &str, bp: u32, name: &str) {
        let symbol = self.register(id, 0);
        symbol.nud = Some(Nud::Prefix {
            bp,
            name: name.to_string(),
        });
        symbol.arity = Arity::Unary;
    }

    pub fn infix(&mut self, id: &str, bp: u32) {
        let symbol = self.register(id, bp);
        symbol.led = Some(Led::Infix);
        symbol.arity = Arity::Binary;
    }

    pub fn infix_right(&mut self, id: &str, bp: u32) {
        let symbol = self.register(id, bp);
        symbol.led = Some(Led::InfixRight);
        symbol.arity = Arity::Binary;
    }

    pub fn nud(&mut self, id: &str, bp: u32, arity: Arity, nud_fn: NUDHandler) {
        let symbol = self.register(id, bp);
        symbol.nud = Some(Nud::Custom(nud_fn));
        symbol.arity = arity;
    }

    pub fn led(&mut self, id: &str, bp: u32, arity: Arity, led_fn: LEDHandler) {
        let symbol = self.register(id, bp);
        symbol.led = Some(Led::Custom(led_fn));
        symbol.arity = arity;
    }

    /// Makes `id` a named constant: using it yields a literal.
    pub fn constant(&mut self, id: &str, value: Value) {
        let symbol = self.register(id, 0);
        symbol.nud = Some(Nud::Constant(value));
        symbol.arity = Arity::Leaf;
    }
}

pub fn create_token_lookups(grammar: &mut Grammar) {
    grammar.leaf(CONST);
    grammar.leaf(NAME);

    // Layout and punctuation
    for id in [END, NEWLINE, INDENT, TAB, SEMICOLON, ")", "]", ",", "{", "}", "->"] {
        grammar.register(id, 0);
    }

    // Prefix
    grammar.prefix("+", 130, "UnaryAdd");
    grammar.prefix("-", 130, "UnarySub");
    grammar.prefix("not", 50, "Not");

    // Additive and multiplicative
    grammar.infix("+", 110);
    grammar.infix("-", 110);
    grammar.infix("*", 120);
    grammar.infix("/", 120);
    grammar.infix("%", 120);

    // Shifts and bitwise
    grammar.infix("<<", 100);
    grammar.infix(">>", 90);
    grammar.infix("|", 70);
    grammar.infix("^", 80);
    grammar.infix("&", 90);

    // Relational
    for id in ["<", "<=", ">", ">=", "=", "==", "!=", "<>", "not"] {
        grammar.infix(id, 60);
    }

    // Right associative
    grammar.infix_right("**", 140);
    grammar.infix_right("or", 20);
    grammar.infix_right("and", 40);

    // Assignment
    grammar.led(":", 10, Arity::Binary, parse_assignment_expr);
    grammar.led(":=", 15, Arity::Binary, parse_assignment_expr);
    grammar.infix("<-", 10);

    // Grouping, tuples, lists, calls and access
    grammar.nud("(", 150, Arity::Unary, parse_grouping_expr);
    grammar.led("(", 150, Arity::Call, parse_call_expr);
    grammar.nud("[", 150, Arity::Unary, parse_list_expr);
    grammar.led(".", 150, Arity::Binary, parse_access_expr);

    // Constants
    grammar.constant("null", Value::None);
    grammar.constant("True", Value::Int(1));
    grammar.constant("False", Value::Int(0));
    grammar.constant("pi", Value::Float(std::f64::consts::PI));
    grammar.nud("global", 1000, Arity::Statement, parse_global_stmt);

    // Statements and blocks
    grammar.nud("lambda", 20, Arity::Binary, parse_lambda_expr);
    grammar.nud("if", CONDITION_BP, Arity::Ternary, parse_if_stmt);
    grammar.nud("then", 15, Arity::Statement, parse_then_block);
    grammar.nud("else", 0, Arity::Statement, parse_else_block);
    grammar.nud("while", CONDITION_BP, Arity::Statement, parse_while_stmt);
    grammar.nud("::", 0, Arity::Statement, parse_block_body);
}
