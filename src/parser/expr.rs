use crate::{
    ast::{
        ast::{AssignKind, Node},
        value::Value,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind, CONST, INDENT, NAME, NEWLINE, TAB},
    scope::scope::Binding,
};

use super::{
    lookups::{display_name, Led, Nud},
    parser::Parser,
    stmt::parse_block,
};

pub fn parse_expr(parser: &mut Parser, bp: u32) -> Result<Node, Error> {
    parse_expr_at(parser, bp, false)
}

/// Parses an expression that starts a statement.
pub fn parse_statement_expr(parser: &mut Parser) -> Result<Node, Error> {
    parse_expr_at(parser, 0, true)
}

fn parse_expr_at(parser: &mut Parser, bp: u32, at_head: bool) -> Result<Node, Error> {
    let token = parser.advance();
    let mut left = null_denotation(parser, token, at_head)?;

    while parser.current_binding_power()? > bp {
        let token = parser.advance();
        left = left_denotation(parser, token, left)?;
    }

    Ok(left)
}

pub fn null_denotation(parser: &mut Parser, token: Token, at_head: bool) -> Result<Node, Error> {
    let id = parser.symbol_id(&token)?;
    let nud = parser.grammar().get(&id).and_then(|symbol| symbol.nud.clone());

    match nud {
        Some(Nud::Leaf) => parse_primary_expr(parser, token),
        Some(Nud::Prefix { bp, name }) => {
            let operand = parse_expr(parser, bp)?;
            Ok(Node::UnaryOp {
                op: name,
                operand: Box::new(operand),
            })
        }
        // Declared globals stay names so they can be assigned.
        Some(Nud::Constant(_)) if parser.scope().is_global(&token.value) => {
            Ok(Node::Name(token.value))
        }
        Some(Nud::Constant(value)) => {
            parser
                .scope_mut()
                .reserve(&token.value, Binding::Value(value.clone()));
            Ok(Node::Literal(value))
        }
        Some(Nud::Custom(handler)) => {
            parser.set_statement_head(at_head);
            handler(parser, token)
        }
        None if id == INDENT => Err(Error::new(
            ErrorImpl::Indentation {
                message: String::from("indented line outside of a block"),
            },
            token.span.start,
        )),
        None => Err(Error::new(
            ErrorImpl::UndefinedBehavior {
                symbol: token.describe(),
                role: "leaf",
            },
            token.span.start,
        )),
    }
}

pub fn left_denotation(parser: &mut Parser, token: Token, left: Node) -> Result<Node, Error> {
    let id = parser.symbol_id(&token)?;
    let (led, bp) = match parser.grammar().get(&id) {
        Some(symbol) => (symbol.led, symbol.lbp),
        None => (None, 0),
    };

    match led {
        Some(Led::Infix) => parse_binary_expr(parser, &id, left, bp),
        Some(Led::InfixRight) => parse_binary_expr(parser, &id, left, bp.saturating_sub(1)),
        Some(Led::Custom(handler)) => handler(parser, token, left, bp),
        None => Err(Error::new(
            ErrorImpl::UndefinedBehavior {
                symbol: token.describe(),
                role: "infix",
            },
            token.span.start,
        )),
    }
}

fn parse_binary_expr(parser: &mut Parser, id: &str, left: Node, bp: u32) -> Result<Node, Error> {
    let right = parse_expr(parser, bp)?;

    Ok(Node::BinaryOp {
        op: display_name(id),
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn parse_primary_expr(_parser: &mut Parser, token: Token) -> Result<Node, Error> {
    match token.kind {
        TokenKind::Number => Value::parse_number(&token.value)
            .map(Node::Literal)
            .ok_or_else(|| {
                Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.value.clone(),
                    },
                    token.span.start.clone(),
                )
            }),
        TokenKind::String => Ok(Node::Literal(Value::Str(token.value))),
        _ => Ok(Node::Name(token.value)),
    }
}

pub fn parse_assignment_expr(
    parser: &mut Parser,
    token: Token,
    left: Node,
    bp: u32,
) -> Result<Node, Error> {
    let Node::Name(name) = left else {
        return Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: left.to_string(),
                message: format!("only a name can be assigned with `{}`", token.value),
            },
            token.span.start,
        ));
    };

    let kind = if token.value == ":=" {
        AssignKind::Let
    } else {
        AssignKind::Assign
    };

    // Right associative: `a: b: 1` assigns `b: 1` to `a`.
    let value = parse_expr(parser, bp.saturating_sub(1))?;
    parser
        .scope_mut()
        .reserve(&name, Binding::Pending(value.clone()));

    Ok(Node::Assign {
        kind,
        target: Box::new(Node::Name(name)),
        value: Box::new(value),
    })
}

/// Comma separated expressions up to and including `close`. A trailing comma
/// is allowed.
fn parse_expr_list(parser: &mut Parser, close: &str) -> Result<Vec<Node>, Error> {
    let mut items = vec![];

    while !parser.at(close)? {
        items.push(parse_expr(parser, 0)?);
        if !parser.at(",")? {
            break;
        }
        parser.advance();
    }

    parser.expect(close)?;
    Ok(items)
}

pub fn parse_grouping_expr(parser: &mut Parser, token: Token) -> Result<Node, Error> {
    let mut items = parse_expr_list(parser, ")")?;

    match items.len() {
        0 => Err(Error::new(
            ErrorImpl::BadListOrLambda {
                message: String::from("empty tuple"),
            },
            token.span.start,
        )),
        1 => Ok(items.remove(0)),
        _ => Ok(Node::TupleLiteral(items)),
    }
}

fn skip_layout(parser: &mut Parser) -> Result<(), Error> {
    while parser.has_tokens() && parser.at_any(&[NEWLINE, INDENT, TAB])? {
        parser.advance();
    }
    Ok(())
}

/// List literals may span lines.
pub fn parse_list_expr(parser: &mut Parser, _token: Token) -> Result<Node, Error> {
    let mut items = vec![];

    loop {
        skip_layout(parser)?;
        if parser.at("]")? {
            break;
        }

        items.push(parse_expr(parser, 0)?);
        skip_layout(parser)?;

        if !parser.at(",")? {
            break;
        }
        parser.advance();
    }

    parser.expect("]")?;
    Ok(Node::ListLiteral(items))
}

pub fn parse_access_expr(
    parser: &mut Parser,
    _token: Token,
    left: Node,
    _bp: u32,
) -> Result<Node, Error> {
    if !parser.at(CONST)? {
        return Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_token().describe(),
                message: String::from("an access index must be a literal"),
            },
            parser.get_position(),
        ));
    }

    let index_token = parser.advance();
    let index = parse_primary_expr(parser, index_token)?;

    Ok(Node::Access {
        base: Box::new(left),
        index: Box::new(index),
    })
}

/// `name(args)` is a call when `name` is already known or no `->` follows.
/// Otherwise it declares a function: `name(params) -> returns [:: body]`.
pub fn parse_call_expr(
    parser: &mut Parser,
    token: Token,
    left: Node,
    _bp: u32,
) -> Result<Node, Error> {
    let Node::Name(name) = left else {
        return Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: left.to_string(),
                message: String::from("only a name can be called"),
            },
            token.span.start,
        ));
    };

    let args = parse_expr_list(parser, ")")?;

    if parser.scope().contains(&name) || !parser.at("->")? {
        return Ok(Node::FunctionCall { name, args });
    }

    parser.advance();
    let returns = parse_expr(parser, 0)?;
    let body = if parser.at("::")? {
        Some(Box::new(parse_block(parser, Some("::"))?))
    } else {
        None
    };

    let declaration = Node::FunctionDecl {
        name: name.clone(),
        params: args,
        returns: Box::new(returns),
        body,
    };
    parser
        .scope_mut()
        .reserve(&name, Binding::Pending(declaration.clone()));

    Ok(declaration)
}

/// `lambda x, y :: body`. Commas between parameters are optional.
pub fn parse_lambda_expr(parser: &mut Parser, token: Token) -> Result<Node, Error> {
    let mut params = vec![];

    while !parser.at("::")? {
        if !parser.at(NAME)? {
            return Err(Error::new(
                ErrorImpl::BadListOrLambda {
                    message: format!(
                        "expected a parameter name, found `{}`",
                        parser.current_token().describe()
                    ),
                },
                parser.get_position(),
            ));
        }

        params.push(parser.advance().value);
        if parser.at(",")? {
            parser.advance();
        }
    }

    if params.is_empty() {
        return Err(Error::new(
            ErrorImpl::BadListOrLambda {
                message: String::from("a lambda needs at least one parameter"),
            },
            token.span.start,
        ));
    }

    parser.expect("::")?;
    let body = parse_expr(parser, 0)?;

    Ok(Node::Lambda {
        params,
        body: Box::new(body),
    })
}
