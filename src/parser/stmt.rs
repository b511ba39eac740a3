use crate::{
    ast::{ast::Node, value::Value},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, END, INDENT, NAME, NEWLINE, SEMICOLON, TAB},
    Position,
};

use super::{
    expr::{null_denotation, parse_expr, parse_statement_expr},
    lookups::CONDITION_BP,
    parser::Parser,
};

/// Keywords whose handler runs directly when they open a statement.
const STATEMENT_KEYWORDS: [&str; 4] = ["while", "if", "else", "then"];

fn control_error(construct: &'static str, message: String, position: Position) -> Error {
    Error::new(ErrorImpl::ControlConstruct { construct, message }, position)
}

/// Parses one statement. A statement ends at one of `terminators` (left for
/// the caller), or at an INDENT, `;` or the end of input (consumed).
pub fn parse_statement(parser: &mut Parser, terminators: &[&str]) -> Result<Node, Error> {
    if parser.at_any(&STATEMENT_KEYWORDS)? {
        let token = parser.advance();
        return null_denotation(parser, token, true);
    }

    let statement = parse_statement_expr(parser)?;

    if parser.at_any(terminators)? {
        return Ok(statement);
    }

    if !parser.at_any(&[INDENT, END, SEMICOLON])? {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                expected: String::from("INDENT, (end) or `;`"),
                found: parser.current_token().describe(),
            },
            parser.get_position(),
        ));
    }

    parser.advance();
    Ok(statement)
}

pub fn parse_statement_list(parser: &mut Parser, terminators: &[&str]) -> Result<Vec<Node>, Error> {
    let mut statements = vec![];

    loop {
        if parser.at_any(terminators)? {
            break;
        }

        parser.skip(INDENT)?;
        parser.skip(TAB)?;
        if parser.at_any(terminators)? {
            break;
        }

        statements.push(parse_statement(parser, terminators)?);
        parser.skip(INDENT)?;
    }

    Ok(statements)
}

/// Consumes the block introducer (`::`, `then` or `else`) and parses the
/// statements it opens. With `None` whatever token is current introduces
/// the block.
pub fn parse_block(parser: &mut Parser, introducer: Option<&str>) -> Result<Node, Error> {
    let token = match introducer {
        Some(id) => parser.expect(id)?,
        None => parser.advance(),
    };
    parser.skip(INDENT)?;

    null_denotation(parser, token, false)
}

pub fn parse_block_body(parser: &mut Parser, _token: Token) -> Result<Node, Error> {
    let statements = parse_statement_list(parser, &[NEWLINE, END])?;
    Ok(Node::from_statements(statements))
}

pub fn parse_then_block(parser: &mut Parser, _token: Token) -> Result<Node, Error> {
    let statements = parse_statement_list(parser, &[END, "else", NEWLINE])?;
    Ok(Node::from_statements(statements))
}

pub fn parse_else_block(parser: &mut Parser, token: Token) -> Result<Node, Error> {
    parse_block_body(parser, token)
}

pub fn parse_if_stmt(parser: &mut Parser, token: Token) -> Result<Node, Error> {
    let at_head = parser.at_statement_head();
    let condition = parse_expr(parser, CONDITION_BP)?;
    parser.skip(NEWLINE)?;
    parser.skip(INDENT)?;

    if !parser.at("then")? {
        return Err(control_error(
            "if",
            format!(
                "expected `then` but found `{}`",
                parser.current_token().describe()
            ),
            parser.get_position(),
        ));
    }

    let then_block = parse_block(parser, Some("then"))?;
    if then_block.is_empty_block() {
        return Err(control_error(
            "if",
            String::from("no statement found after `then`"),
            token.span.start,
        ));
    }
    parser.skip(NEWLINE)?;

    let else_block = if parser.at("else")? {
        let position = parser.get_position();
        let block = parse_block(parser, Some("else"))?;
        if block.is_empty_block() {
            return Err(control_error(
                "if",
                String::from("no statement found after `else`"),
                position,
            ));
        }
        Some(Box::new(block))
    } else {
        None
    };

    let condition = Box::new(condition);
    let then_block = Box::new(then_block);

    if at_head {
        Ok(Node::IfStmt {
            condition,
            then_block,
            else_block,
        })
    } else {
        Ok(Node::IfExpr {
            condition,
            then_branch: then_block,
            else_branch: else_block,
        })
    }
}

pub fn parse_while_stmt(parser: &mut Parser, token: Token) -> Result<Node, Error> {
    let condition = parse_expr(parser, CONDITION_BP)?;

    if !parser.at("::")? {
        return Err(control_error(
            "while",
            format!(
                "expected `::` after the condition but found `{}`",
                parser.current_token().describe()
            ),
            parser.get_position(),
        ));
    }

    let body = parse_block(parser, Some("::"))?;
    if body.is_empty_block() {
        return Err(control_error(
            "while",
            String::from("no statement found after `::`"),
            token.span.start,
        ));
    }

    Ok(Node::WhileStmt {
        condition: Box::new(condition),
        body: Box::new(body),
    })
}

/// `global NAME` reserves `NAME` in the registry and declares it global in
/// scope. Later uses still parse as the name, so it can be assigned.
pub fn parse_global_stmt(parser: &mut Parser, _token: Token) -> Result<Node, Error> {
    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().describe(),
            message: String::from("expected a name after `global`"),
        },
        parser.get_position(),
    );
    let name = parser.expect_error(NAME, Some(error))?.value;

    parser.grammar_mut().constant(&name, Value::None);
    parser.scope_mut().declare_global(&name);

    Ok(Node::Global(name))
}

pub fn parse_module(parser: &mut Parser) -> Result<Node, Error> {
    let mut statements = vec![];

    loop {
        while parser.has_tokens() && parser.at_any(&[NEWLINE, SEMICOLON])? {
            parser.advance();
        }

        if !parser.has_tokens() {
            break;
        }

        statements.push(parse_statement_expr(parser)?);
    }

    Ok(Node::Module(statements))
}
