//! Parser state and token-stream helpers.
//!
//! The parser owns the token stream, the grammar registry it consults for
//! every symbol and the flat scope that records declarations as they are
//! parsed. Symbol identity is resolved lazily from the current token, so a
//! `global` declaration that registers a new constant mid-parse affects
//! every later token.

use std::rc::Rc;

use crate::{
    ast::ast::Node,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind, CONST, END, INDENT, NAME, NEWLINE, SEMICOLON, TAB},
    scope::scope::Scope,
    Position, Span,
};

use super::{lookups::Grammar, stmt::parse_module};

pub struct Parser {
    /// The list of tokens to parse, always terminated by EOF
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    grammar: Grammar,
    scope: Scope,
    /// Whether the custom handler being invoked started a statement
    statement_head: bool,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>, file: Rc<String>, grammar: Grammar) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|token| token.span.end.clone())
                .unwrap_or_else(|| Position(0, Rc::clone(&file)));
            tokens.push(Token {
                kind: TokenKind::EOF,
                value: String::from("EOF"),
                span: Span {
                    start: end.clone(),
                    end,
                },
            });
        }

        Parser {
            tokens,
            pos: 0,
            grammar,
            scope: Scope::new(),
            statement_head: false,
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Resolves the grammar symbol a token stands for.
    pub fn symbol_id(&self, token: &Token) -> Result<String, Error> {
        let id = match token.kind {
            TokenKind::Number | TokenKind::String => CONST,
            TokenKind::Name if self.grammar.contains(&token.value) => token.value.as_str(),
            TokenKind::Name => NAME,
            TokenKind::Operator if self.grammar.contains(&token.value) => token.value.as_str(),
            TokenKind::Operator => {
                return Err(Error::new(
                    ErrorImpl::UnknownToken {
                        token: token.value.clone(),
                    },
                    token.span.start.clone(),
                ))
            }
            TokenKind::Newline => NEWLINE,
            TokenKind::Indent => INDENT,
            TokenKind::Tab => TAB,
            TokenKind::Semicolon => SEMICOLON,
            TokenKind::EOF => END,
        };

        Ok(id.to_string())
    }

    pub fn current_id(&self) -> Result<String, Error> {
        self.symbol_id(self.current_token())
    }

    pub fn at(&self, id: &str) -> Result<bool, Error> {
        Ok(self.current_id()? == id)
    }

    pub fn at_any(&self, ids: &[&str]) -> Result<bool, Error> {
        let current = self.current_id()?;
        Ok(ids.contains(&current.as_str()))
    }

    pub fn current_binding_power(&self) -> Result<u32, Error> {
        Ok(self.grammar.binding_power(&self.current_id()?))
    }

    /// Advances to the next token and returns the previous one. Stays on EOF
    /// once it is reached.
    pub fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if token.kind != TokenKind::EOF {
            self.pos += 1;
        }
        token
    }

    /// Expects the current token to resolve to `expected`, with optional
    /// custom error.
    pub fn expect_error(&mut self, expected: &str, error: Option<Error>) -> Result<Token, Error> {
        if self.current_id()? != expected {
            return Err(error.unwrap_or_else(|| {
                Error::new(
                    ErrorImpl::UnexpectedToken {
                        expected: format!("`{}`", expected),
                        found: self.current_token().describe(),
                    },
                    self.get_position(),
                )
            }));
        }

        Ok(self.advance())
    }

    pub fn expect(&mut self, expected: &str) -> Result<Token, Error> {
        self.expect_error(expected, None)
    }

    /// Consumes every consecutive token resolving to `id`.
    pub fn skip(&mut self, id: &str) -> Result<(), Error> {
        while self.current_token().kind != TokenKind::EOF && self.at(id)? {
            self.advance();
        }
        Ok(())
    }

    pub fn has_tokens(&self) -> bool {
        self.current_token().kind != TokenKind::EOF
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn grammar_mut(&mut self) -> &mut Grammar {
        &mut self.grammar
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn scope_mut(&mut self) -> &mut Scope {
        &mut self.scope
    }

    pub fn into_scope(self) -> Scope {
        self.scope
    }

    pub fn set_statement_head(&mut self, at_head: bool) {
        self.statement_head = at_head;
    }

    pub fn at_statement_head(&self) -> bool {
        self.statement_head
    }

    /// Returns the source position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }
}

/// Parses a token stream with the standard grammar.
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> Result<(Node, Scope), Error> {
    parse_with_grammar(tokens, file, Grammar::standard())
}

/// Parses a token stream into a module node, returning it together with the
/// scope collected along the way.
pub fn parse_with_grammar(
    tokens: Vec<Token>,
    file: Rc<String>,
    grammar: Grammar,
) -> Result<(Node, Scope), Error> {
    let mut parser = Parser::new(tokens, file, grammar);
    let module = parse_module(&mut parser)?;

    Ok((module, parser.into_scope()))
}
