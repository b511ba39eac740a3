use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{errors::errors::{Error, ErrorImpl}, Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind};

pub type RegexHandler = fn(&mut Lexer, &Regex);

#[derive(Clone)]
pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler
}

lazy_static! {
    // Tried in order; every pattern is anchored at the cursor.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern {
            regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(),
            handler: name_handler,
        },
        RegexPattern {
            regex: Regex::new("^[0-9]+(\\.[0-9]+)?").unwrap(),
            handler: number_handler,
        },
        RegexPattern {
            regex: Regex::new("^\\r?\\n\\t").unwrap(),
            handler: indent_handler,
        },
        RegexPattern {
            regex: Regex::new("^\\r?\\n").unwrap(),
            handler: newline_handler,
        },
        RegexPattern {
            regex: Regex::new("^\\t").unwrap(),
            handler: tab_handler,
        },
        RegexPattern {
            regex: Regex::new("^[ \\r]+").unwrap(),
            handler: skip_handler,
        },
        RegexPattern {
            regex: Regex::new("^#[^\\n]*").unwrap(),
            handler: skip_handler,
        },
        RegexPattern {
            regex: Regex::new("^\"[^\"]*\"").unwrap(),
            handler: string_handler,
        },
        RegexPattern {
            regex: Regex::new("^'[^']*'").unwrap(),
            handler: string_handler,
        },
        RegexPattern {
            regex: Regex::new("^;").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";"),
        },
        RegexPattern {
            regex: Regex::new(concat!(
                "^(\\*\\*|:=|::|->|<-|<=|>=|!=|==|<>|<<|>>",
                "|[-+*/%<>=!&|^~@$?.,:()\\[\\]{}])"
            ))
            .unwrap(),
            handler: operator_handler,
        },
    ];
}

#[derive(Clone)]
pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            pos: 0,
            tokens: vec![],
            source,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Span covering the next `len` bytes of source.
    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: Position(self.pos as u32, Rc::clone(&self.file)),
            end: Position((self.pos + len) as u32, Rc::clone(&self.file)),
        }
    }

    fn last_kind(&self) -> Option<TokenKind> {
        self.tokens.last().map(|token| token.kind)
    }

    fn matched(&self, regex: &Regex) -> String {
        regex
            .find(self.remainder())
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }
}

fn name_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);

    lexer.push(MK_TOKEN!(TokenKind::Name, matched.clone(), lexer.span_of(matched.len())));
    lexer.advance_n(matched.len());
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);

    lexer.push(MK_TOKEN!(TokenKind::Number, matched.clone(), lexer.span_of(matched.len())));
    lexer.advance_n(matched.len());
}

fn indent_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);

    lexer.push(MK_TOKEN!(TokenKind::Indent, String::from("\n\t"), lexer.span_of(matched.len())));
    lexer.advance_n(matched.len());
}

fn newline_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);

    lexer.push(MK_TOKEN!(TokenKind::Newline, String::from("\n"), lexer.span_of(matched.len())));
    lexer.advance_n(matched.len());
}

fn tab_handler(lexer: &mut Lexer, _regex: &Regex) {
    // Only leading tabs carry indentation; the rest is whitespace.
    if matches!(lexer.last_kind(), Some(TokenKind::Indent) | Some(TokenKind::Tab)) {
        lexer.push(MK_TOKEN!(TokenKind::Tab, String::from("\t"), lexer.span_of(1)));
    }

    lexer.advance_n(1);
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    lexer.advance_n(matched.len());
}

fn operator_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);

    lexer.push(MK_TOKEN!(TokenKind::Operator, matched.clone(), lexer.span_of(matched.len())));
    lexer.advance_n(matched.len());
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let string_literal = &matched[1..matched.len() - 1];

    let mut result = String::new();
    let mut chars = string_literal.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        match chars.peek() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('\\') => result.push('\\'),
            Some('0') => result.push('\0'),
            _ => {
                result.push(ch); // Keep the backslash
                continue;
            }
        }
        chars.next();
    }

    lexer.push(MK_TOKEN!(TokenKind::String, result, lexer.span_of(matched.len())));
    lexer.advance_n(matched.len());
}

pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let pattern = PATTERNS
            .iter()
            .find(|pattern| pattern.regex.is_match(lex.remainder()));

        match pattern {
            Some(pattern) => (pattern.handler)(&mut lex, &pattern.regex),
            None => {
                return Err(Error::new(
                    ErrorImpl::UnrecognisedToken {
                        token: lex.at().to_string(),
                    },
                    Position(lex.pos as u32, Rc::clone(&lex.file)),
                ));
            }
        }
    }

    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), lex.span_of(0)));
    Ok(lex.tokens)
}
