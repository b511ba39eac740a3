use std::fmt::Display;

use crate::Span;

/// Symbol identity of a numeric or string literal.
pub const CONST: &str = "Const";
/// Symbol identity of an identifier that is not a registered keyword.
pub const NAME: &str = "Name";
pub const END: &str = "(end)";
pub const NEWLINE: &str = "(newline)";
/// A newline followed by deeper indentation.
pub const INDENT: &str = "(indent)";
pub const TAB: &str = "(tab)";
pub const SEMICOLON: &str = ";";

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    Name,
    Operator,
    Newline,
    Indent,
    Tab,
    Semicolon,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {:?}}}", self.kind, self.value)
    }
}

impl Token {
    /// Text used when the token shows up in an error message.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::EOF => String::from(END),
            TokenKind::Newline => String::from("NEWLINE"),
            TokenKind::Indent => String::from("INDENT"),
            TokenKind::Tab => String::from("TAB"),
            _ => self.value.clone(),
        }
    }

    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    pub fn debug(&self) {
        if self.is_one_of_many(&[TokenKind::String, TokenKind::Name, TokenKind::Number]) {
            println!("{} ({})", self.kind, self.value);
        } else {
            println!("{} ()", self.kind);
        }
    }
}
