//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into the token sequence the parser pulls from. It handles:
//!
//! - Tokenization of source code using regex patterns
//! - Names, numeric and string literals, and operator text
//! - Layout markers: NEWLINE, INDENT (newline plus deeper indentation),
//!   leading TABs and `;`
//! - Token position tracking for error reporting
//! - Comments and whitespace handling
//!
//! Keywords are not decided here: a name is a keyword only if the grammar
//! registry knows it.

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
