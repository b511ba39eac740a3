//! Error types and error handling for the parser.
//!
//! This module defines the error types raised while turning source text
//! into an AST. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing, parsing and constant folding
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions
//!
//! Every error is fatal to the parse that raised it; callers retry with
//! fresh input.

pub mod errors;

#[cfg(test)]
mod tests;
