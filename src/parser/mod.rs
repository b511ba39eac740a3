//! Parser module for building the Abstract Syntax Tree (AST).
//!
//! Expressions are parsed with a Pratt parser driven by a [`lookups::Grammar`]
//! registry: every symbol carries a left binding power plus optional NUD
//! (null denotation) and LED (left denotation) behavior. Statements and
//! blocks are layered on top and are sensitive to newlines, tab
//! indentation and `;`.
//!
//! While parsing, assignments and function declarations are recorded in a
//! flat [`crate::scope::scope::Scope`]. A `name(args)` form is a call when
//! the name is already known and a declaration otherwise.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
