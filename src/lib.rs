#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::{
    ast::ast::Node,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse,
    scope::{
        fold::{fold_constants, ConstantFolder, FoldReport},
        scope::Scope,
    },
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod scope;

extern crate regex;

/// Byte offset into a source, tagged with the source's name.
#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Result of running the whole pipeline over one source.
#[derive(Debug, Clone)]
pub struct Program {
    pub module: Node,
    pub scope: Scope,
    pub folds: FoldReport,
}

/// Tokenizes, parses and constant-folds `source`.
pub fn build_ast(source: &str, file: Option<String>) -> Result<Program, Error> {
    let file_name = file.clone().unwrap_or_else(|| String::from("shell"));
    let tokens = tokenize(source.to_string(), file)?;
    let (module, mut scope) = parse(tokens, Rc::new(file_name))?;
    let folds = fold_constants(&module, &mut scope, &ConstantFolder);

    Ok(Program {
        module,
        scope,
        folds,
    })
}

/// Returns the 1-based line number, the line text and the column of a byte
/// offset. Offsets past the end point just after the last character.
pub fn line_at_position(source: &str, position: u32) -> (usize, String, usize) {
    let pos = (position as usize).min(source.len());
    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if pos < end {
            return (line_number, line.to_string(), pos - start);
        }

        start = end;
        line_number += 1;
    }

    // End of input: stay on the last line.
    match source.split_inclusive('\n').last() {
        Some(line) if !line.ends_with('\n') => (line_number - 1, line.to_string(), line.len()),
        _ => (line_number, String::new(), 0),
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_line_at_position() {
        let source = "Hello, world!\nfoo\n\nTesting { }\n";

        let (line_number, line, line_pos) = super::line_at_position(source, 10);
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::line_at_position(source, 27);
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }\n");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_line_at_end_of_input() {
        let (line_number, line, line_pos) = super::line_at_position("a: 1\nb +", 100);
        assert_eq!(line_number, 2);
        assert_eq!(line, "b +");
        assert_eq!(line_pos, 3);

        assert_eq!(super::line_at_position("", 0), (1, String::new(), 0));
    }

    #[test]
    fn test_build_ast() {
        let program = super::build_ast("x: 1 + 2", None).unwrap();
        assert_eq!(
            program.module.to_string(),
            "Module([Assign(Name (x),Add(Const (1),Const (2)))])"
        );
        assert_eq!(program.scope.to_string(), "{x: 3}");
        assert!(program.folds.is_clean());
    }
}

pub fn display_error(error: &Error, source: &str) {
    /*
        Error: ControlConstructError (`if` statement: no statement found after `then`)
        -> main.sqy
           |
         3 | if a then
           | ^
    */

    let position = error.get_position();
    let (line, line_text, line_pos) = line_at_position(source, position.0);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    if let ErrorTip::None = error.get_tip() {
        println!("Error: {} ({})", error.get_error_name(), error);
    } else {
        println!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    println!("-> {}", position.1);
    println!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    println!("{} | {}", line_string, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    println!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count();

    (String::from(&string[start..]), start)
}
