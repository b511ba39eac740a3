//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Position;
use std::rc::Rc;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "`".to_string(),
        },
        Position(10, Rc::new("test.sqy".to_string())),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_error_position() {
    let pos = Position(42, Rc::new("test.sqy".to_string()));
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: "`)`".to_string(),
            found: "]".to_string(),
        },
        pos.clone(),
    );

    assert_eq!(error.get_position().0, 42);
}

#[test]
fn test_control_construct_error() {
    let error = Error::new(
        ErrorImpl::ControlConstruct {
            construct: "while",
            message: "no statement found after `::`".to_string(),
        },
        Position::null(),
    );

    assert_eq!(error.get_error_name(), "ControlConstructError");
    assert_eq!(
        error.to_string(),
        "while statement error: no statement found after `::`"
    );
}

#[test]
fn test_undefined_behavior_error() {
    let error = Error::new(
        ErrorImpl::UndefinedBehavior {
            symbol: ")".to_string(),
            role: "leaf",
        },
        Position::null(),
    );

    assert_eq!(error.get_error_name(), "UndefinedBehavior");
    assert_eq!(error.get_tip().to_string(), "`)` cannot be used in leaf position");
}

#[test]
fn test_unresolved_name_error() {
    let error = Error::new(
        ErrorImpl::UnresolvedName {
            name: "foo".to_string(),
        },
        Position::null(),
    );

    assert_eq!(error.get_error_name(), "UnresolvedName");
    assert!(matches!(error.kind(), ErrorImpl::UnresolvedName { name } if name == "foo"));
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "`".to_string(),
        },
        Position::null(),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::UnknownToken {
            token: "@".to_string(),
        },
        Position::null(),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert_eq!(tip, "Unknown operator `@`"),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}
