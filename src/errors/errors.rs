use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::UndefinedBehavior { .. } => "UndefinedBehavior",
            ErrorImpl::UnknownToken { .. } => "UnknownToken",
            ErrorImpl::Indentation { .. } => "IndentationError",
            ErrorImpl::ControlConstruct { .. } => "ControlConstructError",
            ErrorImpl::BadListOrLambda { .. } => "BadListOrLambda",
            ErrorImpl::UnresolvedName { .. } => "UnresolvedName",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::Evaluation { .. } => "EvaluationError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { expected, found } => ErrorTip::Suggestion(format!(
                "Expected {}, found `{}`",
                expected, found
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::UndefinedBehavior { symbol, role } => ErrorTip::Suggestion(format!(
                "`{}` cannot be used in {} position",
                symbol, role
            )),
            ErrorImpl::UnknownToken { token } => {
                ErrorTip::Suggestion(format!("Unknown operator `{}`", token))
            }
            ErrorImpl::Indentation { message } => ErrorTip::Suggestion(message.clone()),
            ErrorImpl::ControlConstruct { construct, message } => {
                ErrorTip::Suggestion(format!("`{}` statement: {}", construct, message))
            }
            ErrorImpl::BadListOrLambda { message } => ErrorTip::Suggestion(message.clone()),
            ErrorImpl::UnresolvedName { name } => {
                ErrorTip::Suggestion(format!("Name `{}` is not defined", name))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::Evaluation { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: expected {expected}, found {found:?}")]
    UnexpectedToken { expected: String, found: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("{symbol:?} has no behavior in {role} position")]
    UndefinedBehavior { symbol: String, role: &'static str },
    #[error("unknown operator: {token:?}")]
    UnknownToken { token: String },
    #[error("indentation error: {message}")]
    Indentation { message: String },
    #[error("{construct} statement error: {message}")]
    ControlConstruct {
        construct: &'static str,
        message: String,
    },
    #[error("bad list or lambda: {message}")]
    BadListOrLambda { message: String },
    #[error("unresolved name {name:?}")]
    UnresolvedName { name: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("cannot evaluate: {message}")]
    Evaluation { message: String },
}
