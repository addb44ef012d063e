use crate::expected::Expected;
use common_framework::Token;
use thiserror::Error;

/// Hard parse errors.
///
/// A combinator that simply does not match returns
/// [`Translation::NotMatched`](crate::Translation::NotMatched); these
/// variants are reserved for the top-level outcome of a parse, for
/// `consume_expected` and for programming errors in transforms.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("No token could be found for type(s) {expected}")]
    NoTokenFound { expected: Expected },

    #[error(
        "Unexpected token '{}' at line {}, column {}",
        .token.content(),
        .token.start().line,
        .token.start().column
    )]
    UnexpectedToken { token: Token },

    #[error("malformed transform: {0}")]
    MalformedTransform(String),

    #[error("rule '{0}' is not defined")]
    UndefinedRule(String),

    #[error("grammar has no root rule")]
    NoRootRule,

    #[error("{0}")]
    Other(String),
}

impl ParseError {
    /// Returns the offending token, if the error carries one.
    pub fn token(&self) -> Option<&Token> {
        match self {
            ParseError::UnexpectedToken { token } => Some(token),
            _ => None,
        }
    }
}
