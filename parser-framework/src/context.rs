use crate::error::ParseError;
use crate::expected::Expected;
use crate::grammar::Grammar;
use crate::stream::TokenStream;
use crate::traits::Translation;
use common_framework::Token;

/// The most recent terminal mismatch, kept as the diagnostic anchor of a
/// failed parse.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub expected: Expected,
    /// The token found instead, or `None` if the input had ended.
    pub found: Option<Token>,
}

impl Failure {
    pub fn into_error(self) -> ParseError {
        match self.found {
            Some(token) => ParseError::UnexpectedToken { token },
            None => ParseError::NoTokenFound {
                expected: self.expected,
            },
        }
    }
}

/// State of one in-flight parse.
///
/// Separates what changes during a parse (the token stream and the failure
/// anchor) from the grammar, which is only read.
pub struct ParseContext<'a> {
    grammar: &'a Grammar,
    stream: &'a mut TokenStream,
    last_failure: Option<Failure>,
}

impl<'a> ParseContext<'a> {
    pub fn new(grammar: &'a Grammar, stream: &'a mut TokenStream) -> Self {
        Self {
            grammar,
            stream,
            last_failure: None,
        }
    }

    pub fn grammar(&self) -> &'a Grammar {
        self.grammar
    }

    pub fn stream(&mut self) -> &mut TokenStream {
        self.stream
    }

    pub fn last_failure(&self) -> Option<&Failure> {
        self.last_failure.as_ref()
    }

    pub fn record_failure(&mut self, expected: Expected, found: Option<Token>) {
        self.last_failure = Some(Failure { expected, found });
    }

    pub fn clear_failure(&mut self) {
        self.last_failure = None;
    }

    pub fn into_failure(self) -> Option<Failure> {
        self.last_failure
    }

    /// Runs `f` inside a stream transaction.
    ///
    /// Commits when `f` matched; rolls back when it did not match or failed
    /// with an error.
    pub fn transaction<F>(&mut self, f: F) -> Result<Translation, ParseError>
    where
        F: FnOnce(&mut Self) -> Result<Translation, ParseError>,
    {
        self.stream.begin_transaction();
        let result = f(self);
        match &result {
            Ok(Translation::Matched(_)) => self.stream.commit_transaction(),
            _ => self.stream.rollback_transaction(),
        }
        result
    }
}
