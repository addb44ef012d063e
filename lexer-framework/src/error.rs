use thiserror::Error;

/// Errors in a lexer configuration, reported when a tokenizer is created.
#[derive(Debug, Error)]
pub enum LexerError {
    #[error("empty {what} is not allowed")]
    EmptySequence { what: &'static str },

    #[error("invalid terminal pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
