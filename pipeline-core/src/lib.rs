//! Drives a lexer and a grammar together: characters in, AST out.
//!
//! ```ignore
//! let mut parser = Parser::new();
//! parser.lexer_mut().add_terminal("[a-z]+", "ID").add_keyword("or");
//! let grammar = parser.grammar_mut();
//! grammar.rule("disj", seq().add(term("ID")).add(many(seq().add(term("OR")).add(term("ID")))), true);
//!
//! match parser.parse_from_text("a or b") {
//!     Some(ast) => println!("{}", ast.to_xml(2)),
//!     None => eprintln!("{}", parser.error()),
//! }
//! ```

use lexer_framework::{CharSource, FileSource, Lexer, LexerError, StringSource};
use parser_framework::{Ast, Grammar, ParseError, TokenStream};
use std::io;
use std::path::Path;
use thiserror::Error;

pub use common_framework::{Position, Token};

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid lexer configuration: {0}")]
    Lexer(#[from] LexerError),

    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A lexer configuration and a grammar, plus the outcome of the last parse.
#[derive(Debug, Default)]
pub struct Parser {
    lexer: Lexer,
    grammar: Grammar,
    last_error: Option<Error>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(lexer: Lexer, grammar: Grammar) -> Self {
        Self {
            lexer,
            grammar,
            last_error: None,
        }
    }

    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    pub fn lexer_mut(&mut self) -> &mut Lexer {
        &mut self.lexer
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn grammar_mut(&mut self) -> &mut Grammar {
        &mut self.grammar
    }

    /// Parses everything `source` yields.
    ///
    /// The source is opened before and closed after the parse, also when
    /// the parse fails.
    pub fn parse<S>(&self, source: S) -> Result<Ast, Error>
    where
        S: CharSource + 'static,
    {
        let tokenizer = self.lexer.tokenizer(source)?;
        let mut stream = TokenStream::new(tokenizer);
        stream.open()?;
        let result = self.grammar.parse(&mut stream);
        stream.close();
        Ok(result?)
    }

    /// Parses `text`. On failure returns `None` and keeps the error for
    /// [`error`](Self::error).
    pub fn parse_from_text(&mut self, text: &str) -> Option<Ast> {
        let result = self.parse(StringSource::new(text));
        self.record(result)
    }

    pub fn parse_from_source<S>(&mut self, source: S) -> Option<Ast>
    where
        S: CharSource + 'static,
    {
        let result = self.parse(source);
        self.record(result)
    }

    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Option<Ast> {
        let result = self.parse(FileSource::new(path));
        self.record(result)
    }

    /// Describes the last failure, or returns an empty string if the last
    /// parse succeeded.
    pub fn error(&self) -> String {
        self.last_error
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    /// Lexes `text` without parsing it.
    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>, Error> {
        Ok(self.lexer.tokenize(text)?)
    }

    fn record(&mut self, result: Result<Ast, Error>) -> Option<Ast> {
        match result {
            Ok(ast) => {
                self.last_error = None;
                Some(ast)
            }
            Err(err) => {
                tracing::debug!(%err, "parse failed");
                self.last_error = Some(err);
                None
            }
        }
    }
}
