mod classify;
pub mod cursor;
pub mod error;
pub mod lexer;
pub mod source;
pub mod tokenizer;

pub use common_framework::{Position, Token, TokenInput, TERMINAL};
pub use cursor::{CharInfo, Cursor};
pub use error::LexerError;
pub use lexer::{CommentType, Lexer, StringType, Symbol, TerminalPattern, STRING};
pub use source::{CharSource, FileSource, StringSource};
pub use tokenizer::Tokenizer;
