//! Common Framework
//!
//! Types shared by lexer-framework and parser-framework: source positions,
//! classified tokens, and the pull contract that connects a lexer to a
//! token stream.

pub mod position;
pub mod token;
pub mod token_input;

pub use position::Position;
pub use token::{Token, TERMINAL};
pub use token_input::TokenInput;
