pub mod ast;
pub mod context;
pub mod error;
pub mod expected;
pub mod grammar;
pub mod stream;
pub mod traits;

pub use ast::{Ast, Visitor, Walk};
pub use common_framework::{Position, Token, TokenInput, TERMINAL};
pub use context::{Failure, ParseContext};
pub use error::ParseError;
pub use expected::Expected;
pub use grammar::{
    alt, many, one_or_more, opt, rule_ref, seq, term, Alternatives, Grammar, Many, OneToMany, Rule,
    RuleRef, Sequence, Terminal, Transform, ZeroToOne,
};
pub use stream::TokenStream;
pub use traits::{Translation, Translator};
