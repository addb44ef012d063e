use crate::ast::Ast;
use crate::context::ParseContext;
use crate::error::ParseError;

/// Outcome of a translation attempt.
///
/// `Matched` with an empty vector is a success that produced no nodes, as
/// returned by an optional or repeated element that matched zero times.
#[derive(Debug, Clone, PartialEq)]
pub enum Translation {
    Matched(Vec<Ast>),
    NotMatched,
}

impl Translation {
    pub fn is_matched(&self) -> bool {
        matches!(self, Translation::Matched(_))
    }

    pub fn into_nodes(self) -> Option<Vec<Ast>> {
        match self {
            Translation::Matched(nodes) => Some(nodes),
            Translation::NotMatched => None,
        }
    }
}

/// A grammar element that translates the next tokens into AST nodes.
///
/// Implementations must leave the stream untouched when returning
/// [`Translation::NotMatched`] or an error; wrapping the body in
/// [`ParseContext::transaction`] takes care of that.
pub trait Translator {
    fn translate(&self, cx: &mut ParseContext<'_>) -> Result<Translation, ParseError>;
}

impl<T> Translator for Box<T>
where
    T: Translator + ?Sized,
{
    fn translate(&self, cx: &mut ParseContext<'_>) -> Result<Translation, ParseError> {
        (**self).translate(cx)
    }
}
