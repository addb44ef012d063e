use crate::ast::Ast;
use crate::context::ParseContext;
use crate::error::ParseError;
use crate::traits::{Translation, Translator};

/// Rewrites a freshly built node. Invoked once per successful production.
pub type Transform = Box<dyn Fn(Ast) -> Result<Ast, ParseError>>;

/// A named grammar element with an optional transform.
///
/// On success the nodes produced by `content` become the children of a new
/// node named after the rule. That node, or whatever the transform returns
/// in its place, is the rule's single result.
pub struct Rule {
    name: String,
    content: Box<dyn Translator>,
    transform: Option<Transform>,
}

impl Rule {
    pub fn new(name: impl Into<String>, content: impl Translator + 'static) -> Self {
        Self {
            name: name.into(),
            content: Box::new(content),
            transform: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_transform<F>(&mut self, transform: F) -> &mut Self
    where
        F: Fn(Ast) -> Result<Ast, ParseError> + 'static,
    {
        self.transform = Some(Box::new(transform));
        self
    }

    pub fn clear_transform(&mut self) -> &mut Self {
        self.transform = None;
        self
    }

    pub fn has_transform(&self) -> bool {
        self.transform.is_some()
    }
}

impl Translator for Rule {
    fn translate(&self, cx: &mut ParseContext<'_>) -> Result<Translation, ParseError> {
        cx.transaction(|cx| {
            let Translation::Matched(children) = self.content.translate(cx)? else {
                tracing::trace!(rule = %self.name, "rule not matched");
                return Ok(Translation::NotMatched);
            };

            let mut node = Ast::new(&self.name);
            for child in children {
                node.add_child(child);
            }
            let node = match &self.transform {
                Some(transform) => transform(node)?,
                None => node,
            };
            tracing::trace!(rule = %self.name, node = node.name(), "rule matched");
            Ok(Translation::Matched(vec![node]))
        })
    }
}
