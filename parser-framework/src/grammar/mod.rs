//! Grammar registry and combinators.
//!
//! A [`Grammar`] owns named [`Rule`]s. Rules are built from the combinators
//! in [`combinators`] and refer to each other through [`RuleRef`], which
//! resolves names at translate time.

pub mod combinators;
pub mod rule;

pub use combinators::{
    alt, many, one_or_more, opt, rule_ref, seq, term, Alternatives, Many, OneToMany, RuleRef,
    Sequence, Terminal, ZeroToOne,
};
pub use rule::{Rule, Transform};

use crate::ast::Ast;
use crate::context::{Failure, ParseContext};
use crate::error::ParseError;
use crate::stream::TokenStream;
use crate::traits::{Translation, Translator};
use indexmap::IndexMap;
use std::fmt;

#[derive(Default)]
pub struct Grammar {
    rules: IndexMap<String, Rule>,
    root: Option<String>,
    terminal_transforms: IndexMap<String, Transform>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule and returns it for further configuration.
    ///
    /// Registering a name twice replaces the earlier rule.
    pub fn rule(
        &mut self,
        name: &str,
        content: impl Translator + 'static,
        is_root: bool,
    ) -> &mut Rule {
        if self.rules.contains_key(name) {
            tracing::warn!(rule = name, "replacing previously registered rule");
        }
        if is_root {
            self.root = Some(name.to_string());
        }
        let (index, _) = self
            .rules
            .insert_full(name.to_string(), Rule::new(name, content));
        &mut self.rules[index]
    }

    pub fn get_rule(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    pub fn get_rule_mut(&mut self, name: &str) -> Option<&mut Rule> {
        self.rules.get_mut(name)
    }

    /// Rules in registration order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    pub fn root(&self) -> Option<&Rule> {
        self.root.as_deref().and_then(|name| self.rules.get(name))
    }

    pub fn set_root(&mut self, name: &str) -> Result<(), ParseError> {
        if !self.rules.contains_key(name) {
            return Err(ParseError::UndefinedRule(name.to_string()));
        }
        self.root = Some(name.to_string());
        Ok(())
    }

    pub fn set_rule_transform<F>(&mut self, name: &str, transform: F) -> Result<(), ParseError>
    where
        F: Fn(Ast) -> Result<Ast, ParseError> + 'static,
    {
        let rule = self
            .rules
            .get_mut(name)
            .ok_or_else(|| ParseError::UndefinedRule(name.to_string()))?;
        rule.set_transform(transform);
        Ok(())
    }

    /// Registers a transform applied to every node matched by a terminal of
    /// `token_type`.
    pub fn set_terminal_transform<F>(&mut self, token_type: &str, transform: F)
    where
        F: Fn(Ast) -> Result<Ast, ParseError> + 'static,
    {
        self.terminal_transforms
            .insert(token_type.to_string(), Box::new(transform));
    }

    pub(crate) fn transform_terminal(&self, token_type: &str, node: Ast) -> Result<Ast, ParseError> {
        match self.terminal_transforms.get(token_type) {
            Some(transform) => transform(node),
            None => Ok(node),
        }
    }

    pub fn term(&self, token_type: &str) -> Terminal {
        term(token_type)
    }

    pub fn rule_ref(&self, name: &str) -> RuleRef {
        rule_ref(name)
    }

    pub fn seq(&self) -> Sequence {
        seq()
    }

    pub fn alt(&self) -> Alternatives {
        alt()
    }

    pub fn opt(&self, element: impl Translator + 'static) -> ZeroToOne {
        opt(element)
    }

    pub fn many(&self, element: impl Translator + 'static) -> Many {
        many(element)
    }

    pub fn one_or_more(&self, element: impl Translator + 'static) -> OneToMany {
        one_or_more(element)
    }

    /// Runs the root rule against `stream`.
    ///
    /// Returns the raw translation together with the last recorded terminal
    /// mismatch. Leftover tokens are not checked.
    pub fn translate(
        &self,
        stream: &mut TokenStream,
    ) -> Result<(Translation, Option<Failure>), ParseError> {
        let root = self.root().ok_or(ParseError::NoRootRule)?;
        let mut cx = ParseContext::new(self, stream);
        let translation = root.translate(&mut cx)?;
        Ok((translation, cx.into_failure()))
    }

    /// Parses the whole of `stream` with the root rule.
    ///
    /// Fails if the root rule does not match, or if tokens remain after it.
    pub fn parse(&self, stream: &mut TokenStream) -> Result<Ast, ParseError> {
        let (translation, failure) = self.translate(stream)?;

        let Translation::Matched(nodes) = translation else {
            let err = match failure {
                Some(failure) => failure.into_error(),
                None => match stream.lookup() {
                    Some(token) => ParseError::UnexpectedToken {
                        token: token.clone(),
                    },
                    None => ParseError::Other("root rule did not match".to_string()),
                },
            };
            tracing::debug!(%err, "parse failed");
            return Err(err);
        };

        if let Some(token) = stream.lookup() {
            let err = ParseError::UnexpectedToken {
                token: token.clone(),
            };
            tracing::debug!(%err, "parse incomplete");
            return Err(err);
        }

        let node = nodes
            .into_iter()
            .next()
            .ok_or_else(|| ParseError::Other("root rule produced no node".to_string()))?;
        tracing::debug!(root = node.name(), "parse succeeded");
        Ok(node)
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("rules", &self.rules.keys().collect::<Vec<_>>())
            .field("root", &self.root)
            .field(
                "terminal_transforms",
                &self.terminal_transforms.keys().collect::<Vec<_>>(),
            )
            .finish()
    }
}
