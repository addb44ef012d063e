use crate::ast::Ast;
use crate::context::ParseContext;
use crate::error::ParseError;
use crate::expected::Expected;
use crate::traits::{Translation, Translator};
use common_framework::TERMINAL;

/// Matches exactly one token of the given type.
pub struct Terminal {
    token_type: String,
    id: Option<String>,
}

impl Terminal {
    pub fn new(token_type: impl Into<String>) -> Self {
        Self {
            token_type: token_type.into(),
            id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }
}

impl Translator for Terminal {
    fn translate(&self, cx: &mut ParseContext<'_>) -> Result<Translation, ParseError> {
        let next = cx.stream().lookup().cloned();
        let token = match next {
            Some(token) if token.matches_type(&self.token_type) => token,
            found => {
                cx.record_failure(Expected::Type(self.token_type.clone()), found);
                return Ok(Translation::NotMatched);
            }
        };
        let mut node = Ast::with_text(TERMINAL, token.content());
        node.set_attr("type", &self.token_type);
        let mut node = cx.grammar().transform_terminal(&self.token_type, node)?;
        if let Some(id) = &self.id {
            node.set_id(id);
        }
        cx.stream().consume();
        cx.clear_failure();
        Ok(Translation::Matched(vec![node]))
    }
}

/// Refers to a rule by name. The rule is looked up when translating, so
/// rules may refer to each other regardless of registration order.
pub struct RuleRef {
    name: String,
    id: Option<String>,
}

impl RuleRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Translator for RuleRef {
    fn translate(&self, cx: &mut ParseContext<'_>) -> Result<Translation, ParseError> {
        let rule = cx
            .grammar()
            .get_rule(&self.name)
            .ok_or_else(|| ParseError::UndefinedRule(self.name.clone()))?;
        let mut translation = rule.translate(cx)?;
        if let (Translation::Matched(nodes), Some(id)) = (&mut translation, &self.id) {
            tag(nodes, id);
        }
        Ok(translation)
    }
}

/// Matches its elements in order, all or nothing.
#[derive(Default)]
pub struct Sequence {
    elements: Vec<(Box<dyn Translator>, Option<String>)>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, element: impl Translator + 'static) -> Self {
        self.elements.push((Box::new(element), None));
        self
    }

    /// Adds an element whose nodes are all tagged with `id`.
    pub fn add_with_id(mut self, element: impl Translator + 'static, id: impl Into<String>) -> Self {
        self.elements.push((Box::new(element), Some(id.into())));
        self
    }
}

impl Translator for Sequence {
    fn translate(&self, cx: &mut ParseContext<'_>) -> Result<Translation, ParseError> {
        cx.transaction(|cx| {
            let mut nodes = Vec::new();
            for (element, id) in &self.elements {
                let Translation::Matched(mut produced) = element.translate(cx)? else {
                    return Ok(Translation::NotMatched);
                };
                if let Some(id) = id {
                    tag(&mut produced, id);
                }
                nodes.append(&mut produced);
            }
            Ok(Translation::Matched(nodes))
        })
    }
}

/// Tries its choices in order; the first one that matches wins.
#[derive(Default)]
pub struct Alternatives {
    choices: Vec<Box<dyn Translator>>,
}

impl Alternatives {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, choice: impl Translator + 'static) -> Self {
        self.choices.push(Box::new(choice));
        self
    }
}

impl Translator for Alternatives {
    fn translate(&self, cx: &mut ParseContext<'_>) -> Result<Translation, ParseError> {
        cx.transaction(|cx| {
            for choice in &self.choices {
                let translation = choice.translate(cx)?;
                if translation.is_matched() {
                    return Ok(translation);
                }
            }
            Ok(Translation::NotMatched)
        })
    }
}

/// Matches its element once or not at all. Never fails to match.
pub struct ZeroToOne {
    element: Box<dyn Translator>,
}

impl ZeroToOne {
    pub fn new(element: impl Translator + 'static) -> Self {
        Self {
            element: Box::new(element),
        }
    }
}

impl Translator for ZeroToOne {
    fn translate(&self, cx: &mut ParseContext<'_>) -> Result<Translation, ParseError> {
        match cx.transaction(|cx| self.element.translate(cx))? {
            Translation::Matched(nodes) => Ok(Translation::Matched(nodes)),
            Translation::NotMatched => Ok(Translation::Matched(Vec::new())),
        }
    }
}

/// Matches its element zero or more times.
pub struct Many {
    element: Box<dyn Translator>,
}

impl Many {
    pub fn new(element: impl Translator + 'static) -> Self {
        Self {
            element: Box::new(element),
        }
    }
}

impl Translator for Many {
    fn translate(&self, cx: &mut ParseContext<'_>) -> Result<Translation, ParseError> {
        let (nodes, _) = repeat(cx, self.element.as_ref())?;
        Ok(Translation::Matched(nodes))
    }
}

/// Matches its element one or more times.
pub struct OneToMany {
    element: Box<dyn Translator>,
}

impl OneToMany {
    pub fn new(element: impl Translator + 'static) -> Self {
        Self {
            element: Box::new(element),
        }
    }
}

impl Translator for OneToMany {
    fn translate(&self, cx: &mut ParseContext<'_>) -> Result<Translation, ParseError> {
        cx.transaction(|cx| {
            let (nodes, count) = repeat(cx, self.element.as_ref())?;
            if count == 0 {
                return Ok(Translation::NotMatched);
            }
            Ok(Translation::Matched(nodes))
        })
    }
}

/// Translates `element` until it stops matching. Returns the collected
/// nodes and the number of successful iterations.
///
/// Stops after an iteration that matched without consuming a token, since
/// repeating it could never make progress.
fn repeat(
    cx: &mut ParseContext<'_>,
    element: &dyn Translator,
) -> Result<(Vec<Ast>, usize), ParseError> {
    let mut nodes = Vec::new();
    let mut count = 0;
    loop {
        let before = cx.stream().index();
        let Translation::Matched(mut produced) = cx.transaction(|cx| element.translate(cx))? else {
            break;
        };
        count += 1;
        nodes.append(&mut produced);
        if cx.stream().index() == before {
            tracing::warn!(
                token_index = before,
                "no progress made by repeated element, stopping repetition"
            );
            break;
        }
    }
    Ok((nodes, count))
}

fn tag(nodes: &mut [Ast], id: &str) {
    for node in nodes {
        node.set_id(id);
    }
}

pub fn term(token_type: impl Into<String>) -> Terminal {
    Terminal::new(token_type)
}

pub fn rule_ref(name: impl Into<String>) -> RuleRef {
    RuleRef::new(name)
}

pub fn seq() -> Sequence {
    Sequence::new()
}

pub fn alt() -> Alternatives {
    Alternatives::new()
}

pub fn opt(element: impl Translator + 'static) -> ZeroToOne {
    ZeroToOne::new(element)
}

pub fn many(element: impl Translator + 'static) -> Many {
    Many::new(element)
}

pub fn one_or_more(element: impl Translator + 'static) -> OneToMany {
    OneToMany::new(element)
}
