//! The attributed tree produced by a parse.
//!
//! Nodes own their children. There is no parent pointer: a node is moved
//! into its new parent when a transform relocates it, and the parent of a
//! node is handed to [`Visitor`] callbacks during a walk.

use crate::error::ParseError;
use indexmap::IndexMap;
use std::fmt::Write as _;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Ast {
    name: String,
    text: String,
    attrs: IndexMap<String, String>,
    /// Routing tag read by the enclosing rule's transform. Kept apart from
    /// `attrs` so it cannot clash with a user attribute named `id`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    id: Option<String>,
    children: Vec<Ast>,
}

/// Controls how a walk proceeds after [`Visitor::enter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    Continue,
    SkipChildren,
    Stop,
}

/// Depth-first visitor over an [`Ast`].
///
/// `leave` is not called for a node whose `enter` returned [`Walk::Stop`].
pub trait Visitor {
    fn enter(&mut self, node: &Ast, parent: Option<&Ast>) -> Walk {
        let _ = (node, parent);
        Walk::Continue
    }

    fn leave(&mut self, node: &Ast, parent: Option<&Ast>) {
        let _ = (node, parent);
    }
}

impl Ast {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = text.into();
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attrs.contains_key(key)
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn remove_attr(&mut self, key: &str) -> Option<String> {
        self.attrs.shift_remove(key)
    }

    /// Attributes in insertion order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) -> &mut Self {
        self.id = Some(id.into());
        self
    }

    pub fn clear_id(&mut self) -> &mut Self {
        self.id = None;
        self
    }

    pub fn children(&self) -> &[Ast] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Ast> {
        &mut self.children
    }

    pub fn add_child(&mut self, child: Ast) -> &mut Self {
        self.children.push(child);
        self
    }

    pub fn into_children(self) -> Vec<Ast> {
        self.children
    }

    pub fn children_by_id(&self, id: &str) -> Vec<&Ast> {
        self.children
            .iter()
            .filter(|child| child.id() == Some(id))
            .collect()
    }

    pub fn children_by_name(&self, name: &str) -> Vec<&Ast> {
        self.children
            .iter()
            .filter(|child| child.name == name)
            .collect()
    }

    pub fn child_by_id(&self, id: &str) -> Option<&Ast> {
        self.children.iter().find(|child| child.id() == Some(id))
    }

    /// Removes all children tagged `id`, clearing the tag so the nodes can be
    /// placed into another tree.
    pub fn take_children_by_id(&mut self, id: &str) -> Vec<Ast> {
        let (mut taken, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.children)
            .into_iter()
            .partition(|child| child.id() == Some(id));
        self.children = kept;
        for child in &mut taken {
            child.clear_id();
        }
        taken
    }

    /// Removes the first child tagged `id` and clears its tag.
    pub fn take_child_by_id(&mut self, id: &str) -> Result<Ast, ParseError> {
        let index = self
            .children
            .iter()
            .position(|child| child.id() == Some(id))
            .ok_or_else(|| {
                ParseError::MalformedTransform(format!(
                    "node '{}' has no child with id '{id}'",
                    self.name
                ))
            })?;
        let mut child = self.children.remove(index);
        child.clear_id();
        Ok(child)
    }

    /// Replaces the child at `index`, or removes it when `replacement` is
    /// `None`. Returns the previous child.
    pub fn replace_child(&mut self, index: usize, replacement: Option<Ast>) -> Option<Ast> {
        if index >= self.children.len() {
            return None;
        }
        match replacement {
            Some(node) => Some(std::mem::replace(&mut self.children[index], node)),
            None => Some(self.children.remove(index)),
        }
    }

    /// Walks the tree depth-first.
    pub fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        self.walk_from(None, visitor);
    }

    fn walk_from<V: Visitor + ?Sized>(&self, parent: Option<&Ast>, visitor: &mut V) -> bool {
        match visitor.enter(self, parent) {
            Walk::Stop => return false,
            Walk::SkipChildren => {}
            Walk::Continue => {
                for child in &self.children {
                    if !child.walk_from(Some(self), visitor) {
                        return false;
                    }
                }
            }
        }
        visitor.leave(self, parent);
        true
    }

    /// Renders the tree as indented XML, `indent` spaces per level.
    pub fn to_xml(&self, indent: usize) -> String {
        let mut writer = XmlWriter {
            out: String::new(),
            indent,
            depth: 0,
        };
        self.walk(&mut writer);
        writer.out
    }
}

struct XmlWriter {
    out: String,
    indent: usize,
    depth: usize,
}

impl XmlWriter {
    fn pad(&mut self, depth: usize) {
        self.out.extend(std::iter::repeat(' ').take(depth * self.indent));
    }
}

impl Visitor for XmlWriter {
    fn enter(&mut self, node: &Ast, _parent: Option<&Ast>) -> Walk {
        self.pad(self.depth);
        let _ = write!(self.out, "<{}", node.name);
        for (key, value) in node.attrs() {
            let _ = write!(self.out, " {key}=\"{}\"", escape(value));
        }
        if let Some(id) = node.id() {
            let _ = write!(self.out, " id=\"{}\"", escape(id));
        }

        match (node.text.is_empty(), node.children.is_empty()) {
            (true, true) => {
                self.out.push_str("/>\n");
                Walk::SkipChildren
            }
            (false, true) => {
                let _ = writeln!(self.out, ">{}</{}>", escape(&node.text), node.name);
                Walk::SkipChildren
            }
            (text_empty, false) => {
                self.out.push_str(">\n");
                self.depth += 1;
                if !text_empty {
                    self.pad(self.depth);
                    let _ = writeln!(self.out, "{}", escape(&node.text));
                }
                Walk::Continue
            }
        }
    }

    fn leave(&mut self, node: &Ast, _parent: Option<&Ast>) {
        if node.children.is_empty() {
            return;
        }
        self.depth -= 1;
        self.pad(self.depth);
        let _ = writeln!(self.out, "</{}>", node.name);
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_replace_child_out_of_range() {
        let mut node = Ast::new("list");
        node.add_child(Ast::new("item"));
        assert_eq!(node.replace_child(3, None), None);
        assert_eq!(node.children().len(), 1);
    }
}
