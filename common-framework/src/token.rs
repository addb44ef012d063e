use crate::Position;
use indexmap::IndexSet;
use std::fmt;

/// Type tag given to spans that match no configured classifier.
pub const TERMINAL: &str = "terminal";

/// A classified slice of the character source.
///
/// `content` is exactly the consumed text, including the delimiters of
/// quoted strings. A token always carries at least one type tag; a
/// multi-type token carries several, in the order they were assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token {
    content: String,
    types: IndexSet<String>,
    start: Position,
    end: Position,
}

impl Token {
    /// Creates a token with a single type tag.
    pub fn new(
        content: impl Into<String>,
        token_type: impl Into<String>,
        start: Position,
        end: Position,
    ) -> Self {
        let mut types = IndexSet::with_capacity(1);
        types.insert(token_type.into());
        Self {
            content: content.into(),
            types,
            start,
            end,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the type tags in assignment order.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(String::as_str)
    }

    /// Returns the primary (first assigned) type tag.
    pub fn token_type(&self) -> &str {
        self.types.first().map(String::as_str).unwrap_or(TERMINAL)
    }

    pub fn matches_type(&self, token_type: &str) -> bool {
        self.types.contains(token_type)
    }

    /// Adds a further type tag, keeping the existing ones.
    pub fn add_type(&mut self, token_type: impl Into<String>) {
        self.types.insert(token_type.into());
    }

    /// Replaces all type tags by `token_type`.
    pub fn set_type(&mut self, token_type: impl Into<String>) {
        self.types.clear();
        self.types.insert(token_type.into());
    }

    /// Position of the first character.
    pub fn start(&self) -> Position {
        self.start
    }

    /// Position of the last character.
    pub fn end(&self) -> Position {
        self.end
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#[")?;
        for (i, ty) in self.types.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{ty}")?;
        }
        write!(
            f,
            "]: {} @ ({}, {})",
            self.content, self.start.line, self.start.column
        )
    }
}
