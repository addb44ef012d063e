use crate::source::CharSource;
use common_framework::Position;
use std::collections::VecDeque;

/// A character together with the position it was read at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharInfo {
    pub ch: char,
    pub position: Position,
}

/// A cursor over a character source with a bounded lookahead window.
///
/// The window is sized to the longest delimiter the tokenizer needs to
/// recognise, so `starts_with` never has to look past it.
#[derive(Debug)]
pub struct Cursor<S> {
    source: S,
    buffer: VecDeque<CharInfo>,
    capacity: usize,
}

impl<S: CharSource> Cursor<S> {
    /// Creates a cursor that keeps up to `capacity` characters of lookahead.
    pub fn new(source: S, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            source,
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Returns the size of the lookahead window.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Tops the window up from the source.
    pub fn fill(&mut self) {
        while self.buffer.len() < self.capacity && self.source.has_more_chars() {
            let position = self.source.position();
            match self.source.next_char() {
                Some(ch) => self.buffer.push_back(CharInfo { ch, position }),
                None => break,
            }
        }
    }

    /// Returns true if the window is empty and the source is exhausted.
    pub fn is_eof(&mut self) -> bool {
        self.fill();
        self.buffer.is_empty()
    }

    /// Returns the next character without advancing the cursor.
    pub fn peek(&mut self) -> Option<char> {
        self.fill();
        self.buffer.front().map(|info| info.ch)
    }

    /// Returns the position of the next character.
    pub fn position(&mut self) -> Position {
        self.fill();
        self.buffer
            .front()
            .map(|info| info.position)
            .unwrap_or_else(|| self.source.position())
    }

    /// Returns true if the window begins with `seq`.
    ///
    /// An empty `seq` never matches.
    pub fn starts_with(&mut self, seq: &str) -> bool {
        if seq.is_empty() {
            return false;
        }
        self.fill();
        let mut window = self.buffer.iter();
        seq.chars()
            .all(|expected| window.next().is_some_and(|info| info.ch == expected))
    }

    /// Advances the cursor by one character.
    pub fn advance(&mut self) -> Option<CharInfo> {
        self.fill();
        let info = self.buffer.pop_front()?;
        self.fill();
        Some(info)
    }

    /// Consumes up to `n` characters, returning them in order.
    pub fn consume(&mut self, n: usize) -> Vec<CharInfo> {
        let mut consumed = Vec::with_capacity(n);
        for _ in 0..n {
            match self.advance() {
                Some(info) => consumed.push(info),
                None => break,
            }
        }
        consumed
    }
}
