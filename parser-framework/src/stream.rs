use crate::error::ParseError;
use crate::expected::Expected;
use common_framework::{Token, TokenInput};
use std::collections::VecDeque;
use std::io;

/// A token stream with unlimited lookahead and transactional consumption.
///
/// Tokens are pulled lazily from the underlying [`TokenInput`] into a
/// lookahead buffer that grows to the largest lookahead ever requested.
///
/// Every consumed token is recorded in the innermost transaction frame.
/// Committing a frame merges its record into the enclosing one, so an outer
/// rollback can still undo it. Rolling back pushes the recorded tokens back
/// onto the front of the buffer. The outermost frame always exists.
pub struct TokenStream {
    input: Box<dyn TokenInput>,
    buffer: VecDeque<Token>,
    lookahead: usize,
    frames: Vec<Vec<Token>>,
    index: usize,
}

impl TokenStream {
    pub fn new(input: impl TokenInput + 'static) -> Self {
        Self {
            input: Box::new(input),
            buffer: VecDeque::new(),
            lookahead: 1,
            frames: vec![Vec::new()],
            index: 0,
        }
    }

    /// Creates a stream over an already lexed token list.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self::new(VecDeque::from(tokens))
    }

    pub fn open(&mut self) -> io::Result<()> {
        self.input.open()
    }

    pub fn close(&mut self) {
        self.input.close();
    }

    /// Ensures at least `n` tokens are buffered, if the input has them.
    fn fill(&mut self, n: usize) {
        self.lookahead = self.lookahead.max(n);
        while self.buffer.len() < self.lookahead && self.input.has_more_tokens() {
            match self.input.next_token() {
                Some(token) => self.buffer.push_back(token),
                None => break,
            }
        }
    }

    pub fn has_more_tokens(&mut self) -> bool {
        self.fill(1);
        !self.buffer.is_empty()
    }

    /// Returns the next token without consuming it.
    pub fn lookup(&mut self) -> Option<&Token> {
        self.fill(1);
        self.buffer.front()
    }

    /// Returns up to `n` upcoming tokens without consuming them.
    pub fn lookup_many(&mut self, n: usize) -> Vec<Token> {
        self.fill(n);
        self.buffer.iter().take(n).cloned().collect()
    }

    /// Returns the upcoming tokens if they match `expected` slot by slot.
    pub fn check_for(&mut self, expected: &[Expected]) -> Option<Vec<Token>> {
        self.fill(expected.len());
        if self.buffer.len() < expected.len() {
            return None;
        }
        let matched = expected
            .iter()
            .zip(&self.buffer)
            .all(|(slot, token)| slot.matches(token));
        matched.then(|| self.buffer.iter().take(expected.len()).cloned().collect())
    }

    pub fn consume(&mut self) -> Option<Token> {
        self.fill(1);
        let token = self.buffer.pop_front()?;
        tracing::trace!(%token, "consume");
        if let Some(frame) = self.frames.last_mut() {
            frame.push(token.clone());
        }
        self.index += 1;
        Some(token)
    }

    pub fn consume_many(&mut self, n: usize) -> Vec<Token> {
        let mut consumed = Vec::with_capacity(n);
        for _ in 0..n {
            match self.consume() {
                Some(token) => consumed.push(token),
                None => break,
            }
        }
        consumed
    }

    /// Consumes the upcoming tokens if they match `expected`, or reports the
    /// first slot that does not.
    pub fn consume_expected(&mut self, expected: &[Expected]) -> Result<Vec<Token>, ParseError> {
        self.fill(expected.len());
        for (i, slot) in expected.iter().enumerate() {
            match self.buffer.get(i) {
                None => {
                    return Err(ParseError::NoTokenFound {
                        expected: slot.clone(),
                    })
                }
                Some(token) if !slot.matches(token) => {
                    return Err(ParseError::UnexpectedToken {
                        token: token.clone(),
                    })
                }
                Some(_) => {}
            }
        }
        Ok(self.consume_many(expected.len()))
    }

    pub fn begin_transaction(&mut self) {
        self.frames.push(Vec::new());
        tracing::trace!(depth = self.transaction_depth(), "begin transaction");
    }

    pub fn commit_transaction(&mut self) {
        tracing::trace!(depth = self.transaction_depth(), "commit transaction");
        if self.frames.len() > 1 {
            if let Some(frame) = self.frames.pop() {
                if let Some(parent) = self.frames.last_mut() {
                    parent.extend(frame);
                }
            }
        } else if let Some(outermost) = self.frames.first_mut() {
            outermost.clear();
        }
    }

    pub fn rollback_transaction(&mut self) {
        let depth = self.transaction_depth();
        let frame = if self.frames.len() > 1 {
            self.frames.pop().unwrap_or_default()
        } else {
            self.frames.first_mut().map(std::mem::take).unwrap_or_default()
        };
        tracing::trace!(depth, restored = frame.len(), "rollback transaction");
        self.index = self.index.saturating_sub(frame.len());
        for token in frame.into_iter().rev() {
            self.buffer.push_front(token);
        }
    }

    /// Number of tokens consumed and not rolled back.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of open transactions, not counting the outermost frame.
    pub fn transaction_depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// Returns the last token held in the lookahead buffer.
    pub fn last_unconsumed_token(&self) -> Option<&Token> {
        self.buffer.back()
    }
}
