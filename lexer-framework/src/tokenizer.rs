use crate::classify::classify;
use crate::cursor::{CharInfo, Cursor};
use crate::lexer::TokenRules;
use crate::source::CharSource;
use common_framework::{Token, TokenInput};
use std::collections::VecDeque;
use std::io;

/// Scan state, threaded through the scan loop.
///
/// `kind` indexes the comment or string type that opened the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    Comment { kind: usize, depth: usize },
    Str { kind: usize },
}

/// Mode-based tokenizer over a character source.
///
/// Created by [`Lexer::tokenizer`](crate::Lexer::tokenizer). Tokens are
/// produced lazily: each pull scans just far enough to close the next span.
pub struct Tokenizer<S> {
    cursor: Cursor<S>,
    rules: TokenRules,
    queue: VecDeque<Token>,
}

impl<S: CharSource> Tokenizer<S> {
    pub(crate) fn new(source: S, rules: TokenRules) -> Self {
        Self {
            cursor: Cursor::new(source, rules.lookahead),
            rules,
            queue: VecDeque::new(),
        }
    }

    /// Scans until at least one token is queued or the source is exhausted.
    fn scan(&mut self) {
        let mut mode = Mode::Normal;
        let mut pending = Vec::new();

        loop {
            if mode == Mode::Normal && pending.is_empty() && !self.queue.is_empty() {
                break;
            }
            if self.cursor.is_eof() {
                match mode {
                    Mode::Normal => self.flush(&mut pending),
                    Mode::Comment { kind, depth } => tracing::debug!(
                        start = %self.rules.comments[kind].start,
                        depth,
                        "dropping unterminated comment at end of input"
                    ),
                    Mode::Str { kind } => tracing::debug!(
                        delimiter = %self.rules.strings[kind].delimiter,
                        chars = pending.len(),
                        "dropping unterminated string at end of input"
                    ),
                }
                break;
            }
            mode = match mode {
                Mode::Normal => self.scan_normal(&mut pending),
                Mode::Comment { kind, depth } => self.scan_comment(kind, depth),
                Mode::Str { kind } => self.scan_string(kind, &mut pending),
            };
        }
    }

    fn scan_normal(&mut self, pending: &mut Vec<CharInfo>) -> Mode {
        let comment = self
            .rules
            .comments
            .iter()
            .position(|c| self.cursor.starts_with(&c.start));
        if let Some(kind) = comment {
            self.flush(pending);
            let start = &self.rules.comments[kind].start;
            self.cursor.consume(start.chars().count());
            tracing::debug!(start = %start, "entering comment");
            return Mode::Comment { kind, depth: 1 };
        }

        let string = self
            .rules
            .strings
            .iter()
            .position(|s| self.cursor.starts_with(&s.delimiter));
        if let Some(kind) = string {
            self.flush(pending);
            let delimiter = &self.rules.strings[kind].delimiter;
            pending.extend(self.cursor.consume(delimiter.chars().count()));
            tracing::debug!(delimiter = %delimiter, "entering string");
            return Mode::Str { kind };
        }

        if let Some(info) = self.cursor.advance() {
            if self.rules.is_whitespace(info.ch) {
                self.flush(pending);
            } else {
                pending.push(info);
            }
        }
        Mode::Normal
    }

    fn scan_comment(&mut self, kind: usize, depth: usize) -> Mode {
        let comment = &self.rules.comments[kind];
        if comment.nested && self.cursor.starts_with(&comment.start) {
            self.cursor.consume(comment.start.chars().count());
            return Mode::Comment {
                kind,
                depth: depth + 1,
            };
        }
        if self.cursor.starts_with(&comment.end) {
            self.cursor.consume(comment.end.chars().count());
            if depth <= 1 {
                tracing::debug!(end = %comment.end, "leaving comment");
                return Mode::Normal;
            }
            return Mode::Comment {
                kind,
                depth: depth - 1,
            };
        }
        self.cursor.advance();
        Mode::Comment { kind, depth }
    }

    fn scan_string(&mut self, kind: usize, pending: &mut Vec<CharInfo>) -> Mode {
        let string = &self.rules.strings[kind];
        if let Some(escape) = &string.escape {
            if self.cursor.starts_with(escape) {
                pending.extend(self.cursor.consume(escape.chars().count()));
                return Mode::Str { kind };
            }
        }
        if self.cursor.starts_with(&string.delimiter) {
            pending.extend(self.cursor.consume(string.delimiter.chars().count()));
            let name = string.name.clone();
            self.emit_string(name, pending);
            return Mode::Normal;
        }
        if let Some(info) = self.cursor.advance() {
            pending.push(info);
        }
        Mode::Str { kind }
    }

    fn emit_string(&mut self, name: String, pending: &mut Vec<CharInfo>) {
        let (Some(first), Some(last)) = (pending.first(), pending.last()) else {
            return;
        };
        let content: String = pending.iter().map(|info| info.ch).collect();
        let token = Token::new(content, name, first.position, last.position);
        tracing::trace!(%token, "token");
        self.queue.push_back(token);
        pending.clear();
    }

    /// Classifies and queues the pending normal-mode span.
    fn flush(&mut self, pending: &mut Vec<CharInfo>) {
        if pending.is_empty() {
            return;
        }
        for token in classify(&self.rules, pending) {
            tracing::trace!(%token, "token");
            self.queue.push_back(token);
        }
        pending.clear();
    }
}

impl<S: CharSource> TokenInput for Tokenizer<S> {
    fn open(&mut self) -> io::Result<()> {
        self.queue.clear();
        self.cursor.source_mut().open()
    }

    fn close(&mut self) {
        self.cursor.source_mut().close();
    }

    fn has_more_tokens(&mut self) -> bool {
        if self.queue.is_empty() {
            self.scan();
        }
        !self.queue.is_empty()
    }

    fn next_token(&mut self) -> Option<Token> {
        if self.queue.is_empty() {
            self.scan();
        }
        self.queue.pop_front()
    }
}

impl<S: CharSource> Iterator for Tokenizer<S> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}
