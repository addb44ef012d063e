use crate::Token;
use std::collections::VecDeque;
use std::io;

/// Pull-based producer of tokens.
///
/// The parser side only ever sees this trait, so any lexer (or a prepared
/// token list) can feed a token stream.
pub trait TokenInput {
    /// Acquires the underlying character source.
    fn open(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Releases the underlying character source.
    fn close(&mut self) {}

    /// Returns true if `next_token` would yield a token.
    fn has_more_tokens(&mut self) -> bool;

    /// Returns the next token, or `None` once the input is exhausted.
    fn next_token(&mut self) -> Option<Token>;
}

impl TokenInput for VecDeque<Token> {
    fn has_more_tokens(&mut self) -> bool {
        !self.is_empty()
    }

    fn next_token(&mut self) -> Option<Token> {
        self.pop_front()
    }
}

impl<T> TokenInput for Box<T>
where
    T: TokenInput + ?Sized,
{
    fn open(&mut self) -> io::Result<()> {
        (**self).open()
    }

    fn close(&mut self) {
        (**self).close()
    }

    fn has_more_tokens(&mut self) -> bool {
        (**self).has_more_tokens()
    }

    fn next_token(&mut self) -> Option<Token> {
        (**self).next_token()
    }
}
