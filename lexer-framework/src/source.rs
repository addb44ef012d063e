use common_framework::Position;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A source of characters for the tokenizer.
///
/// `position()` always reports where the *next* character will be read, so
/// the tokenizer can stamp each character before pulling it.
pub trait CharSource {
    /// Acquires the underlying resource (e.g. reads a file).
    fn open(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Releases the underlying resource.
    fn close(&mut self) {}

    /// Returns true if `next_char` would yield a character.
    fn has_more_chars(&self) -> bool;

    /// Returns the next character and advances.
    fn next_char(&mut self) -> Option<char>;

    /// Position of the next character.
    fn position(&self) -> Position;
}

/// Character source over in-memory text.
#[derive(Debug, Clone)]
pub struct StringSource {
    buffer: Arc<str>,
    current: usize,
    position: Position,
}

impl StringSource {
    /// Creates a source from the input string.
    pub fn new<S: Into<String>>(input: S) -> Self {
        let owned = input.into();
        Self::with_arc(Arc::<str>::from(owned))
    }

    /// Creates a source from an existing shared buffer.
    pub fn with_arc(buffer: Arc<str>) -> Self {
        Self {
            buffer,
            current: 0,
            position: Position::new(),
        }
    }

    /// Returns the text not read yet.
    pub fn remaining(&self) -> &str {
        &self.buffer[self.current..]
    }
}

impl CharSource for StringSource {
    fn has_more_chars(&self) -> bool {
        self.current < self.buffer.len()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.buffer[self.current..].chars().next()?;
        self.current += ch.len_utf8();
        self.position = self.position.advanced_by(ch);
        Some(ch)
    }

    fn position(&self) -> Position {
        self.position
    }
}

/// Character source that reads a UTF-8 file when opened.
///
/// Yields nothing before `open()` or after `close()`.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    inner: Option<StringSource>,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            inner: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CharSource for FileSource {
    fn open(&mut self) -> io::Result<()> {
        let text = fs::read_to_string(&self.path)?;
        tracing::debug!(path = %self.path.display(), bytes = text.len(), "opened file source");
        self.inner = Some(StringSource::new(text));
        Ok(())
    }

    fn close(&mut self) {
        self.inner = None;
    }

    fn has_more_chars(&self) -> bool {
        self.inner.as_ref().is_some_and(|s| s.has_more_chars())
    }

    fn next_char(&mut self) -> Option<char> {
        self.inner.as_mut()?.next_char()
    }

    fn position(&self) -> Position {
        self.inner
            .as_ref()
            .map(|s| s.position())
            .unwrap_or_default()
    }
}

impl<T> CharSource for Box<T>
where
    T: CharSource + ?Sized,
{
    fn open(&mut self) -> io::Result<()> {
        (**self).open()
    }

    fn close(&mut self) {
        (**self).close()
    }

    fn has_more_chars(&self) -> bool {
        (**self).has_more_chars()
    }

    fn next_char(&mut self) -> Option<char> {
        (**self).next_char()
    }

    fn position(&self) -> Position {
        (**self).position()
    }
}
