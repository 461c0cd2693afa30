//! Character producers feeding the lexer.

use std::io::{self, BufRead};

/// A pull-based producer of characters.
pub trait CharSource {
    /// Next character, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Fails if the underlying resource fails or has been closed.
    fn read_char(&mut self) -> io::Result<Option<char>>;

    /// Release the underlying resource. Calling it twice is harmless.
    fn close(&mut self);
}

fn closed_error() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "character source is closed")
}

/// Characters of an owned string.
#[derive(Debug, Clone)]
pub struct StrSource {
    text: String,
    pos: usize,
    closed: bool,
}

impl StrSource {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pos: 0,
            closed: false,
        }
    }
}

impl CharSource for StrSource {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        if self.closed {
            return Err(closed_error());
        }
        let next = self.text[self.pos..].chars().next();
        if let Some(ch) = next {
            self.pos += ch.len_utf8();
        }
        Ok(next)
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

/// UTF-8 characters decoded from a buffered reader.
pub struct ReadSource<R> {
    reader: Option<R>,
}

impl<R: BufRead> ReadSource<R> {
    pub const fn new(reader: R) -> Self {
        Self {
            reader: Some(reader),
        }
    }
}

const fn utf8_width(first: u8) -> Option<usize> {
    match first {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

fn invalid_utf8() -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8")
}

impl<R: BufRead> CharSource for ReadSource<R> {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        let reader = self.reader.as_mut().ok_or_else(closed_error)?;
        let mut buf = [0u8; 4];

        loop {
            match reader.read(&mut buf[..1]) {
                Ok(0) => return Ok(None),
                Ok(_) => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }

        let width = utf8_width(buf[0]).ok_or_else(invalid_utf8)?;
        if width > 1 {
            reader.read_exact(&mut buf[1..width]).map_err(|e| {
                if e.kind() == io::ErrorKind::UnexpectedEof {
                    invalid_utf8()
                } else {
                    e
                }
            })?;
        }

        let decoded = std::str::from_utf8(&buf[..width]).map_err(|_| invalid_utf8())?;
        Ok(decoded.chars().next())
    }

    fn close(&mut self) {
        self.reader = None;
    }
}

/// Wraps a [`CharSource`] with one-character lookahead pushback and a
/// line counter.
///
/// The counter starts at 1 and advances each time a newline is read from
/// the underlying source. Replayed characters are not counted twice.
pub struct CharReader {
    inner: Box<dyn CharSource>,
    pushback: Vec<char>,
    line: usize,
}

impl CharReader {
    #[must_use]
    pub fn new(inner: Box<dyn CharSource>) -> Self {
        Self {
            inner,
            pushback: Vec::new(),
            line: 1,
        }
    }

    /// Next character, taking pushed-back characters first.
    ///
    /// # Errors
    ///
    /// Propagates failures of the underlying source.
    pub fn next_char(&mut self) -> io::Result<Option<char>> {
        if let Some(ch) = self.pushback.pop() {
            return Ok(Some(ch));
        }
        let next = self.inner.read_char()?;
        if next == Some('\n') {
            self.line += 1;
        }
        Ok(next)
    }

    /// Make `ch` the next character returned by [`Self::next_char`].
    pub fn push_back(&mut self, ch: char) {
        self.pushback.push(ch);
    }

    /// Discard everything up to and including the next newline.
    ///
    /// # Errors
    ///
    /// Propagates failures of the underlying source.
    pub fn skip_line(&mut self) -> io::Result<()> {
        while let Some(ch) = self.next_char()? {
            if ch == '\n' {
                break;
            }
        }
        Ok(())
    }

    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    pub fn close(&mut self) {
        self.pushback.clear();
        self.inner.close();
    }
}

impl From<StrSource> for CharReader {
    fn from(source: StrSource) -> Self {
        Self::new(Box::new(source))
    }
}
