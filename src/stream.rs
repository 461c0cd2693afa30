//! Token stream over a stack of nested character sources.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::config::LexerConfig;
use crate::lexer::{LexError, LexErrorKind, Lexer};
use crate::source::{CharReader, CharSource, ReadSource, StrSource};
use crate::span::Span;

/// A source opened by an inclusion hook.
pub struct Inclusion {
    pub name: String,
    pub source: Box<dyn CharSource>,
}

/// Opens the target named after the inclusion keyword.
///
/// Receives the target token and the name of the source currently being
/// read. Returning `Ok(None)` skips the inclusion.
pub type InclusionHook = Box<dyn FnMut(&str, Option<&str>) -> io::Result<Option<Inclusion>>>;

/// Default inclusion hook: opens `target` as a file.
///
/// One layer of surrounding double quotes is stripped. A relative target
/// is resolved against the directory of `current` when the current source
/// has a name.
///
/// # Errors
///
/// Returns the I/O error from opening the file.
pub fn open_source(target: &str, current: Option<&str>) -> io::Result<Option<Inclusion>> {
    let target = match target.strip_prefix('"') {
        Some(inner) => inner.strip_suffix('"').unwrap_or(inner),
        None => target,
    };

    let path = match current.and_then(|name| Path::new(name).parent()) {
        Some(dir) if Path::new(target).is_relative() => dir.join(target),
        _ => Path::new(target).to_path_buf(),
    };

    let file = File::open(&path)?;
    Ok(Some(Inclusion {
        name: path.to_string_lossy().into_owned(),
        source: Box::new(ReadSource::new(BufReader::new(file))),
    }))
}

struct Frame {
    name: Option<String>,
    reader: CharReader,
}

/// Produces tokens from a character source.
///
/// Whole tokens can be pushed back with [`TokenStream::push_token`] and
/// are returned most-recent-first. When an inclusion keyword is set, the
/// token following it names a source that is spliced into the stream
/// until it is exhausted.
///
/// A `TokenStream` is mutable session state: it is driven through
/// `&mut self` and must not be shared between callers without external
/// synchronization.
pub struct TokenStream {
    current: Frame,
    stack: Vec<Frame>,
    lexer: Lexer,
    pushback: Vec<String>,
    keyword: Option<String>,
    hook: InclusionHook,
    failed: bool,
}

impl TokenStream {
    #[must_use]
    pub fn new(source: Box<dyn CharSource>, config: LexerConfig) -> Self {
        Self {
            current: Frame {
                name: None,
                reader: CharReader::new(source),
            },
            stack: Vec::new(),
            lexer: Lexer::new(config),
            pushback: Vec::new(),
            keyword: None,
            hook: Box::new(open_source),
            failed: false,
        }
    }

    /// Tokenize an in-memory string.
    #[must_use]
    pub fn from_text(input: &str, config: LexerConfig) -> Self {
        Self::new(Box::new(StrSource::new(input)), config)
    }

    /// Tokenize a buffered reader.
    #[must_use]
    pub fn from_reader<R: BufRead + 'static>(reader: R, config: LexerConfig) -> Self {
        Self::new(Box::new(ReadSource::new(reader)), config)
    }

    /// Tokenize standard input.
    #[must_use]
    pub fn stdin(config: LexerConfig) -> Self {
        Self::from_reader(io::stdin().lock(), config)
    }

    /// Name the top-level source, used in error messages and to resolve
    /// relative inclusion targets.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.current.name = Some(name.into());
        self
    }

    /// Treat `keyword` as an inclusion directive.
    #[must_use]
    pub fn with_source_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// Replace the default file-opening inclusion hook.
    #[must_use]
    pub fn with_hook(mut self, hook: InclusionHook) -> Self {
        self.hook = hook;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &LexerConfig {
        self.lexer.config()
    }

    /// Name of the source currently being read.
    #[must_use]
    pub fn source_name(&self) -> Option<&str> {
        self.current.name.as_deref()
    }

    /// Line number within the current source.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.current.reader.line()
    }

    /// Number of suspended sources below the current one.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    #[must_use]
    pub fn span(&self) -> Span {
        Span::new(self.current.name.clone(), self.line())
    }

    /// Prefix for messages about the current position, in the style of
    /// compiler diagnostics: `"file", line 3: `.
    #[must_use]
    pub fn error_leader(&self) -> String {
        format!("{}: ", self.span())
    }

    /// Queue `token` to be returned by the next [`Self::next_token`].
    pub fn push_token(&mut self, token: impl Into<String>) {
        let token = token.into();
        log::debug!("pushing token {token:?}");
        self.pushback.push(token);
    }

    /// Suspend the current source and read from `source` until it is
    /// exhausted.
    pub fn push_source(&mut self, name: Option<String>, source: Box<dyn CharSource>) {
        log::debug!("pushing to source {name:?}");
        let frame = Frame {
            name,
            reader: CharReader::new(source),
        };
        let suspended = std::mem::replace(&mut self.current, frame);
        self.stack.push(suspended);
        self.lexer.reset();
    }

    /// Close the current source and resume the one it interrupted.
    ///
    /// Returns `false` when there is no suspended source.
    pub fn pop_source(&mut self) -> bool {
        let Some(frame) = self.stack.pop() else {
            return false;
        };
        let mut finished = std::mem::replace(&mut self.current, frame);
        finished.reader.close();
        log::debug!(
            "popped {:?}, resuming {:?} at line {}",
            finished.name,
            self.current.name,
            self.line()
        );
        self.lexer.reset();
        true
    }

    /// Next token, or `Ok(None)` once every source is exhausted.
    ///
    /// # Errors
    ///
    /// Fails on unterminated quotes or escapes, unreadable sources, and
    /// inclusion targets that cannot be opened. After an error the stream
    /// only reports end of input.
    pub fn next_token(&mut self) -> Result<Option<String>, LexError> {
        if self.failed {
            return Ok(None);
        }
        let result = self.advance();
        if result.is_err() {
            self.failed = true;
        }
        result
    }

    fn advance(&mut self) -> Result<Option<String>, LexError> {
        loop {
            if let Some(token) = self.pushback.pop() {
                log::debug!("popping token {token:?}");
                return Ok(Some(token));
            }

            match self.read_raw()? {
                Some(token) if self.keyword.as_deref() == Some(token.as_str()) => {
                    self.include()?;
                }
                Some(token) => return Ok(Some(token)),
                None => {
                    if !self.pop_source() {
                        return Ok(None);
                    }
                }
            }
        }
    }

    fn read_raw(&mut self) -> Result<Option<String>, LexError> {
        self.lexer
            .read_token(&mut self.current.reader, &mut self.pushback)
            .map_err(|kind| self.error(kind))
    }

    fn include(&mut self) -> Result<(), LexError> {
        let Some(target) = self.read_raw()? else {
            return Err(self.error(LexErrorKind::MissingInclusionTarget));
        };
        log::debug!("including {target:?}");

        match (self.hook)(&target, self.current.name.as_deref()) {
            Ok(Some(inclusion)) => {
                self.push_source(Some(inclusion.name), inclusion.source);
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(e) => Err(self.error(LexErrorKind::InclusionOpenFailure {
                target,
                reason: e.to_string(),
            })),
        }
    }

    fn error(&self, kind: LexErrorKind) -> LexError {
        LexError {
            kind,
            span: self.span(),
        }
    }
}

impl Iterator for TokenStream {
    type Item = Result<String, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}
