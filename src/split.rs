use crate::config::LexerConfig;
use crate::lexer::LexError;
use crate::stream::TokenStream;

/// Options for [`split_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitOptions {
    /// Strip `#` comments instead of treating `#` as a word character.
    pub comments: bool,
    /// Use POSIX quoting rules.
    pub posix: bool,
}

impl SplitOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            comments: false,
            posix: true,
        }
    }

    #[must_use]
    pub const fn comments(mut self, comments: bool) -> Self {
        self.comments = comments;
        self
    }

    #[must_use]
    pub const fn posix(mut self, posix: bool) -> Self {
        self.posix = posix;
        self
    }

    fn config(self) -> LexerConfig {
        LexerConfig::builder()
            .posix(self.posix)
            .whitespace_split(true)
            .comments(self.comments)
            .build()
    }
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a command line into words using POSIX shell rules.
///
/// # Errors
///
/// Returns `LexError` on an unterminated quote or trailing escape.
pub fn split(input: &str) -> Result<Vec<String>, LexError> {
    split_with(input, SplitOptions::new())
}

/// Split a command line into words with explicit options.
///
/// # Errors
///
/// Returns `LexError` on an unterminated quote or trailing escape.
pub fn split_with(input: &str, options: SplitOptions) -> Result<Vec<String>, LexError> {
    TokenStream::from_text(input, options.config()).collect()
}
