//! Character classification tables and lexer mode flags.
//!
//! Defaults are plain constants. A [`ConfigBuilder`] collects overrides
//! and produces an immutable [`LexerConfig`] whose tables are precomputed
//! once and shared for the lifetime of a stream.

/// ASCII word characters available in every mode.
pub const WORD_CHARS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_";

/// Accented Latin letters that are also word characters in POSIX mode.
pub const POSIX_WORD_CHARS: &str = "ßàáâãäåæçèéêëìíîïðñòóôõöøùúûüýþÿÀÁÂÃÄÅÆÇÈÉÊËÌÍÎÏÐÑÒÓÔÕÖØÙÚÛÜÝÞ";

/// Token separators.
pub const WHITESPACE: &str = " \t\r\n";

/// Characters that open and close a quoted run.
pub const QUOTES: &str = "'\"";

/// Escape characters.
pub const ESCAPE: &str = "\\";

/// Quotes inside which escapes are honored (POSIX mode only).
pub const ESCAPED_QUOTES: &str = "\"";

/// Comment starters; the rest of the line is discarded.
pub const COMMENT_CHARS: &str = "#";

/// Punctuation set selected by `Punctuation::Default`.
pub const DEFAULT_PUNCTUATION: &str = "();<>|&";

/// Characters that stay word characters once punctuation is enabled, so
/// flags and paths like `--foo` or `./run` remain single words.
pub const EXTRA_WORD_CHARS: &str = "~-./*?=";

/// A set of characters with constant-time ASCII lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharSet {
    ascii: u128,
    // sorted, deduplicated
    other: Vec<char>,
}

impl CharSet {
    /// Build a set from every character of `chars`.
    #[must_use]
    pub fn from_chars(chars: &str) -> Self {
        let mut set = Self::default();
        for ch in chars.chars() {
            set.insert(ch);
        }
        set
    }

    pub fn insert(&mut self, ch: char) {
        if ch.is_ascii() {
            self.ascii |= 1u128 << u32::from(ch);
        } else if let Err(idx) = self.other.binary_search(&ch) {
            self.other.insert(idx, ch);
        }
    }

    pub fn remove(&mut self, ch: char) {
        if ch.is_ascii() {
            self.ascii &= !(1u128 << u32::from(ch));
        } else if let Ok(idx) = self.other.binary_search(&ch) {
            self.other.remove(idx);
        }
    }

    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        if ch.is_ascii() {
            self.ascii & (1u128 << u32::from(ch)) != 0
        } else {
            self.other.binary_search(&ch).is_ok()
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ascii == 0 && self.other.is_empty()
    }

    /// Remove every member of `other` from this set.
    #[must_use]
    pub fn difference(mut self, other: &Self) -> Self {
        self.ascii &= !other.ascii;
        self.other.retain(|ch| other.other.binary_search(ch).is_err());
        self
    }

    /// Add every member of `other` to this set.
    #[must_use]
    pub fn union(mut self, other: &Self) -> Self {
        self.ascii |= other.ascii;
        for &ch in &other.other {
            self.insert(ch);
        }
        self
    }
}

/// Which characters form punctuation runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Punctuation {
    /// No punctuation handling.
    #[default]
    None,
    /// The shell control characters `( ) ; < > | &`.
    Default,
    /// An explicit set of characters.
    Chars(String),
}

impl From<bool> for Punctuation {
    fn from(enabled: bool) -> Self {
        if enabled { Self::Default } else { Self::None }
    }
}

impl From<&str> for Punctuation {
    fn from(chars: &str) -> Self {
        Self::Chars(chars.to_string())
    }
}

impl Punctuation {
    fn chars(&self) -> &str {
        match self {
            Self::None => "",
            Self::Default => DEFAULT_PUNCTUATION,
            Self::Chars(chars) => chars,
        }
    }
}

/// Collects lexer options before freezing them into a [`LexerConfig`].
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    posix: bool,
    whitespace_split: bool,
    punctuation: Punctuation,
    comments: bool,
    word_chars: Option<String>,
    whitespace: String,
    quotes: String,
    escape: String,
    escaped_quotes: String,
    comment_chars: String,
}

impl ConfigBuilder {
    /// Non-POSIX, comments on, no punctuation, no whitespace split.
    #[must_use]
    pub fn new() -> Self {
        Self {
            posix: false,
            whitespace_split: false,
            punctuation: Punctuation::None,
            comments: true,
            word_chars: None,
            whitespace: WHITESPACE.to_string(),
            quotes: QUOTES.to_string(),
            escape: ESCAPE.to_string(),
            escaped_quotes: ESCAPED_QUOTES.to_string(),
            comment_chars: COMMENT_CHARS.to_string(),
        }
    }

    /// Switch between POSIX and classic quoting rules.
    #[must_use]
    pub const fn posix(mut self, posix: bool) -> Self {
        self.posix = posix;
        self
    }

    /// Split only on whitespace: any other run of characters is a word.
    #[must_use]
    pub const fn whitespace_split(mut self, split: bool) -> Self {
        self.whitespace_split = split;
        self
    }

    /// Enable punctuation runs. Accepts `true`, `false`, a `&str`, or a
    /// [`Punctuation`] value.
    #[must_use]
    pub fn punctuation(mut self, punctuation: impl Into<Punctuation>) -> Self {
        self.punctuation = punctuation.into();
        self
    }

    /// Toggle comment stripping.
    #[must_use]
    pub const fn comments(mut self, comments: bool) -> Self {
        self.comments = comments;
        self
    }

    /// Replace the word characters. Disables the POSIX accented set.
    #[must_use]
    pub fn word_chars(mut self, chars: &str) -> Self {
        self.word_chars = Some(chars.to_string());
        self
    }

    #[must_use]
    pub fn whitespace(mut self, chars: &str) -> Self {
        self.whitespace = chars.to_string();
        self
    }

    #[must_use]
    pub fn quotes(mut self, chars: &str) -> Self {
        self.quotes = chars.to_string();
        self
    }

    #[must_use]
    pub fn escape(mut self, chars: &str) -> Self {
        self.escape = chars.to_string();
        self
    }

    #[must_use]
    pub fn escaped_quotes(mut self, chars: &str) -> Self {
        self.escaped_quotes = chars.to_string();
        self
    }

    /// Replace the comment characters. Ignored when comments are off.
    #[must_use]
    pub fn comment_chars(mut self, chars: &str) -> Self {
        self.comment_chars = chars.to_string();
        self
    }

    /// Freeze the options and derive the lookup tables.
    #[must_use]
    pub fn build(&self) -> LexerConfig {
        let punctuation = CharSet::from_chars(self.punctuation.chars());

        let mut word = match &self.word_chars {
            Some(chars) => CharSet::from_chars(chars),
            None => CharSet::from_chars(WORD_CHARS),
        };
        if self.posix && self.word_chars.is_none() {
            word = word.union(&CharSet::from_chars(POSIX_WORD_CHARS));
        }
        if !punctuation.is_empty() {
            word = word
                .difference(&punctuation)
                .union(&CharSet::from_chars(EXTRA_WORD_CHARS));
        }

        let comment = if self.comments {
            CharSet::from_chars(&self.comment_chars)
        } else {
            CharSet::default()
        };

        LexerConfig {
            posix: self.posix,
            whitespace_split: self.whitespace_split,
            word,
            punctuation,
            whitespace: CharSet::from_chars(&self.whitespace),
            quotes: CharSet::from_chars(&self.quotes),
            escape: CharSet::from_chars(&self.escape),
            escaped_quotes: CharSet::from_chars(&self.escaped_quotes),
            comment,
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable classification tables and mode flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerConfig {
    posix: bool,
    whitespace_split: bool,
    word: CharSet,
    punctuation: CharSet,
    whitespace: CharSet,
    quotes: CharSet,
    escape: CharSet,
    escaped_quotes: CharSet,
    comment: CharSet,
}

impl LexerConfig {
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    #[must_use]
    pub const fn is_posix(&self) -> bool {
        self.posix
    }

    #[must_use]
    pub const fn is_whitespace_split(&self) -> bool {
        self.whitespace_split
    }

    #[must_use]
    pub const fn has_punctuation(&self) -> bool {
        !self.punctuation.is_empty()
    }

    #[must_use]
    pub fn is_word(&self, ch: char) -> bool {
        self.word.contains(ch)
    }

    #[must_use]
    pub fn is_punctuation(&self, ch: char) -> bool {
        self.punctuation.contains(ch)
    }

    #[must_use]
    pub fn is_whitespace(&self, ch: char) -> bool {
        self.whitespace.contains(ch)
    }

    #[must_use]
    pub fn is_quote(&self, ch: char) -> bool {
        self.quotes.contains(ch)
    }

    #[must_use]
    pub fn is_escape(&self, ch: char) -> bool {
        self.escape.contains(ch)
    }

    #[must_use]
    pub fn is_escaped_quote(&self, ch: char) -> bool {
        self.escaped_quotes.contains(ch)
    }

    #[must_use]
    pub fn is_comment(&self, ch: char) -> bool {
        self.comment.contains(ch)
    }
}

impl Default for LexerConfig {
    fn default() -> Self {
        ConfigBuilder::new().build()
    }
}
