use std::fmt;
use std::io;

use crate::config::LexerConfig;
use crate::source::CharReader;
use crate::span::Span;

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Input ended inside a quoted run opened by this character.
    UnterminatedQuote(char),
    /// Input ended right after an escape character.
    UnterminatedEscape,
    /// The inclusion hook could not open the named source.
    InclusionOpenFailure { target: String, reason: String },
    /// The inclusion keyword was the last token of its source.
    MissingInclusionTarget,
    /// The underlying character source failed.
    Read(String),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedQuote(quote) => {
                write!(f, "no closing quotation for {quote}")
            }
            Self::UnterminatedEscape => {
                write!(f, "no escaped character")
            }
            Self::InclusionOpenFailure { target, reason } => {
                write!(f, "cannot open included source {target}: {reason}")
            }
            Self::MissingInclusionTarget => {
                write!(f, "missing source name after inclusion keyword")
            }
            Self::Read(reason) => {
                write!(f, "read error: {reason}")
            }
        }
    }
}

impl From<io::Error> for LexErrorKind {
    fn from(e: io::Error) -> Self {
        Self::Read(e.to_string())
    }
}

/// Error produced during lexing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{span}: {kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

/// Position of the state machine between characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Between tokens.
    Whitespace,
    /// Inside a run of word characters.
    Word,
    /// Inside a run of punctuation characters.
    Punctuation,
    /// Inside a quoted run opened by this character.
    Quote(char),
    /// Just after an escape character. `quote` is the quoted run to
    /// resume, `None` resumes the word.
    Escape { escape: char, quote: Option<char> },
    /// The current source is exhausted.
    Eof,
}

/// The tokenizer state machine.
///
/// Each call to [`Lexer::read_token`] consumes characters until one token
/// is complete. The state survives between calls so a pushed-back
/// character or an exhausted source is seen by the next call.
#[derive(Debug, Clone)]
pub struct Lexer {
    config: LexerConfig,
    state: State,
}

impl Lexer {
    #[must_use]
    pub const fn new(config: LexerConfig) -> Self {
        Self {
            config,
            state: State::Whitespace,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &LexerConfig {
        &self.config
    }

    #[must_use]
    pub const fn state(&self) -> State {
        self.state
    }

    /// Start over between tokens, as after switching sources.
    pub const fn reset(&mut self) {
        self.state = State::Whitespace;
    }

    /// Read one raw token from `reader`.
    ///
    /// Returns `Ok(None)` at end of input. In POSIX mode a quoted empty
    /// run such as `''` is a real empty token; in non-POSIX mode an empty
    /// token always means end of input. Characters that end a word without
    /// belonging to it become whole tokens on `pending` when no
    /// punctuation is configured.
    ///
    /// # Errors
    ///
    /// Fails on an unterminated quote or escape, or when `reader` fails.
    /// The machine is left in [`State::Eof`].
    pub fn read_token(
        &mut self,
        reader: &mut CharReader,
        pending: &mut Vec<String>,
    ) -> Result<Option<String>, LexErrorKind> {
        let result = self.run(reader, pending);
        if result.is_err() {
            self.state = State::Eof;
        }
        result
    }

    #[allow(clippy::too_many_lines)]
    fn run(
        &mut self,
        reader: &mut CharReader,
        pending: &mut Vec<String>,
    ) -> Result<Option<String>, LexErrorKind> {
        let cfg = &self.config;
        let posix = cfg.is_posix();
        let mut token = String::new();
        let mut quoted = false;

        loop {
            if self.state == State::Eof {
                break;
            }
            let next = reader.next_char()?;
            log::trace!("in state {:?}, read {:?}", self.state, next);

            match self.state {
                State::Eof => break,
                State::Whitespace => {
                    let Some(ch) = next else {
                        self.state = State::Eof;
                        break;
                    };
                    if cfg.is_whitespace(ch) {
                        if !token.is_empty() || (posix && quoted) {
                            break;
                        }
                    } else if cfg.is_comment(ch) {
                        reader.skip_line()?;
                    } else if posix && cfg.is_escape(ch) {
                        self.state = State::Escape {
                            escape: ch,
                            quote: None,
                        };
                    } else if cfg.is_word(ch) {
                        token.push(ch);
                        self.state = State::Word;
                    } else if cfg.is_punctuation(ch) {
                        token.push(ch);
                        self.state = State::Punctuation;
                    } else if cfg.is_quote(ch) {
                        if !posix {
                            token.push(ch);
                        }
                        self.state = State::Quote(ch);
                    } else if cfg.is_whitespace_split() {
                        token.push(ch);
                        self.state = State::Word;
                    } else {
                        // a lone character that starts nothing is a token
                        token.push(ch);
                        break;
                    }
                }
                State::Quote(quote) => {
                    quoted = true;
                    let Some(ch) = next else {
                        return Err(LexErrorKind::UnterminatedQuote(quote));
                    };
                    if ch == quote {
                        if posix {
                            self.state = State::Word;
                        } else {
                            token.push(ch);
                            self.state = State::Whitespace;
                            break;
                        }
                    } else if posix && cfg.is_escape(ch) && cfg.is_escaped_quote(quote) {
                        self.state = State::Escape {
                            escape: ch,
                            quote: Some(quote),
                        };
                    } else {
                        token.push(ch);
                    }
                }
                State::Escape { escape, quote } => {
                    let Some(ch) = next else {
                        return Err(LexErrorKind::UnterminatedEscape);
                    };
                    // inside quotes only the quote and the escape itself
                    // can be escaped
                    if let Some(q) = quote {
                        if ch != q && ch != escape {
                            token.push(escape);
                        }
                    }
                    token.push(ch);
                    self.state = quote.map_or(State::Word, State::Quote);
                }
                State::Word | State::Punctuation => {
                    let Some(ch) = next else {
                        self.state = State::Eof;
                        break;
                    };
                    if cfg.is_whitespace(ch) {
                        self.state = State::Whitespace;
                        if !token.is_empty() || (posix && quoted) {
                            break;
                        }
                    } else if cfg.is_comment(ch) {
                        reader.skip_line()?;
                        if posix {
                            self.state = State::Whitespace;
                            if !token.is_empty() || quoted {
                                break;
                            }
                        }
                    } else if self.state == State::Punctuation {
                        if cfg.is_punctuation(ch) {
                            token.push(ch);
                        } else {
                            if !cfg.is_whitespace(ch) {
                                reader.push_back(ch);
                            }
                            self.state = State::Whitespace;
                            break;
                        }
                    } else if posix && cfg.is_quote(ch) {
                        self.state = State::Quote(ch);
                    } else if posix && cfg.is_escape(ch) {
                        self.state = State::Escape {
                            escape: ch,
                            quote: None,
                        };
                    } else if cfg.is_word(ch)
                        || cfg.is_quote(ch)
                        || (cfg.is_whitespace_split() && !cfg.is_punctuation(ch))
                    {
                        token.push(ch);
                    } else {
                        if cfg.has_punctuation() {
                            reader.push_back(ch);
                        } else {
                            pending.push(ch.to_string());
                        }
                        self.state = State::Whitespace;
                        break;
                    }
                }
            }
        }

        if token.is_empty() && (!posix || !quoted) {
            log::debug!("raw token: EOF");
            Ok(None)
        } else {
            log::debug!("raw token: {token:?}");
            Ok(Some(token))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StrSource;

    fn lex_all(config: LexerConfig, input: &str) -> Result<Vec<String>, LexErrorKind> {
        let mut lexer = Lexer::new(config);
        let mut reader = CharReader::from(StrSource::new(input));
        let mut pending = Vec::new();
        let mut tokens = Vec::new();
        loop {
            if let Some(tok) = pending.pop() {
                tokens.push(tok);
                continue;
            }
            match lexer.read_token(&mut reader, &mut pending)? {
                Some(tok) => tokens.push(tok),
                None => return Ok(tokens),
            }
        }
    }

    fn posix() -> LexerConfig {
        LexerConfig::builder().posix(true).build()
    }

    fn classic() -> LexerConfig {
        LexerConfig::default()
    }

    #[test]
    fn words_and_whitespace() {
        let tokens = lex_all(posix(), "  foo bar\tbaz\n").expect("lex");
        assert_eq!(tokens, ["foo", "bar", "baz"]);
    }

    #[test]
    fn non_word_chars_are_single_tokens() {
        let tokens = lex_all(classic(), "a+b").expect("lex");
        assert_eq!(tokens, ["a", "+", "b"]);
    }

    #[test]
    fn lone_symbol_at_whitespace() {
        let tokens = lex_all(classic(), "+ -").expect("lex");
        assert_eq!(tokens, ["+", "-"]);
    }

    #[test]
    fn posix_quotes_concatenate() {
        let tokens = lex_all(posix(), "a'b c'\"d\"").expect("lex");
        assert_eq!(tokens, ["ab cd"]);
    }

    #[test]
    fn classic_quotes_are_kept() {
        let tokens = lex_all(classic(), "'a b' \"c\"").expect("lex");
        assert_eq!(tokens, ["'a b'", "\"c\""]);
    }

    #[test]
    fn classic_quote_inside_word_is_literal() {
        let tokens = lex_all(classic(), "a'b").expect("lex");
        assert_eq!(tokens, ["a'b"]);
    }

    #[test]
    fn posix_empty_quotes_are_a_token() {
        let tokens = lex_all(posix(), "'' \"\" x").expect("lex");
        assert_eq!(tokens, ["", "", "x"]);
    }

    #[test]
    fn posix_empty_quotes_at_end() {
        let tokens = lex_all(posix(), "x ''").expect("lex");
        assert_eq!(tokens, ["x", ""]);
    }

    #[test]
    fn escape_outside_quotes() {
        let tokens = lex_all(posix(), r"a\ b \'c").expect("lex");
        assert_eq!(tokens, ["a b", "'c"]);
    }

    #[test]
    fn escape_in_double_quotes() {
        let tokens = lex_all(posix(), r#""a\"b" "c\\d" "e\nf""#).expect("lex");
        assert_eq!(tokens, ["a\"b", "c\\d", "e\\nf"]);
    }

    #[test]
    fn no_escape_in_single_quotes() {
        let tokens = lex_all(posix(), r"'a\b'").expect("lex");
        assert_eq!(tokens, [r"a\b"]);
    }

    #[test]
    fn classic_mode_ignores_escapes() {
        let tokens = lex_all(classic(), r"a\b").expect("lex");
        assert_eq!(tokens, ["a", "\\", "b"]);
    }

    #[test]
    fn comment_discards_rest_of_line() {
        let tokens = lex_all(posix(), "a # b c\nd").expect("lex");
        assert_eq!(tokens, ["a", "d"]);
    }

    #[test]
    fn posix_comment_ends_word() {
        let tokens = lex_all(posix(), "ab#cd\nef").expect("lex");
        assert_eq!(tokens, ["ab", "ef"]);
    }

    #[test]
    fn classic_comment_continues_word() {
        let tokens = lex_all(classic(), "ab#cd\nef").expect("lex");
        assert_eq!(tokens, ["abef"]);
    }

    #[test]
    fn punctuation_runs() {
        let config = LexerConfig::builder()
            .posix(true)
            .punctuation(true)
            .build();
        let tokens = lex_all(config, "a && b||c;(d)").expect("lex");
        assert_eq!(tokens, ["a", "&&", "b", "||", "c", ";(", "d", ")"]);
    }

    #[test]
    fn punctuation_with_whitespace_split() {
        let config = LexerConfig::builder()
            .posix(true)
            .punctuation(true)
            .whitespace_split(true)
            .build();
        let tokens = lex_all(config, "a&&b ~/x>out").expect("lex");
        assert_eq!(tokens, ["a", "&&", "b", "~/x", ">", "out"]);
    }

    #[test]
    fn unterminated_quote() {
        let err = lex_all(posix(), "\"abc").expect_err("should fail");
        assert_eq!(err, LexErrorKind::UnterminatedQuote('"'));
    }

    #[test]
    fn unterminated_escape() {
        let err = lex_all(posix(), "abc\\").expect_err("should fail");
        assert_eq!(err, LexErrorKind::UnterminatedEscape);
    }

    #[test]
    fn error_leaves_eof_state() {
        let mut lexer = Lexer::new(posix());
        let mut reader = CharReader::from(StrSource::new("'open"));
        let mut pending = Vec::new();
        assert!(lexer.read_token(&mut reader, &mut pending).is_err());
        assert_eq!(lexer.state(), State::Eof);
        assert_eq!(lexer.read_token(&mut reader, &mut pending), Ok(None));
    }

    #[test]
    fn eof_is_sticky_until_reset() {
        let mut lexer = Lexer::new(posix());
        let mut reader = CharReader::from(StrSource::new("x"));
        let mut pending = Vec::new();
        assert_eq!(
            lexer.read_token(&mut reader, &mut pending),
            Ok(Some("x".to_string()))
        );
        assert_eq!(lexer.read_token(&mut reader, &mut pending), Ok(None));
        assert_eq!(lexer.state(), State::Eof);
        lexer.reset();
        assert_eq!(lexer.state(), State::Whitespace);
    }

    #[test]
    fn error_display() {
        let err = LexError {
            kind: LexErrorKind::UnterminatedQuote('\''),
            span: Span::new(Some("cfg".to_string()), 3),
        };
        assert_eq!(err.to_string(), "\"cfg\", line 3: no closing quotation for '");
    }
}
