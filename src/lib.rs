//! Shell-style word splitting.
//!
//! Splits command-like text into words following shell quoting,
//! escaping, comment, and punctuation rules, without running a shell.
//! Nothing is expanded: no globbing, no variables, no substitutions.
//!
//! # Quick start
//!
//! ## Split and re-join a command line
//!
//! ```
//! use wordsplit::{join, split};
//!
//! let words = split("grep -e 'two words' \"it's\" file\\ name").unwrap();
//! assert_eq!(words, ["grep", "-e", "two words", "it's", "file name"]);
//!
//! let line = join(&words);
//! assert_eq!(split(&line).unwrap(), words);
//! ```
//!
//! ## Stream tokens with punctuation and included files
//!
//! ```
//! use wordsplit::{LexerConfig, TokenStream};
//!
//! let config = LexerConfig::builder()
//!     .posix(true)
//!     .punctuation(true)
//!     .build();
//!
//! let mut stream = TokenStream::from_text("make all && ./run --fast; exit", config);
//! let mut tokens = Vec::new();
//! while let Some(token) = stream.next_token().unwrap() {
//!     tokens.push(token);
//! }
//! assert_eq!(tokens, ["make", "all", "&&", "./run", "--fast", ";", "exit"]);
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod config;
pub mod lexer;
pub mod quote;
pub mod source;
pub mod span;
pub mod split;
pub mod stream;

pub use config::{CharSet, ConfigBuilder, LexerConfig, Punctuation};
pub use lexer::{LexError, LexErrorKind, Lexer, State};
pub use quote::{join, quote};
pub use source::{CharReader, CharSource, ReadSource, StrSource};
pub use span::Span;
pub use split::{SplitOptions, split, split_with};
pub use stream::{Inclusion, InclusionHook, TokenStream, open_source};
