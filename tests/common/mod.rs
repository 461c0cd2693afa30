#![allow(dead_code)]

use std::path::PathBuf;

use wordsplit::{LexerConfig, TokenStream, split};

/// Drain a stream, panicking on the first error.
pub fn tokens(stream: TokenStream) -> Vec<String> {
    stream
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| panic!("tokenize failed: {e}"))
}

/// Tokens of `input` under `config`.
pub fn lex(input: &str, config: LexerConfig) -> Vec<String> {
    tokens(TokenStream::from_text(input, config))
}

/// Split `input` and compare against `expected`.
pub fn assert_split(input: &str, expected: &[&str]) {
    let words = split(input).unwrap_or_else(|e| panic!("split failed: {e}\n--- input ---\n{input}"));
    assert_eq!(words, expected, "split mismatch\n--- input ---\n{input}");
}

/// A fresh scratch directory under the system temp dir.
pub fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("wordsplit-{tag}-{}", std::process::id()));
    if dir.exists() {
        std::fs::remove_dir_all(&dir).expect("clear scratch dir");
    }
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}
