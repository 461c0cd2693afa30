//! Word splitting behaviour and errors.

mod common;

use common::assert_split;
use wordsplit::{LexErrorKind, SplitOptions, split, split_with};

// -----------------------------------------------------------
// Basic splitting.
// -----------------------------------------------------------

#[test]
fn split_empty_input() {
    assert!(split("").expect("split").is_empty());
}

#[test]
fn split_only_whitespace() {
    assert!(split("  \t \r\n ").expect("split").is_empty());
}

#[test]
fn split_plain_words() {
    assert_split("foo bar baz", &["foo", "bar", "baz"]);
}

#[test]
fn split_collapses_runs_of_whitespace() {
    assert_split("\tfoo   bar\n\nbaz  ", &["foo", "bar", "baz"]);
}

#[test]
fn split_keeps_symbols_in_words() {
    assert_split(
        "cp -r ./src/*.rs ~/backup --dry-run=yes",
        &["cp", "-r", "./src/*.rs", "~/backup", "--dry-run=yes"],
    );
}

#[test]
fn split_control_characters_are_not_special() {
    assert_split("a;b c|d e&&f", &["a;b", "c|d", "e&&f"]);
}

// -----------------------------------------------------------
// Quoting.
// -----------------------------------------------------------

#[test]
fn split_single_quotes() {
    assert_split("echo 'hello world'", &["echo", "hello world"]);
}

#[test]
fn split_double_quotes() {
    assert_split("echo \"hello world\"", &["echo", "hello world"]);
}

#[test]
fn split_adjacent_quotes_concatenate() {
    assert_split("a'b'c", &["abc"]);
    assert_split("pre\"mid\"'post'", &["premidpost"]);
}

#[test]
fn split_quote_of_other_kind_is_literal() {
    assert_split("\"it's\" 'say \"hi\"'", &["it's", "say \"hi\""]);
}

#[test]
fn split_empty_quotes_produce_empty_words() {
    assert_split("a '' \"\" b", &["a", "", "", "b"]);
}

#[test]
fn split_quotes_keep_newlines() {
    assert_split("'line1\nline2'", &["line1\nline2"]);
}

#[test]
fn split_hash_inside_quotes() {
    let words = split_with("echo '# not a comment'", SplitOptions::new().comments(true))
        .expect("split");
    assert_eq!(words, ["echo", "# not a comment"]);
}

// -----------------------------------------------------------
// Escapes.
// -----------------------------------------------------------

#[test]
fn split_escaped_space() {
    assert_split("my\\ file.txt", &["my file.txt"]);
}

#[test]
fn split_escaped_quotes_outside_quotes() {
    assert_split("\\'a\\\"", &["'a\""]);
}

#[test]
fn split_escapes_in_double_quotes() {
    assert_split(r#""a\"b" "c\\d" "e\$f""#, &["a\"b", "c\\d", "e\\$f"]);
}

#[test]
fn split_backslash_literal_in_single_quotes() {
    assert_split(r"'C:\path\to'", &[r"C:\path\to"]);
}

#[test]
fn split_escaped_newline_is_kept() {
    assert_split("a\\\nb", &["a\nb"]);
}

// -----------------------------------------------------------
// Comments.
// -----------------------------------------------------------

#[test]
fn split_comments_stripped_on_request() {
    let words =
        split_with("ls -l # comment", SplitOptions::new().comments(true)).expect("split");
    assert_eq!(words, ["ls", "-l"]);
}

#[test]
fn split_comments_literal_by_default() {
    assert_split("ls -l # comment", &["ls", "-l", "#", "comment"]);
}

#[test]
fn split_comment_ends_at_newline() {
    let words = split_with("a # one\nb # two\nc", SplitOptions::new().comments(true))
        .expect("split");
    assert_eq!(words, ["a", "b", "c"]);
}

#[test]
fn split_comment_directly_after_word() {
    let words = split_with("word#tail\nnext", SplitOptions::new().comments(true))
        .expect("split");
    assert_eq!(words, ["word", "next"]);
}

// -----------------------------------------------------------
// Non-POSIX mode.
// -----------------------------------------------------------

#[test]
fn split_non_posix_keeps_quote_characters() {
    let words = split_with("a'b'c \"x y\"", SplitOptions::new().posix(false)).expect("split");
    assert_eq!(words, ["a'b'c", "\"x y\""]);
}

#[test]
fn split_non_posix_ignores_escapes() {
    let words = split_with(r"a\ b", SplitOptions::new().posix(false)).expect("split");
    assert_eq!(words, [r"a\", "b"]);
}

#[test]
fn split_non_posix_closing_quote_ends_word() {
    let words = split_with("'ab'cd", SplitOptions::new().posix(false)).expect("split");
    assert_eq!(words, ["'ab'", "cd"]);
}

// -----------------------------------------------------------
// Errors.
// -----------------------------------------------------------

#[test]
fn split_error_unterminated_double_quote() {
    let err = split("\"abc").expect_err("should fail");
    assert_eq!(err.kind, LexErrorKind::UnterminatedQuote('"'));
}

#[test]
fn split_error_unterminated_single_quote_after_words() {
    let err = split("echo one 'two").expect_err("should fail");
    assert_eq!(err.kind, LexErrorKind::UnterminatedQuote('\''));
}

#[test]
fn split_error_trailing_escape() {
    let err = split("abc\\").expect_err("should fail");
    assert_eq!(err.kind, LexErrorKind::UnterminatedEscape);
}

#[test]
fn split_error_escape_at_end_of_quote() {
    let err = split("\"abc\\").expect_err("should fail");
    assert_eq!(err.kind, LexErrorKind::UnterminatedEscape);
}

#[test]
fn split_error_reports_line() {
    let err = split("a\nb\n'c").expect_err("should fail");
    assert_eq!(err.span.line, 3);
    assert_eq!(err.span.file, None);
    assert_eq!(err.to_string(), "line 3: no closing quotation for '");
}
