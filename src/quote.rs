/// Characters that never need quoting.
fn is_safe(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || "_@%+=:,./-".contains(ch)
}

/// Quote `word` so that [`split`](crate::split()) returns it unchanged.
///
/// Words made only of safe characters are returned as-is. Anything else
/// is wrapped in single quotes, with embedded single quotes written as
/// `'"'"'`.
#[must_use]
pub fn quote(word: &str) -> String {
    if word.is_empty() {
        return "''".to_string();
    }
    if word.chars().all(is_safe) {
        return word.to_string();
    }
    format!("'{}'", word.replace('\'', "'\"'\"'"))
}

/// Quote each word and join them with single spaces.
#[must_use]
pub fn join<I, S>(words: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .map(|w| quote(w.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}
