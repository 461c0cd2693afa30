use std::fmt;

/// Source location for error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub file: Option<String>,
    pub line: usize,
}

impl Span {
    #[must_use]
    pub const fn new(file: Option<String>, line: usize) -> Self {
        Self { file, line }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "\"{file}\", line {}", self.line),
            None => write!(f, "line {}", self.line),
        }
    }
}
