//! lang_diagnostics: Parse diagnostics and error reporting.
//!
//! Structural problems found while parsing are not thrown. They are pushed
//! into an [`ErrorCollector`] in the order they are found and reported in
//! aggregate once the parse unit is done.

use std::fmt;
use std::io;

use lang_ast::token::{Token, TokenKind};

/// What went wrong. Every variant has a rendering; there is no silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A specific token was required and something else was found.
    UnexpectedToken { expected: Option<TokenKind> },
    /// The scanner could not make sense of the input here.
    IllegalToken,
    /// An assignment was not terminated by `;`.
    MissingSemicolon,
    /// A signature declared more parameters than allowed.
    TooManyParameters { limit: usize },
    /// The program holds more top-level statements than allowed.
    TooManyStatements { limit: usize },
}

impl ErrorKind {
    /// Stable numeric code, used when diagnostics are rendered through miette.
    pub fn code(self) -> u32 {
        match self {
            ErrorKind::UnexpectedToken { .. } => 1001,
            ErrorKind::IllegalToken => 1002,
            ErrorKind::MissingSemicolon => 1003,
            ErrorKind::TooManyParameters { .. } => 1004,
            ErrorKind::TooManyStatements { .. } => 1005,
        }
    }
}

/// One diagnostic: its kind and the token it is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopedError<'a> {
    pub kind: ErrorKind,
    pub token: Token<'a>,
}

impl<'a> ScopedError<'a> {
    pub fn new(kind: ErrorKind, token: Token<'a>) -> Self {
        Self { kind, token }
    }

    /// The message without position information.
    pub fn message(&self) -> String {
        let found = self.token.kind.name();
        match self.kind {
            ErrorKind::UnexpectedToken { expected: Some(expected) } => {
                format!("unexpected token: found {}, expected {}.", found, expected.name())
            }
            ErrorKind::UnexpectedToken { expected: None } => {
                format!("unexpected token: found {}.", found)
            }
            ErrorKind::IllegalToken => {
                format!("illegal token: `{}` is not valid source text.", self.token.literal)
            }
            ErrorKind::MissingSemicolon => {
                format!("missing semicolon after assignment: found {}.", found)
            }
            ErrorKind::TooManyParameters { limit } => {
                format!("too many parameters: a signature holds at most {} parameters.", limit)
            }
            ErrorKind::TooManyStatements { limit } => {
                format!("too many statements: a program holds at most {} statements.", limit)
            }
        }
    }
}

impl fmt::Display for ScopedError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.token.line, self.token.column, self.message())
    }
}

/// An ordered list of diagnostics, appended in O(1) and walked head to tail.
#[derive(Debug, Clone, Default)]
pub struct ErrorCollector<'a> {
    errors: Vec<ScopedError<'a>>,
}

impl<'a> ErrorCollector<'a> {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn push(&mut self, kind: ErrorKind, token: Token<'a>) {
        self.errors.push(ScopedError::new(kind, token));
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ScopedError<'a>] {
        &self.errors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScopedError<'a>> {
        self.errors.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Render every entry, one line each, in the order they were pushed.
    pub fn render(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Write every entry to `sink`, one line each.
    pub fn report<W: io::Write>(&self, sink: &mut W) -> io::Result<()> {
        for error in &self.errors {
            writeln!(sink, "{}", error)?;
        }
        Ok(())
    }
}

impl<'c, 'a> IntoIterator for &'c ErrorCollector<'a> {
    type Item = &'c ScopedError<'a>;
    type IntoIter = std::slice::Iter<'c, ScopedError<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
