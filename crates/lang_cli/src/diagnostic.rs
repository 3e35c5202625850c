//! Bridges collected parse errors to miette reports with source labels.

use std::fmt;

use lang_ast::token::{Token, TokenKind};
use lang_diagnostics::{ErrorKind, ScopedError};
use miette::{Diagnostic, LabeledSpan, SourceSpan};
use thiserror::Error;

/// One collected parse error, located in the source text.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SyntaxDiagnostic {
    code: u32,
    message: String,
    label: String,
    help: Option<&'static str>,
    span: SourceSpan,
}

impl SyntaxDiagnostic {
    pub fn new(error: &ScopedError<'_>, source: &str) -> Self {
        let label = match error.kind {
            ErrorKind::UnexpectedToken { expected: Some(expected) } => format!("expected {}", expected.name()),
            ErrorKind::UnexpectedToken { expected: None } => format!("unexpected {}", error.token.kind.name()),
            ErrorKind::IllegalToken => "not valid here".to_string(),
            ErrorKind::MissingSemicolon => "expected `;` before this".to_string(),
            ErrorKind::TooManyParameters { limit } => format!("parameter {} and later are dropped", limit + 1),
            ErrorKind::TooManyStatements { limit } => format!("statement {} and later are dropped", limit + 1),
        };
        let help = match error.kind {
            ErrorKind::MissingSemicolon => Some("end the assignment with `;`"),
            ErrorKind::TooManyParameters { .. } | ErrorKind::TooManyStatements { .. } => {
                Some("raise the limit in lang.json")
            }
            _ => None,
        };
        Self {
            code: error.kind.code(),
            message: error.message(),
            label,
            help,
            span: token_span(&error.token, source),
        }
    }
}

impl Diagnostic for SyntaxDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!("L{}", self.code)))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help.map(|help| Box::new(help) as Box<dyn fmt::Display + 'a>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some(self.label.clone()),
            self.span,
        ))))
    }
}

/// Byte offset of a 1-based line and column.
pub fn offset_of(source: &str, line: u32, column: u32) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1) as usize)
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1) as usize).min(source.len())
}

fn token_span(token: &Token<'_>, source: &str) -> SourceSpan {
    let offset = offset_of(source, token.line, token.column);
    let len = match token.kind {
        TokenKind::Eof => 0,
        TokenKind::StringLiteral => token.literal.len() + 2,
        _ => token.literal.len().max(1),
    };
    let len = len.min(source.len() - offset);
    SourceSpan::new(offset.into(), len)
}
