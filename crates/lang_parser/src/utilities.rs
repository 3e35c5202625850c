//! Parser utility functions.

use lang_ast::token::TokenKind;

/// The top-level statement forms the parser recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementForm {
    Expression,
    Assignment,
    Function,
}

/// Choose a statement form from the two-token lookahead window.
///
/// A leading number starts an expression. Otherwise the second token
/// decides: `:=` (or `:` after a name, for a typed binding) starts an
/// assignment and `::` starts a function declaration. Anything else has no
/// statement form and is left to the caller to report.
pub fn classify_statement(current: TokenKind, next: TokenKind) -> Option<StatementForm> {
    match (current, next) {
        (TokenKind::NumberLiteral, _) => Some(StatementForm::Expression),
        (_, TokenKind::Assignment) | (TokenKind::Identifier, TokenKind::Colon) => Some(StatementForm::Assignment),
        (_, TokenKind::DoubleColon) => Some(StatementForm::Function),
        _ => None,
    }
}
