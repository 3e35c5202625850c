//! Operator precedence and associativity for binary operators.

use lang_ast::token::TokenKind;

/// Binding power of binary operators, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    /// Not a binary operator.
    Invalid = 0,
    Additive = 1,
    Multiplicative = 2,
    Exponentiation = 3,
}

impl OperatorPrecedence {
    #[inline]
    pub fn level(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
    Unknown,
}

/// Whether `kind` is a binary operator the expression parser folds.
#[inline]
pub fn is_operator(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Plus | TokenKind::Minus | TokenKind::Asterisk | TokenKind::Slash | TokenKind::Caret
    )
}

/// Get the binary operator precedence for a given token kind.
pub fn get_binary_operator_precedence(kind: TokenKind) -> OperatorPrecedence {
    match kind {
        TokenKind::Plus | TokenKind::Minus => OperatorPrecedence::Additive,
        TokenKind::Asterisk | TokenKind::Slash => OperatorPrecedence::Multiplicative,
        TokenKind::Caret => OperatorPrecedence::Exponentiation,
        _ => OperatorPrecedence::Invalid,
    }
}

/// Numeric precedence; 0 for anything that is not an operator.
#[inline]
pub fn precedence(kind: TokenKind) -> u8 {
    get_binary_operator_precedence(kind).level()
}

pub fn associativity(kind: TokenKind) -> Associativity {
    match kind {
        TokenKind::Plus | TokenKind::Minus | TokenKind::Asterisk | TokenKind::Slash => Associativity::Left,
        TokenKind::Caret => Associativity::Right,
        _ => Associativity::Unknown,
    }
}
