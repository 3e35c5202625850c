//! Token kinds and tokens.
//!
//! The kind set is closed: a new grammar feature means a new variant plus a
//! recognizer rule in the scanner.

use std::fmt;

use lang_core::text::Text;

/// The kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TokenKind {
    Unknown = 0,

    // One-character punctuation
    Plus,
    Minus,
    Asterisk,
    Slash,
    Caret,
    Dot,
    Comma,
    Colon,
    Semicolon,
    Question,
    Exclamation,
    Equals,
    GreaterThan,
    LessThan,
    Ampersand,
    Bar,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,

    // Two-character punctuation
    ThinArrow,
    FatArrow,
    DoubleEquals,
    NotEquals,
    GreaterOrEquals,
    LessOrEquals,
    ArrayBrackets,
    Assignment,
    DoubleColon,
    AmpersandAmpersand,
    BarBar,

    // Literals
    NumberLiteral,
    StringLiteral,

    // Keywords
    Struct,
    Enum,
    If,
    Else,
    Return,
    For,
    Var,
    Fun,

    Identifier,
    Illegal,
    Eof,
}

impl TokenKind {
    pub const FIRST_PUNCTUATION: TokenKind = TokenKind::Plus;
    pub const LAST_PUNCTUATION: TokenKind = TokenKind::BarBar;
    pub const FIRST_COMPOUND: TokenKind = TokenKind::ThinArrow;
    pub const FIRST_KEYWORD: TokenKind = TokenKind::Struct;
    pub const LAST_KEYWORD: TokenKind = TokenKind::Fun;

    /// Every punctuation kind, one- and two-character.
    pub const PUNCTUATION: [TokenKind; 33] = [
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Asterisk,
        TokenKind::Slash,
        TokenKind::Caret,
        TokenKind::Dot,
        TokenKind::Comma,
        TokenKind::Colon,
        TokenKind::Semicolon,
        TokenKind::Question,
        TokenKind::Exclamation,
        TokenKind::Equals,
        TokenKind::GreaterThan,
        TokenKind::LessThan,
        TokenKind::Ampersand,
        TokenKind::Bar,
        TokenKind::OpenBrace,
        TokenKind::CloseBrace,
        TokenKind::OpenBracket,
        TokenKind::CloseBracket,
        TokenKind::OpenParen,
        TokenKind::CloseParen,
        TokenKind::ThinArrow,
        TokenKind::FatArrow,
        TokenKind::DoubleEquals,
        TokenKind::NotEquals,
        TokenKind::GreaterOrEquals,
        TokenKind::LessOrEquals,
        TokenKind::ArrayBrackets,
        TokenKind::Assignment,
        TokenKind::DoubleColon,
        TokenKind::AmpersandAmpersand,
        TokenKind::BarBar,
    ];

    /// Every reserved word.
    pub const KEYWORDS: [TokenKind; 8] = [
        TokenKind::Struct,
        TokenKind::Enum,
        TokenKind::If,
        TokenKind::Else,
        TokenKind::Return,
        TokenKind::For,
        TokenKind::Var,
        TokenKind::Fun,
    ];

    /// Whether this kind is a reserved word.
    #[inline]
    pub fn is_keyword(self) -> bool {
        let v = self as u8;
        v >= Self::FIRST_KEYWORD as u8 && v <= Self::LAST_KEYWORD as u8
    }

    /// Whether this kind is punctuation of either width.
    #[inline]
    pub fn is_punctuation(self) -> bool {
        let v = self as u8;
        v >= Self::FIRST_PUNCTUATION as u8 && v <= Self::LAST_PUNCTUATION as u8
    }

    /// Whether this kind is two-character punctuation.
    #[inline]
    pub fn is_compound(self) -> bool {
        let v = self as u8;
        v >= Self::FIRST_COMPOUND as u8 && v <= Self::LAST_PUNCTUATION as u8
    }

    #[inline]
    pub fn is_literal(self) -> bool {
        matches!(self, TokenKind::NumberLiteral | TokenKind::StringLiteral)
    }

    /// Look up a reserved word.
    pub fn from_keyword(text: &[u8]) -> Option<TokenKind> {
        match text {
            b"struct" => Some(TokenKind::Struct),
            b"enum" => Some(TokenKind::Enum),
            b"if" => Some(TokenKind::If),
            b"else" => Some(TokenKind::Else),
            b"return" => Some(TokenKind::Return),
            b"for" => Some(TokenKind::For),
            b"var" => Some(TokenKind::Var),
            b"fun" => Some(TokenKind::Fun),
            _ => None,
        }
    }

    /// The canonical source text of punctuation and keyword kinds.
    pub fn text(self) -> Option<&'static str> {
        let text = match self {
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Caret => "^",
            TokenKind::Dot => ".",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::Question => "?",
            TokenKind::Exclamation => "!",
            TokenKind::Equals => "=",
            TokenKind::GreaterThan => ">",
            TokenKind::LessThan => "<",
            TokenKind::Ampersand => "&",
            TokenKind::Bar => "|",
            TokenKind::OpenBrace => "{",
            TokenKind::CloseBrace => "}",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::ThinArrow => "->",
            TokenKind::FatArrow => "=>",
            TokenKind::DoubleEquals => "==",
            TokenKind::NotEquals => "!=",
            TokenKind::GreaterOrEquals => ">=",
            TokenKind::LessOrEquals => "<=",
            TokenKind::ArrayBrackets => "[]",
            TokenKind::Assignment => ":=",
            TokenKind::DoubleColon => "::",
            TokenKind::AmpersandAmpersand => "&&",
            TokenKind::BarBar => "||",
            TokenKind::Struct => "struct",
            TokenKind::Enum => "enum",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Return => "return",
            TokenKind::For => "for",
            TokenKind::Var => "var",
            TokenKind::Fun => "fun",
            TokenKind::Unknown
            | TokenKind::NumberLiteral
            | TokenKind::StringLiteral
            | TokenKind::Identifier
            | TokenKind::Illegal
            | TokenKind::Eof => return None,
        };
        Some(text)
    }

    /// Human-readable name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Unknown => "unknown symbol",
            TokenKind::Plus => "plus sign",
            TokenKind::Minus => "minus sign",
            TokenKind::Asterisk => "asterisk",
            TokenKind::Slash => "slash",
            TokenKind::Caret => "exponent",
            TokenKind::Dot => "dot",
            TokenKind::Comma => "comma",
            TokenKind::Colon => "colon",
            TokenKind::Semicolon => "semicolon",
            TokenKind::Question => "question mark",
            TokenKind::Exclamation => "exclamation mark",
            TokenKind::Equals => "equals sign",
            TokenKind::GreaterThan => "greater than sign",
            TokenKind::LessThan => "less than sign",
            TokenKind::Ampersand => "ampersand",
            TokenKind::Bar => "vertical bar",
            TokenKind::OpenBrace => "opening curly brace",
            TokenKind::CloseBrace => "closing curly brace",
            TokenKind::OpenBracket => "opening square bracket",
            TokenKind::CloseBracket => "closing square bracket",
            TokenKind::OpenParen => "opening parenthesis",
            TokenKind::CloseParen => "closing parenthesis",
            TokenKind::ThinArrow => "thin arrow",
            TokenKind::FatArrow => "fat arrow",
            TokenKind::DoubleEquals => "double equals sign",
            TokenKind::NotEquals => "not equals sign",
            TokenKind::GreaterOrEquals => "greater than or equals to sign",
            TokenKind::LessOrEquals => "less than or equals to sign",
            TokenKind::ArrayBrackets => "array bracket specifier",
            TokenKind::Assignment => "assignment operator",
            TokenKind::DoubleColon => "double colon",
            TokenKind::AmpersandAmpersand => "logical and",
            TokenKind::BarBar => "logical or",
            TokenKind::NumberLiteral => "number literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::Struct => "struct keyword",
            TokenKind::Enum => "enum keyword",
            TokenKind::If => "if keyword",
            TokenKind::Else => "else keyword",
            TokenKind::Return => "return keyword",
            TokenKind::For => "for keyword",
            TokenKind::Var => "var keyword",
            TokenKind::Fun => "fun keyword",
            TokenKind::Identifier => "identifier",
            TokenKind::Illegal => "illegal token",
            TokenKind::Eof => "end of file",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scanned token: its kind, its literal text and where it starts.
///
/// `line` and `column` are 1-based and point at the token's first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub literal: Text<'a>,
    pub line: u32,
    pub column: u32,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, literal: Text<'a>, line: u32, column: u32) -> Self {
        Self {
            kind,
            literal,
            line,
            column,
        }
    }

    /// The end-of-file token, which carries no literal.
    pub fn eof(line: u32, column: u32) -> Self {
        Self::new(TokenKind::Eof, Text::EMPTY, line, column)
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.literal.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}", self.literal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        for kind in TokenKind::KEYWORDS {
            let text = kind.text().unwrap();
            assert_eq!(TokenKind::from_keyword(text.as_bytes()), Some(kind));
            assert!(kind.is_keyword());
        }
        assert_eq!(TokenKind::from_keyword(b"function"), None);
        assert_eq!(TokenKind::from_keyword(b"Fun"), None);
    }

    #[test]
    fn test_kind_ranges() {
        for kind in TokenKind::PUNCTUATION {
            assert!(kind.is_punctuation(), "{:?}", kind);
            assert!(!kind.is_keyword());
            assert_eq!(kind.is_compound(), kind.text().unwrap().len() == 2, "{:?}", kind);
        }
        assert!(!TokenKind::Identifier.is_punctuation());
        assert!(!TokenKind::NumberLiteral.is_keyword());
        assert!(TokenKind::StringLiteral.is_literal());
    }

    #[test]
    fn test_token_display() {
        let token = Token::new(TokenKind::Identifier, Text::from_static("x"), 1, 1);
        assert_eq!(token.to_string(), "x");
        assert_eq!(Token::eof(3, 1).to_string(), "end of file");
    }
}
