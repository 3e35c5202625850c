//! The lexer: source bytes in, tokens out.

use lang_ast::token::{Token, TokenKind};
use lang_core::arena::{Arena, ArenaError};
use lang_core::text::{Text, TextBuilder};
use tracing::trace;

use crate::char_codes::*;

/// Scans a source text into tokens on demand.
///
/// `next_pos` always points one past the most recently read byte and
/// `current_pos` is the index of `current_char`. The lexer never moves
/// backwards.
pub struct Lexer<'a> {
    source: &'a [u8],
    /// Holds the text of every multi-character literal.
    literals: &'a Arena<'a>,
    current_pos: usize,
    next_pos: usize,
    current_char: u8,
    /// Position of `current_char`.
    line: u32,
    column: u32,
    /// Position of the byte at `next_pos`.
    next_line: u32,
    next_column: u32,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over `source` that materializes literals in `literals`.
    pub fn new(source: &'a str, literals: &'a Arena<'a>) -> Self {
        Self::from_bytes(source.as_bytes(), literals)
    }

    pub fn from_bytes(source: &'a [u8], literals: &'a Arena<'a>) -> Self {
        Self {
            source,
            literals,
            current_pos: 0,
            next_pos: 0,
            current_char: 0,
            line: 1,
            column: 0,
            next_line: 1,
            next_column: 1,
        }
    }

    /// The byte after the current one, if any.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.source.get(self.next_pos).copied()
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.next_pos >= self.source.len()
    }

    /// Advance one byte. Does nothing at the end of the source.
    pub fn read_char(&mut self) {
        let Some(ch) = self.peek() else {
            return;
        };
        self.current_char = ch;
        self.current_pos = self.next_pos;
        self.line = self.next_line;
        self.column = self.next_column;

        self.next_pos += 1;
        if ch == LINE_FEED {
            self.next_line += 1;
            self.next_column = 1;
        } else {
            self.next_column += 1;
        }
    }

    /// Consume the next byte if it equals `expected`.
    pub fn match_char(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.read_char();
            true
        } else {
            false
        }
    }

    /// Index of the byte the lexer is looking at.
    pub fn position(&self) -> usize {
        self.current_pos
    }

    /// Scan the next token.
    ///
    /// Out-of-grammar input becomes an [`TokenKind::Illegal`] token. The only
    /// error is running out of literal arena space.
    pub fn consume_token(&mut self) -> Result<Token<'a>, ArenaError> {
        loop {
            if self.is_at_end() {
                let token = Token::eof(self.next_line, self.next_column);
                trace!(line = token.line, column = token.column, "end of file");
                return Ok(token);
            }
            self.read_char();
            if !is_white_space(self.current_char) {
                break;
            }
        }

        let ch = self.current_char;
        let token = match ch {
            ch if is_digit(ch) => self.consume_number()?,
            ch if is_identifier_start(ch) => self.consume_identifier_or_keyword()?,
            DOUBLE_QUOTE => self.consume_string()?,
            _ => self.consume_punctuation()?,
        };
        trace!(kind = ?token.kind, line = token.line, column = token.column, literal = %token.literal, "token");
        Ok(token)
    }

    /// Digits with at most one decimal point. A second point makes the
    /// whole run an illegal token.
    pub fn consume_number(&mut self) -> Result<Token<'a>, ArenaError> {
        let (line, column) = (self.line, self.column);
        let mut builder = TextBuilder::new(self.literals);
        let mut dots = 0usize;

        builder.push(self.current_char)?;
        while let Some(ch) = self.peek() {
            if !is_number_part(ch) {
                break;
            }
            self.read_char();
            if ch == DOT {
                dots += 1;
            }
            builder.push(ch)?;
        }

        let kind = if dots > 1 {
            TokenKind::Illegal
        } else {
            TokenKind::NumberLiteral
        };
        Ok(Token::new(kind, builder.finish(), line, column))
    }

    /// An identifier, promoted to a keyword kind when it is a reserved word.
    pub fn consume_identifier_or_keyword(&mut self) -> Result<Token<'a>, ArenaError> {
        let (line, column) = (self.line, self.column);
        let mut builder = TextBuilder::new(self.literals);

        builder.push(self.current_char)?;
        while let Some(ch) = self.peek() {
            if !is_identifier_part(ch) {
                break;
            }
            self.read_char();
            builder.push(ch)?;
        }

        let literal = builder.finish();
        let kind = TokenKind::from_keyword(literal.as_bytes()).unwrap_or(TokenKind::Identifier);
        Ok(Token::new(kind, literal, line, column))
    }

    /// A double-quoted string. The literal is the text between the quotes;
    /// an unterminated string is illegal.
    pub fn consume_string(&mut self) -> Result<Token<'a>, ArenaError> {
        let (line, column) = (self.line, self.column);
        let mut builder = TextBuilder::new(self.literals);

        loop {
            if self.is_at_end() {
                return Ok(Token::new(TokenKind::Illegal, builder.finish(), line, column));
            }
            self.read_char();
            if self.current_char == DOUBLE_QUOTE {
                break;
            }
            builder.push(self.current_char)?;
        }

        Ok(Token::new(TokenKind::StringLiteral, builder.finish(), line, column))
    }

    fn consume_punctuation(&mut self) -> Result<Token<'a>, ArenaError> {
        let (line, column) = (self.line, self.column);
        let ch = self.current_char;
        let kind = match ch {
            b'+' => TokenKind::Plus,
            b'-' if self.match_char(b'>') => TokenKind::ThinArrow,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Asterisk,
            b'/' => TokenKind::Slash,
            b'^' => TokenKind::Caret,
            b'.' => TokenKind::Dot,
            b',' => TokenKind::Comma,
            b':' if self.match_char(b'=') => TokenKind::Assignment,
            b':' if self.match_char(b':') => TokenKind::DoubleColon,
            b':' => TokenKind::Colon,
            b';' => TokenKind::Semicolon,
            b'?' => TokenKind::Question,
            b'!' if self.match_char(b'=') => TokenKind::NotEquals,
            b'!' => TokenKind::Exclamation,
            b'=' if self.match_char(b'=') => TokenKind::DoubleEquals,
            b'=' if self.match_char(b'>') => TokenKind::FatArrow,
            b'=' => TokenKind::Equals,
            b'>' if self.match_char(b'=') => TokenKind::GreaterOrEquals,
            b'>' => TokenKind::GreaterThan,
            b'<' if self.match_char(b'=') => TokenKind::LessOrEquals,
            b'<' => TokenKind::LessThan,
            b'&' if self.match_char(b'&') => TokenKind::AmpersandAmpersand,
            b'&' => TokenKind::Ampersand,
            b'|' if self.match_char(b'|') => TokenKind::BarBar,
            b'|' => TokenKind::Bar,
            b'{' => TokenKind::OpenBrace,
            b'}' => TokenKind::CloseBrace,
            b'[' if self.match_char(b']') => TokenKind::ArrayBrackets,
            b'[' => TokenKind::OpenBracket,
            b']' => TokenKind::CloseBracket,
            b'(' => TokenKind::OpenParen,
            b')' => TokenKind::CloseParen,
            other => {
                let literal = Text::from_byte(other, self.literals)?;
                return Ok(Token::new(TokenKind::Illegal, literal, line, column));
            }
        };

        let literal = kind.text().map(Text::from_static).unwrap_or_default();
        Ok(Token::new(kind, literal, line, column))
    }
}

/// Scan `source` to the end, stopping after the end-of-file token or the
/// first illegal token.
pub fn tokenize<'a>(source: &'a str, literals: &'a Arena<'a>) -> Result<Vec<Token<'a>>, ArenaError> {
    let mut lexer = Lexer::new(source, literals);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.consume_token()?;
        tokens.push(token);
        if matches!(token.kind, TokenKind::Eof | TokenKind::Illegal) {
            return Ok(tokens);
        }
    }
}
