//! The parser implementation.
//!
//! A two-token lookahead driver over the lexer. Expressions are parsed by
//! precedence climbing; declarations by small recursive routines. Every
//! parse routine leaves `current` on the last token that belongs to the
//! construct it parsed, and the program loop steps past it.
//!
//! Structural problems are recorded in the parser's [`ErrorCollector`] and
//! parsing carries on from where it is, without resynchronizing. The only
//! hard failure is an arena running out of space.

use lang_ast::node::*;
use lang_ast::token::{Token, TokenKind};
use lang_core::arena::{ArenaError, NodeArena};
use lang_core::text::Text;
use lang_diagnostics::{ErrorCollector, ErrorKind};
use lang_scanner::Lexer;
use thiserror::Error;
use tracing::{debug, trace};

use crate::precedence::{associativity, is_operator, precedence, Associativity};
use crate::utilities::{classify_statement, StatementForm};

/// Failures that stop parsing altogether.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("parser ran out of memory: {0}")]
    Arena(#[from] ArenaError),
}

/// Capacity limits on the collections a parse builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLimits {
    pub max_statements: usize,
    pub max_parameters: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_statements: MAX_STATEMENTS,
            max_parameters: MAX_PARAMETERS,
        }
    }
}

/// Builds a [`Program`] from the tokens of one source text.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    arena: &'a NodeArena,
    limits: ParseLimits,
    current: Token<'a>,
    next: Token<'a>,
    errors: ErrorCollector<'a>,
    /// The lexer stops at the first illegal token; it is reported once.
    illegal_reported: bool,
}

impl<'a> Parser<'a> {
    /// Wrap `lexer` and fill the lookahead window.
    pub fn new(lexer: Lexer<'a>, arena: &'a NodeArena, limits: ParseLimits) -> Result<Self, ParseError> {
        let placeholder = Token::new(TokenKind::Unknown, Text::EMPTY, 0, 0);
        let mut parser = Self {
            lexer,
            arena,
            limits,
            current: placeholder,
            next: placeholder,
            errors: ErrorCollector::new(),
            illegal_reported: false,
        };
        parser.consume_token()?;
        parser.consume_token()?;
        Ok(parser)
    }

    #[inline]
    pub fn current(&self) -> &Token<'a> {
        &self.current
    }

    #[inline]
    pub fn next(&self) -> &Token<'a> {
        &self.next
    }

    // ========================================================================
    // Token window
    // ========================================================================

    /// Shift `next` into `current` and pull a new `next` from the lexer.
    ///
    /// Once `current` is illegal or end of file the window freezes and no
    /// more tokens are requested.
    pub fn consume_token(&mut self) -> Result<(), ParseError> {
        self.current = self.next;
        if matches!(self.current.kind, TokenKind::Illegal | TokenKind::Eof) {
            return Ok(());
        }
        self.next = self.lexer.consume_token()?;
        trace!(current = ?self.current.kind, next = ?self.next.kind, "shift");
        Ok(())
    }

    fn record_illegal(&mut self, token: Token<'a>) {
        if !self.illegal_reported {
            self.illegal_reported = true;
            self.errors.push(ErrorKind::IllegalToken, token);
        }
    }

    /// Check that `current` is of `kind`, recording a diagnostic if not.
    fn expect_current(&mut self, kind: TokenKind) -> bool {
        if self.current.kind == kind {
            return true;
        }
        if self.current.kind == TokenKind::Illegal {
            self.record_illegal(self.current);
        } else {
            self.errors.push(ErrorKind::UnexpectedToken { expected: Some(kind) }, self.current);
        }
        false
    }

    /// Step onto the next token and check its kind.
    fn advance_expecting(&mut self, kind: TokenKind) -> Result<bool, ParseError> {
        self.consume_token()?;
        Ok(self.expect_current(kind))
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    /// Parse an expression starting at `current` by precedence climbing.
    ///
    /// Operators bind while their precedence exceeds `floor`. The right
    /// operand of a left-associative operator is parsed with the operator's
    /// own precedence as its floor, so `2 - 3 - 4` leans left. A run of
    /// right-associative operators at one level is gathered first and folded
    /// from the right, so `2 ^ 3 ^ 4` leans right. Either way recursion depth
    /// is bounded by the number of precedence levels, not by the input.
    pub fn parse_expression(&mut self, floor: u8, arena: &'a NodeArena) -> Result<&'a Expression<'a>, ParseError> {
        let mut left: &'a Expression<'a> = arena.alloc(self.parse_leaf())?;

        while is_operator(self.next.kind) {
            let operator = self.next;
            let level = precedence(operator.kind);
            if level <= floor {
                break;
            }

            left = match associativity(operator.kind) {
                Associativity::Right => self.parse_right_chain(left, level, arena)?,
                Associativity::Left | Associativity::Unknown => {
                    // Step over the operator onto the right operand.
                    self.consume_token()?;
                    self.consume_token()?;
                    let right = self.parse_expression(level, arena)?;
                    let binary: &'a Expression<'a> =
                        arena.alloc(Expression::Binary(BinaryOperation { operator, left, right }))?;
                    binary
                }
            };
        }

        Ok(left)
    }

    /// Gather `left op a op b ...` while `next` is a right-associative
    /// operator at `level`, then fold it into `left op (a op (b ...))`.
    fn parse_right_chain(
        &mut self,
        left: &'a Expression<'a>,
        level: u8,
        arena: &'a NodeArena,
    ) -> Result<&'a Expression<'a>, ParseError> {
        let mut operands = vec![left];
        let mut operators = Vec::new();

        while is_operator(self.next.kind)
            && precedence(self.next.kind) == level
            && associativity(self.next.kind) == Associativity::Right
        {
            operators.push(self.next);
            self.consume_token()?;
            self.consume_token()?;
            operands.push(self.parse_expression(level, arena)?);
        }
        trace!(operators = operators.len(), "right-associative chain");

        let mut folded = match operands.pop() {
            Some(last) => last,
            None => return Ok(left),
        };
        while let (Some(operator), Some(left)) = (operators.pop(), operands.pop()) {
            let binary: &'a Expression<'a> = arena.alloc(Expression::Binary(BinaryOperation {
                operator,
                left,
                right: folded,
            }))?;
            folded = binary;
        }
        Ok(folded)
    }

    fn parse_leaf(&mut self) -> Expression<'a> {
        let token = self.current;
        match token.kind {
            TokenKind::NumberLiteral => Expression::Literal(token),
            TokenKind::Identifier => Expression::Identifier(token),
            TokenKind::Illegal => {
                self.record_illegal(token);
                Expression::Literal(token)
            }
            _ => {
                self.errors.push(ErrorKind::UnexpectedToken { expected: None }, token);
                Expression::Literal(token)
            }
        }
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    /// `name` or `name: type`, starting at `current`.
    pub fn parse_name_with_type(&mut self, arena: &'a NodeArena) -> Result<&'a NameWithType<'a>, ParseError> {
        self.expect_current(TokenKind::Identifier);
        let name = self.current;

        let mut ty = None;
        if self.next.kind == TokenKind::Colon {
            self.consume_token()?;
            if self.advance_expecting(TokenKind::Identifier)? {
                ty = Some(self.current);
            }
        }

        let binding: &'a NameWithType<'a> = arena.alloc(NameWithType { name, ty })?;
        Ok(binding)
    }

    /// `name [: type] := expression;`
    pub fn parse_assignment(&mut self, arena: &'a NodeArena) -> Result<&'a VariableAssignment<'a>, ParseError> {
        let binding = self.parse_name_with_type(arena)?;
        self.advance_expecting(TokenKind::Assignment)?;
        self.consume_token()?;
        let value = self.parse_expression(0, arena)?;

        if self.next.kind == TokenKind::Semicolon {
            self.consume_token()?;
        } else if self.next.kind == TokenKind::Illegal {
            self.record_illegal(self.next);
        } else {
            self.errors.push(ErrorKind::MissingSemicolon, self.next);
        }

        let assignment: &'a VariableAssignment<'a> = arena.alloc(VariableAssignment { binding, value })?;
        Ok(assignment)
    }

    /// `name :: (parameters) -> return_type`. Bodies are not parsed.
    pub fn parse_function(&mut self, arena: &'a NodeArena) -> Result<&'a FunctionDeclaration<'a>, ParseError> {
        self.expect_current(TokenKind::Identifier);
        let name = self.current;
        self.advance_expecting(TokenKind::DoubleColon)?;
        self.advance_expecting(TokenKind::OpenParen)?;

        let mut parameters: Vec<&'a NameWithType<'a>> = Vec::new();
        let mut overflowed = false;
        if self.next.kind == TokenKind::CloseParen {
            self.consume_token()?;
        } else {
            loop {
                self.consume_token()?;
                let parameter = self.parse_name_with_type(arena)?;
                if parameters.len() < self.limits.max_parameters {
                    parameters.push(parameter);
                } else if !overflowed {
                    overflowed = true;
                    self.errors.push(
                        ErrorKind::TooManyParameters {
                            limit: self.limits.max_parameters,
                        },
                        parameter.name,
                    );
                }

                if self.next.kind != TokenKind::Comma {
                    break;
                }
                self.consume_token()?;
            }
            self.advance_expecting(TokenKind::CloseParen)?;
        }

        self.advance_expecting(TokenKind::ThinArrow)?;
        self.advance_expecting(TokenKind::Identifier)?;
        let return_type = self.current;

        let parameters = arena.alloc_slice_copy(&parameters)?;
        let signature: &'a TypeSignature<'a> = arena.alloc(TypeSignature {
            parameters,
            return_type,
        })?;
        let function: &'a FunctionDeclaration<'a> = arena.alloc(FunctionDeclaration {
            name,
            signature,
            body: None,
        })?;
        Ok(function)
    }

    // ========================================================================
    // Statements
    // ========================================================================

    /// Parse one top-level statement starting at `current`.
    ///
    /// Returns `None` when no statement form matches; that is recorded as an
    /// unexpected token.
    pub fn parse_statement(&mut self, arena: &'a NodeArena) -> Result<Option<Statement<'a>>, ParseError> {
        let token = self.current;
        let Some(form) = classify_statement(token.kind, self.next.kind) else {
            if token.kind == TokenKind::Illegal {
                self.record_illegal(token);
            } else {
                self.errors.push(ErrorKind::UnexpectedToken { expected: None }, token);
            }
            return Ok(None);
        };
        debug!(?form, line = token.line, column = token.column, "statement");

        let statement = match form {
            StatementForm::Expression => {
                let expr = self.parse_expression(0, arena)?;
                if self.next.kind == TokenKind::Semicolon {
                    self.consume_token()?;
                }
                Statement::Expression(expr)
            }
            StatementForm::Assignment => Statement::Assignment(self.parse_assignment(arena)?),
            StatementForm::Function => Statement::Function(self.parse_function(arena)?),
        };
        Ok(Some(statement))
    }

    /// Parse statements until end of file (or an illegal token) and hand
    /// back the program with every diagnostic collected on the way.
    pub fn parse_program(mut self) -> Result<(Program<'a>, ErrorCollector<'a>), ParseError> {
        let mut program = Program::new();
        let mut overflowed = false;

        while !matches!(self.current.kind, TokenKind::Eof | TokenKind::Illegal) {
            let start = self.current;
            if let Some(statement) = self.parse_statement(self.arena)? {
                if program.len() < self.limits.max_statements {
                    program.push(statement);
                } else if !overflowed {
                    overflowed = true;
                    self.errors.push(
                        ErrorKind::TooManyStatements {
                            limit: self.limits.max_statements,
                        },
                        start,
                    );
                }
            }
            self.consume_token()?;
        }

        if self.current.kind == TokenKind::Illegal {
            self.record_illegal(self.current);
        }

        debug!(
            statements = program.len(),
            errors = self.errors.len(),
            bytes = self.arena.allocated_bytes(),
            "parsed program"
        );
        Ok((program, self.errors))
    }
}
