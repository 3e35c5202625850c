//! lang_parser: Pratt parser for the language.
//!
//! Pulls tokens from the lexer on demand and builds an AST whose nodes live
//! in a [`NodeArena`]. Diagnostics are collected, not thrown.

mod parser;
mod precedence;
mod utilities;

use lang_ast::node::Program;
use lang_core::arena::{Arena, NodeArena};
use lang_diagnostics::ErrorCollector;
use lang_scanner::Lexer;

pub use parser::{ParseError, ParseLimits, Parser};
pub use precedence::{associativity, get_binary_operator_precedence, is_operator, precedence, Associativity, OperatorPrecedence};
pub use utilities::{classify_statement, StatementForm};

/// Lex and parse a whole source text in one call.
pub fn parse_source<'a>(
    source: &'a str,
    literals: &'a Arena<'a>,
    nodes: &'a NodeArena,
    limits: ParseLimits,
) -> Result<(Program<'a>, ErrorCollector<'a>), ParseError> {
    let lexer = Lexer::new(source, literals);
    Parser::new(lexer, nodes, limits)?.parse_program()
}
