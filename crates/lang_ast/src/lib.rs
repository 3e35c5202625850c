//! lang_ast: Token model and abstract syntax tree definitions.
//!
//! Defines the closed set of token kinds produced by the scanner, the
//! arena-allocated node types built by the parser, and a visitor for walking
//! them.

pub mod node;
pub mod token;
pub mod visitor;

// Re-export key types
pub use node::*;
pub use token::{Token, TokenKind};
pub use visitor::AstVisitor;
