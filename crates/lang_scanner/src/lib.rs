//! lang_scanner: Lexer for the language's source text.
//!
//! The lexer is pull based: the parser asks for one token at a time with
//! [`Lexer::consume_token`]. Multi-character literals are copied byte by
//! byte into a caller-owned [`lang_core::Arena`], so token text never
//! points into the source buffer.

mod char_codes;
mod lexer;

pub use lexer::{tokenize, Lexer};
