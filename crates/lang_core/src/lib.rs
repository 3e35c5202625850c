//! lang_core: Core memory and text utilities for the front end.
//!
//! Provides the byte-region arena used for literal text, the typed node
//! arena used for the AST, and the borrowed text views built on top of them.

pub mod arena;
pub mod text;

// Re-export commonly used types
pub use arena::{Arena, ArenaError, NodeArena, DEFAULT_ALIGNMENT};
pub use text::{Text, TextBuilder};
