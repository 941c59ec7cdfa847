//! Syntax Documents
//!
//! Line-preserving model of `.sublime-syntax` files plus a typed view of
//! their well-known keys.

pub mod header;
pub mod lexer;
pub mod model;

pub use header::{Extends, SyntaxHeader, parse_mapping};
pub use model::{Entry, SyntaxDocument};

/// Why a syntax file could not be understood
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct ParseError {
    /// One-based line number
    pub line: usize,
    pub message: String,
}
