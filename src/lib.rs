//! Syntax Dialect
//!
//! Points a generic syntax definition at a concrete dialect.
//!
//! Embedding syntaxes refer to other languages by scope (`scope:source.sql`),
//! which leaves no way to say which SQL is meant. Making `SQL.sublime-syntax`
//! an alias that `extends` the chosen dialect answers that question for every
//! embedding syntax at once.
//!
//! This library provides:
//! - A line-preserving model of syntax files
//! - The dialect assigner and candidate listing
//! - The `set_default_syntax_dialect` command boundary
//! - Configuration and the command-line front end

pub mod assigner;
pub mod cli;
pub mod command;
pub mod config;
pub mod dialects;
pub mod document;
pub mod error;
pub mod host;
pub mod store;

// Re-exports for clean public API
pub use assigner::{Assignment, DialectAssigner};
pub use command::{CommandReport, Notice, SetDefaultSyntaxDialect, SetDialectArgs};
pub use config::Config;
pub use dialects::{DialectCandidate, list_dialects};
pub use document::{SyntaxDocument, SyntaxHeader};
pub use error::DialectError;
pub use host::SyntaxHost;
pub use store::{PackageStore, ResourceStore};
