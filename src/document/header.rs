//! Syntax Header
//!
//! Typed, read-only view of the well-known top-level keys of a syntax file.

use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use super::ParseError;
use super::lexer::{LineKind, tokenize};

/// Top-level keys of a `.sublime-syntax` file
///
/// Every other key (`contexts`, `variables`, ...) is ignored here and passed
/// through untouched by [`super::SyntaxDocument`].
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SyntaxHeader {
    pub name: Option<String>,
    pub scope: Option<String>,
    pub version: Option<u32>,
    pub extends: Option<Extends>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub file_extensions: Vec<String>,
    pub first_line_match: Option<String>,
}

/// `extends` holds one path or, with multiple inheritance, a list of them
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Extends {
    One(String),
    Many(Vec<String>),
}

impl Extends {
    /// The path that decides which dialect is in effect
    pub fn primary(&self) -> Option<&str> {
        match self {
            Extends::One(path) => Some(path),
            Extends::Many(paths) => paths.first().map(String::as_str),
        }
    }
}

impl SyntaxHeader {
    /// Parse the header of a syntax file
    ///
    /// The document must be a single YAML mapping.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mapping = parse_mapping(text)?;
        serde_yaml::from_value(serde_yaml::Value::Mapping(mapping)).map_err(yaml_error)
    }

    /// Scope family used to group dialects, e.g. `source.sql`
    pub fn scope_family(&self) -> Option<String> {
        let mut parts = self.scope.as_deref()?.split('.');
        let first = parts.next().filter(|s| !s.is_empty())?;
        match parts.next() {
            Some(second) => Some(format!("{first}.{second}")),
            None => Some(first.to_string()),
        }
    }

    pub fn extends_path(&self) -> Option<&str> {
        self.extends.as_ref()?.primary()
    }
}

/// Parse a syntax file as an untyped YAML mapping
///
/// Only the shape is checked, so keys of unexpected types still pass.
pub fn parse_mapping(text: &str) -> Result<Mapping, ParseError> {
    // Directives are blanked rather than removed so error lines stay
    // accurate.
    let yaml: String = tokenize(text)
        .into_iter()
        .map(|line| match line.kind {
            LineKind::Directive => line.eol,
            _ => line.content + &line.eol,
        })
        .collect();

    match serde_yaml::from_str(&yaml).map_err(yaml_error)? {
        Value::Mapping(mapping) => Ok(mapping),
        _ => Err(ParseError {
            line: 1,
            message: "document is not a mapping".to_string(),
        }),
    }
}

fn yaml_error(err: serde_yaml::Error) -> ParseError {
    ParseError {
        line: err.location().map(|loc| loc.line()).unwrap_or(1),
        message: err.to_string(),
    }
}
