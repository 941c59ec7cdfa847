//! Syntax File Lexer
//!
//! Line classification for syntax-definition files.
//! Only the top level of the mapping matters here: anything indented is
//! opaque continuation of the key above it.

/// Line kinds at the top level of a YAML document
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    /// `%YAML 1.2` and friends
    Directive,
    /// `---`
    DocumentStart,
    /// `...`
    DocumentEnd,
    /// Whitespace only
    Blank,
    /// `#` comment starting in column 0
    Comment,
    /// `key:` starting in column 0
    Key { key: String, value_start: usize },
    /// `- item` in column 0, a compact sequence under the previous key
    SequenceItem,
    /// Any non-blank line starting with whitespace
    Indented,
    /// Column-0 content that is not a mapping key
    Other,
}

/// A source line with its terminator kept apart
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub kind: LineKind,
    pub content: String,
    /// `"\n"`, `"\r\n"` or `""` for a final line without newline
    pub eol: String,
}

impl Line {
    pub fn new(content: impl Into<String>, eol: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            kind: classify_line(&content),
            content,
            eol: eol.into(),
        }
    }

    /// Text after the `key:` separator, if this is a key line
    pub fn value_text(&self) -> Option<&str> {
        match &self.kind {
            LineKind::Key { value_start, .. } => Some(&self.content[*value_start..]),
            _ => None,
        }
    }
}

/// Split text into classified lines
///
/// Concatenating `content + eol` of every line gives back the input exactly.
pub fn tokenize(text: &str) -> Vec<Line> {
    text.split_inclusive('\n')
        .map(|raw| {
            if let Some(content) = raw.strip_suffix("\r\n") {
                Line::new(content, "\r\n")
            } else if let Some(content) = raw.strip_suffix('\n') {
                Line::new(content, "\n")
            } else {
                Line::new(raw, "")
            }
        })
        .collect()
}

/// Classify a single line without its terminator
pub fn classify_line(line: &str) -> LineKind {
    if line.trim().is_empty() {
        return LineKind::Blank;
    }

    if line.starts_with(' ') || line.starts_with('\t') {
        return LineKind::Indented;
    }

    if line.starts_with('%') {
        return LineKind::Directive;
    }
    if is_marker(line, "---") {
        return LineKind::DocumentStart;
    }
    if is_marker(line, "...") {
        return LineKind::DocumentEnd;
    }
    if line.starts_with('#') {
        return LineKind::Comment;
    }
    if line == "-" || line.starts_with("- ") || line.starts_with("-\t") {
        return LineKind::SequenceItem;
    }

    match split_key(line) {
        Some((key, value_start)) => LineKind::Key {
            key: key.to_string(),
            value_start,
        },
        None => LineKind::Other,
    }
}

fn is_marker(line: &str, marker: &str) -> bool {
    line.strip_prefix(marker)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with([' ', '\t']))
}

/// Find `key:` at the start of a line
///
/// Returns the key and the byte offset right after the colon. Quoted keys,
/// flow collections and explicit `?` keys are not recognised.
fn split_key(line: &str) -> Option<(&str, usize)> {
    const INDICATORS: [char; 13] = [
        '?', '[', ']', '{', '}', '&', '*', '!', '|', '>', '\'', '"', '@',
    ];

    if line.starts_with(INDICATORS) || line.starts_with('`') {
        return None;
    }

    let bytes = line.as_bytes();
    for (idx, &byte) in bytes.iter().enumerate() {
        match byte {
            b'#' if idx > 0 && matches!(bytes[idx - 1], b' ' | b'\t') => return None,
            b':' => {
                let at_end = idx + 1 == bytes.len();
                if at_end || matches!(bytes[idx + 1], b' ' | b'\t') {
                    let key = line[..idx].trim_end();
                    if key.is_empty() {
                        return None;
                    }
                    return Some((key, idx + 1));
                }
            }
            _ => {}
        }
    }

    None
}
