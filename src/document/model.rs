//! Syntax Document Model
//!
//! Ordered top-level mapping that keeps every source line, so that writing
//! an untouched document back reproduces it byte for byte.

use std::fmt;

use super::ParseError;
use super::lexer::{Line, LineKind, tokenize};

/// One top-level key and the lines it owns
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: String,
    /// Key line followed by its continuation lines
    lines: Vec<Line>,
}

impl Entry {
    fn last_line_mut(&mut self) -> &mut Line {
        let last = self.lines.len() - 1;
        &mut self.lines[last]
    }

    /// Raw text of the entry, key line included
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| format!("{}{}", l.content, l.eol))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    /// Directives, document markers, column-0 comments, blank lines
    Trivia(Line),
    Entry(Entry),
}

/// A syntax-definition file as an ordered list of top-level entries
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxDocument {
    segments: Vec<Segment>,
    eol: String,
}

impl SyntaxDocument {
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let lines = tokenize(text);
        let eol = lines
            .iter()
            .map(|l| l.eol.as_str())
            .find(|eol| !eol.is_empty())
            .unwrap_or("\n")
            .to_string();

        let mut segments: Vec<Segment> = Vec::new();
        // Blank lines and column-0 comments are held back until we know
        // whether the entry goes on
        let mut pending: Vec<Line> = Vec::new();

        for (idx, line) in lines.into_iter().enumerate() {
            match line.kind.clone() {
                LineKind::Blank | LineKind::Comment => pending.push(line),
                LineKind::Indented | LineKind::SequenceItem => match segments.last_mut() {
                    Some(Segment::Entry(entry)) => {
                        entry.lines.append(&mut pending);
                        entry.lines.push(line);
                    }
                    _ => {
                        return Err(ParseError {
                            line: idx + 1,
                            message: "nested content outside of a top-level key".to_string(),
                        });
                    }
                },
                LineKind::Key { key, .. } => {
                    if segments
                        .iter()
                        .any(|s| matches!(s, Segment::Entry(e) if e.key == key))
                    {
                        return Err(ParseError {
                            line: idx + 1,
                            message: format!("duplicate key \"{key}\""),
                        });
                    }
                    segments.extend(pending.drain(..).map(Segment::Trivia));
                    segments.push(Segment::Entry(Entry {
                        key,
                        lines: vec![line],
                    }));
                }
                LineKind::Other => {
                    return Err(ParseError {
                        line: idx + 1,
                        message: "expected a top-level key".to_string(),
                    });
                }
                LineKind::Directive | LineKind::DocumentStart | LineKind::DocumentEnd => {
                    segments.extend(pending.drain(..).map(Segment::Trivia));
                    segments.push(Segment::Trivia(line));
                }
            }
        }
        segments.extend(pending.into_iter().map(Segment::Trivia));

        Ok(Self { segments, eol })
    }

    /// Top-level keys in document order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries().map(|e| e.key.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Entry(entry) => Some(entry),
            Segment::Trivia(_) => None,
        })
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries().find(|e| e.key == key)
    }

    /// Set `key` to a scalar value
    ///
    /// An existing entry has its value replaced in place; continuation lines
    /// (block sequences, block scalars) are dropped and a trailing comment on
    /// the key line is kept. A missing entry is inserted right after `anchor`
    /// or, without that key, before the first entry.
    pub fn set_scalar(&mut self, key: &str, value: &str, anchor: &str) {
        let rendered = render_scalar(value);

        if let Some(entry) = self.entry_mut(key) {
            let key_line = &entry.lines[0];
            let value_text = key_line.value_text().unwrap_or("");
            let prefix = &key_line.content[..key_line.content.len() - value_text.len()];
            let (separator, comment) = split_value(value_text);
            let content = format!("{prefix}{separator}{rendered}{comment}");
            let eol = entry.last_line_mut().eol.clone();

            entry.lines = vec![Line::new(content, eol)];
            return;
        }

        let position = self
            .position_of(anchor)
            .map(|idx| idx + 1)
            .or_else(|| {
                self.segments
                    .iter()
                    .position(|s| matches!(s, Segment::Entry(_)))
            })
            .or_else(|| {
                self.segments.iter().position(
                    |s| matches!(s, Segment::Trivia(line) if line.kind == LineKind::DocumentEnd),
                )
            })
            .unwrap_or(self.segments.len());

        let mut eol = self.eol.clone();
        // Keep a missing final newline missing
        if position > 0 {
            let previous = match &mut self.segments[position - 1] {
                Segment::Trivia(line) => line,
                Segment::Entry(entry) => entry.last_line_mut(),
            };
            if previous.eol.is_empty() {
                previous.eol = std::mem::take(&mut eol);
            }
        }

        self.segments.insert(
            position,
            Segment::Entry(Entry {
                key: key.to_string(),
                lines: vec![Line::new(format!("{key}: {rendered}"), eol)],
            }),
        );
    }

    fn entry_mut(&mut self, key: &str) -> Option<&mut Entry> {
        self.segments.iter_mut().find_map(|s| match s {
            Segment::Entry(entry) if entry.key == key => Some(entry),
            _ => None,
        })
    }

    fn position_of(&self, key: &str) -> Option<usize> {
        self.segments
            .iter()
            .position(|s| matches!(s, Segment::Entry(e) if e.key == key))
    }

    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SyntaxDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Trivia(line) => write!(f, "{}{}", line.content, line.eol)?,
                Segment::Entry(entry) => f.write_str(&entry.text())?,
            }
        }
        Ok(())
    }
}

/// Split the text after `key:` into the separator to keep and the trailing
/// comment to keep (with its leading whitespace)
fn split_value(value_text: &str) -> (&str, String) {
    let trimmed = value_text.trim_start();
    let separator = &value_text[..value_text.len() - trimmed.len()];
    let separator = if separator.is_empty() { " " } else { separator };

    match find_comment(trimmed) {
        Some(0) => (separator, format!(" {trimmed}")),
        Some(idx) => {
            let value_end = trimmed[..idx].trim_end().len();
            (separator, trimmed[value_end..].to_string())
        }
        None => (separator, String::new()),
    }
}

/// Byte offset of a `#` comment outside of quotes
fn find_comment(value: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut previous = ' ';

    for (idx, ch) in value.char_indices() {
        match quote {
            Some('"') if escaped => escaped = false,
            Some('"') if ch == '\\' => escaped = true,
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None if ch == '#' && previous.is_whitespace() => return Some(idx),
            None if (ch == '\'' || ch == '"') && previous.is_whitespace() => quote = Some(ch),
            None => {}
        }
        previous = ch;
    }

    None
}

/// Render a scalar plain when YAML reads it back as the same string,
/// single-quoted otherwise
fn render_scalar(value: &str) -> String {
    if needs_quotes(value) {
        format!("'{}'", value.replace('\'', "''"))
    } else {
        value.to_string()
    }
}

fn needs_quotes(value: &str) -> bool {
    const LEADING: &[char] = &[
        '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%',
        '@', '`',
    ];
    const RESERVED: &[&str] = &[
        "~", "null", "true", "false", "yes", "no", "on", "off", "y", "n",
    ];

    value.is_empty()
        || value.starts_with(LEADING)
        || value.starts_with(char::is_whitespace)
        || value.ends_with(char::is_whitespace)
        || value.ends_with(':')
        || value.contains(": ")
        || value.contains(" #")
        || value.contains(['\t', '\n', '\r'])
        || RESERVED.contains(&value.to_ascii_lowercase().as_str())
        || value.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALIAS: &str = "%YAML 1.2\n---\nname: SQL\nscope: source.sql\nversion: 2\n\nextends: Packages/SQL/PostgreSQL.sublime-syntax\n\nfile_extensions:\n  - sql\n  - ddl\n\nfirst_line_match: |-\n  (?xi:\n    ^ \\s* -- .*? -\\*- .*? \\bsql\\b .*? -\\*-  # editorconfig\n  )\n";

    #[test]
    fn test_parse_and_print_is_identity() {
        let doc = SyntaxDocument::parse(ALIAS).expect("parse");
        assert_eq!(doc.to_text(), ALIAS);
        assert_eq!(
            doc.keys().collect::<Vec<_>>(),
            vec!["name", "scope", "version", "extends", "file_extensions", "first_line_match"]
        );
    }

    #[test]
    fn test_blank_lines_inside_block_scalar_stay_with_entry() {
        let text = "a: |\n  one\n\n  two\n\nb: 1\n";
        let doc = SyntaxDocument::parse(text).expect("parse");
        assert_eq!(doc.get("a").unwrap().text(), "a: |\n  one\n\n  two\n");
        assert_eq!(doc.to_text(), text);
    }

    #[test]
    fn test_column_zero_comment_inside_entry() {
        let text = "version: 2\ncontexts:\n  main:\n    - include: a\n\n###[ COMMENTS ]###\n  a:\n    - match: x\n# trailer\nhidden: true\n";
        let mut doc = SyntaxDocument::parse(text).expect("parse");
        assert_eq!(doc.to_text(), text);
        assert_eq!(
            doc.get("contexts").unwrap().text(),
            "contexts:\n  main:\n    - include: a\n\n###[ COMMENTS ]###\n  a:\n    - match: x\n"
        );

        doc.set_scalar("extends", "X.sublime-syntax", "version");
        assert_eq!(
            doc.to_text(),
            text.replace("version: 2\n", "version: 2\nextends: X.sublime-syntax\n")
        );
    }

    #[test]
    fn test_leading_comment_stays_before_first_key() {
        let mut doc = SyntaxDocument::parse("# banner\n\nname: A\n").expect("parse");
        doc.set_scalar("extends", "X.sublime-syntax", "version");
        assert_eq!(doc.to_text(), "# banner\n\nextends: X.sublime-syntax\nname: A\n");
    }

    #[test]
    fn test_replace_existing_value() {
        let mut doc = SyntaxDocument::parse(ALIAS).expect("parse");
        doc.set_scalar("extends", "Packages/SQL/MySQL.sublime-syntax", "version");

        let expected = ALIAS.replace("PostgreSQL", "MySQL");
        assert_eq!(doc.to_text(), expected);
    }

    #[test]
    fn test_insert_after_anchor() {
        let mut doc = SyntaxDocument::parse("name: SQL\nscope: source.sql\nversion: 2\n").expect("parse");
        doc.set_scalar("extends", "Packages/SQL/MySQL.sublime-syntax", "version");
        assert_eq!(
            doc.to_text(),
            "name: SQL\nscope: source.sql\nversion: 2\nextends: Packages/SQL/MySQL.sublime-syntax\n"
        );
    }

    #[test]
    fn test_insert_without_anchor_goes_first() {
        let mut doc = SyntaxDocument::parse("%YAML 1.2\n---\n# alias\nname: SQL\n").expect("parse");
        doc.set_scalar("extends", "X.sublime-syntax", "version");
        assert_eq!(
            doc.to_text(),
            "%YAML 1.2\n---\n# alias\nextends: X.sublime-syntax\nname: SQL\n"
        );
    }

    #[test]
    fn test_insert_keeps_missing_final_newline() {
        let mut doc = SyntaxDocument::parse("name: SQL\r\nversion: 2").expect("parse");
        doc.set_scalar("extends", "X.sublime-syntax", "version");
        assert_eq!(doc.to_text(), "name: SQL\r\nversion: 2\r\nextends: X.sublime-syntax");
    }

    #[test]
    fn test_replace_keeps_comment_and_separator() {
        let mut doc =
            SyntaxDocument::parse("extends:   'Old.sublime-syntax'  # chosen dialect\nname: A\n")
                .expect("parse");
        doc.set_scalar("extends", "New.sublime-syntax", "version");
        assert_eq!(
            doc.to_text(),
            "extends:   New.sublime-syntax  # chosen dialect\nname: A\n"
        );
    }

    #[test]
    fn test_replace_collapses_block_list() {
        let text = "extends: # parents\n  - A.sublime-syntax\n  - B.sublime-syntax\nname: A\n";
        let mut doc = SyntaxDocument::parse(text).expect("parse");
        doc.set_scalar("extends", "C.sublime-syntax", "version");
        assert_eq!(doc.to_text(), "extends: C.sublime-syntax # parents\nname: A\n");
    }

    #[test]
    fn test_replace_compact_list_at_end_of_file() {
        let mut doc = SyntaxDocument::parse("name: A\nextends:\n- A.sublime-syntax").expect("parse");
        doc.set_scalar("extends", "C.sublime-syntax", "version");
        assert_eq!(doc.to_text(), "name: A\nextends: C.sublime-syntax");
    }

    #[test]
    fn test_replace_flow_list() {
        let mut doc = SyntaxDocument::parse("extends: [A.sublime-syntax, B.sublime-syntax]\n").expect("parse");
        doc.set_scalar("extends", "C.sublime-syntax", "version");
        assert_eq!(doc.to_text(), "extends: C.sublime-syntax\n");
    }

    #[test]
    fn test_quoting() {
        assert_eq!(render_scalar("Packages/SQL/MySQL.sublime-syntax"), "Packages/SQL/MySQL.sublime-syntax");
        assert_eq!(render_scalar("Packages/SQL/SQL (basic).sublime-syntax"), "Packages/SQL/SQL (basic).sublime-syntax");
        assert_eq!(render_scalar("C:\\Syntaxes\\a b.sublime-syntax"), "C:\\Syntaxes\\a b.sublime-syntax");
        assert_eq!(render_scalar("it's: here"), "'it''s: here'");
        assert_eq!(render_scalar("@odd"), "'@odd'");
        assert_eq!(render_scalar("2"), "'2'");
        assert_eq!(render_scalar("null"), "'null'");
        assert_eq!(render_scalar(""), "''");
    }

    #[test]
    fn test_find_comment_ignores_quoted_hash() {
        assert_eq!(find_comment("'a #b' # c"), Some(7));
        assert_eq!(find_comment("\"a \\\" #b\""), None);
        assert_eq!(find_comment("a#b"), None);
        assert_eq!(find_comment("# only"), Some(0));
    }

    #[test]
    fn test_rejects_structures_it_cannot_edit() {
        assert!(SyntaxDocument::parse("  indented: first\n").is_err());
        assert!(SyntaxDocument::parse("# banner\n  indented: first\n").is_err());
        assert!(SyntaxDocument::parse("{name: SQL}\n").is_err());
        let err = SyntaxDocument::parse("name: A\nname: B\n").unwrap_err();
        assert_eq!(err.line, 2);
    }
}
