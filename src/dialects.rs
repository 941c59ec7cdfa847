//! Dialect Listing
//!
//! Offers the syntaxes a generic alias could extend: every visible syntax in
//! the same scope family, with the one currently extended marked.

use std::path::Path;

use serde::Serialize;

use crate::document::SyntaxHeader;
use crate::error::{DialectError, Result};
use crate::store::ResourceStore;

/// A syntax the alias could extend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialectCandidate {
    pub name: String,
    pub path: String,
    pub scope: String,
    /// Currently extended by the alias
    pub selected: bool,
}

/// List candidate dialects for `syntax_file`
///
/// A candidate's scope must start with the first two components of the
/// alias scope, so `source.sql` offers `source.sql.mysql` but not
/// `source.python`. Hidden syntaxes and the alias itself are left out.
pub fn list_dialects<S: ResourceStore>(store: &S, syntax_file: &str) -> Result<Vec<DialectCandidate>> {
    let content = store
        .load(syntax_file)
        .map_err(|source| DialectError::from_load(syntax_file, source))?;
    let target = SyntaxHeader::parse(&content)
        .map_err(|e| DialectError::malformed(syntax_file, e.to_string()))?;
    let family = target
        .scope_family()
        .ok_or_else(|| DialectError::malformed(syntax_file, "no scope"))?;
    let selected = target.extends_path();

    let syntaxes = store
        .list_syntaxes()
        .map_err(|source| DialectError::NotFound {
            path: "Packages".to_string(),
            source,
        })?;

    let mut candidates = Vec::new();
    for path in syntaxes {
        if path == syntax_file {
            continue;
        }

        let header = match store
            .load(&path)
            .map_err(|e| e.to_string())
            .and_then(|text| SyntaxHeader::parse(&text).map_err(|e| e.to_string()))
        {
            Ok(header) => header,
            Err(e) => {
                log::warn!("Skipping syntax {path}: {e}");
                continue;
            }
        };

        if header.hidden {
            continue;
        }
        let Some(scope) = header.scope else {
            continue;
        };
        if !scope.starts_with(&family) {
            continue;
        }

        candidates.push(DialectCandidate {
            name: header.name.unwrap_or_else(|| file_stem(&path)),
            selected: selected == Some(path.as_str()),
            path,
            scope,
        });
    }

    candidates.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.path.cmp(&b.path)));
    log::debug!(
        "Found {} dialects of {family} for {syntax_file}",
        candidates.len()
    );

    Ok(candidates)
}

fn file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem_names_unnamed_syntaxes() {
        assert_eq!(file_stem("Packages/SQL/TSQL.sublime-syntax"), "TSQL");
        assert_eq!(file_stem("odd"), "odd");
    }
}
