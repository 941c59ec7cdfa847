//! Dialect Assigner
//!
//! Points a syntax alias (e.g. `SQL.sublime-syntax`) at the dialect it
//! should extend (e.g. `MySQL.sublime-syntax`) by rewriting its `extends`
//! key, then asks the host to reload syntax definitions.
//!
//! The file is read fresh on every call and written back in one go. Nothing
//! else in the file changes: keys keep their order and comments and
//! formatting outside the `extends` line are left as they were.

use serde_yaml::{Mapping, Value};

use crate::document::{Extends, SyntaxDocument, parse_mapping};
use crate::error::{DialectError, Result};
use crate::host::SyntaxHost;
use crate::store::ResourceStore;

/// Key rewritten by the assigner
pub const EXTENDS_KEY: &str = "extends";
/// A new `extends` goes right after this key
pub const VERSION_KEY: &str = "version";

/// What an assignment did to the target file
#[derive(Debug, Clone, PartialEq)]
pub enum Assignment {
    /// File rewritten and host reloaded
    Updated { previous: Option<Extends> },
    /// File already extended the dialect; nothing written
    Unchanged,
}

/// Rewrites the `extends` reference of syntax files
#[derive(Debug)]
pub struct DialectAssigner<S, H> {
    store: S,
    host: H,
}

impl<S: ResourceStore, H: SyntaxHost> DialectAssigner<S, H> {
    pub fn new(store: S, host: H) -> Self {
        Self { store, host }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Make `syntax_file` extend `dialect_file`
    ///
    /// The dialect path is taken as given; whether the editor can resolve it
    /// only shows when it reloads.
    pub fn assign_dialect(&mut self, syntax_file: &str, dialect_file: &str) -> Result<Assignment> {
        log::debug!("Assigning dialect {dialect_file} to {syntax_file}");

        let old_content = self
            .store
            .load(syntax_file)
            .map_err(|source| DialectError::from_load(syntax_file, source))?;

        // Keys other than extends pass through, whatever their types
        let before = parse_mapping(&old_content)
            .map_err(|e| DialectError::malformed(syntax_file, e.to_string()))?;
        let mut document = SyntaxDocument::parse(&old_content)
            .map_err(|e| DialectError::malformed(syntax_file, e.to_string()))?;

        document.set_scalar(EXTENDS_KEY, dialect_file, VERSION_KEY);
        let new_content = document.to_text();

        // Leave the file alone so the editor does not re-index everything
        if new_content == old_content {
            log::info!("{syntax_file} already extends {dialect_file}");
            return Ok(Assignment::Unchanged);
        }

        let previous = check_rewrite(syntax_file, dialect_file, before, &new_content)?;

        self.store
            .store(syntax_file, &new_content)
            .map_err(|source| DialectError::WriteDenied {
                path: syntax_file.to_string(),
                source,
            })?;
        log::info!("{syntax_file} now extends {dialect_file}");

        self.host.reload();

        Ok(Assignment::Updated { previous })
    }
}

/// The rewritten text must read back with only `extends` changed
///
/// Returns the replaced `extends` value.
fn check_rewrite(
    syntax_file: &str,
    dialect_file: &str,
    mut before: Mapping,
    new_content: &str,
) -> Result<Option<Extends>> {
    let mut after = parse_mapping(new_content)
        .map_err(|e| DialectError::malformed(syntax_file, format!("rewrite failed: {e}")))?;

    if after.shift_remove(EXTENDS_KEY) != Some(Value::String(dialect_file.to_string())) {
        return Err(DialectError::malformed(
            syntax_file,
            format!("\"{dialect_file}\" cannot be written as an extends value"),
        ));
    }

    let previous = before.shift_remove(EXTENDS_KEY);
    if after != before {
        return Err(DialectError::malformed(
            syntax_file,
            "rewrite would change keys other than extends",
        ));
    }

    Ok(previous.and_then(|value| serde_yaml::from_value(value).ok()))
}
