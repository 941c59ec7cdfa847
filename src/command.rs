//! `set_default_syntax_dialect` Command
//!
//! Command boundary between the menu entry that invokes it and the
//! assigner. Failures never leave this module as errors; they become a
//! notice for the user.
//!
//! Arguments arrive the way a `.sublime-commands` entry spells them:
//!
//! ```json
//! {
//!     "caption": "Set Syntax Dialect: SQL",
//!     "command": "set_default_syntax_dialect",
//!     "args": { "syntax_file": "Packages/SQL/SQL.sublime-syntax" }
//! }
//! ```
//!
//! Without a `dialect_file` the command answers with the dialects to choose
//! from instead of assigning one.

use serde::{Deserialize, Serialize};

use crate::assigner::{Assignment, DialectAssigner};
use crate::dialects::{DialectCandidate, list_dialects};
use crate::host::SyntaxHost;
use crate::store::ResourceStore;

pub const COMMAND_NAME: &str = "set_default_syntax_dialect";

/// Arguments of the command
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SetDialectArgs {
    pub syntax_file: String,
    #[serde(default)]
    pub dialect_file: Option<String>,
}

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Message for the status bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// What the user gets to see after running the command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandReport {
    pub notice: Notice,
    /// Filled when no dialect was given
    pub candidates: Vec<DialectCandidate>,
}

impl From<Notice> for CommandReport {
    fn from(notice: Notice) -> Self {
        Self {
            notice,
            candidates: Vec::new(),
        }
    }
}

/// The `set_default_syntax_dialect` command
#[derive(Debug)]
pub struct SetDefaultSyntaxDialect<S, H> {
    assigner: DialectAssigner<S, H>,
}

impl<S: ResourceStore, H: SyntaxHost> SetDefaultSyntaxDialect<S, H> {
    pub fn new(store: S, host: H) -> Self {
        Self {
            assigner: DialectAssigner::new(store, host),
        }
    }

    pub fn assigner(&self) -> &DialectAssigner<S, H> {
        &self.assigner
    }

    pub fn run(&mut self, args: &SetDialectArgs) -> CommandReport {
        let syntax_file = args.syntax_file.as_str();

        let Some(dialect_file) = args.dialect_file.as_deref() else {
            return self.choose(syntax_file);
        };

        if !self.assigner.store().exists(dialect_file) {
            log::warn!("Dialect {dialect_file} not found; the editor will fail to resolve it");
        }

        match self.assigner.assign_dialect(syntax_file, dialect_file) {
            Ok(Assignment::Updated { .. }) => {
                Notice::info(format!("{syntax_file} now extends {dialect_file}")).into()
            }
            Ok(Assignment::Unchanged) => {
                Notice::info(format!("{syntax_file} already extends {dialect_file}")).into()
            }
            Err(e) => {
                log::error!("{COMMAND_NAME} failed: {e}");
                Notice::error(format!("{}: {}", e.kind(), e)).into()
            }
        }
    }

    fn choose(&self, syntax_file: &str) -> CommandReport {
        match list_dialects(self.assigner.store(), syntax_file) {
            Ok(candidates) if candidates.is_empty() => CommandReport::from(Notice {
                severity: Severity::Warning,
                message: format!("No dialects found for {syntax_file}"),
            }),
            Ok(candidates) => CommandReport {
                notice: Notice::info("Choose the dialect to use as default syntax."),
                candidates,
            },
            Err(e) => {
                log::error!("{COMMAND_NAME} failed: {e}");
                Notice::error(format!("{}: {}", e.kind(), e)).into()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_from_command_entry() {
        let args: SetDialectArgs =
            serde_json::from_str(r#"{"syntax_file": "Packages/SQL/SQL.sublime-syntax"}"#)
                .expect("parse args");
        assert_eq!(args.syntax_file, "Packages/SQL/SQL.sublime-syntax");
        assert_eq!(args.dialect_file, None);

        let args: SetDialectArgs = serde_json::from_str(
            r#"{"syntax_file": "Packages/SQL/SQL.sublime-syntax",
                "dialect_file": "Packages/SQL/MySQL.sublime-syntax"}"#,
        )
        .expect("parse args");
        assert_eq!(
            args.dialect_file.as_deref(),
            Some("Packages/SQL/MySQL.sublime-syntax")
        );
    }

    #[test]
    fn test_notice_serializes_lowercase_severity() {
        let json = serde_json::to_string(&Notice::error("boom")).expect("serialize");
        assert_eq!(json, r#"{"severity":"error","message":"boom"}"#);
    }
}
