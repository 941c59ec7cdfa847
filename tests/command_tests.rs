//! The set_default_syntax_dialect command as a menu entry would run it
use std::fs;

use syntax_dialect::command::Severity;
use syntax_dialect::host::LogHost;
use syntax_dialect::{PackageStore, SetDefaultSyntaxDialect, SetDialectArgs};
use tempfile::TempDir;

const SQL: &str = "Packages/SQL/SQL.sublime-syntax";
const MYSQL: &str = "Packages/SQL/MySQL.sublime-syntax";

fn packages() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    let sql = dir.path().join("Packages").join("SQL");
    fs::create_dir_all(&sql).expect("create package dir");
    fs::write(
        sql.join("SQL.sublime-syntax"),
        "name: SQL\nscope: source.sql\nversion: 2\n",
    )
    .expect("write alias");
    fs::write(
        sql.join("MySQL.sublime-syntax"),
        "name: MySQL\nscope: source.sql.mysql\nversion: 2\n",
    )
    .expect("write dialect");
    dir
}

fn args(json: &str) -> SetDialectArgs {
    serde_json::from_str(json).expect("parse command args")
}

#[test]
fn test_assigns_dialect_from_command_args() {
    let dir = packages();
    let mut command = SetDefaultSyntaxDialect::new(PackageStore::new(dir.path()), LogHost);

    let report = command.run(&args(&format!(
        r#"{{"syntax_file": "{SQL}", "dialect_file": "{MYSQL}"}}"#
    )));

    assert_eq!(report.notice.severity, Severity::Info);
    assert!(report.candidates.is_empty());
    let content = fs::read_to_string(dir.path().join(SQL)).expect("read alias");
    assert!(content.ends_with(&format!("version: 2\nextends: {MYSQL}\n")));

    let report = command.run(&args(&format!(
        r#"{{"syntax_file": "{SQL}", "dialect_file": "{MYSQL}"}}"#
    )));
    assert!(report.notice.message.contains("already extends"));
}

#[test]
fn test_offers_candidates_without_dialect() {
    let dir = packages();
    let mut command = SetDefaultSyntaxDialect::new(PackageStore::new(dir.path()), LogHost);

    let report = command.run(&args(&format!(r#"{{"syntax_file": "{SQL}"}}"#)));

    assert_eq!(report.notice.severity, Severity::Info);
    assert_eq!(report.candidates.len(), 1);
    assert_eq!(report.candidates[0].path, MYSQL);
    assert!(!report.candidates[0].selected);
}

#[test]
fn test_errors_become_notices() {
    let dir = packages();
    let mut command = SetDefaultSyntaxDialect::new(PackageStore::new(dir.path()), LogHost);

    let report = command.run(&SetDialectArgs {
        syntax_file: "Packages/SQL/Missing.sublime-syntax".to_string(),
        dialect_file: Some(MYSQL.to_string()),
    });

    assert!(report.notice.is_error());
    assert!(report.notice.message.starts_with("NotFound"));
    assert!(!dir.path().join("Packages/SQL/Missing.sublime-syntax").exists());
}
