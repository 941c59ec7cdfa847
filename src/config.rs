//! Configuration management for the syntax dialect tool.
//!
//! Handles:
//! - Command-line argument parsing
//! - Editor data directory discovery

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "syntax-dialect")]
#[command(about = "Choose the dialect a generic syntax definition extends")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub action: Action,

    /// Editor data directory, the parent of `Packages/`
    #[arg(long, global = true, help = "Editor data directory containing Packages/")]
    pub data_dir: Option<PathBuf>,

    /// Log level
    #[arg(
        long,
        global = true,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Action {
    /// Make a syntax extend a dialect, or list choices when none is given
    Set {
        #[arg(long, help = "Syntax to rewrite, e.g. Packages/SQL/SQL.sublime-syntax")]
        syntax_file: String,
        #[arg(long, help = "Dialect to extend, e.g. Packages/SQL/MySQL.sublime-syntax")]
        dialect_file: Option<String>,
    },
    /// List the dialects a syntax could extend
    List {
        #[arg(long)]
        syntax_file: String,
        #[arg(long, help = "Print candidates as JSON")]
        json: bool,
    },
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub action: Action,
    pub data_dir: PathBuf,
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let data_dir = args
            .data_dir
            .or_else(default_data_dir)
            .ok_or_else(|| anyhow!("cannot locate the editor data directory, pass --data-dir"))?;

        Ok(Config {
            action: args.action,
            data_dir,
            log_level: args.log_level,
        })
    }
}

/// `~/.config/sublime-text` or the platform equivalent
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sublime-text"))
}
