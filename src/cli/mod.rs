//! CLI command definitions for tasklists
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod import;
pub mod list;

use clap::{Args, Parser, Subcommand};
use import::ImportArgs;
use list::{AuthorsArgs, ListArgs};

use crate::access::ViewerAccess;
use crate::config::ViewerConfig;

/// Filtered, access-controlled task list index
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Path to database file (overrides config)
    #[arg(short, long, global = true)]
    pub database: Option<String>,

    /// Path to session file holding persisted filters (overrides config)
    #[arg(short, long, global = true)]
    pub session: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List task lists using the given and persisted filters
    List(ListArgs),

    /// List the authors of task lists in the active project
    Authors(AuthorsArgs),

    /// Import users, projects, milestones and task lists from a YAML fixture
    Import(ImportArgs),
}

/// Viewer permissions, shared by commands that read task lists.
#[derive(Args, Debug, Clone, Default)]
pub struct ViewerArgs {
    /// View with administrative rights (no view-level restriction)
    #[arg(long, conflicts_with = "levels")]
    pub admin: bool,

    /// Comma-separated view levels granted to the viewer
    #[arg(long, value_name = "LIST", value_delimiter = ',')]
    pub levels: Option<Vec<i64>>,
}

impl ViewerArgs {
    /// Resolve against configured defaults; flags win.
    pub fn access(&self, defaults: &ViewerConfig) -> ViewerAccess {
        if self.admin {
            return ViewerAccess::Unrestricted;
        }
        match &self.levels {
            Some(levels) => ViewerAccess::levels(levels.iter().copied()),
            None => defaults.access(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_command() {
        let cli = Cli::try_parse_from([
            "tasklists",
            "list",
            "--search",
            "author:jane",
            "--project",
            "7",
            "--levels",
            "2,3",
        ])
        .unwrap();

        let Command::List(args) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(args.filters.search.as_deref(), Some("author:jane"));
        assert_eq!(
            args.viewer.access(&ViewerConfig::default()),
            ViewerAccess::levels([2, 3])
        );
    }

    #[test]
    fn test_admin_conflicts_with_levels() {
        let result = Cli::try_parse_from(["tasklists", "list", "--admin", "--levels", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_viewer_falls_back_to_config() {
        let viewer = ViewerArgs::default();
        let config = ViewerConfig {
            admin: true,
            levels: vec![],
        };
        assert!(viewer.access(&config).is_unrestricted());
    }
}
