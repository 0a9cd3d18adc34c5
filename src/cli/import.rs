//! Import subcommand for the tasklists CLI
//!
//! Loads view levels, users, projects, milestones and task lists from a
//! YAML fixture file into the database.

use clap::Args;
use std::path::PathBuf;

/// Arguments for the import subcommand
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Path to the YAML fixture file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Validate the fixture without modifying the database
    #[arg(long)]
    pub dry_run: bool,
}

impl ImportArgs {
    /// Describe the import mode for logging
    pub fn import_mode(&self) -> &'static str {
        if self.dry_run { "dry-run" } else { "write" }
    }
}
