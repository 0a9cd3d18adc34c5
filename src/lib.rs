//! Task list index library
//!
//! Resolves list filters from request parameters and session state, builds
//! the access-controlled task list query, and reads the matching rows.

pub mod access;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod format;
pub mod import;
pub mod logging;
pub mod model;
pub mod session;
pub mod types;
