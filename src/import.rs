//! Fixture import: loads lookup tables and task lists from a YAML file.

use crate::db::Database;
use crate::db::records::{
    insert_milestone, insert_project, insert_task_list, insert_user, insert_view_level,
};
use crate::error::Error;
use crate::types::{Milestone, NewTaskList, Project, User, ViewLevel};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Contents of a fixture file. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub view_levels: Vec<ViewLevel>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub task_lists: Vec<NewTaskList>,
}

/// Row counts written by an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub view_levels: usize,
    pub users: usize,
    pub projects: usize,
    pub milestones: usize,
    pub task_lists: usize,
}

impl Fixture {
    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> crate::error::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_yaml(&content).map_err(|source| Error::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Database {
    /// Write a fixture in a single transaction. Nothing is written on error.
    pub fn import_fixture(&self, fixture: &Fixture) -> Result<ImportSummary> {
        let summary = self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            for level in &fixture.view_levels {
                insert_view_level(&tx, level)?;
            }
            for user in &fixture.users {
                insert_user(&tx, user)?;
            }
            for project in &fixture.projects {
                insert_project(&tx, project)?;
            }
            for milestone in &fixture.milestones {
                insert_milestone(&tx, milestone)?;
            }
            for task_list in &fixture.task_lists {
                insert_task_list(&tx, task_list)?;
            }

            tx.commit()?;

            Ok(ImportSummary {
                view_levels: fixture.view_levels.len(),
                users: fixture.users.len(),
                projects: fixture.projects.len(),
                milestones: fixture.milestones.len(),
                task_lists: fixture.task_lists.len(),
            })
        })?;

        info!(
            view_levels = summary.view_levels,
            users = summary.users,
            projects = summary.projects,
            milestones = summary.milestones,
            task_lists = summary.task_lists,
            "Imported fixture"
        );
        Ok(summary)
    }
}
