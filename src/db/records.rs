//! Inserts for task lists and the lookup tables they join against.
//!
//! The list index never writes; these back the import command and tests.

use super::tasklists::parse_task_list_row;
use super::{Database, now_ms};
use crate::types::{Milestone, NewTaskList, Project, TaskList, User, ViewLevel};
use anyhow::{Result, anyhow};
use heck::ToKebabCase;
use rusqlite::{Connection, params};

/// Derive a URL alias from a title.
pub fn alias_from_title(title: &str) -> String {
    let alias = title.to_kebab_case();
    if alias.is_empty() {
        // No word characters in the title.
        now_ms().to_string()
    } else {
        alias
    }
}

pub(crate) fn insert_view_level(conn: &Connection, level: &ViewLevel) -> Result<()> {
    conn.execute(
        "INSERT INTO viewlevels (id, title) VALUES (?1, ?2)",
        params![level.id, level.title],
    )?;
    Ok(())
}

pub(crate) fn insert_user(conn: &Connection, user: &User) -> Result<()> {
    conn.execute(
        "INSERT INTO users (id, name, username) VALUES (?1, ?2, ?3)",
        params![user.id, user.name, user.username],
    )?;
    Ok(())
}

pub(crate) fn insert_project(conn: &Connection, project: &Project) -> Result<()> {
    conn.execute(
        "INSERT INTO projects (id, title, access) VALUES (?1, ?2, ?3)",
        params![project.id, project.title, project.access],
    )?;
    Ok(())
}

pub(crate) fn insert_milestone(conn: &Connection, milestone: &Milestone) -> Result<()> {
    conn.execute(
        "INSERT INTO milestones (id, project_id, title, access) VALUES (?1, ?2, ?3, ?4)",
        params![
            milestone.id,
            milestone.project_id,
            milestone.title,
            milestone.access
        ],
    )?;
    Ok(())
}

pub(crate) fn insert_task_list(conn: &Connection, input: &NewTaskList) -> Result<TaskList> {
    let alias = match input.alias.as_deref() {
        Some(alias) if !alias.is_empty() => alias.to_string(),
        _ => alias_from_title(&input.title),
    };
    let now = now_ms();
    let checked_out_time = input.checked_out.map(|_| now);

    conn.execute(
        "INSERT INTO task_lists (
            id, project_id, milestone_id, title, alias, description, state, access,
            created, created_by, checked_out, checked_out_time, ordering
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            input.id,
            input.project_id,
            input.milestone_id,
            input.title,
            alias,
            input.description,
            input.state,
            input.access,
            now,
            input.created_by,
            input.checked_out,
            checked_out_time,
            input.ordering,
        ],
    )?;

    let id = conn.last_insert_rowid();
    conn.query_row(
        "SELECT * FROM task_lists WHERE id = ?1",
        params![id],
        parse_task_list_row,
    )
    .map_err(|e| anyhow!("Failed to read back task list {}: {}", id, e))
}

impl Database {
    pub fn create_user(&self, user: &User) -> Result<()> {
        self.with_conn(|conn| insert_user(conn, user))
    }

    pub fn create_project(&self, project: &Project) -> Result<()> {
        self.with_conn(|conn| insert_project(conn, project))
    }

    /// Create a task list, deriving the alias from the title when missing.
    pub fn create_task_list(&self, input: &NewTaskList) -> Result<TaskList> {
        self.with_conn(|conn| insert_task_list(conn, input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_from_title() {
        assert_eq!(alias_from_title("Sprint Planning Q3"), "sprint-planning-q3");
        assert_eq!(alias_from_title("Release_Notes"), "release-notes");
        assert!(!alias_from_title("!!!").is_empty());
    }

    #[test]
    fn test_create_task_list_defaults() {
        let db = Database::open_in_memory().unwrap();
        let list = db
            .create_task_list(&NewTaskList {
                project_id: 1,
                title: "Backlog Grooming".to_string(),
                created_by: 3,
                ..Default::default()
            })
            .unwrap();

        assert_eq!(list.alias, "backlog-grooming");
        assert_eq!(list.state, 1);
        assert_eq!(list.access, 1);
        assert_eq!(list.checked_out, None);
        assert!(list.created > 0);
        assert_eq!(db.get_task_list(list.id).unwrap(), Some(list));
    }
}
