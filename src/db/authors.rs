//! Author options for the author filter.

use super::Database;
use crate::types::AuthorOption;
use anyhow::Result;
use rusqlite::params;
use tracing::debug;

impl Database {
    /// Distinct authors of task lists in a project, ordered by name.
    ///
    /// Returns an empty list when no project is selected.
    pub fn list_authors(&self, project: i64) -> Result<Vec<AuthorOption>> {
        if project <= 0 {
            return Ok(Vec::new());
        }

        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT u.id AS value, u.name AS text
                 FROM users AS u
                 INNER JOIN task_lists AS a ON a.created_by = u.id
                 WHERE a.project_id = ?1
                 GROUP BY u.id, u.name
                 ORDER BY u.name, u.id",
            )?;
            let authors = stmt
                .query_map(params![project], |row| {
                    Ok(AuthorOption {
                        value: row.get(0)?,
                        text: row.get(1)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            debug!(project, count = authors.len(), "Listed project authors");
            Ok(authors)
        })
    }
}
