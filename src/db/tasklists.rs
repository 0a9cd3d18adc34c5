//! Task list reads.

use super::{Database, ListQuery};
use crate::types::{TaskList, TaskListItem};
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};

/// Parse a row produced by [`ListQuery::select_sql`].
pub fn parse_task_list_item(row: &Row) -> rusqlite::Result<TaskListItem> {
    Ok(TaskListItem {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        milestone_id: row.get("milestone_id")?,
        title: row.get("title")?,
        alias: row.get("alias")?,
        checked_out: row.get("checked_out")?,
        checked_out_time: row.get("checked_out_time")?,
        state: row.get("state")?,
        access: row.get("access")?,
        created: row.get("created")?,
        created_by: row.get("created_by")?,
        ordering: row.get("ordering")?,
        editor: row.get("editor")?,
        access_level: row.get("access_level")?,
        author_name: row.get("author_name")?,
        project_title: row.get("project_title")?,
        milestone_title: row.get("milestone_title")?,
    })
}

/// Parse a full row of the `task_lists` table.
pub fn parse_task_list_row(row: &Row) -> rusqlite::Result<TaskList> {
    Ok(TaskList {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        milestone_id: row.get("milestone_id")?,
        title: row.get("title")?,
        alias: row.get("alias")?,
        description: row.get("description")?,
        state: row.get("state")?,
        access: row.get("access")?,
        created: row.get("created")?,
        created_by: row.get("created_by")?,
        modified: row.get("modified")?,
        modified_by: row.get("modified_by")?,
        checked_out: row.get("checked_out")?,
        checked_out_time: row.get("checked_out_time")?,
        ordering: row.get("ordering")?,
        attribs: row.get("attribs")?,
    })
}

fn get_task_list_internal(conn: &Connection, id: i64) -> Result<Option<TaskList>> {
    let task_list = conn
        .query_row(
            "SELECT * FROM task_lists WHERE id = ?1",
            params![id],
            parse_task_list_row,
        )
        .optional()?;
    Ok(task_list)
}

impl Database {
    /// Run a list query and return the current page of rows.
    pub fn list_task_lists(&self, query: &ListQuery) -> Result<Vec<TaskListItem>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&query.select_sql())?;
            let items = stmt
                .query_map(params_from_iter(query.select_params()), parse_task_list_item)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(items)
        })
    }

    /// Count every row matching a list query, ignoring paging.
    pub fn count_task_lists(&self, query: &ListQuery) -> Result<i64> {
        self.with_conn(|conn| {
            let total = conn.query_row(
                &query.count_sql(),
                params_from_iter(query.params()),
                |row| row.get(0),
            )?;
            Ok(total)
        })
    }

    /// Get a task list by id.
    pub fn get_task_list(&self, id: i64) -> Result<Option<TaskList>> {
        self.with_conn(|conn| get_task_list_internal(conn, id))
    }
}
