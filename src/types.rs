//! Core types for the task list index.

use serde::{Deserialize, Serialize};

/// Published state of a task list row.
pub type PublishState = i64;

pub const STATE_UNPUBLISHED: PublishState = 0;
pub const STATE_PUBLISHED: PublishState = 1;
pub const STATE_ARCHIVED: PublishState = 2;
pub const STATE_TRASHED: PublishState = -2;

/// Convert a publish state to its display name.
pub fn state_to_str(state: PublishState) -> &'static str {
    match state {
        STATE_UNPUBLISHED => "unpublished",
        STATE_PUBLISHED => "published",
        STATE_ARCHIVED => "archived",
        STATE_TRASHED => "trashed",
        _ => "unknown",
    }
}

/// A task list row as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    pub id: i64,
    pub project_id: i64,
    pub milestone_id: i64,
    pub title: String,
    pub alias: String,
    pub description: String,
    pub state: PublishState,
    pub access: i64,
    pub created: i64,
    pub created_by: i64,
    pub modified: Option<i64>,
    pub modified_by: Option<i64>,
    pub checked_out: Option<i64>,
    pub checked_out_time: Option<i64>,
    pub ordering: i64,
    pub attribs: String,
}

/// A task list as returned by the list query, with joined display columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListItem {
    pub id: i64,
    pub project_id: i64,
    pub milestone_id: i64,
    pub title: String,
    pub alias: String,
    pub checked_out: Option<i64>,
    pub checked_out_time: Option<i64>,
    pub state: PublishState,
    pub access: i64,
    pub created: i64,
    pub created_by: i64,
    pub ordering: i64,

    // Joined columns; None when the reference is missing or dangling.
    pub editor: Option<String>,
    pub access_level: Option<String>,
    pub author_name: Option<String>,
    pub project_title: Option<String>,
    pub milestone_title: Option<String>,
}

impl TaskListItem {
    /// Whether another user currently holds the edit lock.
    pub fn is_checked_out(&self) -> bool {
        self.checked_out.is_some_and(|uid| uid != 0)
    }
}

/// A user who authored at least one task list in a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorOption {
    pub value: i64,
    pub text: String,
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: String,
}

/// A view level grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewLevel {
    pub id: i64,
    pub title: String,
}

/// A project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
    #[serde(default = "default_access")]
    pub access: i64,
}

/// A project milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    #[serde(default = "default_access")]
    pub access: i64,
}

/// Input for creating a task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTaskList {
    #[serde(default)]
    pub id: Option<i64>,
    pub project_id: i64,
    #[serde(default)]
    pub milestone_id: i64,
    pub title: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_state")]
    pub state: PublishState,
    #[serde(default = "default_access")]
    pub access: i64,
    pub created_by: i64,
    #[serde(default)]
    pub checked_out: Option<i64>,
    #[serde(default)]
    pub ordering: i64,
}

impl Default for NewTaskList {
    fn default() -> Self {
        Self {
            id: None,
            project_id: 0,
            milestone_id: 0,
            title: String::new(),
            alias: None,
            description: String::new(),
            state: default_state(),
            access: default_access(),
            created_by: 0,
            checked_out: None,
            ordering: 0,
        }
    }
}

fn default_access() -> i64 {
    1
}

fn default_state() -> PublishState {
    STATE_PUBLISHED
}
