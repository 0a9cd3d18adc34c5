//! Output formatting utilities for markdown and JSON.

use crate::filters::ordering::Pagination;
use crate::types::{AuthorOption, TaskListItem, state_to_str};
use chrono::{TimeZone, Utc};

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    #[default]
    #[value(alias = "md")]
    Markdown,
}

/// Render a millisecond timestamp as a UTC date-time.
pub fn format_timestamp(ms: i64) -> String {
    Utc.timestamp_millis_opt(ms)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ms.to_string())
}

/// Format one task list as a markdown bullet.
pub fn format_task_list_short(item: &TaskListItem) -> String {
    let mut line = format!("- **{}** (`{}`, id {})", item.title, item.alias, item.id);

    line.push_str(&format!(" [{}]", state_to_str(item.state)));

    if let Some(ref project) = item.project_title {
        line.push_str(&format!(" project: {}", project));
    }
    if let Some(ref milestone) = item.milestone_title {
        line.push_str(&format!(" / milestone: {}", milestone));
    }
    if let Some(ref author) = item.author_name {
        line.push_str(&format!(" by {}", author));
    }
    line.push_str(&format!(" on {}", format_timestamp(item.created)));
    if let Some(ref level) = item.access_level {
        line.push_str(&format!(" ({})", level));
    }
    if item.is_checked_out() {
        let editor = item.editor.as_deref().unwrap_or("unknown user");
        line.push_str(&format!(" - checked out by {}", editor));
    }

    line.push('\n');
    line
}

/// Format a page of task lists as markdown.
pub fn format_task_lists_markdown(items: &[TaskListItem], page: &Pagination) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Task lists ({})\n\n", page.total));

    if items.is_empty() {
        md.push_str("_No task lists match the current filters._\n");
        return md;
    }

    for item in items {
        md.push_str(&format_task_list_short(item));
    }

    if page.limit > 0 {
        md.push_str(&format!(
            "\nPage {} of {} ({} per page)\n",
            page.pages_current, page.pages_total, page.limit
        ));
    }

    md
}

/// Format author options as markdown.
pub fn format_authors_markdown(authors: &[AuthorOption]) -> String {
    let mut md = String::new();
    md.push_str(&format!("# Authors ({})\n\n", authors.len()));
    for author in authors {
        md.push_str(&format!("- {} (id {})\n", author.text, author.value));
    }
    md
}
