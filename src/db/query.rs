//! Assembly of the task list read query.
//!
//! Values are always bound parameters. The only interpolated text is
//! fixed SQL, placeholders and the allow-listed sort column.

use crate::access::ViewerAccess;
use crate::filters::{AuthorMode, FilterState, ListControls, PublishedFilter, SearchFilter};
use crate::types::{STATE_PUBLISHED, STATE_UNPUBLISHED};
use rusqlite::types::Value;
use tracing::debug;

const SELECT_COLUMNS: &str = "a.id, a.project_id, a.milestone_id, a.title, a.alias, \
     a.checked_out, a.checked_out_time, a.state, a.access, a.created, a.created_by, a.ordering, \
     uc.name AS editor, ag.title AS access_level, ua.name AS author_name, \
     p.title AS project_title, m.title AS milestone_title";

const FROM_JOINS: &str = "FROM task_lists AS a \
     LEFT JOIN users AS uc ON uc.id = a.checked_out \
     LEFT JOIN viewlevels AS ag ON ag.id = a.access \
     LEFT JOIN users AS ua ON ua.id = a.created_by \
     LEFT JOIN projects AS p ON p.id = a.project_id \
     LEFT JOIN milestones AS m ON m.id = a.milestone_id";

/// A parameterized list query.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    predicates: Vec<String>,
    params: Vec<Value>,
    order_by: String,
    start: i64,
    limit: i64,
}

impl ListQuery {
    /// Build the query for a resolved filter state.
    pub fn build(filters: &FilterState, controls: &ListControls, viewer: &ViewerAccess) -> Self {
        let mut query = Self {
            predicates: Vec::new(),
            params: Vec::new(),
            order_by: format!("{} {}", controls.ordering.sql(), controls.direction.sql()),
            start: controls.start,
            limit: controls.limit,
        };

        // View level access: the list, its project and its milestone must all be visible.
        if let ViewerAccess::Levels(levels) = viewer {
            if levels.is_empty() {
                query.push("1 = 0", std::iter::empty());
            } else {
                let placeholders = vec!["?"; levels.len()].join(", ");
                for column in ["a.access", "p.access", "m.access"] {
                    query.push(
                        &format!("{} IN ({})", column, placeholders),
                        levels.iter().map(|l| Value::Integer(*l)),
                    );
                }
            }
        }

        if filters.project != 0 {
            query.push("a.project_id = ?", [Value::Integer(filters.project)]);
        }

        if let Some(milestone) = filters.milestone {
            query.push("a.milestone_id = ?", [Value::Integer(milestone)]);
        }

        match filters.published {
            PublishedFilter::Exact(state) => {
                query.push("a.state = ?", [Value::Integer(state)]);
            }
            PublishedFilter::Default => {
                query.push(
                    "a.state IN (?, ?)",
                    [
                        Value::Integer(STATE_UNPUBLISHED),
                        Value::Integer(STATE_PUBLISHED),
                    ],
                );
            }
            PublishedFilter::Unrestricted => {}
        }

        if let Some(access) = filters.access {
            query.push("a.access = ?", [Value::Integer(access)]);
        }

        if let Some(author_id) = filters.author_id {
            let clause = match filters.author_mode {
                AuthorMode::Include => "a.created_by = ?",
                AuthorMode::Exclude => "a.created_by <> ?",
            };
            query.push(clause, [Value::Integer(author_id)]);
        }

        match filters.search_filter() {
            Some(SearchFilter::Id(id)) => {
                query.push("a.id = ?", [Value::Integer(id)]);
            }
            Some(SearchFilter::Author(text)) => {
                let pattern = like_pattern(&text);
                query.push(
                    "(ua.name LIKE ? ESCAPE '\\' OR ua.username LIKE ? ESCAPE '\\')",
                    [Value::Text(pattern.clone()), Value::Text(pattern)],
                );
            }
            Some(SearchFilter::Text(text)) => {
                let pattern = like_pattern(&text);
                query.push(
                    "(a.title LIKE ? ESCAPE '\\' OR a.alias LIKE ? ESCAPE '\\')",
                    [Value::Text(pattern.clone()), Value::Text(pattern)],
                );
            }
            None => {}
        }

        debug!(
            predicates = query.predicates.len(),
            order_by = %query.order_by,
            "Built task list query"
        );

        query
    }

    fn push<I: IntoIterator<Item = Value>>(&mut self, predicate: &str, params: I) {
        self.predicates.push(predicate.to_string());
        self.params.extend(params);
    }

    /// Move the page offset, e.g. after clamping against the total.
    pub fn with_start(mut self, start: i64) -> Self {
        self.start = start.max(0);
        self
    }

    /// WHERE predicates in application order.
    pub fn predicates(&self) -> &[String] {
        &self.predicates
    }

    /// Bound values for the WHERE clause, in placeholder order.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn order_by(&self) -> &str {
        &self.order_by
    }

    fn where_clause(&self) -> String {
        if self.predicates.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.predicates.join(" AND "))
        }
    }

    /// SQL for the page of rows.
    pub fn select_sql(&self) -> String {
        let mut sql = format!(
            "SELECT {} {}{} ORDER BY {}",
            SELECT_COLUMNS,
            FROM_JOINS,
            self.where_clause(),
            self.order_by
        );
        if self.limit > 0 {
            sql.push_str(" LIMIT ? OFFSET ?");
        }
        sql
    }

    /// Bound values for [`ListQuery::select_sql`].
    pub fn select_params(&self) -> Vec<Value> {
        let mut params = self.params.clone();
        if self.limit > 0 {
            params.push(Value::Integer(self.limit));
            params.push(Value::Integer(self.start));
        }
        params
    }

    /// SQL counting every matching row, ignoring paging.
    pub fn count_sql(&self) -> String {
        format!("SELECT COUNT(*) {}{}", FROM_JOINS, self.where_clause())
    }
}

/// Wrap user text as a `%text%` LIKE pattern, escaping wildcards.
pub fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
