//! The task list model: state resolution, memoized reads and author options.

use crate::access::ViewerAccess;
use crate::db::{Database, ListQuery};
use crate::filters::ordering::Pagination;
use crate::filters::{ListState, RequestParams, resolve_state};
use crate::session::SessionStore;
use crate::types::{AuthorOption, TaskListItem};
use anyhow::Result;
use std::collections::HashMap;
use tracing::debug;

/// Default list context.
pub const DEFAULT_CONTEXT: &str = "com_pftasks.tasklists";

/// Reads task lists for one request.
///
/// Items and totals are memoized per store id, so repeated calls with an
/// unchanged state reuse the first result.
pub struct TaskListModel {
    db: Database,
    context: String,
    default_limit: i64,
    items: HashMap<String, Vec<TaskListItem>>,
    totals: HashMap<String, i64>,
}

impl TaskListModel {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            context: DEFAULT_CONTEXT.to_string(),
            default_limit: 20,
            items: HashMap::new(),
            totals: HashMap::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn with_default_limit(mut self, limit: i64) -> Self {
        self.default_limit = limit;
        self
    }

    /// Resolve the list state from the request and session.
    pub fn populate_state(
        &self,
        request: &RequestParams,
        session: &mut dyn SessionStore,
    ) -> ListState {
        resolve_state(request, session, &self.context, self.default_limit)
    }

    /// Memo key for a state, prefix and viewer.
    pub fn store_id(&self, state: &ListState, prefix: &str, viewer: &ViewerAccess) -> String {
        format!("{}:{}", state.store_id(prefix), viewer.cache_key())
    }

    /// The query for a state, before paging is clamped to the total.
    pub fn list_query(&self, state: &ListState, viewer: &ViewerAccess) -> ListQuery {
        ListQuery::build(&state.filters, &state.list, viewer)
    }

    /// Total number of matching rows.
    pub fn total(&mut self, state: &ListState, viewer: &ViewerAccess) -> Result<i64> {
        let key = self.store_id(state, "getTotal", viewer);
        if let Some(total) = self.totals.get(&key) {
            debug!(key = %key, "Total served from memo");
            return Ok(*total);
        }

        let total = self.db.count_task_lists(&self.list_query(state, viewer))?;
        self.totals.insert(key, total);
        Ok(total)
    }

    /// Paging information for a state.
    pub fn pagination(&mut self, state: &ListState, viewer: &ViewerAccess) -> Result<Pagination> {
        let total = self.total(state, viewer)?;
        Ok(Pagination::new(total, &state.list))
    }

    /// The current page of task lists.
    ///
    /// An offset beyond the last row is moved back to the last page.
    pub fn items(&mut self, state: &ListState, viewer: &ViewerAccess) -> Result<Vec<TaskListItem>> {
        let key = self.store_id(state, "getItems", viewer);
        if let Some(items) = self.items.get(&key) {
            debug!(key = %key, "Items served from memo");
            return Ok(items.clone());
        }

        let page = self.pagination(state, viewer)?;
        let query = self.list_query(state, viewer).with_start(page.start);
        let items = self.db.list_task_lists(&query)?;

        debug!(key = %key, count = items.len(), total = page.total, "Loaded task lists");
        self.items.insert(key, items.clone());
        Ok(items)
    }

    /// Authors available for the author filter in the state's project.
    pub fn authors(&self, state: &ListState) -> Result<Vec<AuthorOption>> {
        self.db.list_authors(state.filters.project)
    }

    /// Drop memoized results, e.g. after the underlying rows changed.
    pub fn clear_cache(&mut self) {
        self.items.clear();
        self.totals.clear();
    }
}
