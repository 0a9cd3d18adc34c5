//! Filter state resolution from request parameters and the session.
//!
//! Each value comes from the request if present, else from the session under
//! the list's context key, else from its default. The chosen value is written
//! back so later requests without parameters keep the selection.

use super::{
    AuthorMode, FilterState, ListControls, ListState, PublishedFilter, SortColumn, SortDirection,
    parse_numeric,
};
use crate::session::SessionStore;
use std::collections::HashMap;
use tracing::debug;

/// Session key of the application-wide active project.
pub const ACTIVE_PROJECT_KEY: &str = "app.project.active_id";

/// Session key of the page size shared by every list.
pub const LIST_LIMIT_KEY: &str = "global.list.limit";

/// Query/form parameters of the current request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    values: HashMap<String, String>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Pick request value, then session value, then default; persist the result.
fn user_state_from_request(
    session: &mut dyn SessionStore,
    request: &RequestParams,
    key: &str,
    param: &str,
    default: &str,
) -> String {
    let value = request
        .get(param)
        .map(str::to_string)
        .or_else(|| session.get(key))
        .unwrap_or_else(|| default.to_string());
    session.set(key, value.clone());
    value
}

/// Resolve the application-wide active project.
///
/// Shared by every list in the application, so it lives under a fixed key
/// rather than the list context. Non-numeric selections resolve to 0.
pub fn active_project_id(session: &mut dyn SessionStore, request: &RequestParams) -> i64 {
    let raw = user_state_from_request(session, request, ACTIVE_PROJECT_KEY, "filter_project", "0");
    let project = parse_numeric(&raw).filter(|id| *id > 0).unwrap_or(0);
    if project.to_string() != raw {
        session.set(ACTIVE_PROJECT_KEY, project.to_string());
    }
    project
}

/// Resolve the full list state for a request.
///
/// `base_context` identifies the list (e.g. `com_pftasks.tasklists`). A
/// `layout` parameter gives that layout its own context.
pub fn resolve_state(
    request: &RequestParams,
    session: &mut dyn SessionStore,
    base_context: &str,
    default_limit: i64,
) -> ListState {
    let context = match request.get("layout").filter(|l| !l.is_empty()) {
        Some(layout) => format!("{}.{}", base_context, layout),
        None => base_context.to_string(),
    };
    let key = |name: &str| format!("{}.filter.{}", context, name);

    let search = user_state_from_request(session, request, &key("search"), "filter_search", "");
    let author_raw =
        user_state_from_request(session, request, &key("author_id"), "filter_author_id", "");
    let published_raw =
        user_state_from_request(session, request, &key("published"), "filter_published", "");
    let access_raw =
        user_state_from_request(session, request, &key("access"), "filter_access", "");
    let milestone_raw =
        user_state_from_request(session, request, &key("milestone"), "filter_milestone", "");
    let project = active_project_id(session, request);

    // Author filtering only makes sense within a project.
    if project == 0 && !author_raw.is_empty() {
        session.set(&key("author_id"), String::new());
    }

    let author_mode = match request.get("filter_author_id_include") {
        Some("0") | Some("false") => AuthorMode::Exclude,
        _ => AuthorMode::Include,
    };

    let filters = FilterState {
        search,
        author_id: parse_numeric(&author_raw),
        author_mode,
        published: PublishedFilter::parse(&published_raw),
        access: parse_numeric(&access_raw).filter(|a| *a != 0),
        milestone: parse_numeric(&milestone_raw),
        project,
    }
    .normalize();

    let list = resolve_list_controls(request, session, &context, default_limit);

    debug!(
        context = %context,
        search = %filters.search,
        published = %filters.published,
        project = filters.project,
        ordering = list.ordering.as_param(),
        direction = list.direction.as_param(),
        start = list.start,
        limit = list.limit,
        "Resolved list state"
    );

    ListState {
        context,
        filters,
        list,
    }
}

/// Resolve ordering, direction and paging.
///
/// Unrecognized ordering or direction silently falls back to the default,
/// and the fallback is what gets persisted.
fn resolve_list_controls(
    request: &RequestParams,
    session: &mut dyn SessionStore,
    context: &str,
    default_limit: i64,
) -> ListControls {
    let default_limit = default_limit.max(0);

    let limit_raw = user_state_from_request(
        session,
        request,
        LIST_LIMIT_KEY,
        "limit",
        &default_limit.to_string(),
    );
    let limit = parse_numeric(&limit_raw)
        .filter(|l| *l >= 0)
        .unwrap_or(default_limit);
    session.set(LIST_LIMIT_KEY, limit.to_string());

    let start_key = format!("{}.limitstart", context);
    let start_raw = user_state_from_request(session, request, &start_key, "limitstart", "0");
    let start = parse_numeric(&start_raw).filter(|s| *s >= 0).unwrap_or(0);

    let order_key = format!("{}.ordercol", context);
    let order_raw = user_state_from_request(session, request, &order_key, "filter_order", "");
    let ordering = SortColumn::from_param(&order_raw).unwrap_or_default();
    session.set(&order_key, ordering.as_param().to_string());

    let dir_key = format!("{}.orderdirn", context);
    let dir_raw = user_state_from_request(session, request, &dir_key, "filter_order_Dir", "");
    let direction = SortDirection::from_param(&dir_raw).unwrap_or_default();
    session.set(&dir_key, direction.as_param().to_string());

    let controls = ListControls::new(ordering, direction, start, limit);
    session.set(&start_key, controls.start.to_string());
    controls
}
