//! Integration tests for the task list model.
//!
//! These tests drive the model the way a list controller does: resolve state
//! from request parameters and the session, then read items and totals.

use tasklists::access::ViewerAccess;
use tasklists::db::Database;
use tasklists::filters::{PublishedFilter, RequestParams, SortColumn, SortDirection, derive_key};
use tasklists::model::TaskListModel;
use tasklists::session::{FileSession, MemorySession, SessionStore};
use tasklists::types::{NewTaskList, Project, User};
use tempfile::TempDir;

/// Helper to create a database with two projects of task lists.
fn setup_db() -> Database {
    let db = Database::open_in_memory().expect("Failed to create in-memory database");

    for (id, name, username) in [(1, "Ada", "ada"), (2, "Grace", "grace")] {
        db.create_user(&User {
            id,
            name: name.to_string(),
            username: username.to_string(),
        })
        .unwrap();
    }
    for (id, title) in [(1, "Compiler"), (2, "Runtime")] {
        db.create_project(&Project {
            id,
            title: title.to_string(),
            access: 1,
        })
        .unwrap();
    }

    for (i, title) in ["Parser", "Lexer", "Codegen", "Optimizer", "Linker"]
        .iter()
        .enumerate()
    {
        db.create_task_list(&NewTaskList {
            project_id: 1,
            title: title.to_string(),
            created_by: if i % 2 == 0 { 1 } else { 2 },
            ..Default::default()
        })
        .unwrap();
    }
    db.create_task_list(&NewTaskList {
        project_id: 2,
        title: "Garbage collector".to_string(),
        created_by: 2,
        ..Default::default()
    })
    .unwrap();

    db
}

fn titles(items: &[tasklists::types::TaskListItem]) -> Vec<&str> {
    items.iter().map(|i| i.title.as_str()).collect()
}

#[test]
fn selections_persist_across_requests() {
    let model = TaskListModel::new(setup_db());
    let mut session = MemorySession::new();

    let first = model.populate_state(
        &RequestParams::new()
            .with("filter_project", "1")
            .with("filter_search", "er")
            .with("filter_order_Dir", "desc"),
        &mut session,
    );
    let second = model.populate_state(&RequestParams::new(), &mut session);

    assert_eq!(first, second);
    assert_eq!(second.filters.project, 1);
    assert_eq!(second.list.direction, SortDirection::Desc);
}

#[test]
fn clearing_the_project_clears_the_author() {
    let model = TaskListModel::new(setup_db());
    let mut session = MemorySession::new();

    model.populate_state(
        &RequestParams::new()
            .with("filter_project", "1")
            .with("filter_author_id", "2"),
        &mut session,
    );
    let state = model.populate_state(
        &RequestParams::new().with("filter_project", "0"),
        &mut session,
    );

    assert_eq!(state.filters.author_id, None);
    assert_eq!(
        session
            .get("com_pftasks.tasklists.filter.author_id")
            .as_deref(),
        Some("")
    );
}

#[test]
fn items_are_paged_and_counted() {
    let mut model = TaskListModel::new(setup_db());
    let mut session = MemorySession::new();
    let viewer = ViewerAccess::Unrestricted;

    let state = model.populate_state(
        &RequestParams::new()
            .with("filter_project", "1")
            .with("limit", "2")
            .with("limitstart", "2"),
        &mut session,
    );

    let page = model.pagination(&state, &viewer).unwrap();
    assert_eq!(page.total, 5);
    assert_eq!(page.pages_total, 3);
    assert_eq!(page.pages_current, 2);

    let items = model.items(&state, &viewer).unwrap();
    assert_eq!(titles(&items), vec!["Linker", "Optimizer"]);
}

#[test]
fn offset_past_the_end_shows_last_page() {
    let mut model = TaskListModel::new(setup_db());
    let mut session = MemorySession::new();

    let state = model.populate_state(
        &RequestParams::new()
            .with("filter_project", "1")
            .with("limit", "2")
            .with("limitstart", "40"),
        &mut session,
    );

    let items = model.items(&state, &ViewerAccess::Unrestricted).unwrap();
    assert_eq!(titles(&items), vec!["Parser"]);
}

#[test]
fn huge_page_size_returns_everything_on_one_page() {
    let mut model = TaskListModel::new(setup_db());
    let mut session = MemorySession::new();
    let viewer = ViewerAccess::Unrestricted;

    let state = model.populate_state(
        &RequestParams::new()
            .with("filter_project", "1")
            .with("limit", "9223372036854775807"),
        &mut session,
    );
    assert_eq!(state.list.limit, i64::MAX);

    let page = model.pagination(&state, &viewer).unwrap();
    assert_eq!(page.pages_total, 1);
    assert_eq!(page.pages_current, 1);

    let items = model.items(&state, &viewer).unwrap();
    assert_eq!(items.len(), 5);
}

#[test]
fn repeated_reads_are_memoized() {
    let db = setup_db();
    let mut model = TaskListModel::new(db.clone());
    let mut session = MemorySession::new();
    let viewer = ViewerAccess::Unrestricted;

    let state = model.populate_state(
        &RequestParams::new().with("filter_project", "2"),
        &mut session,
    );
    assert_eq!(model.items(&state, &viewer).unwrap().len(), 1);

    db.create_task_list(&NewTaskList {
        project_id: 2,
        title: "Scheduler".to_string(),
        created_by: 1,
        ..Default::default()
    })
    .unwrap();

    assert_eq!(model.items(&state, &viewer).unwrap().len(), 1);
    assert_eq!(model.total(&state, &viewer).unwrap(), 1);

    model.clear_cache();
    assert_eq!(model.items(&state, &viewer).unwrap().len(), 2);
    assert_eq!(model.total(&state, &viewer).unwrap(), 2);
}

#[test]
fn memo_keys_separate_viewers() {
    let model = TaskListModel::new(setup_db());
    let mut session = MemorySession::new();
    let state = model.populate_state(&RequestParams::new(), &mut session);

    let admin = model.store_id(&state, "getItems", &ViewerAccess::Unrestricted);
    let public = model.store_id(&state, "getItems", &ViewerAccess::levels([1]));
    assert_ne!(admin, public);
    assert!(admin.contains(&derive_key("getItems", &state.filters)));
}

#[test]
fn unknown_sort_column_falls_back_to_title() {
    let mut model = TaskListModel::new(setup_db());
    let mut session = MemorySession::new();

    let state = model.populate_state(
        &RequestParams::new()
            .with("filter_project", "1")
            .with("filter_order", "a.title desc, (SELECT 1)")
            .with("limit", "0"),
        &mut session,
    );
    assert_eq!(state.list.ordering, SortColumn::Title);
    assert_eq!(state.list.direction, SortDirection::Asc);

    let items = model.items(&state, &ViewerAccess::Unrestricted).unwrap();
    assert_eq!(
        titles(&items),
        vec!["Codegen", "Lexer", "Linker", "Optimizer", "Parser"]
    );
}

#[test]
fn authors_follow_the_active_project() {
    let model = TaskListModel::new(setup_db());
    let mut session = MemorySession::new();

    let none = model.populate_state(&RequestParams::new(), &mut session);
    assert!(model.authors(&none).unwrap().is_empty());

    let state = model.populate_state(
        &RequestParams::new().with("filter_project", "2"),
        &mut session,
    );
    let authors = model.authors(&state).unwrap();
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].text, "Grace");
}

#[test]
fn file_session_carries_filters_between_runs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    let model = TaskListModel::new(setup_db()).with_context("cli.tasklists");

    {
        let mut session = FileSession::open(&path).unwrap();
        model.populate_state(
            &RequestParams::new().with("filter_published", "*"),
            &mut session,
        );
        session.save().unwrap();
    }

    let mut session = FileSession::open(&path).unwrap();
    let state = model.populate_state(&RequestParams::new(), &mut session);
    assert_eq!(state.context, "cli.tasklists");
    assert_eq!(state.filters.published, PublishedFilter::Unrestricted);
}
