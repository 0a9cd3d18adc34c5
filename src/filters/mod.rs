//! Validated filter state for the task list index.
//!
//! Raw request and session values are strings. They are turned into the
//! typed [`FilterState`] by the resolver, and every later stage (key
//! derivation, query assembly, author lookup) consumes only the typed form.

pub mod ordering;
pub mod resolver;
pub mod store_id;

pub use ordering::{ListControls, SortColumn, SortDirection};
pub use resolver::{RequestParams, resolve_state};
pub use store_id::derive_key;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Parse a numeric filter value.
///
/// Accepts integers and finite decimals (truncated toward zero), with
/// surrounding whitespace. Anything else is treated as absent.
pub fn parse_numeric(raw: &str) -> Option<i64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(n) = s.parse::<i64>() {
        return Some(n);
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f.abs() < i64::MAX as f64 => Some(f.trunc() as i64),
        _ => None,
    }
}

/// Published-state filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "state")]
pub enum PublishedFilter {
    /// No explicit choice: show unpublished and published rows only.
    #[default]
    Default,
    /// Exactly this state.
    Exact(i64),
    /// Any state.
    Unrestricted,
}

impl PublishedFilter {
    /// Decide the filter from the raw request value.
    ///
    /// Empty means [`PublishedFilter::Default`], numeric means exact, and any
    /// other text (such as `*` or `all`) lifts the restriction.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::Default;
        }
        match parse_numeric(raw) {
            Some(n) => Self::Exact(n),
            None => Self::Unrestricted,
        }
    }
}

impl fmt::Display for PublishedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => Ok(()),
            Self::Exact(n) => write!(f, "{}", n),
            Self::Unrestricted => write!(f, "*"),
        }
    }
}

/// How the author filter compares `created_by`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorMode {
    #[default]
    Include,
    Exclude,
}

/// Interpretation of the free-text search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFilter {
    /// `id:<n>` - exact task list id.
    Id(i64),
    /// `author:<text>` - substring of the author's name or login.
    Author(String),
    /// Substring of the title or alias.
    Text(String),
}

impl SearchFilter {
    /// Classify a search string. Returns `None` for an empty search.
    ///
    /// Prefixes are matched case-insensitively, `id:` before `author:`.
    /// The id is the leading integer of the remainder, so `id:42abc` is 42;
    /// no leading digits yields `Id(0)`, which matches no row.
    pub fn parse(search: &str) -> Option<Self> {
        if search.is_empty() {
            return None;
        }
        if let Some(rest) = strip_prefix_ignore_case(search, "id:") {
            return Some(Self::Id(leading_integer(rest)));
        }
        if let Some(rest) = strip_prefix_ignore_case(search, "author:") {
            return Some(Self::Author(rest.trim().to_string()));
        }
        Some(Self::Text(search.to_string()))
    }
}

/// Integer value of the leading digits of `raw`, after optional whitespace
/// and sign. Out-of-range digit runs saturate.
fn leading_integer(raw: &str) -> i64 {
    if let Some(n) = parse_numeric(raw) {
        return n;
    }
    let s = raw.trim_start();
    let sign_len = usize::from(s.starts_with(['-', '+']));
    let end = s[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(s.len(), |i| sign_len + i);
    if end == sign_len {
        return 0;
    }
    let digits = &s[..end];
    digits.parse().unwrap_or(if digits.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    })
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        s.get(prefix.len()..)
    } else {
        None
    }
}

/// The active filter set for one request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    /// Raw search text, optionally prefixed with `id:` or `author:`.
    pub search: String,
    /// Author user id. Always `None` when `project` is 0.
    pub author_id: Option<i64>,
    #[serde(default)]
    pub author_mode: AuthorMode,
    pub published: PublishedFilter,
    /// View level id; zero is never stored.
    pub access: Option<i64>,
    /// Milestone id; `Some(0)` selects task lists without a milestone.
    pub milestone: Option<i64>,
    /// Active project id, 0 when none is selected.
    pub project: i64,
}

impl FilterState {
    /// Parsed form of [`FilterState::search`].
    pub fn search_filter(&self) -> Option<SearchFilter> {
        SearchFilter::parse(&self.search)
    }

    /// Enforce the project-scoped author invariant.
    pub fn normalize(mut self) -> Self {
        if self.project == 0 {
            self.author_id = None;
        }
        self
    }
}

/// Everything resolved for one request: context key, filters and list controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListState {
    pub context: String,
    pub filters: FilterState,
    pub list: ListControls,
}

impl ListState {
    /// Memo key for this state, including the list controls.
    ///
    /// Extends [`derive_key`] with the context, ordering, paging and the author
    /// include flag, so two states that can return different rows never share
    /// a key.
    pub fn store_id(&self, prefix: &str) -> String {
        format!(
            "{}:{}:{}:{}:{}:{}:{:?}",
            self.context,
            derive_key(prefix, &self.filters),
            self.list.start,
            self.list.limit,
            self.list.ordering.as_param(),
            self.list.direction.as_param(),
            self.filters.author_mode,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric() {
        assert_eq!(parse_numeric("42"), Some(42));
        assert_eq!(parse_numeric(" -3 "), Some(-3));
        assert_eq!(parse_numeric("2.9"), Some(2));
        assert_eq!(parse_numeric("1e2"), Some(100));
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("abc"), None);
        assert_eq!(parse_numeric("NaN"), None);
        assert_eq!(parse_numeric("inf"), None);
    }

    #[test]
    fn test_published_three_way() {
        assert_eq!(PublishedFilter::parse(""), PublishedFilter::Default);
        assert_eq!(PublishedFilter::parse("2"), PublishedFilter::Exact(2));
        assert_eq!(PublishedFilter::parse("0"), PublishedFilter::Exact(0));
        assert_eq!(PublishedFilter::parse("*"), PublishedFilter::Unrestricted);
        assert_eq!(PublishedFilter::parse("all"), PublishedFilter::Unrestricted);
    }

    #[test]
    fn test_search_prefixes() {
        assert_eq!(SearchFilter::parse(""), None);
        assert_eq!(SearchFilter::parse("id:42"), Some(SearchFilter::Id(42)));
        assert_eq!(SearchFilter::parse("ID: 7"), Some(SearchFilter::Id(7)));
        assert_eq!(SearchFilter::parse("id:abc"), Some(SearchFilter::Id(0)));
        assert_eq!(SearchFilter::parse("id:42abc"), Some(SearchFilter::Id(42)));
        assert_eq!(SearchFilter::parse("id:1.5"), Some(SearchFilter::Id(1)));
        assert_eq!(SearchFilter::parse("id:-3x"), Some(SearchFilter::Id(-3)));
        assert_eq!(
            SearchFilter::parse("Author:jane"),
            Some(SearchFilter::Author("jane".to_string()))
        );
        assert_eq!(
            SearchFilter::parse("sprint"),
            Some(SearchFilter::Text("sprint".to_string()))
        );
        // Multi-byte text shorter than a prefix must not panic.
        assert_eq!(
            SearchFilter::parse("é"),
            Some(SearchFilter::Text("é".to_string()))
        );
    }

    #[test]
    fn test_normalize_clears_author_without_project() {
        let state = FilterState {
            author_id: Some(5),
            project: 0,
            ..Default::default()
        }
        .normalize();
        assert_eq!(state.author_id, None);

        let state = FilterState {
            author_id: Some(5),
            project: 3,
            ..Default::default()
        }
        .normalize();
        assert_eq!(state.author_id, Some(5));
    }
}
