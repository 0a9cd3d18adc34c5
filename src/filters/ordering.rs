//! Sort and paging controls.
//!
//! Sort columns are an allow-list: SQL text for `ORDER BY` only ever comes
//! from [`SortColumn::sql`], never from request input.

use serde::{Deserialize, Serialize};

/// Sortable columns of the task list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    Id,
    ProjectId,
    MilestoneId,
    #[default]
    Title,
    Description,
    Alias,
    Created,
    CreatedBy,
    Modified,
    ModifiedBy,
    CheckedOut,
    CheckedOutTime,
    Attribs,
    Access,
    AccessLevel,
    State,
    Ordering,
    ProjectTitle,
    MilestoneTitle,
}

impl SortColumn {
    pub const ALL: [SortColumn; 19] = [
        Self::Id,
        Self::ProjectId,
        Self::MilestoneId,
        Self::Title,
        Self::Description,
        Self::Alias,
        Self::Created,
        Self::CreatedBy,
        Self::Modified,
        Self::ModifiedBy,
        Self::CheckedOut,
        Self::CheckedOutTime,
        Self::Attribs,
        Self::Access,
        Self::AccessLevel,
        Self::State,
        Self::Ordering,
        Self::ProjectTitle,
        Self::MilestoneTitle,
    ];

    /// Look up a column by request name.
    ///
    /// Accepts both bare names (`title`) and qualified ones (`a.title`,
    /// `p.title`), case-insensitively.
    pub fn from_param(raw: &str) -> Option<Self> {
        let name = raw.trim().to_ascii_lowercase();
        let col = match name.as_str() {
            "p.title" => Self::ProjectTitle,
            "m.title" => Self::MilestoneTitle,
            other => {
                let bare = other.strip_prefix("a.").unwrap_or(other);
                return Self::ALL.into_iter().find(|c| c.as_param() == bare);
            }
        };
        Some(col)
    }

    /// Name used in request parameters and session storage.
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::ProjectId => "project_id",
            Self::MilestoneId => "milestone_id",
            Self::Title => "title",
            Self::Description => "description",
            Self::Alias => "alias",
            Self::Created => "created",
            Self::CreatedBy => "created_by",
            Self::Modified => "modified",
            Self::ModifiedBy => "modified_by",
            Self::CheckedOut => "checked_out",
            Self::CheckedOutTime => "checked_out_time",
            Self::Attribs => "attribs",
            Self::Access => "access",
            Self::AccessLevel => "access_level",
            Self::State => "state",
            Self::Ordering => "ordering",
            Self::ProjectTitle => "project_title",
            Self::MilestoneTitle => "milestone_title",
        }
    }

    /// SQL expression for `ORDER BY`.
    pub fn sql(self) -> &'static str {
        match self {
            Self::Id => "a.id",
            Self::ProjectId => "a.project_id",
            Self::MilestoneId => "a.milestone_id",
            Self::Title => "a.title",
            Self::Description => "a.description",
            Self::Alias => "a.alias",
            Self::Created => "a.created",
            Self::CreatedBy => "a.created_by",
            Self::Modified => "a.modified",
            Self::ModifiedBy => "a.modified_by",
            Self::CheckedOut => "a.checked_out",
            Self::CheckedOutTime => "a.checked_out_time",
            Self::Attribs => "a.attribs",
            Self::Access => "a.access",
            Self::AccessLevel => "access_level",
            Self::State => "a.state",
            Self::Ordering => "a.ordering",
            Self::ProjectTitle => "p.title",
            Self::MilestoneTitle => "m.title",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn from_param(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_param(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Ordering and paging for one list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListControls {
    pub ordering: SortColumn,
    pub direction: SortDirection,
    /// Row offset of the current page.
    pub start: i64,
    /// Page size; 0 returns every row.
    pub limit: i64,
}

impl ListControls {
    pub fn new(ordering: SortColumn, direction: SortDirection, start: i64, limit: i64) -> Self {
        let limit = limit.max(0);
        // Snap to the first row of a page.
        let start = if limit > 0 {
            (start.max(0) / limit) * limit
        } else {
            0
        };
        Self {
            ordering,
            direction,
            start,
            limit,
        }
    }
}

impl Default for ListControls {
    fn default() -> Self {
        Self::new(SortColumn::default(), SortDirection::default(), 0, 20)
    }
}

/// Page numbers for a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub start: i64,
    pub limit: i64,
    pub total: i64,
    pub pages_total: i64,
    /// 1-based index of the current page.
    pub pages_current: i64,
}

impl Pagination {
    pub fn new(total: i64, controls: &ListControls) -> Self {
        let total = total.max(0);
        let limit = controls.limit;
        // An offset past the end falls back to the last full page.
        let mut start = controls.start;
        if start >= total && limit > 0 {
            start = ((total - 1).max(0) / limit) * limit;
        }

        let (pages_total, pages_current) = if limit > 0 {
            let pages = if total == 0 { 0 } else { (total - 1) / limit + 1 };
            (pages, start / limit + 1)
        } else {
            (1, 1)
        };

        Self {
            start,
            limit,
            total,
            pages_total,
            pages_current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_column_allow_list() {
        assert_eq!(SortColumn::from_param("title"), Some(SortColumn::Title));
        assert_eq!(SortColumn::from_param("a.created_by"), Some(SortColumn::CreatedBy));
        assert_eq!(SortColumn::from_param("p.title"), Some(SortColumn::ProjectTitle));
        assert_eq!(
            SortColumn::from_param("milestone_title"),
            Some(SortColumn::MilestoneTitle)
        );
        assert_eq!(SortColumn::from_param("A.ID"), Some(SortColumn::Id));
        assert_eq!(SortColumn::from_param("a.title; DROP TABLE users"), None);
        assert_eq!(SortColumn::from_param("password"), None);
    }

    #[test]
    fn test_every_column_round_trips_by_name() {
        for col in SortColumn::ALL {
            assert_eq!(SortColumn::from_param(col.as_param()), Some(col));
        }
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!(SortDirection::from_param("DESC"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::from_param("asc"), Some(SortDirection::Asc));
        assert_eq!(SortDirection::from_param("sideways"), None);
    }

    #[test]
    fn test_start_snaps_to_page() {
        let controls = ListControls::new(SortColumn::Title, SortDirection::Asc, 27, 10);
        assert_eq!(controls.start, 20);

        let controls = ListControls::new(SortColumn::Title, SortDirection::Asc, 27, 0);
        assert_eq!(controls.start, 0);
    }

    #[test]
    fn test_pagination_pages() {
        let controls = ListControls::new(SortColumn::Title, SortDirection::Asc, 20, 10);
        let page = Pagination::new(25, &controls);
        assert_eq!(page.pages_total, 3);
        assert_eq!(page.pages_current, 3);

        // Offset beyond the result set
        let controls = ListControls::new(SortColumn::Title, SortDirection::Asc, 50, 10);
        let page = Pagination::new(25, &controls);
        assert_eq!(page.start, 20);
        assert_eq!(page.pages_current, 3);

        let page = Pagination::new(0, &controls);
        assert_eq!(page.start, 0);
        assert_eq!(page.pages_total, 0);
        assert_eq!(page.pages_current, 1);
    }

    #[test]
    fn test_pagination_with_huge_page_size() {
        let controls = ListControls::new(SortColumn::Title, SortDirection::Asc, 0, i64::MAX);
        let page = Pagination::new(5, &controls);
        assert_eq!(page.start, 0);
        assert_eq!(page.pages_total, 1);
        assert_eq!(page.pages_current, 1);

        let page = Pagination::new(i64::MAX, &controls);
        assert_eq!(page.pages_total, 1);
    }
}
