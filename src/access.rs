//! Viewer permissions as seen by the list query.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What the current viewer may see, computed by the caller's permission check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewerAccess {
    /// Administrative privilege: no view-level restriction.
    Unrestricted,
    /// The view levels granted to the viewer.
    Levels(BTreeSet<i64>),
}

impl ViewerAccess {
    pub fn levels<I: IntoIterator<Item = i64>>(levels: I) -> Self {
        Self::Levels(levels.into_iter().collect())
    }

    /// Build from an admin flag and granted levels.
    pub fn from_grants(admin: bool, levels: &[i64]) -> Self {
        if admin {
            Self::Unrestricted
        } else {
            Self::levels(levels.iter().copied())
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Self::Unrestricted)
    }

    /// Stable text form for memo keys.
    pub fn cache_key(&self) -> String {
        match self {
            Self::Unrestricted => "*".to_string(),
            Self::Levels(levels) => levels
                .iter()
                .map(|l| l.to_string())
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_grants() {
        assert!(ViewerAccess::from_grants(true, &[1]).is_unrestricted());

        let access = ViewerAccess::from_grants(false, &[3, 2, 3]);
        assert_eq!(access, ViewerAccess::levels([2, 3]));
        assert_eq!(access.cache_key(), "2,3");
    }
}
