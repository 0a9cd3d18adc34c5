//! Memoization keys for resolved filter state.

use super::FilterState;
use std::fmt::Write;

const DELIMITER: char = ':';

/// Derive a cache key from a prefix and the filter state.
///
/// Fields are appended in a fixed order: search, published, access,
/// author_id, milestone, project. Absent values render empty.
pub fn derive_key(prefix: &str, state: &FilterState) -> String {
    let mut key = String::from(prefix);
    push_field(&mut key, &state.search);
    push_field(&mut key, &state.published);
    push_field(&mut key, &display_opt(state.access));
    push_field(&mut key, &display_opt(state.author_id));
    push_field(&mut key, &display_opt(state.milestone));
    push_field(&mut key, &state.project);
    key
}

fn push_field(key: &mut String, value: &dyn std::fmt::Display) {
    key.push(DELIMITER);
    // Writing to a String cannot fail.
    let _ = write!(key, "{}", value);
}

fn display_opt(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::PublishedFilter;

    fn sample() -> FilterState {
        FilterState {
            search: "sprint".to_string(),
            author_id: Some(4),
            published: PublishedFilter::Exact(1),
            access: Some(2),
            milestone: Some(0),
            project: 7,
            ..Default::default()
        }
    }

    #[test]
    fn test_field_order() {
        assert_eq!(derive_key("getItems", &sample()), "getItems:sprint:1:2:4:0:7");
        assert_eq!(
            derive_key("getItems", &FilterState::default()),
            "getItems::::::0"
        );
    }

    #[test]
    fn test_equal_states_equal_keys() {
        assert_eq!(derive_key("p", &sample()), derive_key("p", &sample().clone()));
    }

    #[test]
    fn test_each_field_changes_key() {
        let base = derive_key("p", &sample());
        let variants = [
            FilterState {
                search: "other".to_string(),
                ..sample()
            },
            FilterState {
                published: PublishedFilter::Default,
                ..sample()
            },
            FilterState {
                published: PublishedFilter::Unrestricted,
                ..sample()
            },
            FilterState {
                access: None,
                ..sample()
            },
            FilterState {
                author_id: Some(5),
                ..sample()
            },
            FilterState {
                milestone: None,
                ..sample()
            },
            FilterState {
                project: 8,
                ..sample()
            },
        ];
        for variant in &variants {
            assert_ne!(derive_key("p", variant), base, "{:?}", variant);
        }
    }
}
