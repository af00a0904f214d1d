//! Sort keys
//!
//! A sort spec is a field name, optionally prefixed with `-` for
//! descending order. Only one field is supported; ties come back in
//! whatever order the store yields them.

use std::cmp::Ordering;

use crate::domain::entities::{User, UserField};

/// Sort applied when the caller does not ask for one
pub const DEFAULT_SORT: &str = "-createdAt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    /// Resolve the field name against the known user fields
    pub fn user_field(&self) -> Option<UserField> {
        self.field.parse().ok()
    }

    pub fn is_descending(&self) -> bool {
        self.direction == SortDirection::Descending
    }

    /// Compare two records by this key. Unknown fields compare equal.
    pub fn compare(&self, a: &User, b: &User) -> Ordering {
        let Some(field) = self.user_field() else {
            return Ordering::Equal;
        };
        let ordering = a.value(field).cmp(&b.value(field));
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl Default for SortKey {
    fn default() -> Self {
        build_sort_key(None)
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.direction {
            SortDirection::Ascending => write!(f, "{}", self.field),
            SortDirection::Descending => write!(f, "-{}", self.field),
        }
    }
}

/// Parse a sort spec. `None` and the empty string fall back to [`DEFAULT_SORT`].
pub fn build_sort_key(spec: Option<&str>) -> SortKey {
    let spec = spec.filter(|s| !s.is_empty()).unwrap_or(DEFAULT_SORT);

    match spec.strip_prefix('-') {
        Some(field) => SortKey {
            field: field.to_string(),
            direction: SortDirection::Descending,
        },
        None => SortKey {
            field: spec.to_string(),
            direction: SortDirection::Ascending,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_user_named;
    use chrono::{Duration, Utc};

    #[test]
    fn leading_dash_means_descending() {
        let key = build_sort_key(Some("-name"));

        assert_eq!(key.field, "name");
        assert_eq!(key.direction, SortDirection::Descending);
    }

    #[test]
    fn bare_field_means_ascending() {
        let key = build_sort_key(Some("name"));

        assert_eq!(key.field, "name");
        assert_eq!(key.direction, SortDirection::Ascending);
    }

    #[test]
    fn missing_spec_uses_created_at_descending() {
        let key = build_sort_key(None);

        assert_eq!(key.field, "createdAt");
        assert!(key.is_descending());
        assert_eq!(key, SortKey::default());
    }

    #[test]
    fn empty_spec_uses_default() {
        assert_eq!(build_sort_key(Some("")), SortKey::default());
    }

    #[test]
    fn only_first_dash_is_stripped() {
        let key = build_sort_key(Some("--name"));

        assert_eq!(key.field, "-name");
        assert!(key.is_descending());
        assert_eq!(key.user_field(), None);
    }

    #[test]
    fn display_round_trips() {
        assert_eq!(build_sort_key(Some("-email")).to_string(), "-email");
        assert_eq!(build_sort_key(Some("email")).to_string(), "email");
    }

    #[test]
    fn compare_honours_direction() {
        let now = Utc::now();
        let mut older = test_user_named("Alice", "alice@example.com");
        older.created_at = now - Duration::days(1);
        let mut newer = test_user_named("Bob", "bob@example.com");
        newer.created_at = now;

        let desc = build_sort_key(None);
        let asc = build_sort_key(Some("createdAt"));

        assert_eq!(desc.compare(&newer, &older), Ordering::Less);
        assert_eq!(asc.compare(&newer, &older), Ordering::Greater);
        assert_eq!(
            build_sort_key(Some("name")).compare(&older, &newer),
            Ordering::Less
        );
    }

    #[test]
    fn compare_unknown_field_is_equal() {
        let a = test_user_named("Alice", "alice@example.com");
        let b = test_user_named("Bob", "bob@example.com");

        assert_eq!(
            build_sort_key(Some("nickname")).compare(&a, &b),
            Ordering::Equal
        );
    }
}
