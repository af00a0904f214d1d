//! User listing parameters
//!
//! `ListUsersQuery` is the untyped query string as received.
//! `validate` turns it into `QueryParameters` or a per-field error list.

use std::borrow::Cow;

use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use super::filter::{build_filter, FilterPredicate};
use super::pagination::PageWindow;
use super::sort::{build_sort_key, SortKey, DEFAULT_SORT};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Raw listing query, every value still text
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<String>,
    pub sort: Option<String>,
}

/// Numeric bounds checked after parsing
#[derive(Debug, Validate)]
struct ListBounds {
    #[validate(range(min = 1, message = "page must be greater than 0"))]
    page: i64,
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    limit: i64,
    #[validate(custom(function = "validate_sort"))]
    sort: String,
}

fn validate_sort(sort: &str) -> Result<(), ValidationError> {
    let key = build_sort_key(Some(sort));
    if key.user_field().is_some() {
        Ok(())
    } else {
        Err(field_error("unknown_field", format!("cannot sort by '{}'", key.field)))
    }
}

fn field_error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

fn parse_number(
    raw: Option<&str>,
    default: u64,
    field: &'static str,
    errors: &mut ValidationErrors,
) -> i64 {
    let Some(raw) = raw else {
        return default as i64;
    };
    match raw.trim().parse::<i64>() {
        Ok(n) => n,
        Err(_) => {
            errors.add(
                field,
                field_error("number", format!("{} must be a number", field)),
            );
            0
        }
    }
}

/// Anything other than the literal strings `true` and `false` means "no filter"
fn parse_flag(raw: Option<&str>) -> Option<bool> {
    match raw {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    }
}

impl ListUsersQuery {
    /// Check and convert into typed parameters
    pub fn validate(self) -> Result<QueryParameters, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let page = parse_number(self.page.as_deref(), DEFAULT_PAGE, "page", &mut errors);
        let limit = parse_number(self.limit.as_deref(), DEFAULT_PAGE_SIZE, "limit", &mut errors);
        if !errors.errors().is_empty() {
            return Err(errors);
        }

        let sort = self
            .sort
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SORT.to_string());

        let bounds = ListBounds { page, limit, sort };
        bounds.validate()?;

        // The store binds the offset as a signed 64-bit integer
        if (page - 1).checked_mul(limit).is_none() {
            let mut errors = ValidationErrors::new();
            errors.add(
                "page",
                field_error("range", format!("page {} is out of range", page)),
            );
            return Err(errors);
        }

        Ok(QueryParameters {
            page: page as u64,
            page_size: limit as u64,
            search: self.search.filter(|s| !s.is_empty()),
            role: self.role.filter(|s| !s.is_empty()),
            is_active: parse_flag(self.is_active.as_deref()),
            sort: bounds.sort,
        })
    }
}

/// Validated listing parameters. `page` and `page_size` are at least 1.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParameters {
    pub page: u64,
    pub page_size: u64,
    pub search: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
    pub sort: String,
}

impl Default for QueryParameters {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            search: None,
            role: None,
            is_active: None,
            sort: DEFAULT_SORT.to_string(),
        }
    }
}

impl QueryParameters {
    pub fn filter(&self) -> FilterPredicate {
        build_filter(self.search.as_deref(), self.role.as_deref(), self.is_active)
    }

    pub fn sort_key(&self) -> SortKey {
        build_sort_key(Some(&self.sort))
    }

    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.page, self.page_size)
    }
}
