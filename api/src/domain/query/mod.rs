//! User listing query construction
//!
//! Turns optional filter/sort/paging parameters into a store predicate,
//! a sort key and an offset/limit window, and computes the pagination
//! summary returned alongside each page.

pub mod filter;
pub mod pagination;
pub mod params;
pub mod sort;

pub use filter::{build_filter, Clause, FieldValue, FilterPredicate, TextMatch};
pub use pagination::{paginate, Page, PageWindow, PaginationSummary};
pub use params::{ListUsersQuery, QueryParameters};
pub use sort::{build_sort_key, SortDirection, SortKey};
