//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).
//! Reads never carry the password hash except through
//! `find_credentials_by_email`.

use async_trait::async_trait;

use crate::domain::entities::{NewUser, User, UserChanges, UserCredentials, UserId};
use crate::domain::query::{FilterPredicate, PageWindow, SortKey};
use crate::error::DomainError;

/// Repository for User entities
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Records matching `filter`, ordered by `sort`, restricted to `window`
    async fn find(
        &self,
        filter: &FilterPredicate,
        sort: &SortKey,
        window: PageWindow,
    ) -> Result<Vec<User>, DomainError>;

    /// Number of records matching `filter`
    async fn count(&self, filter: &FilterPredicate) -> Result<u64, DomainError>;

    /// Every user, in store order
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;

    /// Find a user by ID
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find a user and its password hash by email
    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, DomainError>;

    /// Create a new user
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;

    /// Apply a partial update. Returns `None` when the user does not exist.
    async fn update(&self, id: &UserId, changes: &UserChanges)
        -> Result<Option<User>, DomainError>;

    /// Delete a user. Returns the removed record, or `None` when absent.
    async fn delete(&self, id: &UserId) -> Result<Option<User>, DomainError>;
}
