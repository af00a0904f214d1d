//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex, RwLock};

use crate::domain::entities::{NewUser, User, UserChanges, UserCredentials, UserId};
use crate::domain::ports::UserRepository;
use crate::domain::query::{FilterPredicate, PageWindow, SortKey};
use crate::error::DomainError;

// ============================================================================
// In-Memory User Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Vec<UserCredentials>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a user for testing
    pub fn with_user(self, user: User) -> Self {
        {
            let mut users = self.users.write().unwrap();
            users.push(UserCredentials {
                password_hash: format!("hash-{}", user.id),
                user,
            });
        }
        self
    }

    /// Pre-populate with several users
    pub fn with_users(self, users: Vec<User>) -> Self {
        users.into_iter().fold(self, |repo, user| repo.with_user(user))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find(
        &self,
        filter: &FilterPredicate,
        sort: &SortKey,
        window: PageWindow,
    ) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().unwrap();
        let mut matched: Vec<User> = users
            .iter()
            .map(|c| &c.user)
            .filter(|u| filter.matches(u))
            .cloned()
            .collect();
        matched.sort_by(|a, b| sort.compare(a, b));

        Ok(matched
            .into_iter()
            .skip(window.offset as usize)
            .take(window.limit as usize)
            .collect())
    }

    async fn count(&self, filter: &FilterPredicate) -> Result<u64, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users.iter().filter(|c| filter.matches(&c.user)).count() as u64)
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users.iter().map(|c| c.user.clone()).collect())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users
            .iter()
            .find(|c| c.user.id == *id)
            .map(|c| c.user.clone()))
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users.iter().find(|c| c.user.email == email).cloned())
    }

    async fn create(&self, new_user: &NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().unwrap();
        if users.iter().any(|c| c.user.email == new_user.email) {
            return Err(DomainError::AlreadyExists(format!(
                "User with email '{}' already exists",
                new_user.email
            )));
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            phone: new_user.phone.clone(),
            address: new_user.address.clone(),
            image: new_user.image.clone(),
            role: new_user.role.clone(),
            account_type: new_user.account_type.clone(),
            is_active: new_user.is_active,
            created_at: now,
            updated_at: now,
        };

        users.push(UserCredentials {
            user: user.clone(),
            password_hash: new_user.password_hash.clone(),
        });

        Ok(user)
    }

    async fn update(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, DomainError> {
        let mut users = self.users.write().unwrap();
        let Some(entry) = users.iter_mut().find(|c| c.user.id == *id) else {
            return Ok(None);
        };

        changes.apply(&mut entry.user);
        if let Some(hash) = &changes.password_hash {
            entry.password_hash = hash.clone();
        }

        Ok(Some(entry.user.clone()))
    }

    async fn delete(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let mut users = self.users.write().unwrap();
        let position = users.iter().position(|c| c.user.id == *id);
        Ok(position.map(|i| users.remove(i).user))
    }
}

// ============================================================================
// Recording User Repository
// ============================================================================

/// Wraps a repository and records the predicates passed to `find` and `count`
pub struct RecordingUserRepository<R = InMemoryUserRepository> {
    inner: R,
    find_calls: Mutex<Vec<FilterPredicate>>,
    count_calls: Mutex<Vec<FilterPredicate>>,
}

impl<R: UserRepository> RecordingUserRepository<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            find_calls: Mutex::new(Vec::new()),
            count_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn find_filters(&self) -> Vec<FilterPredicate> {
        self.find_calls.lock().unwrap().clone()
    }

    pub fn count_filters(&self) -> Vec<FilterPredicate> {
        self.count_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl<R: UserRepository> UserRepository for RecordingUserRepository<R> {
    async fn find(
        &self,
        filter: &FilterPredicate,
        sort: &SortKey,
        window: PageWindow,
    ) -> Result<Vec<User>, DomainError> {
        self.find_calls.lock().unwrap().push(filter.clone());
        self.inner.find(filter, sort, window).await
    }

    async fn count(&self, filter: &FilterPredicate) -> Result<u64, DomainError> {
        self.count_calls.lock().unwrap().push(filter.clone());
        self.inner.count(filter).await
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        self.inner.find_all().await
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.inner.find_by_id(id).await
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, DomainError> {
        self.inner.find_credentials_by_email(email).await
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        self.inner.create(user).await
    }

    async fn update(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, DomainError> {
        self.inner.update(id, changes).await
    }

    async fn delete(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.inner.delete(id).await
    }
}

// ============================================================================
// Failing User Repository
// ============================================================================

/// Repository whose listing reads can be made to fail
#[derive(Default)]
pub struct FailingUserRepository {
    inner: InMemoryUserRepository,
    fail_find: bool,
    fail_count: bool,
}

impl FailingUserRepository {
    pub fn failing_find() -> Self {
        Self {
            fail_find: true,
            ..Default::default()
        }
    }

    pub fn failing_count() -> Self {
        Self {
            fail_count: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl UserRepository for FailingUserRepository {
    async fn find(
        &self,
        filter: &FilterPredicate,
        sort: &SortKey,
        window: PageWindow,
    ) -> Result<Vec<User>, DomainError> {
        if self.fail_find {
            return Err(DomainError::Database("find unavailable".to_string()));
        }
        self.inner.find(filter, sort, window).await
    }

    async fn count(&self, filter: &FilterPredicate) -> Result<u64, DomainError> {
        if self.fail_count {
            return Err(DomainError::Database("count unavailable".to_string()));
        }
        self.inner.count(filter).await
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        Err(DomainError::Database("find_all unavailable".to_string()))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.inner.find_by_id(id).await
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, DomainError> {
        self.inner.find_credentials_by_email(email).await
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        self.inner.create(user).await
    }

    async fn update(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, DomainError> {
        self.inner.update(id, changes).await
    }

    async fn delete(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.inner.delete(id).await
    }
}
