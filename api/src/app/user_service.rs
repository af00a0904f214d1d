//! User service
//!
//! Handles user registration, listing and profile management.

use std::sync::Arc;

use crate::domain::entities::{
    CreateUser, NewUser, UpdateUser, User, UserChanges, UserId, DEFAULT_ROLE, LOCAL_ACCOUNT,
};
use crate::domain::ports::UserRepository;
use crate::domain::query::{paginate, Page, QueryParameters};
use crate::error::{AppError, DomainError};

/// Service for managing users
pub struct UserService<UR>
where
    UR: UserRepository,
{
    users: Arc<UR>,
    bcrypt_cost: u32,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(users: Arc<UR>, bcrypt_cost: u32) -> Self {
        Self { users, bcrypt_cost }
    }

    /// Register a new user
    ///
    /// Fails with `AlreadyExists` when the email is taken. New users get the
    /// `USER` role unless one is given, a local account and active status.
    pub async fn create(&self, input: CreateUser) -> Result<User, AppError> {
        if self
            .users
            .find_credentials_by_email(&input.email)
            .await?
            .is_some()
        {
            tracing::warn!(email = %input.email, "Registration with existing email");
            return Err(AppError::Domain(DomainError::AlreadyExists(format!(
                "Email '{}' is already in use",
                input.email
            ))));
        }

        let password_hash = hash_password(input.password, self.bcrypt_cost).await?;

        let new_user = NewUser {
            name: input.name,
            email: input.email,
            password_hash,
            phone: input.phone,
            address: input.address,
            image: input.image,
            role: input
                .role
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            account_type: LOCAL_ACCOUNT.to_string(),
            is_active: true,
        };

        let user = self.users.create(&new_user).await?;
        tracing::info!(user_id = %user.id, "User created");

        Ok(user)
    }

    /// List every user without pagination
    pub async fn find_all(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.find_all().await?)
    }

    /// One page of users matching the listing parameters
    ///
    /// The page and the total count are read concurrently; if either read
    /// fails the whole call fails.
    pub async fn list_page(&self, params: &QueryParameters) -> Result<Page<User>, AppError> {
        let filter = params.filter();
        let sort = params.sort_key();
        let window = params.window();

        tracing::debug!(
            filter = %filter,
            sort = %sort,
            offset = window.offset,
            limit = window.limit,
            "Listing users"
        );

        let (users, total) = tokio::try_join!(
            self.users.find(&filter, &sort, window),
            self.users.count(&filter),
        )?;

        Ok(Page::new(
            users,
            paginate(params.page, params.page_size, total),
        ))
    }

    /// Find a user by ID
    pub async fn find_one(&self, id: &UserId) -> Result<Option<User>, AppError> {
        Ok(self.users.find_by_id(id).await?)
    }

    /// Apply a partial update. A new password is hashed before it is stored.
    pub async fn update(&self, id: &UserId, input: UpdateUser) -> Result<Option<User>, AppError> {
        if let Some(email) = &input.email {
            if let Some(existing) = self.users.find_credentials_by_email(email).await? {
                if existing.user.id != *id {
                    return Err(AppError::Domain(DomainError::AlreadyExists(format!(
                        "Email '{}' is already in use",
                        email
                    ))));
                }
            }
        }

        let password_hash = match input.password {
            Some(password) => Some(hash_password(password, self.bcrypt_cost).await?),
            None => None,
        };

        let changes = UserChanges {
            name: input.name,
            email: input.email,
            password_hash,
            phone: input.phone,
            address: input.address,
            image: input.image,
            role: input.role,
            is_active: input.is_active,
        };

        let updated = self.users.update(id, &changes).await?;
        if updated.is_some() {
            tracing::info!(user_id = %id, "User updated");
        }

        Ok(updated)
    }

    /// Delete a user, returning the removed record
    pub async fn remove(&self, id: &UserId) -> Result<Option<User>, AppError> {
        let removed = self.users.delete(id).await?;
        if removed.is_some() {
            tracing::info!(user_id = %id, "User removed");
        }

        Ok(removed)
    }
}

/// Hash a password with bcrypt off the async executor
async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}
