//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::{Duration, Utc};

use crate::domain::entities::{CreateUser, User, UserId, DEFAULT_ROLE, LOCAL_ACCOUNT};

/// Create a test user with default values
pub fn test_user() -> User {
    test_user_named("Test User", "test@example.com")
}

/// Create a test user with a specific name and email
pub fn test_user_named(name: &str, email: &str) -> User {
    let now = Utc::now();
    User {
        id: UserId::new(),
        name: name.to_string(),
        email: email.to_string(),
        phone: None,
        address: None,
        image: None,
        role: DEFAULT_ROLE.to_string(),
        account_type: LOCAL_ACCOUNT.to_string(),
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

/// Create `count` users, each created one minute after the previous one
pub fn test_users(count: usize) -> Vec<User> {
    let start = Utc::now() - Duration::days(1);
    (0..count)
        .map(|i| {
            let mut user = test_user_named(
                &format!("User {:02}", i),
                &format!("user{:02}@example.com", i),
            );
            user.created_at = start + Duration::minutes(i as i64);
            user.updated_at = user.created_at;
            user
        })
        .collect()
}

/// Registration input with a valid password
pub fn test_create_user(name: &str, email: &str) -> CreateUser {
    CreateUser {
        name: name.to_string(),
        email: email.to_string(),
        password: "password123".to_string(),
        phone: None,
        address: None,
        image: None,
        role: None,
    }
}
