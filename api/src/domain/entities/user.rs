//! User domain entity
//!
//! Represents a person with an account in the user directory.
//! The password hash never travels inside a `User`; it is only exposed
//! through `UserCredentials` for password checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role assigned to users created without an explicit role
pub const DEFAULT_ROLE: &str = "USER";

/// Account type for users registered with email and password
pub const LOCAL_ACCOUNT: &str = "LOCAL";

/// Unique identifier for a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Addressable fields of a user record, named as they appear on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    Id,
    Name,
    Email,
    Phone,
    Address,
    Image,
    Role,
    AccountType,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

impl UserField {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserField::Id => "id",
            UserField::Name => "name",
            UserField::Email => "email",
            UserField::Phone => "phone",
            UserField::Address => "address",
            UserField::Image => "image",
            UserField::Role => "role",
            UserField::AccountType => "accountType",
            UserField::IsActive => "isActive",
            UserField::CreatedAt => "createdAt",
            UserField::UpdatedAt => "updatedAt",
        }
    }
}

impl std::fmt::Display for UserField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" | "_id" => Ok(UserField::Id),
            "name" => Ok(UserField::Name),
            "email" => Ok(UserField::Email),
            "phone" => Ok(UserField::Phone),
            "address" => Ok(UserField::Address),
            "image" => Ok(UserField::Image),
            "role" => Ok(UserField::Role),
            "accountType" => Ok(UserField::AccountType),
            "isActive" => Ok(UserField::IsActive),
            "createdAt" => Ok(UserField::CreatedAt),
            "updatedAt" => Ok(UserField::UpdatedAt),
            _ => Err(format!("Unknown user field: {}", s)),
        }
    }
}

/// Borrowed value of a single user field, ordered the way a store would sort it
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum UserValue<'a> {
    Id(Uuid),
    Text(Option<&'a str>),
    Bool(bool),
    Time(DateTime<Utc>),
}

/// A user record as returned by reads (credential excluded)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub image: Option<String>,
    pub role: String,
    pub account_type: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Read a field by name
    pub fn value(&self, field: UserField) -> UserValue<'_> {
        match field {
            UserField::Id => UserValue::Id(self.id.0),
            UserField::Name => UserValue::Text(Some(&self.name)),
            UserField::Email => UserValue::Text(Some(&self.email)),
            UserField::Phone => UserValue::Text(self.phone.as_deref()),
            UserField::Address => UserValue::Text(self.address.as_deref()),
            UserField::Image => UserValue::Text(self.image.as_deref()),
            UserField::Role => UserValue::Text(Some(&self.role)),
            UserField::AccountType => UserValue::Text(Some(&self.account_type)),
            UserField::IsActive => UserValue::Bool(self.is_active),
            UserField::CreatedAt => UserValue::Time(self.created_at),
            UserField::UpdatedAt => UserValue::Time(self.updated_at),
        }
    }
}

/// A user together with its stored password hash
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Input for registering a user, password still in plain text
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub image: Option<String>,
    pub role: Option<String>,
}

/// Data needed to persist a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub image: Option<String>,
    pub role: String,
    pub account_type: String,
    pub is_active: bool,
}

/// Partial update requested by a client, password still in plain text
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub image: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// Partial update as applied by the store. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub image: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

impl UserChanges {
    /// Apply the changes to an in-memory user
    pub fn apply(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            user.phone = Some(phone.clone());
        }
        if let Some(address) = &self.address {
            user.address = Some(address.clone());
        }
        if let Some(image) = &self.image {
            user.image = Some(image.clone());
        }
        if let Some(role) = &self.role {
            user.role = role.clone();
        }
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
        user.updated_at = Utc::now();
    }
}
