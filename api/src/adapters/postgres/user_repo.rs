//! PostgreSQL adapter for UserRepository
//!
//! Listing predicates are translated to SeaORM conditions: text matches
//! become case-insensitive POSIX regex matches (`~*`), equalities become
//! column comparisons.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, IdenStatic,
    Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, SqlErr,
};
use uuid::Uuid;

use crate::domain::entities::{NewUser, User, UserChanges, UserCredentials, UserField, UserId};
use crate::domain::ports::UserRepository;
use crate::domain::query::{Clause, FieldValue, FilterPredicate, PageWindow, SortKey};
use crate::entity::users;
use crate::error::DomainError;

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn column(field: UserField) -> users::Column {
    match field {
        UserField::Id => users::Column::Id,
        UserField::Name => users::Column::Name,
        UserField::Email => users::Column::Email,
        UserField::Phone => users::Column::Phone,
        UserField::Address => users::Column::Address,
        UserField::Image => users::Column::Image,
        UserField::Role => users::Column::Role,
        UserField::AccountType => users::Column::AccountType,
        UserField::IsActive => users::Column::IsActive,
        UserField::CreatedAt => users::Column::CreatedAt,
        UserField::UpdatedAt => users::Column::UpdatedAt,
    }
}

/// Translate a predicate into a SeaORM condition
pub(crate) fn to_condition(filter: &FilterPredicate) -> Condition {
    filter
        .clauses()
        .iter()
        .fold(Condition::all(), |all, clause| match clause {
            Clause::AnyMatches(matches) => {
                let any = matches.iter().fold(Condition::any(), |any, m| {
                    any.add(Expr::cust_with_values(
                        format!("\"{}\" ~* ?", column(m.field).as_str()),
                        [m.pattern.clone()],
                    ))
                });
                all.add(any)
            }
            Clause::Equals(field, FieldValue::Text(value)) => {
                all.add(column(*field).eq(value.clone()))
            }
            Clause::Equals(field, FieldValue::Bool(value)) => all.add(column(*field).eq(*value)),
        })
}

/// Select the public columns of one sorted page of matching users
pub(crate) fn page_query(
    filter: &FilterPredicate,
    sort: &SortKey,
    window: PageWindow,
) -> Result<Select<users::Entity>, DomainError> {
    let field = sort
        .user_field()
        .ok_or_else(|| DomainError::Validation(format!("Unknown sort field: {}", sort.field)))?;
    if i64::try_from(window.offset).is_err() || i64::try_from(window.limit).is_err() {
        return Err(DomainError::Validation(format!(
            "Page window out of range: offset {}, limit {}",
            window.offset, window.limit
        )));
    }
    let order = if sort.is_descending() {
        Order::Desc
    } else {
        Order::Asc
    };

    Ok(public_select()
        .filter(to_condition(filter))
        .order_by(column(field), order)
        .offset(window.offset)
        .limit(window.limit))
}

fn public_select() -> Select<users::Entity> {
    users::Entity::find()
        .select_only()
        .columns(users::PUBLIC_COLUMNS)
}

fn db_error(e: DbErr) -> DomainError {
    DomainError::Database(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find(
        &self,
        filter: &FilterPredicate,
        sort: &SortKey,
        window: PageWindow,
    ) -> Result<Vec<User>, DomainError> {
        let results = page_query(filter, sort, window)?
            .into_model::<users::PublicRow>()
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(results.into_iter().map(|r| r.into()).collect())
    }

    async fn count(&self, filter: &FilterPredicate) -> Result<u64, DomainError> {
        users::Entity::find()
            .filter(to_condition(filter))
            .count(&self.db)
            .await
            .map_err(db_error)
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let results = public_select()
            .into_model::<users::PublicRow>()
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(results.into_iter().map(|r| r.into()).collect())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let result = public_select()
            .filter(users::Column::Id.eq(id.0))
            .into_model::<users::PublicRow>()
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(result.map(|r| r.into()))
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, DomainError> {
        let result = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(result.map(|m| m.into()))
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let now = Utc::now().fixed_offset();

        let model = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            phone: Set(user.phone.clone()),
            address: Set(user.address.clone()),
            image: Set(user.image.clone()),
            role: Set(user.role.clone()),
            account_type: Set(user.account_type.clone()),
            is_active: Set(user.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::AlreadyExists(format!(
                "User with email '{}' already exists",
                user.email
            )),
            _ => db_error(e),
        })?;

        Ok(UserCredentials::from(result).user)
    }

    async fn update(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, DomainError> {
        let Some(existing) = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(db_error)?
        else {
            return Ok(None);
        };

        let mut model: users::ActiveModel = existing.into();
        if let Some(name) = &changes.name {
            model.name = Set(name.clone());
        }
        if let Some(email) = &changes.email {
            model.email = Set(email.clone());
        }
        if let Some(hash) = &changes.password_hash {
            model.password_hash = Set(hash.clone());
        }
        if let Some(phone) = &changes.phone {
            model.phone = Set(Some(phone.clone()));
        }
        if let Some(address) = &changes.address {
            model.address = Set(Some(address.clone()));
        }
        if let Some(image) = &changes.image {
            model.image = Set(Some(image.clone()));
        }
        if let Some(role) = &changes.role {
            model.role = Set(role.clone());
        }
        if let Some(is_active) = changes.is_active {
            model.is_active = Set(is_active);
        }
        model.updated_at = Set(Utc::now().fixed_offset());

        let result = model.update(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                DomainError::AlreadyExists("Email is already in use".to_string())
            }
            _ => db_error(e),
        })?;

        Ok(Some(UserCredentials::from(result).user))
    }

    async fn delete(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        users::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        Ok(Some(existing))
    }
}

/// Convert a public row to a domain entity
impl From<users::PublicRow> for User {
    fn from(row: users::PublicRow) -> Self {
        User {
            id: UserId(row.id),
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            image: row.image,
            role: row.role,
            account_type: row.account_type,
            is_active: row.is_active,
            created_at: row.created_at.with_timezone(&Utc),
            updated_at: row.updated_at.with_timezone(&Utc),
        }
    }
}

/// Convert a full SeaORM model, splitting off the password hash
impl From<users::Model> for UserCredentials {
    fn from(model: users::Model) -> Self {
        UserCredentials {
            password_hash: model.password_hash,
            user: User {
                id: UserId(model.id),
                name: model.name,
                email: model.email,
                phone: model.phone,
                address: model.address,
                image: model.image,
                role: model.role,
                account_type: model.account_type,
                is_active: model.is_active,
                created_at: model.created_at.with_timezone(&Utc),
                updated_at: model.updated_at.with_timezone(&Utc),
            },
        }
    }
}
