//! `users` table

use sea_orm::entity::prelude::*;
use sea_orm::FromQueryResult;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub image: Option<String>,
    pub role: String,
    pub account_type: String,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Columns readable by clients; everything except `password_hash`
pub const PUBLIC_COLUMNS: [Column; 11] = [
    Column::Id,
    Column::Name,
    Column::Email,
    Column::Phone,
    Column::Address,
    Column::Image,
    Column::Role,
    Column::AccountType,
    Column::IsActive,
    Column::CreatedAt,
    Column::UpdatedAt,
];

/// Row shape produced by selecting [`PUBLIC_COLUMNS`]
#[derive(Clone, Debug, FromQueryResult)]
pub struct PublicRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub image: Option<String>,
    pub role: String,
    pub account_type: String,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}
