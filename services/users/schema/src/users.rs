use sea_orm::entity::prelude::*;

/// Live user record held in the operational store.
///
/// `password` is stored exactly as supplied; hashing is a pending product
/// decision and is not applied here.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub dob: Date,
    #[sea_orm(unique)]
    pub email: String,
    pub password: String,
    pub phone: String,
    pub gender: String,
    pub address: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
