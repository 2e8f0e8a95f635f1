//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{StoreError, User, UserType};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub account: String,
    /// Argon2 PHC string, never plain text
    pub password: String,
    pub name: String,
    pub status: bool,
    pub user_type: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl TryFrom<Model> for User {
    type Error = StoreError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let user_type = UserType::parse(&model.user_type).ok_or_else(|| {
            StoreError::backend(format!(
                "user {} has unknown type '{}'",
                model.id, model.user_type
            ))
        })?;

        Ok(User {
            id: model.id,
            account: model.account,
            password_hash: model.password,
            name: model.name,
            status: model.status,
            user_type,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
