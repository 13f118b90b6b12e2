use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr};

use crate::models::auth::{self, AuthError};
use crate::models::order;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Orders,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Orders => Entity::has_many(order::Entity).into(),
        }
    }
}

impl Related<order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Create a regular account. The email column is unique, so a second
/// registration with the same address comes back as `DuplicateEmail` with no
/// row inserted.
pub async fn register(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    password: &str,
) -> Result<Model, AuthError> {
    let user = ActiveModel {
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        password_hash: Set(auth::hash_password(password)?),
        role: Set("user".to_string()),
        ..Default::default()
    };
    match user.insert(db).await {
        Ok(model) => Ok(model),
        Err(e) => match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Err(AuthError::DuplicateEmail),
            _ => Err(AuthError::Db(e)),
        },
    }
}

/// Look up a user by email and check the password against the stored hash.
/// Unknown email and wrong password are both `Ok(None)`.
pub async fn find_by_credentials(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
) -> Result<Option<Model>, DbErr> {
    let user = Entity::find()
        .filter(Column::Email.eq(email))
        .one(db)
        .await?;
    Ok(user.filter(|u| auth::verify_password(&u.password_hash, password)))
}
