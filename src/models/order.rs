use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::models::user;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub service: String,
    pub quantity: i32,
    pub total_price: f64,
    pub status: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Fixed per-unit pricing. Unknown service names are priced at zero rather
/// than rejected.
pub fn unit_price(service: &str) -> f64 {
    match service {
        "Wash" => 50.0,
        "Dry" => 32.0,
        "Iron" => 20.0,
        _ => 0.0,
    }
}

pub async fn place(
    db: &DatabaseConnection,
    user_id: i32,
    service: &str,
    quantity: i32,
) -> Result<Model, DbErr> {
    let order = ActiveModel {
        user_id: Set(user_id),
        service: Set(service.to_string()),
        quantity: Set(quantity),
        total_price: Set(unit_price(service) * quantity as f64),
        status: Set("Pending".to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    order.insert(db).await
}

pub async fn list_for_user(db: &DatabaseConnection, user_id: i32) -> Result<Vec<Model>, DbErr> {
    Entity::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await
}

/// Every order across all users, newest first, paired with the owner's
/// display name.
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<(Model, String)>, DbErr> {
    let rows = Entity::find()
        .find_also_related(user::Entity)
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|(order, owner)| {
            let name = owner.map(|u| u.name).unwrap_or_default();
            (order, name)
        })
        .collect())
}

/// Unconditional overwrite. An id that matches no order updates zero rows
/// and is not an error.
pub async fn set_status(db: &DatabaseConnection, order_id: i32, status: &str) -> Result<(), DbErr> {
    Entity::update_many()
        .col_expr(Column::Status, Expr::value(status))
        .filter(Column::Id.eq(order_id))
        .exec(db)
        .await
        .map(|_| ())
}

/// Payment is offered once at least one order has been completed.
pub fn payment_allowed(orders: &[Model]) -> bool {
    orders.iter().any(|o| o.status == "Completed")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_with_status(status: &str) -> Model {
        Model {
            id: 1,
            user_id: 1,
            service: "Wash".to_string(),
            quantity: 1,
            total_price: 50.0,
            status: status.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn unit_prices() {
        assert_eq!(unit_price("Wash"), 50.0);
        assert_eq!(unit_price("Dry"), 32.0);
        assert_eq!(unit_price("Iron"), 20.0);
        assert_eq!(unit_price("Mystery"), 0.0);
    }

    #[test]
    fn payment_requires_a_completed_order() {
        assert!(!payment_allowed(&[]));
        assert!(!payment_allowed(&[order_with_status("Pending")]));
        // Case-sensitive on purpose.
        assert!(!payment_allowed(&[order_with_status("completed")]));
        assert!(payment_allowed(&[
            order_with_status("Pending"),
            order_with_status("Completed"),
        ]));
    }
}
