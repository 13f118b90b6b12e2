mod order_tests;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::utils::database::init_db;

/// Fresh in-memory database with the schema and the seeded administrator.
/// Single connection so every query sees the same in-memory database.
pub async fn test_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_owned());
    opts.max_connections(1);
    let db = Database::connect(opts)
        .await
        .expect("connect to in-memory sqlite");
    init_db(&db).await.expect("initialize schema");
    db
}
