use directories::ProjectDirs;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbBackend,
    DbErr, EntityTrait, QueryFilter, Set, Statement,
};
use std::env;
use std::path::PathBuf;

use crate::models::auth;
use crate::models::user;

const DB_FILE: &str = "database.sqlite";

pub const DEFAULT_ADMIN_NAME: &str = "Admin";
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@smartwash.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

pub fn project_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "SmartWash", "SmartWash")
        .map(|proj_dirs| proj_dirs.data_dir().to_path_buf())
}

fn fallback_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

pub fn db_path() -> PathBuf {
    let dir = project_data_dir().unwrap_or_else(fallback_dir);
    let _ = std::fs::create_dir_all(&dir);
    dir.join(DB_FILE)
}

/// Connect and make sure the schema and the seeded administrator exist.
/// DATABASE_URL overrides the default file in the platform data directory.
pub async fn get_database() -> Result<DatabaseConnection, DbErr> {
    let db_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
        let db_path = db_path();
        if !db_path.exists() {
            let _ = std::fs::File::create(&db_path);
        }
        format!("sqlite://{}", db_path.to_string_lossy())
    });

    let db = Database::connect(&db_url).await?;
    init_db(&db).await?;
    Ok(db)
}

/// Idempotent: tables are created only if absent and the administrator is
/// only seeded when no admin-role row exists yet.
pub async fn init_db(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.execute(Statement::from_string(
        DbBackend::Sqlite,
        CREATE_USERS_TABLE.to_string(),
    ))
    .await?;

    db.execute(Statement::from_string(
        DbBackend::Sqlite,
        CREATE_ORDERS_TABLE.to_string(),
    ))
    .await?;

    let admin = user::Entity::find()
        .filter(user::Column::Role.eq("admin"))
        .one(db)
        .await?;
    if admin.is_none() {
        let password_hash = auth::hash_password(DEFAULT_ADMIN_PASSWORD)
            .map_err(|e| DbErr::Custom(e.to_string()))?;
        let admin = user::ActiveModel {
            name: Set(DEFAULT_ADMIN_NAME.to_string()),
            email: Set(DEFAULT_ADMIN_EMAIL.to_string()),
            password_hash: Set(password_hash),
            role: Set("admin".to_string()),
            ..Default::default()
        };
        admin.insert(db).await?;
    }

    Ok(())
}

const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT UNIQUE NOT NULL,
    password_hash TEXT NOT NULL,
    role TEXT NOT NULL DEFAULT 'user'
);
"#;

const CREATE_ORDERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS orders (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    service TEXT NOT NULL,
    quantity INTEGER NOT NULL,
    total_price REAL NOT NULL,
    status TEXT NOT NULL DEFAULT 'Pending',
    created_at TEXT NOT NULL,
    FOREIGN KEY(user_id) REFERENCES users(id)
);
"#;
