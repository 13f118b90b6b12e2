mod controllers;
mod models;
mod utils;

#[cfg(test)]
mod tests;

use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::Key;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenvy::from_path;
use std::env;

#[actix_web::main]
async fn main() {
    match from_path(".env") {
        Ok(_) => println!("Environment variables loaded from .env"),
        Err(e) => eprintln!("Warning: Could not load .env file: {}", e),
    }
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let db = utils::database::get_database().await.unwrap_or_else(|e| {
        panic!("Failed to connect to database: {}", e);
    });

    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    log::info!("Listening on http://{}", bind_addr);

    // Fresh signing key per start, so logins do not survive a restart.
    let session_key = Key::generate();
    let db_data = web::Data::new(db);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(db_data.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), session_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .configure(controllers::login::login_routes)
            .configure(controllers::register::register_routes)
            .configure(controllers::dashboard::dashboard_routes)
            .configure(controllers::admin::admin_routes)
    })
    .bind(&bind_addr)
    .unwrap_or_else(|e| {
        eprintln!("Failed to bind to {}: {}", bind_addr, e);
        std::process::exit(1);
    })
    .run();

    if let Err(e) = server.await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
