use actix_session::Session;
use actix_web::{web, HttpResponse};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::models::auth::{self, AuthError};
use crate::models::user;

#[derive(Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

fn register_page(flash: Option<(String, String)>) -> HttpResponse {
    let flash_html = flash
        .map(|(level, message)| format!("<p class=\"flash {}\">{}</p>", level, message))
        .unwrap_or_default();
    let html = format!(
        r#"
        <h1>Create your SmartWash account</h1>
        {}
        <form action="/register" method="post">
            <input type="text" name="name" placeholder="Name" required><br>
            <input type="email" name="email" placeholder="Email" required><br>
            <input type="password" name="password" placeholder="Password" required><br>
            <button type="submit">Sign Up</button>
        </form>
        <a href="/login">Back to login</a>
    "#,
        flash_html
    );
    HttpResponse::Ok().content_type("text/html").body(html)
}

// Registration form (GET)
pub async fn register_form() -> HttpResponse {
    register_page(None)
}

// Registration handler (POST)
pub async fn register(
    db: web::Data<DatabaseConnection>,
    session: Session,
    form: web::Form<RegisterForm>,
) -> HttpResponse {
    match user::register(db.get_ref(), &form.name, &form.email, &form.password).await {
        Ok(_) => {
            auth::set_flash(&session, "success", "Registration successful! Please login.");
            auth::redirect_to_login()
        }
        Err(AuthError::DuplicateEmail) => {
            register_page(Some(("danger".to_string(), "Email already exists".to_string())))
        }
        Err(e) => {
            log::error!("Error registering user: {}", e);
            HttpResponse::InternalServerError().body("Failed to register")
        }
    }
}

pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/register")
            .route(web::get().to(register_form))
            .route(web::post().to(register)),
    );
}
