use actix_session::Session;
use actix_web::{web, Error, HttpResponse};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::models::{auth, user};

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

fn login_page(flash: Option<(String, String)>) -> HttpResponse {
    let flash_html = flash
        .map(|(level, message)| format!("<p class=\"flash {}\">{}</p>", level, message))
        .unwrap_or_default();
    let html = format!(
        r#"
        <h1>SmartWash Login</h1>
        {}
        <form action="/login" method="post">
            <input type="email" name="email" placeholder="Email" required><br>
            <input type="password" name="password" placeholder="Password" required><br>
            <button type="submit">Login</button>
        </form>
        <a href="/register">Create an account</a>
    "#,
        flash_html
    );
    HttpResponse::Ok().content_type("text/html").body(html)
}

// Serve login form (GET)
pub async fn login_form(session: Session) -> HttpResponse {
    login_page(auth::take_flash(&session))
}

// Login handler (POST)
pub async fn login(
    db: web::Data<DatabaseConnection>,
    session: Session,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, Error> {
    let found = user::find_by_credentials(db.get_ref(), &form.email, &form.password)
        .await
        .map_err(|e| {
            log::error!("Error looking up user: {}", e);
            actix_web::error::ErrorInternalServerError("Database error")
        })?;

    match found {
        Some(u) => {
            let identity = auth::Identity {
                user_id: u.id,
                role: u.role.clone(),
                name: u.name.clone(),
            };
            identity.save(&session)?;
            let destination = if u.role == "admin" { "/admin" } else { "/dashboard" };
            Ok(HttpResponse::Found()
                .append_header(("Location", destination))
                .finish())
        }
        None => Ok(login_page(Some((
            "danger".to_string(),
            "Invalid credentials".to_string(),
        )))),
    }
}

// Logout handler
pub async fn logout(session: Session) -> HttpResponse {
    session.purge();
    auth::redirect_to_login()
}

pub fn login_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(login_form))
            .route(web::post().to(login)),
    );
    cfg.service(
        web::resource("/login")
            .route(web::get().to(login_form))
            .route(web::post().to(login)),
    );
    cfg.service(web::resource("/logout").route(web::get().to(logout)));
}
