use actix_session::Session;
use actix_web::{web, HttpResponse};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::models::auth::{self, Identity};
use crate::models::order;

#[derive(Deserialize)]
pub struct StatusForm {
    pub order_id: String,
    pub status: String,
}

fn current_admin(session: &Session) -> Option<Identity> {
    Identity::from_session(session).filter(|identity| identity.role == "admin")
}

async fn render_admin(db: &DatabaseConnection, identity: &Identity) -> HttpResponse {
    let orders = match order::list_all(db).await {
        Ok(orders) => orders,
        Err(e) => {
            log::error!("Error fetching orders: {}", e);
            return HttpResponse::InternalServerError().body("Internal server error");
        }
    };

    let rows = if !orders.is_empty() {
        orders
            .iter()
            .map(|(o, owner)| {
                let update_form = format!(
                    "<form action=\"/admin\" method=\"post\"><input type=\"hidden\" name=\"order_id\" value=\"{}\"><input type=\"text\" name=\"status\" value=\"{}\"><button type=\"submit\">Update</button></form>",
                    o.id, o.status
                );
                format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                    o.id,
                    owner,
                    o.service,
                    o.quantity,
                    o.total_price,
                    o.status,
                    o.created_at.format("%Y-%m-%d %H:%M:%S"),
                    update_form,
                )
            })
            .collect::<String>()
    } else {
        "<tr><td colspan=\"8\">No orders yet.</td></tr>".to_string()
    };

    let html = format!(
        r#"
        <h1>All orders (signed in as {name})</h1>
        <table>
            <tr><th>#</th><th>Customer</th><th>Service</th><th>Qty</th><th>Total</th><th>Status</th><th>Placed</th><th></th></tr>
            {rows}
        </table>
        <a href="/logout">Logout</a>
    "#,
        name = identity.name,
        rows = rows,
    );
    HttpResponse::Ok().content_type("text/html").body(html)
}

// All orders across users (GET)
pub async fn show(db: web::Data<DatabaseConnection>, session: Session) -> HttpResponse {
    match current_admin(&session) {
        Some(identity) => render_admin(db.get_ref(), &identity).await,
        None => auth::redirect_to_login(),
    }
}

// Update one order's status, then re-render the same page (POST)
pub async fn update_status(
    db: web::Data<DatabaseConnection>,
    session: Session,
    form: web::Form<StatusForm>,
) -> HttpResponse {
    let identity = match current_admin(&session) {
        Some(identity) => identity,
        None => return auth::redirect_to_login(),
    };

    let order_id = match form.order_id.trim().parse::<i32>() {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid order id"),
    };

    if let Err(e) = order::set_status(db.get_ref(), order_id, &form.status).await {
        log::error!("Error updating order {}: {}", order_id, e);
        return HttpResponse::InternalServerError().body("Failed to update order");
    }

    render_admin(db.get_ref(), &identity).await
}

pub fn admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/admin")
            .route(web::get().to(show))
            .route(web::post().to(update_status)),
    );
}
