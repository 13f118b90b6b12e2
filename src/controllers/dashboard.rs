use actix_session::Session;
use actix_web::{web, HttpResponse};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::models::auth::{self, Identity};
use crate::models::order;

#[derive(Deserialize)]
pub struct OrderForm {
    pub service: String,
    pub quantity: String,
}

fn current_user(session: &Session) -> Option<Identity> {
    Identity::from_session(session).filter(|identity| identity.role == "user")
}

async fn render_dashboard(
    db: &DatabaseConnection,
    identity: &Identity,
    flash: Option<(&str, &str)>,
) -> HttpResponse {
    let orders = match order::list_for_user(db, identity.user_id).await {
        Ok(orders) => orders,
        Err(e) => {
            log::error!("Error fetching orders: {}", e);
            return HttpResponse::InternalServerError().body("Internal server error");
        }
    };
    let payment_allowed = order::payment_allowed(&orders);

    let flash_html = flash
        .map(|(level, message)| format!("<p class=\"flash {}\">{}</p>", level, message))
        .unwrap_or_default();
    let rows = if !orders.is_empty() {
        orders
            .iter()
            .map(|o| {
                format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td><td>{}</td><td>{}</td></tr>",
                    o.id,
                    o.service,
                    o.quantity,
                    o.total_price,
                    o.status,
                    o.created_at.format("%Y-%m-%d %H:%M:%S"),
                )
            })
            .collect::<String>()
    } else {
        "<tr><td colspan=\"6\">No orders yet.</td></tr>".to_string()
    };
    let payment_html = if payment_allowed {
        "<p><a href=\"#\">Proceed to payment</a></p>"
    } else {
        "<p>Payment unlocks once an order is completed.</p>"
    };

    let html = format!(
        r#"
        <h1>Welcome, {name}</h1>
        {flash}
        <form action="/dashboard" method="post">
            <select name="service">
                <option>Wash</option>
                <option>Dry</option>
                <option>Iron</option>
            </select>
            <input type="number" name="quantity" placeholder="Quantity" required>
            <button type="submit">Place order</button>
        </form>
        <table>
            <tr><th>#</th><th>Service</th><th>Qty</th><th>Total</th><th>Status</th><th>Placed</th></tr>
            {rows}
        </table>
        {payment}
        <a href="/logout">Logout</a>
    "#,
        name = identity.name,
        flash = flash_html,
        rows = rows,
        payment = payment_html,
    );
    HttpResponse::Ok().content_type("text/html").body(html)
}

// Own orders (GET)
pub async fn show(db: web::Data<DatabaseConnection>, session: Session) -> HttpResponse {
    match current_user(&session) {
        Some(identity) => render_dashboard(db.get_ref(), &identity, None).await,
        None => auth::redirect_to_login(),
    }
}

// Place an order, then re-render the same page so it shows up immediately (POST)
pub async fn create_order(
    db: web::Data<DatabaseConnection>,
    session: Session,
    form: web::Form<OrderForm>,
) -> HttpResponse {
    let identity = match current_user(&session) {
        Some(identity) => identity,
        None => return auth::redirect_to_login(),
    };

    // Validate form data
    let quantity = match form.quantity.trim().parse::<i32>() {
        Ok(q) if q > 0 => q,
        _ => {
            return render_dashboard(
                db.get_ref(),
                &identity,
                Some(("danger", "Quantity must be a positive whole number")),
            )
            .await
        }
    };

    if let Err(e) = order::place(db.get_ref(), identity.user_id, &form.service, quantity).await {
        log::error!("Error creating order: {}", e);
        return HttpResponse::InternalServerError().body("Failed to create order");
    }

    render_dashboard(db.get_ref(), &identity, None).await
}

pub fn dashboard_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/dashboard")
            .route(web::get().to(show))
            .route(web::post().to(create_order)),
    );
}
