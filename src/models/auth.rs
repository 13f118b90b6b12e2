use actix_session::{Session, SessionInsertError};
use actix_web::HttpResponse;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("email already exists")]
    DuplicateEmail,
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("database error: {0}")]
    Db(#[from] DbErr),
}

// Helper: hash password
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
}

// Helper: verify password
pub fn verify_password(hash: &str, password: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// The identity a login binds to the session. Handlers go through this type
/// rather than touching session keys directly.
#[derive(Clone, Debug)]
pub struct Identity {
    pub user_id: i32,
    pub role: String,
    pub name: String,
}

impl Identity {
    pub fn save(&self, session: &Session) -> Result<(), SessionInsertError> {
        session.insert("user_id", self.user_id)?;
        session.insert("role", &self.role)?;
        session.insert("name", &self.name)
    }

    pub fn from_session(session: &Session) -> Option<Identity> {
        let user_id = session.get::<i32>("user_id").unwrap_or(None)?;
        let role = session.get::<String>("role").unwrap_or(None)?;
        let name = session.get::<String>("name").unwrap_or(None)?;
        Some(Identity { user_id, role, name })
    }
}

pub fn redirect_to_login() -> HttpResponse {
    HttpResponse::Found()
        .append_header(("Location", "/login"))
        .finish()
}

// One-shot flash message, read and erased on the next page render.
pub fn set_flash(session: &Session, level: &str, message: &str) {
    let _ = session.insert("flash", (level.to_string(), message.to_string()));
}

pub fn take_flash(session: &Session) -> Option<(String, String)> {
    let flash = session.get::<(String, String)>("flash").unwrap_or(None);
    if flash.is_some() {
        session.remove("flash");
    }
    flash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("hunter2").unwrap();
        assert!(verify_password(&hash, "hunter2"));
        assert!(!verify_password(&hash, "hunter3"));
        assert!(!verify_password("not a bcrypt hash", "hunter2"));
    }
}
