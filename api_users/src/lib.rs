use actix_session::{SessionMiddleware, config::PersistentSession, storage::CookieSessionStore};
use actix_web::{
    cookie::{Key, time::Duration},
    web::{self},
};

pub mod routes {
    pub mod auth;
    pub mod session;
    pub mod user;
}

mod services {
    pub(crate) mod auth;
    pub(crate) mod user;
}

mod dtos {
    pub(crate) mod user;
}

pub const SESSION_COOKIE_NAME: &str = "user_sid";

pub fn mount_users() -> actix_web::Scope {
    web::scope("/users")
        .service(routes::auth::post_signup)
        .service(routes::auth::post_login)
        .service(routes::auth::post_logout)
        .service(routes::auth::post_email_verify)
        .service(routes::auth::post_email_confirm)
        .service(routes::session::get_session)
        .service(routes::user::get_users)
        .service(routes::user::get_whoami)
        .service(routes::user::get_user_by_id)
        .service(routes::user::get_user_by_username)
        .service(routes::user::patch_user)
        .service(routes::user::delete_user)
}

/// Cookie-backed session, valid for one day.
/// `secret` must be at least 32 bytes.
pub fn session_middleware(secure: bool, secret: &[u8]) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::derive_from(secret))
        .cookie_name(SESSION_COOKIE_NAME.to_string())
        .cookie_secure(secure)
        .cookie_http_only(true)
        .session_lifecycle(PersistentSession::default().session_ttl(Duration::days(1)))
        .build()
}
