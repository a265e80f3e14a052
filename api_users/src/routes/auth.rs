use std::sync::Arc;

use actix_session::Session;
use actix_web::{Responder, post, web};
use common::{
    env_config::Config,
    error::{AppError, Res},
    http::Success,
    jwt,
    misc::normalize_email,
};
use serde_json::json;
use sqlx::PgPool;

use crate::dtos::user::{
    AuthResponse, EmailConfirmRequest, EmailVerifyRequest, LoginRequest, SignupRequest,
};
use crate::services;

/// Keeps the token and serialized user in the cookie session.
fn store_session(session: &Session, auth: &AuthResponse) -> Res<()> {
    let user_string = serde_json::to_string(&auth.user_info)
        .map_err(|e| AppError::Internal(format!("Failed to serialize user: {}", e)))?;
    session.renew();
    session
        .insert("token", &auth.token)
        .map_err(|_| AppError::Internal("Failed to insert token cookie".to_string()))?;
    session
        .insert("user", &user_string)
        .map_err(|_| AppError::Internal("Failed to insert user cookie".to_string()))?;
    Ok(())
}

/// Registers a new user with email and password.
///
/// # Input
/// - `req`: JSON payload with username, email, password, confirm_password
///   and optional names/age
///
/// # Output
/// - Success: 201 with `{ userInfo, token }`
/// - Error: 400 on validation failure, 409 if email or username is taken
#[post("/signup")]
pub async fn post_signup(
    req: web::Json<SignupRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
    session: Session,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let req = req.into_inner().validate()?;

    let user = services::user::create_user_with_credentials(pg_pool, req).await?;
    let token = jwt::generate_jwt(user.id, &config.jwt_config)?;
    let auth = AuthResponse {
        user_info: user,
        token,
    };
    store_session(&session, &auth)?;
    Success::created("Account successfully created!", auth)
}

/// Authenticates a user with email and password.
///
/// # Output
/// - Success: `{ userInfo, token }`, session cookie set
/// - Error: 401 for invalid credentials
#[post("/login")]
pub async fn post_login(
    login_data: web::Json<LoginRequest>,
    config: web::Data<Arc<Config>>,
    pool: web::Data<Arc<PgPool>>,
    session: Session,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let user = services::auth::authenticate_user(pg_pool, &login_data.into_inner()).await?;
    let token = jwt::generate_jwt(user.id, &config.jwt_config)?;
    let auth = AuthResponse {
        user_info: user,
        token,
    };
    store_session(&session, &auth)?;
    Success::ok("Login successful", auth)
}

#[post("/logout")]
pub async fn post_logout(session: Session) -> Res<impl Responder> {
    session.purge();
    Success::ok("Logged out", ())
}

/// Sends a verification code to the given email.
#[post("/emailverify")]
pub async fn post_email_verify(
    req: web::Json<EmailVerifyRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let email = normalize_email(&req.email);
    let record = services::auth::issue_email_code(pg_pool, &email, &config).await?;
    Success::ok(
        "E-mail sent successfully",
        json!({ "email": record.email, "expires_at": record.expires_at }),
    )
}

/// Checks a verification code previously sent by `/emailverify`.
#[post("/emailverify/confirm")]
pub async fn post_email_confirm(
    req: web::Json<EmailConfirmRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let email = normalize_email(&req.email);
    services::auth::confirm_email_code(pg_pool, &email, &req.code).await?;
    Success::ok(
        "E-mail verified",
        json!({ "email": email, "verified": true }),
    )
}
