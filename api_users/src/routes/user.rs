use std::sync::Arc;

use actix_web::{Responder, delete, get, patch, web};
use common::{
    error::{AppError, Res},
    http::Success,
    role::Role,
};
use db::models::user::User;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::user::UpdateUserRequest;
use crate::services;

#[get("", wrap = "auth::middleware(&[])")]
pub async fn get_users(pool: web::Data<Arc<PgPool>>) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let users = services::user::get_users(pg_pool).await?;
    Success::ok("Users found", users)
}

/// Returns the user identified by the bearer token.
#[get("/whoami", wrap = "auth::middleware(&[])")]
pub async fn get_whoami(current_user: web::ReqData<User>) -> Res<impl Responder> {
    Success::ok("Current user", current_user.into_inner())
}

#[get("/id/{id}", wrap = "auth::middleware(&[])")]
pub async fn get_user_by_id(
    path: web::Path<Uuid>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let user = services::user::get_user_by_id(pg_pool, path.into_inner()).await?;
    Success::ok("User found", user)
}

#[get("/username/{username}", wrap = "auth::middleware(&[])")]
pub async fn get_user_by_username(
    path: web::Path<String>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let user = services::user::get_user_by_username(pg_pool, &path).await?;
    Success::ok("User found", user)
}

/// Updates a user profile. Owners may edit themselves; only admins may
/// edit others or change a role.
#[patch("/id/{id}", wrap = "auth::middleware(&[Role::Admin])")]
pub async fn patch_user(
    path: web::Path<Uuid>,
    req: web::Json<UpdateUserRequest>,
    current_user: web::ReqData<User>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let req = req.into_inner().validate()?;

    if req.role.is_some() && !auth::has_role(&current_user, Role::Admin) {
        return Err(AppError::Forbidden("Only admins can change roles".to_string()));
    }

    let user = services::user::update_user(pg_pool, path.into_inner(), req).await?;
    Success::ok("User updated successfully", user)
}

#[delete("/id/{id}", wrap = "auth::middleware(&[Role::Admin])")]
pub async fn delete_user(path: web::Path<Uuid>, pool: web::Data<Arc<PgPool>>) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let user_id = path.into_inner();
    services::user::delete_user(pg_pool, user_id).await?;
    Success::ok("User has been deleted", user_id)
}
