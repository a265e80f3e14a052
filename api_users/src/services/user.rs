use common::{
    error::{AppError, Res},
    misc::hash_str,
    role::Role,
};
use db::{
    dtos::user::{UserCreateRequest, UserUpdateRequest},
    models::user::{AuthCredentials, User},
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::user::{SignupRequest, UpdateUserRequest};

pub async fn get_users(pool: &PgPool) -> Res<Vec<User>> {
    db::user::get_users(pool).await
}

pub async fn get_user_by_id(pool: &PgPool, user_id: Uuid) -> Res<User> {
    db::user::get_user_by_id(pool, user_id)
        .await
        .map_err(|e| e.or_not_found("User"))
}

pub async fn get_user_by_username(pool: &PgPool, username: &str) -> Res<User> {
    db::user::get_user_by_username(pool, username)
        .await
        .map_err(|e| e.or_not_found("User"))
}

/// Inserts user record and credentials to the database.
/// The user starts verified when the email was confirmed before signup.
pub async fn create_user_with_credentials(pool: &PgPool, req: SignupRequest) -> Res<User> {
    if db::user::exists_user_by_email(pool, &req.email).await? {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }
    if db::user::exists_user_by_username(pool, &req.username).await? {
        return Err(AppError::Conflict("Username already exists".to_string()));
    }

    let verified = db::verification::is_verified(pool, &req.email).await?;
    let password_hash = hash_str(&req.password)?;

    let mut tx = pool.begin().await?;

    // insert user
    let user = db::user::insert_user(
        &mut *tx,
        UserCreateRequest {
            username: req.username.trim().to_string(),
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            role: Role::User,
            age: req.age,
            verified,
        },
    )
    .await
    .map_err(map_conflict)?;

    // insert credentials
    db::user::insert_user_with_credentials(
        &mut *tx,
        AuthCredentials {
            user_id: user.id,
            password_hash,
        },
    )
    .await?;

    tx.commit().await?;
    log::info!("Registered user {} ({})", user.username, user.id);
    Ok(user)
}

pub async fn update_user(pool: &PgPool, user_id: Uuid, req: UpdateUserRequest) -> Res<User> {
    db::user::update_user(
        pool,
        user_id,
        UserUpdateRequest {
            username: req.username.map(|u| u.trim().to_string()),
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            role: req.role,
            age: req.age,
        },
    )
    .await
    .map_err(|e| map_conflict(e).or_not_found("User"))
}

pub async fn delete_user(pool: &PgPool, user_id: Uuid) -> Res<()> {
    match db::user::delete_user(pool, user_id).await? {
        0 => Err(AppError::NotFound("User not found".to_string())),
        _ => Ok(()),
    }
}

/// Unique violations on users surface as 409 instead of 500.
fn map_conflict(err: AppError) -> AppError {
    match err {
        AppError::Database(ref db_err) if db::is_unique_violation(db_err) => {
            AppError::Conflict("Username or email already in use".to_string())
        }
        other => other,
    }
}
