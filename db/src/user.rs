use common::error::{AppError, Res};
use sqlx::{Executor, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    dtos::user::{UserCreateRequest, UserUpdateRequest},
    models::user::{AuthCredentials, User},
};

const USER_COLUMNS: &str =
    "id, username, email, first_name, last_name, role, age, verified, created_at, updated_at";

pub async fn exists_user_by_email<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    email: &str,
) -> Res<bool> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
        .bind(email)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn exists_user_by_username<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    username: &str,
) -> Res<bool> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
        .bind(username)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_users<'e, E: Executor<'e, Database = Postgres>>(executor: E) -> Res<Vec<User>> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY created_at"
    ))
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_user_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<User> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(user_id)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

/// Same as `get_user_by_id` but a missing user is `None` instead of an error.
pub async fn find_user_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Option<User>> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(user_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_user_by_username<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    username: &str,
) -> Res<User> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
    ))
    .bind(username)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn insert_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: UserCreateRequest,
) -> Res<User> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (username, email, first_name, last_name, role, age, verified)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(data.username)
    .bind(data.email)
    .bind(data.first_name)
    .bind(data.last_name)
    .bind(data.role.as_str())
    .bind(data.age)
    .bind(data.verified)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn update_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    data: UserUpdateRequest,
) -> Res<User> {
    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE users SET updated_at = NOW()");

    if let Some(username) = data.username {
        qb.push(", username = ").push_bind(username);
    }
    if let Some(email) = data.email {
        qb.push(", email = ").push_bind(email);
    }
    if let Some(first_name) = data.first_name {
        qb.push(", first_name = ").push_bind(first_name);
    }
    if let Some(last_name) = data.last_name {
        qb.push(", last_name = ").push_bind(last_name);
    }
    if let Some(role) = data.role {
        qb.push(", role = ").push_bind(role.as_str());
    }
    if let Some(age) = data.age {
        qb.push(", age = ").push_bind(age);
    }

    qb.push(" WHERE id = ").push_bind(user_id);
    qb.push(format!(" RETURNING {USER_COLUMNS}"));

    qb.build_query_as::<User>()
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn set_verified_by_email<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    email: &str,
) -> Res<u64> {
    sqlx::query("UPDATE users SET verified = TRUE, updated_at = NOW() WHERE email = $1")
        .bind(email)
        .execute(executor)
        .await
        .map(|res| res.rows_affected())
        .map_err(AppError::from)
}

/// Returns the number of deleted rows (0 or 1).
pub async fn delete_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<u64> {
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(executor)
        .await
        .map(|res| res.rows_affected())
        .map_err(AppError::from)
}

pub async fn insert_user_with_credentials<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: AuthCredentials,
) -> Res<()> {
    sqlx::query(
        r#"
        INSERT INTO auth_credentials (user_id, password_hash)
        VALUES ($1, $2)
        "#,
    )
    .bind(data.user_id)
    .bind(data.password_hash)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn get_user_with_password_hash<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    email: &str,
) -> Res<Option<(User, AuthCredentials)>> {
    #[derive(sqlx::FromRow)]
    struct Row {
        #[sqlx(flatten)]
        user: User,
        password_hash: String,
    }

    let row = sqlx::query_as::<_, Row>(
        r#"
        SELECT u.id, u.username, u.email, u.first_name, u.last_name, u.role, u.age,
               u.verified, u.created_at, u.updated_at, ac.password_hash
        FROM users u
        JOIN auth_credentials ac ON u.id = ac.user_id
        WHERE u.email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(executor)
    .await?;

    Ok(row.map(|row| {
        let credentials = AuthCredentials {
            user_id: row.user.id,
            password_hash: row.password_hash,
        };
        (row.user, credentials)
    }))
}
