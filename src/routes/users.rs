use crate::{
    error::AppError,
    models::{User, UserCreate, USER_COLUMNS},
};
use actix_web::{delete, get, post, web, HttpResponse, Responder};
use chrono::Utc;
use log::{info, warn};
use sqlx::SqlitePool;

pub const EMAIL_TAKEN: &str = "Email already registered";

pub(crate) async fn email_exists(pool: &SqlitePool, email: &str) -> Result<bool, sqlx::Error> {
    let id = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(id.is_some())
}

pub(crate) async fn user_exists(pool: &SqlitePool, user_id: i64) -> Result<bool, sqlx::Error> {
    let id = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(id.is_some())
}

/// Lists every user, oldest first.
#[get("")]
pub async fn get_users(pool: web::Data<SqlitePool>) -> Result<impl Responder, AppError> {
    let users = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS))
        .fetch_all(&**pool)
        .await?;

    Ok(HttpResponse::Ok().json(users))
}

/// Creates a user without credentials.
///
/// Such a user owns lists like any other but cannot log in.
///
/// ## Responses:
/// - `201 Created`: the new `User`.
/// - `400 Bad Request`: the email is already registered.
#[post("")]
pub async fn create_user(
    pool: web::Data<SqlitePool>,
    user_data: web::Json<UserCreate>,
) -> Result<impl Responder, AppError> {
    if email_exists(&pool, &user_data.email).await? {
        warn!("Email already registered: {}", user_data.email);
        return Err(AppError::Conflict(EMAIL_TAKEN.into()));
    }

    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (name, email, avatar_url, created_at)
         VALUES (?, ?, ?, ?)
         RETURNING {}",
        USER_COLUMNS
    ))
    .bind(&user_data.name)
    .bind(&user_data.email)
    .bind(&user_data.avatar_url)
    .bind(Utc::now())
    .fetch_one(&**pool)
    .await
    .map_err(|err| match AppError::from(err) {
        AppError::Conflict(_) => AppError::Conflict(EMAIL_TAKEN.into()),
        other => other,
    })?;

    info!("User created: {} (id={})", user.email, user.id);
    Ok(HttpResponse::Created().json(user))
}

/// Retrieves a specific user by id.
#[get("/{id}")]
pub async fn get_user(
    pool: web::Data<SqlitePool>,
    user_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS))
        .bind(user_id.into_inner())
        .fetch_optional(&**pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(HttpResponse::Ok().json(user))
}

/// Deletes a user together with all of their lists and tasks.
#[delete("/{id}")]
pub async fn delete_user(
    pool: web::Data<SqlitePool>,
    user_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let user_id = user_id.into_inner();

    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id)
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("User not found".into()));
    }

    info!("User deleted: id={}", user_id);
    Ok(HttpResponse::NoContent().finish())
}
