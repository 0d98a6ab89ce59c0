use crate::{
    error::AppError,
    models::{TaskList, TaskListCreate, TaskListQuery, TaskListUpdate, TASK_LIST_COLUMNS},
    routes::users::user_exists,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use chrono::Utc;
use log::info;
use sqlx::SqlitePool;
use validator::Validate;

/// Retrieves the lists owned by `owner_id`.
///
/// An owner with no lists, or one that does not exist, yields an empty array.
///
/// ## Query Parameters:
/// - `owner_id` (required): id of the owning user.
#[get("")]
pub async fn get_lists(
    pool: web::Data<SqlitePool>,
    query_params: web::Query<TaskListQuery>,
) -> Result<impl Responder, AppError> {
    let lists = sqlx::query_as::<_, TaskList>(&format!(
        "SELECT {} FROM task_lists WHERE owner_id = ? ORDER BY id",
        TASK_LIST_COLUMNS
    ))
    .bind(query_params.owner_id)
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(lists))
}

/// Creates a new list for an existing user.
///
/// ## Responses:
/// - `201 Created`: the new `TaskList`.
/// - `404 Not Found`: `owner_id` does not reference a user. Nothing is written.
/// - `422 Unprocessable Entity`: a field is missing or has the wrong JSON type.
#[post("")]
pub async fn create_list(
    pool: web::Data<SqlitePool>,
    list_data: web::Json<TaskListCreate>,
) -> Result<impl Responder, AppError> {
    if !user_exists(&pool, list_data.owner_id).await? {
        return Err(AppError::NotFound("User not found".into()));
    }

    let list = sqlx::query_as::<_, TaskList>(&format!(
        "INSERT INTO task_lists (name, emoji, owner_id, created_at)
         VALUES (?, ?, ?, ?)
         RETURNING {}",
        TASK_LIST_COLUMNS
    ))
    .bind(&list_data.name)
    .bind(list_data.emoji_or_default())
    .bind(list_data.owner_id)
    .bind(Utc::now())
    .fetch_one(&**pool)
    .await?;

    info!("List created: {:?} (id={}, owner_id={})", list.name, list.id, list.owner_id);
    Ok(HttpResponse::Created().json(list))
}

/// Applies a partial update to a list.
///
/// Only the fields present in the body change.
///
/// ## Responses:
/// - `200 OK`: the updated `TaskList`.
/// - `404 Not Found`: no list with this id.
/// - `422 Unprocessable Entity`: a field was `null` or has the wrong JSON type.
#[patch("/{id}")]
pub async fn update_list(
    pool: web::Data<SqlitePool>,
    list_id: web::Path<i64>,
    list_data: web::Json<TaskListUpdate>,
) -> Result<impl Responder, AppError> {
    list_data.validate()?;

    let mut list = sqlx::query_as::<_, TaskList>(&format!(
        "SELECT {} FROM task_lists WHERE id = ?",
        TASK_LIST_COLUMNS
    ))
    .bind(list_id.into_inner())
    .fetch_optional(&**pool)
    .await?
    .ok_or_else(|| AppError::NotFound("List not found".into()))?;

    list_data.into_inner().apply_to(&mut list);

    let list = sqlx::query_as::<_, TaskList>(&format!(
        "UPDATE task_lists SET name = ?, emoji = ? WHERE id = ? RETURNING {}",
        TASK_LIST_COLUMNS
    ))
    .bind(&list.name)
    .bind(&list.emoji)
    .bind(list.id)
    .fetch_optional(&**pool)
    .await?
    .ok_or_else(|| AppError::NotFound("List not found".into()))?;

    Ok(HttpResponse::Ok().json(list))
}

/// Deletes a list and, through the foreign key cascade, all of its tasks.
///
/// ## Responses:
/// - `204 No Content`: on successful deletion.
/// - `404 Not Found`: no list with this id.
#[delete("/{id}")]
pub async fn delete_list(
    pool: web::Data<SqlitePool>,
    list_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let list_id = list_id.into_inner();

    let result = sqlx::query("DELETE FROM task_lists WHERE id = ?")
        .bind(list_id)
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("List not found".into()));
    }

    info!("List deleted: id={}", list_id);
    Ok(HttpResponse::NoContent().finish())
}
