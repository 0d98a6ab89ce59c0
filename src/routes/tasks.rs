use crate::{
    error::AppError,
    models::{Task, TaskCreate, TaskQuery, TaskUpdate, TASK_COLUMNS},
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use chrono::Utc;
use log::info;
use sqlx::SqlitePool;
use validator::Validate;

async fn tasks_in_list(pool: &SqlitePool, list_id: i64) -> Result<Vec<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks WHERE list_id = ? ORDER BY id",
        TASK_COLUMNS
    ))
    .bind(list_id)
    .fetch_all(pool)
    .await
}

async fn list_exists(pool: &SqlitePool, list_id: i64) -> Result<bool, sqlx::Error> {
    let id = sqlx::query_scalar::<_, i64>("SELECT id FROM task_lists WHERE id = ?")
        .bind(list_id)
        .fetch_optional(pool)
        .await?;
    Ok(id.is_some())
}

/// Retrieves the tasks of a list.
///
/// The list itself is not looked up: an unknown `list_id` yields an empty array.
///
/// ## Query Parameters:
/// - `list_id` (required): id of the list whose tasks are returned.
#[get("")]
pub async fn get_tasks(
    pool: web::Data<SqlitePool>,
    query_params: web::Query<TaskQuery>,
) -> Result<impl Responder, AppError> {
    let tasks = tasks_in_list(&pool, query_params.list_id).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task in an existing list.
///
/// ## Request Body:
/// - `title`: the title of the task (required).
/// - `priority` (optional): `"High"`, `"Medium"` or `"Low"`. Defaults to `"Medium"`.
/// - `due_date` (optional): RFC 3339 timestamp; without an offset it is read as UTC.
/// - `list_id`: the owning list.
///
/// ## Responses:
/// - `201 Created`: the new `Task`, not yet completed.
/// - `404 Not Found`: `list_id` does not reference a list. Nothing is written.
/// - `422 Unprocessable Entity`: a field is missing or has the wrong JSON type.
#[post("")]
pub async fn create_task(
    pool: web::Data<SqlitePool>,
    task_data: web::Json<TaskCreate>,
) -> Result<impl Responder, AppError> {
    if !list_exists(&pool, task_data.list_id).await? {
        return Err(AppError::NotFound("List not found".into()));
    }

    let task = sqlx::query_as::<_, Task>(&format!(
        "INSERT INTO tasks (title, priority, completed, due_date, list_id, created_at)
         VALUES (?, ?, ?, ?, ?, ?)
         RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(&task_data.title)
    .bind(task_data.priority.unwrap_or_default())
    .bind(false)
    .bind(task_data.due_date)
    .bind(task_data.list_id)
    .bind(Utc::now())
    .fetch_one(&**pool)
    .await?;

    info!("Task created: id={} list_id={}", task.id, task.list_id);
    Ok(HttpResponse::Created().json(task))
}

/// Applies a partial update to a task.
///
/// Only the fields present in the body change; `"due_date": null` clears the due date.
///
/// ## Responses:
/// - `200 OK`: the updated `Task`.
/// - `404 Not Found`: no task with this id.
/// - `422 Unprocessable Entity`: a non-nullable field was `null` or has the wrong JSON type.
#[patch("/{id}")]
pub async fn update_task(
    pool: web::Data<SqlitePool>,
    task_id: web::Path<i64>,
    task_data: web::Json<TaskUpdate>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let mut task = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks WHERE id = ?",
        TASK_COLUMNS
    ))
    .bind(task_id.into_inner())
    .fetch_optional(&**pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

    task_data.into_inner().apply_to(&mut task);

    let task = sqlx::query_as::<_, Task>(&format!(
        "UPDATE tasks
         SET title = ?, priority = ?, completed = ?, due_date = ?
         WHERE id = ?
         RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(&task.title)
    .bind(task.priority)
    .bind(task.completed)
    .bind(task.due_date)
    .bind(task.id)
    .fetch_optional(&**pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task by its id.
///
/// ## Responses:
/// - `204 No Content`: on successful deletion.
/// - `404 Not Found`: no task with this id.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<SqlitePool>,
    task_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let task_id = task_id.into_inner();

    let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
        .bind(task_id)
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Task not found".into()));
    }

    info!("Task deleted: id={}", task_id);
    Ok(HttpResponse::NoContent().finish())
}

/// Marks every task of a list as completed and returns them all.
///
/// Idempotent, and a no-op returning `[]` for an empty or unknown list.
#[patch("/finish-all/{list_id}")]
pub async fn finish_all_tasks(
    pool: web::Data<SqlitePool>,
    list_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let list_id = list_id.into_inner();

    let result = sqlx::query("UPDATE tasks SET completed = ? WHERE list_id = ?")
        .bind(true)
        .bind(list_id)
        .execute(&**pool)
        .await?;

    let tasks = tasks_in_list(&pool, list_id).await?;

    info!(
        "Finished all tasks in list {} ({} row(s) touched)",
        list_id,
        result.rows_affected()
    );
    Ok(HttpResponse::Ok().json(tasks))
}
