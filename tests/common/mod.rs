#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{test, App};
use serde_json::Value;
use sqlx::SqlitePool;

/// Builds the full application on top of `pool`, wrapped the same way `main` wraps it.
pub async fn init_app(
    pool: SqlitePool,
) -> impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
{
    test::init_service(
        App::new()
            .wrap(NormalizePath::trim())
            .wrap(Logger::default())
            .configure(bettertasks::configure(pool)),
    )
    .await
}

pub async fn test_pool() -> SqlitePool {
    bettertasks::db::connect_in_memory()
        .await
        .expect("Failed to open in-memory database")
}

/// Sends `req` and returns the status with the parsed JSON body (`Null` when empty).
pub async fn send<S, B>(app: &S, req: actix_http::Request) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    if body.is_empty() {
        return (status, Value::Null);
    }
    let json = serde_json::from_slice(&body).unwrap_or_else(|e| {
        panic!(
            "Response body is not JSON ({}). Status: {}. Body: {:?}",
            e,
            status,
            String::from_utf8_lossy(&body)
        )
    });
    (status, json)
}

pub fn get(uri: &str) -> actix_http::Request {
    test::TestRequest::get().uri(uri).to_request()
}

pub fn delete(uri: &str) -> actix_http::Request {
    test::TestRequest::delete().uri(uri).to_request()
}

pub fn post_json(uri: &str, body: Value) -> actix_http::Request {
    test::TestRequest::post().uri(uri).set_json(body).to_request()
}

pub fn patch_json(uri: &str, body: Value) -> actix_http::Request {
    test::TestRequest::patch().uri(uri).set_json(body).to_request()
}

pub fn patch_empty(uri: &str) -> actix_http::Request {
    test::TestRequest::patch().uri(uri).to_request()
}

/// Registers a user and returns the response body, failing the test on any non-201.
pub async fn register<S, B>(app: &S, name: &str, email: &str, password: &str) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = send(
        app,
        post_json(
            "/api/auth/register",
            serde_json::json!({ "name": name, "email": email, "password": password }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Registration failed. Body: {}", body);
    body
}

/// Creates a list for `owner_id` and returns its id.
pub async fn create_list<S, B>(app: &S, owner_id: i64, name: &str) -> i64
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = send(
        app,
        post_json(
            "/api/lists",
            serde_json::json!({ "name": name, "owner_id": owner_id }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "List creation failed. Body: {}", body);
    body["id"].as_i64().expect("list id")
}

/// Creates a task in `list_id` and returns the response body.
pub async fn create_task<S, B>(app: &S, list_id: i64, title: &str) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = send(
        app,
        post_json(
            "/api/tasks",
            serde_json::json!({ "title": title, "list_id": list_id }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Task creation failed. Body: {}", body);
    body
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .expect("count query")
}
