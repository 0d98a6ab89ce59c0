use crate::{
    auth::{
        check_credentials_blocking, hash_password_blocking, LoginRequest, RegisterRequest,
        INVALID_CREDENTIALS,
    },
    error::AppError,
    models::{User, UserRecord, DEFAULT_LIST_NAME, DEFAULT_LIST_WELCOME_EMOJI, USER_COLUMNS},
    routes::users::{email_exists, EMAIL_TAKEN},
};
use actix_web::{post, web, HttpResponse, Responder};
use chrono::Utc;
use log::{error, info, warn};
use sqlx::SqlitePool;

/// Register a new user
///
/// Creates the account together with its default "My Tasks" list and returns the user.
///
/// ## Responses:
/// - `201 Created`: the new `User`.
/// - `400 Bad Request`: the email is already registered. Nothing is written.
/// - `422 Unprocessable Entity`: a field is missing or has the wrong JSON type.
/// - `500 Internal Server Error`: any other failure; neither row is kept.
#[post("/register")]
pub async fn register(
    pool: web::Data<SqlitePool>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    info!("Register request for: {}", register_data.email);

    if email_exists(&pool, &register_data.email).await? {
        warn!("Email already registered: {}", register_data.email);
        return Err(AppError::Conflict(EMAIL_TAKEN.into()));
    }

    let user = create_account(&pool, &register_data)
        .await
        .map_err(|err| match err {
            // Lost a race against a concurrent registration of the same email.
            AppError::Conflict(_) => {
                warn!("Email already registered: {}", register_data.email);
                AppError::Conflict(EMAIL_TAKEN.into())
            }
            other => {
                error!("Unexpected error during registration: {}", other);
                AppError::InternalServerError(other.detail().to_string())
            }
        })?;

    info!("User registered: {} (id={})", user.email, user.id);
    Ok(HttpResponse::Created().json(user))
}

/// Inserts the user and the default list in one transaction.
///
/// Dropping `tx` on any early return rolls both inserts back.
async fn create_account(pool: &SqlitePool, data: &RegisterRequest) -> Result<User, AppError> {
    let password_hash = hash_password_blocking(data.password.clone()).await?;
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (name, email, hashed_password, created_at)
         VALUES (?, ?, ?, ?)
         RETURNING {}",
        USER_COLUMNS
    ))
    .bind(&data.name)
    .bind(&data.email)
    .bind(password_hash)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO task_lists (name, emoji, owner_id, created_at) VALUES (?, ?, ?, ?)")
        .bind(DEFAULT_LIST_NAME)
        .bind(DEFAULT_LIST_WELCOME_EMOJI)
        .bind(user.id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(user)
}

/// Login user
///
/// Verifies the credentials and returns the user. No token or session is issued.
///
/// ## Responses:
/// - `200 OK`: the `User`.
/// - `401 Unauthorized`: unknown email or wrong password, reported identically.
#[post("/login")]
pub async fn login(
    pool: web::Data<SqlitePool>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    info!("Login request for: {}", login_data.email);

    let record = sqlx::query_as::<_, UserRecord>(&format!(
        "SELECT {}, hashed_password FROM users WHERE email = ?",
        USER_COLUMNS
    ))
    .bind(&login_data.email)
    .fetch_optional(&**pool)
    .await?;

    // Unknown emails still pay for a bcrypt check.
    let stored = record.as_ref().map(|record| record.hashed_password.clone());
    let authenticated = check_credentials_blocking(login_data.password.clone(), stored).await?;

    match record {
        Some(record) if authenticated => {
            info!("Login successful: {}", record.user.email);
            Ok(HttpResponse::Ok().json(User::from(record)))
        }
        _ => {
            warn!("Login failed for: {}", login_data.email);
            Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()))
        }
    }
}
