pub mod auth;
pub mod health;
pub mod lists;
pub mod tasks;
pub mod users;

use crate::error::AppError;
use actix_web::web;

/// Mounts every resource that lives under `/api`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::login)
            .service(auth::register),
    )
    .service(
        web::scope("/users")
            .service(users::get_users)
            .service(users::create_user)
            .service(users::get_user)
            .service(users::delete_user),
    )
    .service(
        web::scope("/lists")
            .service(lists::get_lists)
            .service(lists::create_list)
            .service(lists::update_list)
            .service(lists::delete_list),
    )
    .service(
        web::scope("/tasks")
            .service(tasks::finish_all_tasks)
            .service(tasks::get_tasks)
            .service(tasks::create_task)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    );
}

/// Extractor settings that report malformed bodies, queries and paths as
/// `AppError::ValidationError`.
pub fn extractor_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    );
}
