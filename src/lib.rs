#![doc = "The `bettertasks` library crate."]
#![doc = ""]
#![doc = "A multi-user to-do list backend: users own task lists, lists contain tasks."]
#![doc = "This crate holds the domain models, request schemas, password hashing, storage"]
#![doc = "bootstrap, routing configuration and error handling. The binary (`main.rs`) only"]
#![doc = "reads configuration, opens the pool and runs the server."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

use actix_web::web;
use sqlx::SqlitePool;

pub use crate::error::AppError;

/// Registers the pool, the extractor error handlers and every route on an `App`.
///
/// ```ignore
/// App::new().configure(bettertasks::configure(pool))
/// ```
pub fn configure(pool: SqlitePool) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        routes::extractor_config(cfg);
        cfg.app_data(web::Data::new(pool))
            .service(routes::health::root)
            .service(routes::health::health)
            .service(web::scope("/api").configure(routes::config));
    }
}
