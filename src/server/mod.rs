//! HTTP surface of the food log service.

mod error;
mod routes;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Environment;
use crate::db::FoodLogRepository;

pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<FoodLogRepository>,
    pub environment: Environment,
}

impl AppState {
    pub fn new(repo: FoodLogRepository, environment: Environment) -> Self {
        Self {
            repo: Arc::new(repo),
            environment,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route(
            "/api/foodlogs",
            get(routes::list_food_logs)
                .post(routes::create_food_log)
                .delete(routes::delete_food_logs),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
