use axum::{
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

mod docs;
mod tasks;

pub use docs::ApiDoc;
pub use tasks::{ApiError, CreatedResponse, ErrorResponse, MessageResponse};

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/task", post(tasks::routes::create))
        .route("/tasks", get(tasks::routes::list))
        .route(
            "/task/{id}",
            patch(tasks::routes::update).delete(tasks::routes::delete),
        )
        .merge(docs::swagger_ui())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors())
}

/// Router with its state attached, ready to serve.
pub fn app(state: AppState) -> Router {
    routes().with_state(state)
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn not_found() -> impl IntoResponse {
    let body = ErrorResponse {
        error: "Resource not found".to_string(),
    };
    (StatusCode::NOT_FOUND, Json(body))
}
