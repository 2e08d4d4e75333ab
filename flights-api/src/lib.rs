use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub mod documents;
pub mod error;
pub mod passengers;
pub mod reports;
pub mod server;
pub mod state;
pub mod tickets;
pub mod validation;

pub use error::AppError;
pub use state::{AppState, HealthCheck};

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::USER_AGENT])
        .expose_headers([header::LOCATION]);

    Router::new()
        .route("/health", get(health))
        .merge(tickets::routes())
        .merge(passengers::routes())
        .merge(documents::routes())
        .merge(reports::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match state.health.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(e) => {
            tracing::error!("Health check failed: {:#}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "errMsg": "database unavailable" })),
            )
        }
    }
}

/// 201 with the new resource's location and `{"id"}` body.
pub(crate) fn created(collection: &str, id: Uuid) -> impl IntoResponse {
    (
        StatusCode::CREATED,
        [(header::LOCATION, format!("{collection}/{id}"))],
        Json(json!({ "id": id })),
    )
}
