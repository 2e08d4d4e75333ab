use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use flights_core::FlightsError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or rejected input; never reaches the service.
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Domain(#[from] FlightsError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Domain(err) => match err {
                FlightsError::NothingToChange
                | FlightsError::NothingToDelete
                | FlightsError::NothingFound => StatusCode::NO_CONTENT,
                FlightsError::HasAlreadyExists
                | FlightsError::PassengerDoesNotExist
                | FlightsError::TicketDoesNotExist => StatusCode::CONFLICT,
                FlightsError::ThereArePassengersOnTheFlight => StatusCode::FORBIDDEN,
                FlightsError::Infrastructure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            AppError::Domain(err) if err.is_empty_result() => {
                tracing::debug!("{}", err);
                return status.into_response();
            }
            AppError::Domain(err @ FlightsError::Infrastructure { .. }) => {
                tracing::error!("Internal Server Error: {}", err);
                "Internal Server Error".to_string()
            }
            other => {
                tracing::debug!(status = %status, "request rejected: {}", other);
                other.to_string()
            }
        };

        (status, Json(json!({ "errMsg": message }))).into_response()
    }
}
