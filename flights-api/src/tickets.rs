use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use flights_core::{Ticket, TicketDetails, TicketWholeInfo};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;
use crate::validation::{required_text, IdPath, ValidJson, Validate};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketRequest {
    pub provider: String,
    pub fly_from: String,
    pub fly_to: String,
    pub fly_at: DateTime<Utc>,
    pub arrive_at: DateTime<Utc>,
}

impl Validate for TicketRequest {
    type Output = TicketDetails;

    fn validate(self) -> Result<TicketDetails, String> {
        required_text("provider", &self.provider)?;
        required_text("flyFrom", &self.fly_from)?;
        required_text("flyTo", &self.fly_to)?;
        if self.arrive_at <= self.fly_at {
            return Err("arriveAt must be after flyAt".to_string());
        }

        Ok(TicketDetails {
            provider: self.provider,
            fly_from: self.fly_from,
            fly_to: self.fly_to,
            fly_at: self.fly_at,
            arrive_at: self.arrive_at,
        })
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/tickets", post(create_ticket).get(list_tickets))
        .route("/v1/tickets/{id}", put(replace_ticket).delete(delete_ticket))
        .route("/v1/tickets/whole-info/{id}", get(ticket_whole_info))
}

async fn create_ticket(
    State(state): State<AppState>,
    ValidJson(details): ValidJson<TicketRequest>,
) -> Result<impl IntoResponse, AppError> {
    let id = state.service.create_ticket(details).await?;
    Ok(crate::created("/v1/tickets", id))
}

async fn list_tickets(State(state): State<AppState>) -> Result<Json<Vec<Ticket>>, AppError> {
    Ok(Json(state.service.list_tickets().await?))
}

async fn replace_ticket(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidJson(details): ValidJson<TicketRequest>,
) -> Result<StatusCode, AppError> {
    state.service.replace_ticket(id, details).await?;
    Ok(StatusCode::OK)
}

async fn delete_ticket(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<StatusCode, AppError> {
    state.service.delete_ticket(id).await?;
    Ok(StatusCode::OK)
}

async fn ticket_whole_info(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<TicketWholeInfo>, AppError> {
    Ok(Json(state.service.ticket_whole_info(id).await?))
}
