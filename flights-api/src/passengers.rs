use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use flights_core::{Binding, Passenger, PassengerDetails};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;
use crate::validation::{person_name, IdPath, ValidJson, Validate};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerRequest {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
}

impl Validate for PassengerRequest {
    type Output = PassengerDetails;

    fn validate(self) -> Result<PassengerDetails, String> {
        person_name("firstName", &self.first_name)?;
        person_name("lastName", &self.last_name)?;
        person_name("middleName", &self.middle_name)?;

        Ok(PassengerDetails {
            first_name: self.first_name,
            last_name: self.last_name,
            middle_name: self.middle_name,
        })
    }
}

/// `{"id": <passenger>, "ticketId": <ticket>}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingRequest {
    pub id: Uuid,
    pub ticket_id: Uuid,
}

impl Validate for BindingRequest {
    type Output = Binding;

    fn validate(self) -> Result<Binding, String> {
        Ok(Binding {
            passenger_id: self.id,
            ticket_id: self.ticket_id,
        })
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/passengers", post(create_passenger).get(list_passengers))
        .route(
            "/v1/passengers/{id}",
            put(replace_passenger).delete(delete_passenger),
        )
        .route("/v1/passengers/bound-to-ticket", post(bind_to_ticket))
        .route("/v1/passengers/unbound-from-ticket", post(unbind_from_ticket))
        .route("/v1/passengers/by-ticket-id/{id}", get(passengers_by_ticket))
}

async fn create_passenger(
    State(state): State<AppState>,
    ValidJson(details): ValidJson<PassengerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let id = state.service.create_passenger(details).await?;
    Ok(crate::created("/v1/passengers", id))
}

async fn list_passengers(State(state): State<AppState>) -> Result<Json<Vec<Passenger>>, AppError> {
    Ok(Json(state.service.list_passengers().await?))
}

async fn replace_passenger(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidJson(details): ValidJson<PassengerRequest>,
) -> Result<StatusCode, AppError> {
    state
        .service
        .replace_passenger(Passenger::from_details(id, details))
        .await?;
    Ok(StatusCode::OK)
}

async fn delete_passenger(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<StatusCode, AppError> {
    state.service.delete_passenger(id).await?;
    Ok(StatusCode::OK)
}

async fn bind_to_ticket(
    State(state): State<AppState>,
    ValidJson(binding): ValidJson<BindingRequest>,
) -> Result<StatusCode, AppError> {
    state.service.bind_to_ticket(binding).await?;
    Ok(StatusCode::CREATED)
}

async fn unbind_from_ticket(
    State(state): State<AppState>,
    ValidJson(binding): ValidJson<BindingRequest>,
) -> Result<StatusCode, AppError> {
    state.service.unbind_from_ticket(binding).await?;
    Ok(StatusCode::OK)
}

async fn passengers_by_ticket(
    State(state): State<AppState>,
    IdPath(ticket_id): IdPath,
) -> Result<Json<Vec<Passenger>>, AppError> {
    Ok(Json(state.service.passengers_by_ticket(ticket_id).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passenger_names_checked_in_order() {
        let req = PassengerRequest {
            first_name: "Riley".to_string(),
            last_name: "Scott".to_string(),
            middle_name: "R3ed".to_string(),
        };
        assert_eq!(req.validate().unwrap_err(), "middleName contains invalid characters");
    }

    #[test]
    fn test_binding_request_field_names() {
        let req: BindingRequest = serde_json::from_str(
            r#"{"id":"00000000-0000-0000-0000-000000000001","ticketId":"00000000-0000-0000-0000-000000000002"}"#,
        )
        .unwrap();
        let binding = req.validate().unwrap();
        assert_eq!(binding.passenger_id, Uuid::from_u128(1));
        assert_eq!(binding.ticket_id, Uuid::from_u128(2));
    }
}
