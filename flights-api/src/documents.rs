use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use flights_core::{Document, DocumentDetails, DocumentType};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;
use crate::validation::{required_text, IdPath, ValidJson, Validate};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRequest {
    #[serde(rename = "type")]
    pub doc_type: String,
    pub number: String,
    pub passenger_id: Uuid,
}

impl Validate for DocumentRequest {
    type Output = DocumentDetails;

    fn validate(self) -> Result<DocumentDetails, String> {
        let doc_type = self.doc_type.parse::<DocumentType>().map_err(|_| {
            let allowed: Vec<&str> = DocumentType::ALL.iter().map(|t| t.as_str()).collect();
            format!("type must be one of: {}", allowed.join(", "))
        })?;
        required_text("number", &self.number)?;

        Ok(DocumentDetails {
            doc_type,
            number: self.number,
            passenger_id: self.passenger_id,
        })
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/documents", post(create_document))
        .route(
            "/v1/documents/{id}",
            put(replace_document).delete(delete_document),
        )
        .route("/v1/documents/by-passenger/{id}", get(documents_by_passenger))
}

async fn create_document(
    State(state): State<AppState>,
    ValidJson(details): ValidJson<DocumentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let id = state.service.create_document(details).await?;
    Ok(crate::created("/v1/documents", id))
}

async fn replace_document(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidJson(details): ValidJson<DocumentRequest>,
) -> Result<StatusCode, AppError> {
    state
        .service
        .replace_document(Document::from_details(id, details))
        .await?;
    Ok(StatusCode::OK)
}

async fn delete_document(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<StatusCode, AppError> {
    state.service.delete_document(id).await?;
    Ok(StatusCode::OK)
}

async fn documents_by_passenger(
    State(state): State<AppState>,
    IdPath(passenger_id): IdPath,
) -> Result<Json<Vec<Document>>, AppError> {
    Ok(Json(state.service.documents_by_passenger(passenger_id).await?))
}
