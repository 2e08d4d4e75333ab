use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use flights_core::{PeriodFilter, ReportRow};
use serde::Deserialize;
use std::borrow::Cow;

use crate::error::AppError;
use crate::state::AppState;
use crate::validation::{IdPath, ValidQuery, Validate};

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub from: String,
    pub to: String,
}

impl Validate for ReportQuery {
    type Output = PeriodFilter;

    fn validate(self) -> Result<PeriodFilter, String> {
        let from = parse_timestamp("from", &self.from)?;
        let to = parse_timestamp("to", &self.to)?;
        if to < from {
            return Err("to must not be before from".to_string());
        }
        Ok(PeriodFilter { from, to })
    }
}

/// An unescaped `+` offset arrives as a space after form decoding.
fn restore_offset_sign(raw: &str) -> Cow<'_, str> {
    match raw.rfind(' ') {
        // Past the date and time, so it can only be the offset sign.
        Some(pos) if pos >= "2006-01-02T15:04:05".len() => {
            let mut fixed = raw.to_string();
            fixed.replace_range(pos..pos + 1, "+");
            Cow::Owned(fixed)
        }
        _ => Cow::Borrowed(raw),
    }
}

fn parse_timestamp(field: &str, raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(&restore_offset_sign(raw))
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| format!("{field} must be an RFC 3339 timestamp: {e}"))
}

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/v1/reports/by-passenger-id-for-period/{id}",
        get(passenger_report),
    )
}

async fn passenger_report(
    State(state): State<AppState>,
    IdPath(passenger_id): IdPath,
    ValidQuery(period): ValidQuery<ReportQuery>,
) -> Result<Json<Vec<ReportRow>>, AppError> {
    Ok(Json(state.service.passenger_report(passenger_id, period).await?))
}
