use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed time range `[from, to]` a report is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodFilter {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

/// One booking of a passenger within a report period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub date_of_issue: DateTime<Utc>,
    pub fly_at: DateTime<Utc>,
    #[serde(rename = "ticketID")]
    pub ticket_id: Uuid,
    pub fly_from: String,
    pub fly_to: String,
    /// The flight had arrived by the end of the period.
    pub service_provided: bool,
}
