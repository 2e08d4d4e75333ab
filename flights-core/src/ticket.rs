use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::passenger::PassengerWholeInfo;

/// A scheduled flight sold by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: Uuid,
    pub provider: String,
    pub fly_from: String,
    pub fly_to: String,
    pub fly_at: DateTime<Utc>,
    pub arrive_at: DateTime<Utc>,
    /// Assigned by the server at creation, never rewritten.
    pub created_at: DateTime<Utc>,
}

/// The caller-supplied, mutable part of a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDetails {
    pub provider: String,
    pub fly_from: String,
    pub fly_to: String,
    pub fly_at: DateTime<Utc>,
    pub arrive_at: DateTime<Utc>,
}

impl Ticket {
    pub fn from_details(id: Uuid, details: TicketDetails, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            provider: details.provider,
            fly_from: details.fly_from,
            fly_to: details.fly_to,
            fly_at: details.fly_at,
            arrive_at: details.arrive_at,
            created_at,
        }
    }

    pub fn details(&self) -> TicketDetails {
        TicketDetails {
            provider: self.provider.clone(),
            fly_from: self.fly_from.clone(),
            fly_to: self.fly_to.clone(),
            fly_at: self.fly_at,
            arrive_at: self.arrive_at,
        }
    }
}

/// A ticket together with everyone booked on it and their documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketWholeInfo {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub passengers: Vec<PassengerWholeInfo>,
}
