use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::DocumentSummary;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Passenger {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerDetails {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
}

impl Passenger {
    pub fn from_details(id: Uuid, details: PassengerDetails) -> Self {
        Self {
            id,
            first_name: details.first_name,
            last_name: details.last_name,
            middle_name: details.middle_name,
        }
    }
}

/// A booking: one passenger on one ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Binding {
    pub passenger_id: Uuid,
    pub ticket_id: Uuid,
}

/// Passenger entry of an aggregated ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerWholeInfo {
    #[serde(flatten)]
    pub passenger: Passenger,
    pub documents: Vec<DocumentSummary>,
}

impl PassengerWholeInfo {
    pub fn new(passenger: Passenger) -> Self {
        Self {
            passenger,
            documents: Vec::new(),
        }
    }
}
