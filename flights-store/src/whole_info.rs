//! Folding of the ticket → binding → passenger → document outer join into a
//! nested [`TicketWholeInfo`].

use chrono::{DateTime, Utc};
use flights_core::{
    DocumentSummary, DocumentType, FlightsError, FlightsResult, Passenger, PassengerWholeInfo,
    Ticket, TicketWholeInfo,
};
use std::collections::HashMap;
use uuid::Uuid;

/// Statement shape matched by [`WholeInfoRow`]. Outer joins keep the ticket row
/// when it has no passengers, and the passenger row when it has no documents.
pub(crate) const WHOLE_INFO_SQL: &str = r#"
    SELECT
        t.ticket_id, t.provider, t.fly_from, t.fly_to, t.fly_at, t.arrive_at, t.created_at,
        p.passenger_id, p.first_name, p.last_name, p.middle_name,
        d.document_id, d.type AS document_type, d.number AS document_number
    FROM tickets t
    LEFT JOIN passenger_ticket pt ON pt.ticket_id = t.ticket_id
    LEFT JOIN passengers p ON p.passenger_id = pt.passenger_id
    LEFT JOIN documents d ON d.passenger_id = p.passenger_id
    WHERE t.ticket_id = $1
    ORDER BY p.passenger_id, d.document_id
"#;

#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct WholeInfoRow {
    pub ticket_id: Uuid,
    pub provider: String,
    pub fly_from: String,
    pub fly_to: String,
    pub fly_at: DateTime<Utc>,
    pub arrive_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub passenger_id: Option<Uuid>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_name: Option<String>,
    pub document_id: Option<Uuid>,
    pub document_type: Option<String>,
    pub document_number: Option<String>,
}

type SplitRow = (Ticket, Option<Passenger>, Option<DocumentSummary>);

impl WholeInfoRow {
    fn split(self) -> FlightsResult<SplitRow> {
        let ticket = Ticket {
            id: self.ticket_id,
            provider: self.provider,
            fly_from: self.fly_from,
            fly_to: self.fly_to,
            fly_at: self.fly_at,
            arrive_at: self.arrive_at,
            created_at: self.created_at,
        };

        let Some(passenger_id) = self.passenger_id else {
            return Ok((ticket, None, None));
        };

        let passenger = Passenger {
            id: passenger_id,
            first_name: self.first_name.ok_or_else(|| incomplete("first_name"))?,
            last_name: self.last_name.ok_or_else(|| incomplete("last_name"))?,
            middle_name: self.middle_name.ok_or_else(|| incomplete("middle_name"))?,
        };

        let document = match self.document_id {
            Some(id) => {
                let doc_type = self
                    .document_type
                    .ok_or_else(|| incomplete("document_type"))?
                    .parse::<DocumentType>()
                    .map_err(|e| FlightsError::infrastructure("ticket whole info", e))?;

                Some(DocumentSummary {
                    id,
                    doc_type,
                    number: self.document_number.ok_or_else(|| incomplete("document_number"))?,
                })
            }
            None => None,
        };

        Ok((ticket, Some(passenger), document))
    }
}

fn incomplete(column: &'static str) -> FlightsError {
    FlightsError::infrastructure(
        "ticket whole info",
        format!("joined row is missing {column}"),
    )
}

/// Groups joined rows by passenger id, in order of first appearance.
#[derive(Debug, Default)]
pub(crate) struct WholeInfoAccumulator {
    ticket: Option<Ticket>,
    passengers: Vec<PassengerWholeInfo>,
    slots: HashMap<Uuid, usize>,
}

impl WholeInfoAccumulator {
    pub(crate) fn push(&mut self, row: WholeInfoRow) -> FlightsResult<()> {
        let (ticket, passenger, document) = row.split()?;
        self.ticket.get_or_insert(ticket);

        // Ticket without bookings.
        let Some(passenger) = passenger else {
            return Ok(());
        };

        let slot = match self.slots.get(&passenger.id) {
            Some(&slot) => slot,
            None => {
                let slot = self.passengers.len();
                self.slots.insert(passenger.id, slot);
                self.passengers.push(PassengerWholeInfo::new(passenger));
                slot
            }
        };

        if let Some(document) = document {
            self.passengers[slot].documents.push(document);
        }

        Ok(())
    }

    /// `NothingFound` when no row arrived at all, i.e. the ticket is unknown.
    pub(crate) fn finish(self) -> FlightsResult<TicketWholeInfo> {
        let ticket = self.ticket.ok_or(FlightsError::NothingFound)?;
        Ok(TicketWholeInfo {
            ticket,
            passengers: self.passengers,
        })
    }
}
