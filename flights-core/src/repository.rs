use async_trait::async_trait;
use uuid::Uuid;

use crate::document::Document;
use crate::passenger::{Binding, Passenger};
use crate::report::{PeriodFilter, ReportRow};
use crate::ticket::{Ticket, TicketDetails, TicketWholeInfo};
use crate::FlightsResult;

/// Repository trait for ticket data access
#[async_trait]
pub trait TicketRepository: Send + Sync {
    async fn create_ticket(&self, ticket: &Ticket) -> FlightsResult<()>;

    /// Overwrites every mutable column. `NothingToChange` when the id is unknown.
    async fn replace_ticket(&self, id: Uuid, details: &TicketDetails) -> FlightsResult<()>;

    /// `ThereArePassengersOnTheFlight` while any binding references the ticket.
    async fn delete_ticket(&self, id: Uuid) -> FlightsResult<()>;

    async fn list_tickets(&self) -> FlightsResult<Vec<Ticket>>;

    /// Ticket, its passengers and their documents in one round trip.
    async fn ticket_whole_info(&self, id: Uuid) -> FlightsResult<TicketWholeInfo>;
}

/// Repository trait for passengers and their bindings to tickets
#[async_trait]
pub trait PassengerRepository: Send + Sync {
    async fn create_passenger(&self, passenger: &Passenger) -> FlightsResult<()>;

    async fn replace_passenger(&self, passenger: &Passenger) -> FlightsResult<()>;

    async fn delete_passenger(&self, id: Uuid) -> FlightsResult<()>;

    async fn list_passengers(&self) -> FlightsResult<Vec<Passenger>>;

    async fn bind_to_ticket(&self, binding: Binding) -> FlightsResult<()>;

    async fn unbind_from_ticket(&self, binding: Binding) -> FlightsResult<()>;

    async fn passengers_by_ticket(&self, ticket_id: Uuid) -> FlightsResult<Vec<Passenger>>;
}

/// Repository trait for identity documents
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn create_document(&self, document: &Document) -> FlightsResult<()>;

    async fn replace_document(&self, document: &Document) -> FlightsResult<()>;

    async fn delete_document(&self, id: Uuid) -> FlightsResult<()>;

    async fn documents_by_passenger(&self, passenger_id: Uuid) -> FlightsResult<Vec<Document>>;
}

/// Repository trait for period reports
#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn passenger_report(
        &self,
        passenger_id: Uuid,
        period: &PeriodFilter,
    ) -> FlightsResult<Vec<ReportRow>>;
}
