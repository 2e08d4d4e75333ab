use chrono::{DateTime, SubsecRound, Utc};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::document::{Document, DocumentDetails};
use crate::passenger::{Binding, Passenger, PassengerDetails};
use crate::report::{PeriodFilter, ReportRow};
use crate::repository::{
    DocumentRepository, PassengerRepository, ReportRepository, TicketRepository,
};
use crate::ticket::{Ticket, TicketDetails, TicketWholeInfo};
use crate::FlightsResult;

/// Domain operations over tickets, passengers, documents and reports.
///
/// Identifiers and creation timestamps are assigned here; storage errors are
/// passed through untouched.
#[derive(Clone)]
pub struct FlightsService {
    tickets: Arc<dyn TicketRepository>,
    passengers: Arc<dyn PassengerRepository>,
    documents: Arc<dyn DocumentRepository>,
    reports: Arc<dyn ReportRepository>,
}

impl FlightsService {
    pub fn new(
        tickets: Arc<dyn TicketRepository>,
        passengers: Arc<dyn PassengerRepository>,
        documents: Arc<dyn DocumentRepository>,
        reports: Arc<dyn ReportRepository>,
    ) -> Self {
        Self {
            tickets,
            passengers,
            documents,
            reports,
        }
    }

    // Tickets

    pub async fn create_ticket(&self, details: TicketDetails) -> FlightsResult<Uuid> {
        let ticket = Ticket::from_details(new_id(), details, issue_time());
        self.tickets.create_ticket(&ticket).await?;

        info!(ticket_id = %ticket.id, provider = %ticket.provider, "ticket created");
        Ok(ticket.id)
    }

    pub async fn replace_ticket(&self, id: Uuid, details: TicketDetails) -> FlightsResult<()> {
        self.tickets.replace_ticket(id, &details).await
    }

    pub async fn delete_ticket(&self, id: Uuid) -> FlightsResult<()> {
        self.tickets.delete_ticket(id).await?;
        info!(ticket_id = %id, "ticket deleted");
        Ok(())
    }

    pub async fn list_tickets(&self) -> FlightsResult<Vec<Ticket>> {
        self.tickets.list_tickets().await
    }

    pub async fn ticket_whole_info(&self, id: Uuid) -> FlightsResult<TicketWholeInfo> {
        self.tickets.ticket_whole_info(id).await
    }

    // Passengers

    pub async fn create_passenger(&self, details: PassengerDetails) -> FlightsResult<Uuid> {
        let passenger = Passenger::from_details(new_id(), details);
        self.passengers.create_passenger(&passenger).await?;

        info!(passenger_id = %passenger.id, "passenger created");
        Ok(passenger.id)
    }

    pub async fn replace_passenger(&self, passenger: Passenger) -> FlightsResult<()> {
        self.passengers.replace_passenger(&passenger).await
    }

    pub async fn delete_passenger(&self, id: Uuid) -> FlightsResult<()> {
        self.passengers.delete_passenger(id).await?;
        info!(passenger_id = %id, "passenger deleted");
        Ok(())
    }

    pub async fn list_passengers(&self) -> FlightsResult<Vec<Passenger>> {
        self.passengers.list_passengers().await
    }

    pub async fn bind_to_ticket(&self, binding: Binding) -> FlightsResult<()> {
        self.passengers.bind_to_ticket(binding).await?;
        info!(
            passenger_id = %binding.passenger_id,
            ticket_id = %binding.ticket_id,
            "passenger bound to ticket"
        );
        Ok(())
    }

    pub async fn unbind_from_ticket(&self, binding: Binding) -> FlightsResult<()> {
        self.passengers.unbind_from_ticket(binding).await?;
        info!(
            passenger_id = %binding.passenger_id,
            ticket_id = %binding.ticket_id,
            "passenger unbound from ticket"
        );
        Ok(())
    }

    pub async fn passengers_by_ticket(&self, ticket_id: Uuid) -> FlightsResult<Vec<Passenger>> {
        self.passengers.passengers_by_ticket(ticket_id).await
    }

    // Documents

    pub async fn create_document(&self, details: DocumentDetails) -> FlightsResult<Uuid> {
        let document = Document::from_details(new_id(), details);
        self.documents.create_document(&document).await?;

        info!(
            document_id = %document.id,
            passenger_id = %document.passenger_id,
            "document created"
        );
        Ok(document.id)
    }

    pub async fn replace_document(&self, document: Document) -> FlightsResult<()> {
        self.documents.replace_document(&document).await
    }

    pub async fn delete_document(&self, id: Uuid) -> FlightsResult<()> {
        self.documents.delete_document(id).await?;
        info!(document_id = %id, "document deleted");
        Ok(())
    }

    pub async fn documents_by_passenger(&self, passenger_id: Uuid) -> FlightsResult<Vec<Document>> {
        self.documents.documents_by_passenger(passenger_id).await
    }

    // Reports

    pub async fn passenger_report(
        &self,
        passenger_id: Uuid,
        period: PeriodFilter,
    ) -> FlightsResult<Vec<ReportRow>> {
        self.reports.passenger_report(passenger_id, &period).await
    }
}

fn new_id() -> Uuid {
    Uuid::now_v7()
}

// Whole seconds, so the value read back from storage compares equal.
fn issue_time() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}
