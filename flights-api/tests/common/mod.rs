//! In-memory repositories that honour the same keys and references as the
//! Postgres schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use flights_api::{app, AppState, HealthCheck};
use flights_core::repository::{
    DocumentRepository, PassengerRepository, ReportRepository, TicketRepository,
};
use flights_core::{
    Binding, Document, DocumentSummary, FlightsError, FlightsResult, FlightsService, Passenger,
    PassengerWholeInfo, PeriodFilter, ReportRow, Ticket, TicketDetails, TicketWholeInfo,
};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    tickets: BTreeMap<Uuid, Ticket>,
    passengers: BTreeMap<Uuid, Passenger>,
    documents: BTreeMap<Uuid, Document>,
    bindings: BTreeSet<(Uuid, Uuid)>,
}

impl Tables {
    fn check_document(&self, document: &Document) -> FlightsResult<()> {
        if !self.passengers.contains_key(&document.passenger_id) {
            return Err(FlightsError::PassengerDoesNotExist);
        }
        let duplicate = self.documents.values().any(|other| {
            other.id != document.id
                && other.doc_type == document.doc_type
                && other.number == document.number
        });
        if duplicate {
            return Err(FlightsError::HasAlreadyExists);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

fn non_empty<T>(items: Vec<T>) -> FlightsResult<Vec<T>> {
    if items.is_empty() {
        Err(FlightsError::NothingFound)
    } else {
        Ok(items)
    }
}

#[async_trait]
impl TicketRepository for MemoryStore {
    async fn create_ticket(&self, ticket: &Ticket) -> FlightsResult<()> {
        let mut tables = self.tables.lock().unwrap();
        if tables.tickets.contains_key(&ticket.id) {
            return Err(FlightsError::HasAlreadyExists);
        }
        tables.tickets.insert(ticket.id, ticket.clone());
        Ok(())
    }

    async fn replace_ticket(&self, id: Uuid, details: &TicketDetails) -> FlightsResult<()> {
        let mut tables = self.tables.lock().unwrap();
        let ticket = tables.tickets.get_mut(&id).ok_or(FlightsError::NothingToChange)?;
        *ticket = Ticket::from_details(id, details.clone(), ticket.created_at);
        Ok(())
    }

    async fn delete_ticket(&self, id: Uuid) -> FlightsResult<()> {
        let mut tables = self.tables.lock().unwrap();
        if tables.bindings.iter().any(|(_, ticket_id)| *ticket_id == id) {
            return Err(FlightsError::ThereArePassengersOnTheFlight);
        }
        tables.tickets.remove(&id).ok_or(FlightsError::NothingToDelete)?;
        Ok(())
    }

    async fn list_tickets(&self) -> FlightsResult<Vec<Ticket>> {
        let tables = self.tables.lock().unwrap();
        let mut tickets: Vec<Ticket> = tables.tickets.values().cloned().collect();
        tickets.sort_by_key(|t| (t.created_at, t.id));
        non_empty(tickets)
    }

    async fn ticket_whole_info(&self, id: Uuid) -> FlightsResult<TicketWholeInfo> {
        let tables = self.tables.lock().unwrap();
        let ticket = tables.tickets.get(&id).cloned().ok_or(FlightsError::NothingFound)?;

        let passengers = tables
            .passengers
            .values()
            .filter(|p| tables.bindings.contains(&(p.id, id)))
            .map(|p| {
                let mut entry = PassengerWholeInfo::new(p.clone());
                entry.documents = tables
                    .documents
                    .values()
                    .filter(|d| d.passenger_id == p.id)
                    .map(|d| DocumentSummary {
                        id: d.id,
                        doc_type: d.doc_type,
                        number: d.number.clone(),
                    })
                    .collect();
                entry
            })
            .collect();

        Ok(TicketWholeInfo { ticket, passengers })
    }
}

#[async_trait]
impl PassengerRepository for MemoryStore {
    async fn create_passenger(&self, passenger: &Passenger) -> FlightsResult<()> {
        let mut tables = self.tables.lock().unwrap();
        if tables.passengers.contains_key(&passenger.id) {
            return Err(FlightsError::HasAlreadyExists);
        }
        tables.passengers.insert(passenger.id, passenger.clone());
        Ok(())
    }

    async fn replace_passenger(&self, passenger: &Passenger) -> FlightsResult<()> {
        let mut tables = self.tables.lock().unwrap();
        let current = tables
            .passengers
            .get_mut(&passenger.id)
            .ok_or(FlightsError::NothingToChange)?;
        *current = passenger.clone();
        Ok(())
    }

    async fn delete_passenger(&self, id: Uuid) -> FlightsResult<()> {
        let mut tables = self.tables.lock().unwrap();
        tables.passengers.remove(&id).ok_or(FlightsError::NothingToDelete)?;
        tables.documents.retain(|_, d| d.passenger_id != id);
        tables.bindings.retain(|(passenger_id, _)| *passenger_id != id);
        Ok(())
    }

    async fn list_passengers(&self) -> FlightsResult<Vec<Passenger>> {
        let tables = self.tables.lock().unwrap();
        non_empty(tables.passengers.values().cloned().collect())
    }

    async fn bind_to_ticket(&self, binding: Binding) -> FlightsResult<()> {
        let mut tables = self.tables.lock().unwrap();
        let key = (binding.passenger_id, binding.ticket_id);
        if tables.bindings.contains(&key) {
            return Err(FlightsError::HasAlreadyExists);
        }
        if !tables.passengers.contains_key(&binding.passenger_id) {
            return Err(FlightsError::PassengerDoesNotExist);
        }
        if !tables.tickets.contains_key(&binding.ticket_id) {
            return Err(FlightsError::TicketDoesNotExist);
        }
        tables.bindings.insert(key);
        Ok(())
    }

    async fn unbind_from_ticket(&self, binding: Binding) -> FlightsResult<()> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.bindings.remove(&(binding.passenger_id, binding.ticket_id)) {
            return Err(FlightsError::NothingToDelete);
        }
        Ok(())
    }

    async fn passengers_by_ticket(&self, ticket_id: Uuid) -> FlightsResult<Vec<Passenger>> {
        let tables = self.tables.lock().unwrap();
        non_empty(
            tables
                .passengers
                .values()
                .filter(|p| tables.bindings.contains(&(p.id, ticket_id)))
                .cloned()
                .collect(),
        )
    }
}

#[async_trait]
impl DocumentRepository for MemoryStore {
    async fn create_document(&self, document: &Document) -> FlightsResult<()> {
        let mut tables = self.tables.lock().unwrap();
        if tables.documents.contains_key(&document.id) {
            return Err(FlightsError::HasAlreadyExists);
        }
        tables.check_document(document)?;
        tables.documents.insert(document.id, document.clone());
        Ok(())
    }

    async fn replace_document(&self, document: &Document) -> FlightsResult<()> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.documents.contains_key(&document.id) {
            return Err(FlightsError::NothingToChange);
        }
        tables.check_document(document)?;
        tables.documents.insert(document.id, document.clone());
        Ok(())
    }

    async fn delete_document(&self, id: Uuid) -> FlightsResult<()> {
        let mut tables = self.tables.lock().unwrap();
        tables.documents.remove(&id).ok_or(FlightsError::NothingToDelete)?;
        Ok(())
    }

    async fn documents_by_passenger(&self, passenger_id: Uuid) -> FlightsResult<Vec<Document>> {
        let tables = self.tables.lock().unwrap();
        non_empty(
            tables
                .documents
                .values()
                .filter(|d| d.passenger_id == passenger_id)
                .cloned()
                .collect(),
        )
    }
}

/// Mirrors the two report branches: issued and arrived by the end of the
/// period, or issued within it and arriving later.
fn service_provided(
    period: &PeriodFilter,
    created_at: DateTime<Utc>,
    arrive_at: DateTime<Utc>,
) -> Option<bool> {
    if created_at <= period.to && arrive_at <= period.to {
        Some(true)
    } else if created_at >= period.from && created_at <= period.to && arrive_at > period.to {
        Some(false)
    } else {
        None
    }
}

#[async_trait]
impl ReportRepository for MemoryStore {
    async fn passenger_report(
        &self,
        passenger_id: Uuid,
        period: &PeriodFilter,
    ) -> FlightsResult<Vec<ReportRow>> {
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<ReportRow> = tables
            .bindings
            .iter()
            .filter(|(p, _)| *p == passenger_id)
            .filter_map(|(_, ticket_id)| tables.tickets.get(ticket_id))
            .filter_map(|t| {
                let provided = service_provided(period, t.created_at, t.arrive_at)?;
                Some(ReportRow {
                    date_of_issue: t.created_at,
                    fly_at: t.fly_at,
                    ticket_id: t.id,
                    fly_from: t.fly_from.clone(),
                    fly_to: t.fly_to.clone(),
                    service_provided: provided,
                })
            })
            .collect();
        rows.sort_by_key(|r| (r.date_of_issue, r.ticket_id));
        non_empty(rows)
    }
}

pub struct AlwaysUp;

#[async_trait]
impl HealthCheck for AlwaysUp {
    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

pub struct Down;

#[async_trait]
impl HealthCheck for Down {
    async fn ping(&self) -> anyhow::Result<()> {
        anyhow::bail!("connection refused")
    }
}

pub fn test_app_with_health(health: Arc<dyn HealthCheck>) -> axum::Router {
    let store = Arc::new(MemoryStore::default());
    let service = FlightsService::new(store.clone(), store.clone(), store.clone(), store);
    app(AppState::new(service, health))
}

pub fn test_app() -> axum::Router {
    test_app_with_health(Arc::new(AlwaysUp))
}

mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    fn period() -> PeriodFilter {
        PeriodFilter {
            from: at(2023, 1, 1),
            to: at(2023, 6, 30),
        }
    }

    #[test]
    fn test_flown_before_period_end_is_provided() {
        assert_eq!(service_provided(&period(), at(2023, 2, 1), at(2023, 3, 1)), Some(true));
        // Issue date is not bounded from below for completed flights.
        assert_eq!(service_provided(&period(), at(2022, 5, 1), at(2022, 6, 1)), Some(true));
    }

    #[test]
    fn test_issued_within_period_arriving_later_is_pending() {
        assert_eq!(service_provided(&period(), at(2023, 6, 1), at(2023, 7, 2)), Some(false));
        assert_eq!(service_provided(&period(), at(2023, 1, 1), at(2023, 8, 1)), Some(false));
    }

    #[test]
    fn test_outside_period_is_skipped() {
        assert_eq!(service_provided(&period(), at(2023, 7, 1), at(2023, 7, 2)), None);
        assert_eq!(service_provided(&period(), at(2022, 12, 1), at(2023, 7, 2)), None);
    }
}
