pub mod app_config;
pub mod constraints;
pub mod database;
pub mod document_repo;
pub mod passenger_repo;
pub mod report_repo;
pub mod ticket_repo;
mod whole_info;

use flights_core::FlightsService;
use std::sync::Arc;

pub use database::DbClient;
pub use document_repo::StoreDocumentRepository;
pub use passenger_repo::StorePassengerRepository;
pub use report_repo::StoreReportRepository;
pub use ticket_repo::StoreTicketRepository;

/// Wires every Postgres repository over one shared pool.
pub fn flights_service(db: &DbClient) -> FlightsService {
    FlightsService::new(
        Arc::new(StoreTicketRepository::new(db.pool.clone())),
        Arc::new(StorePassengerRepository::new(db.pool.clone())),
        Arc::new(StoreDocumentRepository::new(db.pool.clone())),
        Arc::new(StoreReportRepository::new(db.pool.clone())),
    )
}
