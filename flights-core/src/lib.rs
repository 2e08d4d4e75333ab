pub mod document;
pub mod passenger;
pub mod report;
pub mod repository;
pub mod service;
pub mod ticket;

pub use document::{Document, DocumentDetails, DocumentSummary, DocumentType};
pub use passenger::{Binding, Passenger, PassengerDetails, PassengerWholeInfo};
pub use report::{PeriodFilter, ReportRow};
pub use service::FlightsService;
pub use ticket::{Ticket, TicketDetails, TicketWholeInfo};

/// Error kinds shared by the persistence and domain layers.
///
/// Storage-level failures are translated into one of the named kinds as close
/// to the failing statement as possible; anything unrecognised stays opaque in
/// `Infrastructure`.
#[derive(Debug, thiserror::Error)]
pub enum FlightsError {
    #[error("Nothing to change")]
    NothingToChange,
    #[error("Nothing to delete")]
    NothingToDelete,
    #[error("Nothing found")]
    NothingFound,
    #[error("Has already exists")]
    HasAlreadyExists,
    #[error("Passenger doesn't exist")]
    PassengerDoesNotExist,
    #[error("Ticket doesn't exist")]
    TicketDoesNotExist,
    #[error("There are passengers on the flight")]
    ThereArePassengersOnTheFlight,
    #[error("{context}: {source}")]
    Infrastructure {
        context: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl FlightsError {
    pub fn infrastructure<E>(context: &'static str, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Infrastructure {
            context,
            source: source.into(),
        }
    }

    /// True for the zero-rows kinds that callers treat as "no content".
    pub fn is_empty_result(&self) -> bool {
        matches!(
            self,
            Self::NothingToChange | Self::NothingToDelete | Self::NothingFound
        )
    }
}

pub type FlightsResult<T> = Result<T, FlightsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_kinds() {
        assert!(FlightsError::NothingFound.is_empty_result());
        assert!(FlightsError::NothingToDelete.is_empty_result());
        assert!(FlightsError::NothingToChange.is_empty_result());
        assert!(!FlightsError::HasAlreadyExists.is_empty_result());
        assert!(!FlightsError::infrastructure("select", "boom").is_empty_result());
    }

    #[test]
    fn test_infrastructure_message_keeps_context() {
        let err = FlightsError::infrastructure("list tickets", "connection reset");
        assert_eq!(err.to_string(), "list tickets: connection reset");
    }
}
