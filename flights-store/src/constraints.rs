//! Recovery of domain errors from named storage constraints.
//!
//! Every constraint a write can trip on is named in `migrations/`. A failed
//! statement is matched against the lookup for the operation that issued it;
//! a violation nobody claims stays an infrastructure error. Add the new name
//! here whenever a constraint is added to the schema.

use flights_core::FlightsError;
use tracing::debug;

pub const UQ_DOCUMENTS_TYPE_NUMBER: &str = "uq_documents_type_number";
pub const FK_DOCUMENT_PASSENGER: &str = "fk_document_passenger_passenger_id";
pub const PK_PASSENGER_TICKET: &str = "pk_ticket_passenger_ticket_id_passenger_id";
pub const FK_PASSENGER_TICKET_PASSENGER: &str = "fk_ticket_passenger_passenger_passenger_id";
pub const FK_PASSENGER_TICKET_TICKET: &str = "fk_ticket_passenger_tickets_ticket_id";

/// Maps a violated constraint name to the error the operation reports.
pub(crate) type ViolationLookup = fn(&str) -> Option<FlightsError>;

/// Document insert and replace.
pub(crate) fn document_write(constraint: &str) -> Option<FlightsError> {
    match constraint {
        UQ_DOCUMENTS_TYPE_NUMBER => Some(FlightsError::HasAlreadyExists),
        FK_DOCUMENT_PASSENGER => Some(FlightsError::PassengerDoesNotExist),
        _ => None,
    }
}

/// Binding a passenger to a ticket.
pub(crate) fn binding_insert(constraint: &str) -> Option<FlightsError> {
    match constraint {
        PK_PASSENGER_TICKET => Some(FlightsError::HasAlreadyExists),
        FK_PASSENGER_TICKET_PASSENGER => Some(FlightsError::PassengerDoesNotExist),
        FK_PASSENGER_TICKET_TICKET => Some(FlightsError::TicketDoesNotExist),
        _ => None,
    }
}

/// Ticket delete. The same foreign key that guards binding inserts here
/// means somebody is still booked on the flight.
pub(crate) fn ticket_delete(constraint: &str) -> Option<FlightsError> {
    match constraint {
        FK_PASSENGER_TICKET_TICKET => Some(FlightsError::ThereArePassengersOnTheFlight),
        _ => None,
    }
}

/// Translates a failed write. Only database errors carrying a constraint
/// name known to `lookup` become domain errors.
pub(crate) fn translate(
    err: sqlx::Error,
    context: &'static str,
    lookup: ViolationLookup,
) -> FlightsError {
    if let sqlx::Error::Database(db_err) = &err {
        if let Some(constraint) = db_err.constraint() {
            if let Some(domain) = lookup(constraint) {
                debug!(context, constraint, error = %domain, "constraint violation");
                return domain;
            }
        }
    }

    FlightsError::infrastructure(context, err)
}
