use thiserror::Error;

use crate::domain::id::{ReservationId, ResourceId};

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse booking JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to build internal booking model: {0}")]
    ConfigError(String),

    #[error("Reservation store is inconsistent: {0}")]
    StoreInconsistency(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Business-rule violations, surfaced to the caller as typed values.
///
/// None of these are fatal and none are retried by the scheduler itself;
/// every booking attempt is an independent, complete-or-fail step. The
/// message text is what the presentation layer shows to the user.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// The requested time falls outside the open window or on a holiday.
    #[error("Requested time falls outside business hours or on a holiday")]
    OutsideBusinessHours,

    /// The caller lacks the capability required for the resource category.
    #[error("Caller lacks access to this resource category")]
    AccessDenied,

    /// The requested interval conflicts with an existing non-cancelled reservation.
    #[error("Requested interval conflicts with an existing reservation")]
    SlotUnavailable,

    /// The requested duration is not a positive number of minutes.
    #[error("Duration of {0} minutes is not bookable")]
    InvalidDuration(i64),

    /// A reservation needs at least one participant.
    #[error("At least one participant is required")]
    NoParticipants,

    /// Cancel/update referenced a reservation id that does not exist.
    #[error("No reservation with id {0}")]
    NotFound(ReservationId),

    /// Cancel/update attempted by a user who is neither the reservation owner
    /// nor an administrator.
    #[error("Caller is neither the reservation owner nor an administrator")]
    Forbidden,

    /// The session has already finished. Completed reservations are terminal
    /// and cannot be cancelled.
    #[error("Reservation {0} has already been completed")]
    AlreadyCompleted(ReservationId),

    /// No resource with the requested id exists in the catalog.
    #[error("No resource with id {0}")]
    UnknownResource(ResourceId),

    /// The persistence collaborator failed while serving the request.
    #[error("Storage failure: {0}")]
    Storage(String),
}

impl From<Error> for ValidationError {
    fn from(err: Error) -> Self {
        ValidationError::Storage(err.to_string())
    }
}
