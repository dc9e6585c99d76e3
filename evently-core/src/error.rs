//! Error types for the evently store.

use thiserror::Error;

use crate::event::EventId;

/// Errors that can occur in evently operations.
#[derive(Error, Debug)]
pub enum EventlyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invitee not found: {0}")]
    InviteeNotFound(String),

    #[error("A user with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("No event selected")]
    NoEventSelected,

    #[error("Selected event is missing its eventId")]
    MissingEventId,

    #[error("Event {0} not found")]
    EventNotFound(EventId),

    #[error("Event {0} has already been sent to {1}")]
    AlreadyInvited(EventId, String),

    #[error("You have already RSVPed to event {0}")]
    AlreadyRsvped(EventId),

    #[error("{0}")]
    Validation(String),

    #[error("Stored value under '{key}' is not a valid collection: {reason}")]
    CorruptCollection { key: String, reason: String },

    #[error("Invite for {invitee} was recorded, but updating the event's invite list failed: {reason}")]
    InvitePartiallyApplied { invitee: String, reason: String },

    #[error("Image encoding error: {0}")]
    ImageEncoding(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl EventlyError {
    /// Business-rule rejections the user can act on, as opposed to
    /// precondition violations and unexpected failures.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            EventlyError::AlreadyInvited(..)
                | EventlyError::AlreadyRsvped(_)
                | EventlyError::Validation(_)
                | EventlyError::DuplicateEmail(_)
                | EventlyError::EventNotFound(_)
        )
    }
}

impl From<serde_json::Error> for EventlyError {
    fn from(err: serde_json::Error) -> Self {
        EventlyError::Serialization(err.to_string())
    }
}

/// Result type alias for evently operations.
pub type EventlyResult<T> = Result<T, EventlyError>;
