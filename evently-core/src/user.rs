//! User records. All users live in one ordered collection keyed by email.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::event::{Event, EventId, InvitedEvent, RsvpEntry};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub login: bool,
    #[serde(default)]
    pub created_events: Vec<Event>,
    #[serde(default)]
    pub invites: Vec<InvitedEvent>,
    #[serde(default)]
    pub rsvps: Vec<RsvpEntry>,
    /// Keys written by other clients (such as a signup `password`), kept as is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn new(email: &str, username: &str) -> Self {
        User {
            id: Some(uuid::Uuid::new_v4().to_string()),
            email: email.to_string(),
            username: username.to_string(),
            login: false,
            created_events: Vec::new(),
            invites: Vec::new(),
            rsvps: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn created_event(&self, id: EventId) -> Option<&Event> {
        self.created_events.iter().find(|e| e.event_id == Some(id))
    }

    pub fn is_invited_to(&self, id: EventId) -> bool {
        self.invites.iter().any(|i| i.event.event_id == Some(id))
    }

    pub fn has_rsvp(&self, id: EventId) -> bool {
        self.rsvps.iter().any(|r| r.event_id == id)
    }

    /// Whether this user still holds a snapshot of event `id` created by
    /// `created_by`. RSVP entries without a recorded creator match on id alone.
    pub fn holds_snapshot_of(&self, id: EventId, created_by: &str) -> bool {
        self.invites
            .iter()
            .any(|i| i.event.event_id == Some(id) && i.event.created_by == created_by)
            || self.rsvps.iter().any(|r| {
                r.event_id == id && (r.created_by.is_empty() || r.created_by == created_by)
            })
    }
}

/// Find a user by email.
pub fn find<'a>(users: &'a [User], email: &str) -> Option<&'a User> {
    users.iter().find(|u| u.email == email)
}

/// Replace the record with the same email, leaving the order intact.
pub fn replace(users: &mut [User], updated: User) {
    for user in users.iter_mut() {
        if user.email == updated.email {
            *user = updated;
            return;
        }
    }
}
