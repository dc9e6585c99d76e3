//! Event types and the snapshot copies that get embedded in other records.
//!
//! An event's canonical copy lives in its creator's `createdEvents`. Invites
//! and RSVPs hold independent snapshots that are not updated when the
//! canonical copy is edited.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{EventlyError, EventlyResult};
use crate::image::EncodedImage;
use crate::user::User;

/// Identifier of an event within its creator's `createdEvents`.
///
/// Assigned as `createdEvents.len() + 1`, so it is neither globally unique
/// nor stable under deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl EventId {
    /// The id the next created event gets in a collection of `len` events.
    pub fn next_for(len: usize) -> Self {
        EventId(len as u64 + 1)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Missing only in hand-edited or foreign data; the store always sets it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<EventId>,
    pub name: String,
    pub organization_name: String,
    #[serde(default)]
    pub category: String,
    pub description: String,
    #[serde(deserialize_with = "member_limit_from_any")]
    pub member_limit: u32,
    pub location: String,
    /// Kept as entered (usually `YYYY-MM-DD`); parsed only for filtering.
    pub date: String,
    pub contact_number: String,
    pub image: EncodedImage,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub invites: Vec<InviteeSnapshot>,
    /// Declared for compatibility; no operation populates it.
    #[serde(default)]
    pub attendees: Vec<Value>,
    /// Keys this crate does not model, carried through rewrites untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Accept a member limit stored as an integer, a float or a numeric string.
/// Fractions are truncated and negative values are rejected.
fn member_limit_from_any<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawLimit {
        Whole(u64),
        Fraction(f64),
        Text(String),
    }

    let number = match RawLimit::deserialize(deserializer)? {
        RawLimit::Whole(n) => return u32::try_from(n).map_err(serde::de::Error::custom),
        RawLimit::Fraction(f) => f,
        RawLimit::Text(s) if s.trim().is_empty() => 0.0,
        RawLimit::Text(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom)?,
    };

    if !number.is_finite() || number < 0.0 || number > u32::MAX as f64 {
        return Err(serde::de::Error::custom(format!("invalid member limit {number}")));
    }
    Ok(number.trunc() as u32)
}

impl Event {
    pub fn new(id: EventId, details: EventDetails, image: EncodedImage, created_by: &str) -> Self {
        let now = Utc::now();
        Event {
            event_id: Some(id),
            name: details.name,
            organization_name: details.organization_name,
            category: details.category,
            description: details.description,
            member_limit: details.member_limit,
            location: details.location,
            date: details.date,
            contact_number: details.contact_number,
            image,
            created_by: created_by.to_string(),
            created_at: now,
            updated_at: now,
            invites: Vec::new(),
            attendees: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Overwrite every editable field. The image is replaced only when a new
    /// one is supplied.
    pub fn apply_edit(&mut self, details: &EventDetails, image: Option<&EncodedImage>) {
        self.name = details.name.clone();
        self.organization_name = details.organization_name.clone();
        self.category = details.category.clone();
        self.description = details.description.clone();
        self.member_limit = details.member_limit;
        self.location = details.location.clone();
        self.date = details.date.clone();
        self.contact_number = details.contact_number.clone();
        if let Some(image) = image {
            self.image = image.clone();
        }
        self.updated_at = Utc::now();
    }

    /// Whether `email` is already on this event's invite list.
    pub fn has_invitee(&self, email: &str) -> bool {
        self.invites.iter().any(|i| i.user.email == email)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Form values for creating or editing an event (everything except the image).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventDetails {
    pub name: String,
    pub organization_name: String,
    pub category: String,
    pub description: String,
    pub member_limit: u32,
    pub location: String,
    pub date: String,
    pub contact_number: String,
}

impl EventDetails {
    /// Every text field must be non-blank and the member limit positive.
    pub fn validate(&self) -> EventlyResult<()> {
        let required = [
            (&self.name, "Event Name is required"),
            (&self.organization_name, "Organization name is required"),
            (&self.category, "Category is required"),
            (&self.description, "Description is required"),
            (&self.location, "Location is required"),
            (&self.date, "Date is required"),
            (&self.contact_number, "Contact Number is required"),
        ];

        if let Some((_, message)) = required.iter().find(|(value, _)| value.trim().is_empty()) {
            return Err(EventlyError::Validation(message.to_string()));
        }

        if self.member_limit == 0 {
            return Err(EventlyError::Validation(
                "Member limit must be a positive number".into(),
            ));
        }

        Ok(())
    }
}

/// Snapshot of an event placed in an invitee's `invites`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitedEvent {
    #[serde(flatten)]
    pub event: Event,
    /// Username of whoever sent the invite
    pub inviter_by: String,
}

/// Snapshot of an invitee placed in the event's own `invites`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteeSnapshot {
    #[serde(flatten)]
    pub user: User,
    #[serde(default)]
    pub inviter_id: Option<String>,
}

/// An entry in a user's `rsvps`: the event id plus the fields shown in the
/// RSVP list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpEntry {
    pub event_id: EventId,
    /// Username of the event's creator. Empty in entries written without it.
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub organization_name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub location: String,
}

impl RsvpEntry {
    pub fn for_event(id: EventId, event: &Event) -> Self {
        RsvpEntry {
            event_id: id,
            created_by: event.created_by.clone(),
            name: event.name.clone(),
            category: event.category.clone(),
            description: event.description.clone(),
            organization_name: event.organization_name.clone(),
            date: event.date.clone(),
            location: event.location.clone(),
        }
    }
}
