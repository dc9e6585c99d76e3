//! The local event store.
//!
//! All users live in one collection under [`USERS_KEY`]. Events are embedded
//! in their creator's record and copied into invitees' and attendees'
//! records. Every mutation reads the whole collection, changes it in memory
//! and writes the whole collection back; nothing is cached between calls.

use tracing::{error, info, warn};

use crate::category::{self, Category};
use crate::error::{EventlyError, EventlyResult};
use crate::event::{Event, EventDetails, EventId, InvitedEvent, InviteeSnapshot, RsvpEntry};
use crate::explore::{self, ExploreFilter};
use crate::image::EncodedImage;
use crate::storage::{CATEGORIES_KEY, Storage, USERS_KEY, read_collection, write_collection};
use crate::user::{self, User};

/// Result of [`EventStore::delete_event`].
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// The confirmation was declined; nothing changed.
    Cancelled,
    Deleted {
        event_id: EventId,
        /// Number of entries removed from the creator's `createdEvents`
        removed: usize,
        /// Emails of other users still holding an invite or RSVP snapshot of
        /// the deleted event. These are not cleaned up.
        dangling: Vec<String>,
    },
}

/// Result of a successful [`EventStore::invite`].
#[derive(Debug, Clone, PartialEq)]
pub struct InviteOutcome {
    pub event_id: EventId,
    pub invitee: String,
    /// Whether the invitee was added to the event's own `invites`. False when
    /// the email-keyed check found them already listed there.
    pub roster_updated: bool,
}

pub struct EventStore<S> {
    storage: S,
}

impl<S: Storage> EventStore<S> {
    pub fn new(storage: S) -> Self {
        EventStore { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    // USERS:

    pub fn users(&self) -> EventlyResult<Vec<User>> {
        read_collection(&self.storage, USERS_KEY)
    }

    fn save_users(&self, users: &[User]) -> EventlyResult<()> {
        write_collection(&self.storage, USERS_KEY, users)
    }

    pub fn user(&self, email: &str) -> EventlyResult<User> {
        user::find(&self.users()?, email)
            .cloned()
            .ok_or_else(|| EventlyError::UserNotFound(email.to_string()))
    }

    /// The first user whose login flag is set.
    pub fn current_user(&self) -> EventlyResult<Option<User>> {
        Ok(self.users()?.into_iter().find(|u| u.login))
    }

    pub fn register_user(&self, email: &str, username: &str) -> EventlyResult<User> {
        let email = email.trim();
        let username = username.trim();

        if email.is_empty() || username.is_empty() {
            return Err(EventlyError::Validation(
                "Email and username are required".into(),
            ));
        }

        let mut users = self.users()?;
        if user::find(&users, email).is_some() {
            return Err(EventlyError::DuplicateEmail(email.to_string()));
        }

        let new_user = User::new(email, username);
        users.push(new_user.clone());
        self.save_users(&users)?;

        info!(email, "Registered user");
        Ok(new_user)
    }

    /// Mark `email` as the logged-in user and clear everyone else's flag.
    pub fn login(&self, email: &str) -> EventlyResult<User> {
        let mut users = self.users()?;
        if user::find(&users, email).is_none() {
            return Err(EventlyError::UserNotFound(email.to_string()));
        }

        for u in users.iter_mut() {
            u.login = u.email == email;
        }
        self.save_users(&users)?;

        self.user(email)
    }

    pub fn logout(&self) -> EventlyResult<()> {
        let mut users = self.users()?;
        for u in users.iter_mut() {
            u.login = false;
        }
        self.save_users(&users)
    }

    // EVENTS:

    pub fn created_events(&self, email: &str) -> EventlyResult<Vec<Event>> {
        Ok(self.user(email)?.created_events)
    }

    pub fn invites(&self, email: &str) -> EventlyResult<Vec<InvitedEvent>> {
        Ok(self.user(email)?.invites)
    }

    pub fn rsvps(&self, email: &str) -> EventlyResult<Vec<RsvpEntry>> {
        Ok(self.user(email)?.rsvps)
    }

    /// Append a new event to the creator's `createdEvents`.
    ///
    /// The id is `createdEvents.len() + 1`. After a delete this can repeat the
    /// id of a surviving event; that collision is logged, not resolved.
    pub fn create_event(
        &self,
        creator_email: &str,
        details: EventDetails,
        image: EncodedImage,
    ) -> EventlyResult<Event> {
        details.validate()?;
        if image.is_empty() {
            return Err(EventlyError::Validation("Image is required".into()));
        }

        let mut users = self.users()?;
        let mut creator = user::find(&users, creator_email)
            .cloned()
            .ok_or_else(|| EventlyError::UserNotFound(creator_email.to_string()))?;

        let event_id = EventId::next_for(creator.created_events.len());
        if creator.created_event(event_id).is_some() {
            warn!(%event_id, creator = creator_email, "New event reuses the id of an existing event");
        }

        let event = Event::new(event_id, details, image, &creator.username);
        creator.created_events.push(event.clone());

        user::replace(&mut users, creator);
        self.save_users(&users)?;

        info!(%event_id, creator = creator_email, "Event created");
        Ok(event)
    }

    /// Overwrite the editable fields of every `createdEvents` entry with id
    /// `event_id`. Copies already handed out through invites or RSVPs are not
    /// touched.
    pub fn edit_event(
        &self,
        creator_email: &str,
        event_id: EventId,
        details: &EventDetails,
        image: Option<EncodedImage>,
    ) -> EventlyResult<Event> {
        details.validate()?;

        let mut users = self.users()?;
        let mut creator = user::find(&users, creator_email)
            .cloned()
            .ok_or_else(|| EventlyError::UserNotFound(creator_email.to_string()))?;

        let mut edited = None;
        for event in creator
            .created_events
            .iter_mut()
            .filter(|e| e.event_id == Some(event_id))
        {
            event.apply_edit(details, image.as_ref());
            if edited.is_none() {
                edited = Some(event.clone());
            }
        }

        let edited = edited.ok_or(EventlyError::EventNotFound(event_id))?;

        user::replace(&mut users, creator);
        self.save_users(&users)?;

        info!(%event_id, creator = creator_email, "Event updated");
        Ok(edited)
    }

    /// Delete `selected` from the creator's `createdEvents` and `rsvps`.
    ///
    /// `confirm` is asked only after the preconditions pass; returning false
    /// cancels with no changes. Snapshots held by other users stay in place
    /// and are listed in the outcome.
    pub fn delete_event<F>(
        &self,
        creator_email: &str,
        selected: Option<&Event>,
        confirm: F,
    ) -> EventlyResult<DeleteOutcome>
    where
        F: FnOnce(&Event) -> bool,
    {
        let Some(selected) = selected else {
            error!("Delete requested with no event selected");
            return Err(EventlyError::NoEventSelected);
        };
        let Some(event_id) = selected.event_id else {
            error!(event = %selected, "Delete requested for an event without an id");
            return Err(EventlyError::MissingEventId);
        };

        if !confirm(selected) {
            return Ok(DeleteOutcome::Cancelled);
        }

        let mut users = self.users()?;
        let mut creator = user::find(&users, creator_email)
            .cloned()
            .ok_or_else(|| EventlyError::UserNotFound(creator_email.to_string()))?;

        let before = creator.created_events.len();
        creator.created_events.retain(|e| e.event_id != Some(event_id));
        let removed = before - creator.created_events.len();
        creator.rsvps.retain(|r| r.event_id != event_id);

        if removed == 0 {
            warn!(%event_id, creator = creator_email, "No created event matched the deleted id");
        }

        let dangling: Vec<String> = users
            .iter()
            .filter(|u| u.email != creator.email)
            .filter(|u| u.holds_snapshot_of(event_id, &creator.username))
            .map(|u| u.email.clone())
            .collect();

        user::replace(&mut users, creator);
        self.save_users(&users)?;

        if !dangling.is_empty() {
            warn!(%event_id, holders = ?dangling, "Deleted event is still referenced by other users");
        }
        info!(%event_id, creator = creator_email, "Event deleted");

        Ok(DeleteOutcome::Deleted {
            event_id,
            removed,
            dangling,
        })
    }

    /// Send `selected` to `invitee_email`.
    ///
    /// Two separate writes: first the snapshot goes into the invitee's
    /// `invites`, then the invitee is added to the event's own `invites` in
    /// the inviter's `createdEvents`. The first is guarded by an eventId check
    /// on the invitee, the second by an email check on the event. If the
    /// second write fails the first stays applied and
    /// [`EventlyError::InvitePartiallyApplied`] is returned.
    pub fn invite(
        &self,
        inviter_email: &str,
        invitee_email: &str,
        selected: Option<&Event>,
    ) -> EventlyResult<InviteOutcome> {
        let mut users = self.users()?;

        let Some(invitee) = user::find(&users, invitee_email).cloned() else {
            error!(invitee = invitee_email, "Invitee not found");
            return Err(EventlyError::InviteeNotFound(invitee_email.to_string()));
        };
        let Some(inviter) = user::find(&users, inviter_email).cloned() else {
            error!(inviter = inviter_email, "Inviter's events could not be loaded");
            return Err(EventlyError::UserNotFound(inviter_email.to_string()));
        };
        let Some(selected) = selected else {
            error!("Selected event is not defined");
            return Err(EventlyError::NoEventSelected);
        };
        let Some(event_id) = selected.event_id else {
            error!(event = %selected, "Selected event is missing eventId");
            return Err(EventlyError::MissingEventId);
        };

        if invitee.is_invited_to(event_id) {
            info!(%event_id, invitee = invitee_email, "Event already in the invitee's invites");
            return Err(EventlyError::AlreadyInvited(event_id, invitee.email));
        }

        let mut updated_invitee = invitee.clone();
        updated_invitee.invites.push(InvitedEvent {
            event: selected.clone(),
            inviter_by: inviter.username.clone(),
        });
        user::replace(&mut users, updated_invitee);
        self.save_users(&users)?;

        // Re-read the inviter from the updated list so a self-invite keeps
        // the snapshot written above.
        let mut updated_inviter = user::find(&users, inviter_email)
            .cloned()
            .ok_or_else(|| EventlyError::UserNotFound(inviter_email.to_string()))?;

        let mut roster_updated = false;
        for event in updated_inviter
            .created_events
            .iter_mut()
            .filter(|e| e.event_id == Some(event_id))
        {
            if !event.has_invitee(&invitee.email) {
                event.invites.push(InviteeSnapshot {
                    user: invitee.clone(),
                    inviter_id: inviter.id.clone(),
                });
                roster_updated = true;
            }
        }

        if !roster_updated {
            warn!(%event_id, invitee = invitee_email, "Invitee already on the event's invite list or event not owned by inviter");
        }

        user::replace(&mut users, updated_inviter);
        self.save_users(&users)
            .map_err(|e| EventlyError::InvitePartiallyApplied {
                invitee: invitee_email.to_string(),
                reason: e.to_string(),
            })?;

        info!(%event_id, invitee = invitee_email, "Event invited");
        Ok(InviteOutcome {
            event_id,
            invitee: invitee_email.to_string(),
            roster_updated,
        })
    }

    /// Record an RSVP for an event the user created or was invited to.
    ///
    /// Member limits and the event's `attendees` are left untouched.
    pub fn rsvp(&self, email: &str, event_id: EventId) -> EventlyResult<RsvpEntry> {
        let mut users = self.users()?;
        let mut attendee = user::find(&users, email)
            .cloned()
            .ok_or_else(|| EventlyError::UserNotFound(email.to_string()))?;

        if attendee.has_rsvp(event_id) {
            return Err(EventlyError::AlreadyRsvped(event_id));
        }

        let event = attendee
            .created_event(event_id)
            .or_else(|| {
                attendee
                    .invites
                    .iter()
                    .map(|i| &i.event)
                    .find(|e| e.event_id == Some(event_id))
            })
            .ok_or(EventlyError::EventNotFound(event_id))?;

        let entry = RsvpEntry::for_event(event_id, event);
        attendee.rsvps.push(entry.clone());

        user::replace(&mut users, attendee);
        self.save_users(&users)?;

        info!(%event_id, email, "RSVP recorded");
        Ok(entry)
    }

    /// Every user's created events, filtered and de-duplicated by id.
    pub fn explore(&self, filter: &ExploreFilter) -> EventlyResult<Vec<Event>> {
        let users = self.users()?;
        Ok(explore::filter_events(explore::aggregate(&users), filter))
    }

    // CATEGORIES:

    pub fn categories(&self) -> EventlyResult<Vec<Category>> {
        read_collection(&self.storage, CATEGORIES_KEY)
    }

    /// Add a category. Blank or already-present names are a no-op that
    /// returns `None` without writing.
    pub fn add_category(&self, name: &str) -> EventlyResult<Option<Category>> {
        let mut categories = self.categories()?;

        let Some(added) = category::add(&mut categories, name) else {
            return Ok(None);
        };

        write_collection(&self.storage, CATEGORIES_KEY, &categories)?;
        info!(category = %added, "Category added");
        Ok(Some(added))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::tests::details;
    use crate::storage::MemoryStorage;
    use std::cell::Cell;

    const ADA: &str = "ada@example.com";
    const BOB: &str = "bob@example.com";
    const CY: &str = "cy@example.com";

    fn image() -> EncodedImage {
        EncodedImage::from("data:image/png;base64,iVBORw0KGgo=")
    }

    fn store_with_users() -> EventStore<MemoryStorage> {
        let store = EventStore::new(MemoryStorage::new());
        store.register_user(ADA, "ada").unwrap();
        store.register_user(BOB, "bob").unwrap();
        store.register_user(CY, "cy").unwrap();
        store
    }

    /// Storage that accepts a fixed number of writes and fails the rest.
    struct FlakyStorage {
        inner: MemoryStorage,
        writes_left: Cell<usize>,
    }

    impl Storage for FlakyStorage {
        fn get_item(&self, key: &str) -> EventlyResult<Option<String>> {
            self.inner.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> EventlyResult<()> {
            if self.writes_left.get() == 0 {
                return Err(EventlyError::Storage("quota exceeded".into()));
            }
            self.writes_left.set(self.writes_left.get() - 1);
            self.inner.set_item(key, value)
        }
    }

    fn flaky(store: &EventStore<MemoryStorage>, writes: usize) -> EventStore<FlakyStorage> {
        EventStore::new(FlakyStorage {
            inner: store.storage().clone(),
            writes_left: Cell::new(writes),
        })
    }

    #[test]
    fn test_register_rejects_duplicate_email() {
        let store = store_with_users();
        let err = store.register_user(ADA, "other").unwrap_err();
        assert!(matches!(err, EventlyError::DuplicateEmail(_)));
        assert_eq!(store.users().unwrap().len(), 3);
    }

    #[test]
    fn test_login_is_exclusive() {
        let store = store_with_users();
        store.login(ADA).unwrap();
        store.login(BOB).unwrap();

        let logged_in: Vec<_> = store
            .users()
            .unwrap()
            .into_iter()
            .filter(|u| u.login)
            .map(|u| u.email)
            .collect();
        assert_eq!(logged_in, vec![BOB]);
        assert_eq!(store.current_user().unwrap().unwrap().email, BOB);

        store.logout().unwrap();
        assert!(store.current_user().unwrap().is_none());
    }

    #[test]
    fn test_create_assigns_length_plus_one_and_persists() {
        let store = store_with_users();

        let first = store.create_event(ADA, details("One"), image()).unwrap();
        let second = store.create_event(ADA, details("Two"), image()).unwrap();

        assert_eq!(first.event_id, Some(EventId(1)));
        assert_eq!(second.event_id, Some(EventId(2)));
        assert_eq!(second.created_by, "ada");
        assert!(second.invites.is_empty());
        assert!(second.attendees.is_empty());

        // Read back through a fresh store over the same storage
        let reread = EventStore::new(store.storage().clone());
        let events = reread.created_events(ADA).unwrap();
        assert_eq!(events, vec![first, second]);
    }

    #[test]
    fn test_create_requires_image() {
        let store = store_with_users();
        let err = store
            .create_event(ADA, details("One"), EncodedImage::default())
            .unwrap_err();
        assert!(matches!(err, EventlyError::Validation(_)));
        assert!(store.created_events(ADA).unwrap().is_empty());
    }

    #[test]
    fn test_create_after_delete_can_repeat_an_id() {
        let store = store_with_users();
        let one = store.create_event(ADA, details("One"), image()).unwrap();
        store.create_event(ADA, details("Two"), image()).unwrap();

        store.delete_event(ADA, Some(&one), |_| true).unwrap();
        let three = store.create_event(ADA, details("Three"), image()).unwrap();

        // Length was 1 after the delete, so the new event collides with "Two"
        assert_eq!(three.event_id, Some(EventId(2)));
        let ids: Vec<_> = store
            .created_events(ADA)
            .unwrap()
            .into_iter()
            .map(|e| e.event_id)
            .collect();
        assert_eq!(ids, vec![Some(EventId(2)), Some(EventId(2))]);
    }

    #[test]
    fn test_create_storage_failure_leaves_storage_unchanged() {
        let store = store_with_users();
        let failing = flaky(&store, 0);

        let err = failing.create_event(ADA, details("One"), image()).unwrap_err();

        assert!(matches!(err, EventlyError::Storage(_)));
        assert!(store.created_events(ADA).unwrap().is_empty());
    }

    #[test]
    fn test_edit_without_image_preserves_image() {
        let store = store_with_users();
        let created = store.create_event(ADA, details("Old"), image()).unwrap();

        let mut new_details = details("New");
        new_details.member_limit = 5;
        let edited = store
            .edit_event(ADA, EventId(1), &new_details, None)
            .unwrap();

        assert_eq!(edited.image, created.image);
        assert_eq!(edited.name, "New");
        assert_eq!(edited.member_limit, 5);
        assert_eq!(edited.created_at, created.created_at);
        assert_eq!(edited.created_by, created.created_by);
        assert_eq!(store.created_events(ADA).unwrap()[0], edited);
    }

    #[test]
    fn test_edit_overwrites_every_entry_sharing_the_id() {
        let store = store_with_users();
        let one = store.create_event(ADA, details("One"), image()).unwrap();
        store.create_event(ADA, details("Two"), image()).unwrap();
        store.delete_event(ADA, Some(&one), |_| true).unwrap();
        store.create_event(ADA, details("Three"), image()).unwrap();

        let two = store.created_events(ADA).unwrap()[0].clone();
        store.invite(ADA, BOB, Some(&two)).unwrap();
        let before = store.created_events(ADA).unwrap();
        assert_eq!(before.len(), 2);

        store
            .edit_event(ADA, EventId(2), &details("Renamed"), None)
            .unwrap();

        let after = store.created_events(ADA).unwrap();
        assert_eq!(after.len(), 2);
        for (old, new) in before.iter().zip(&after) {
            assert_eq!(new.event_id, Some(EventId(2)));
            assert_eq!(new.name, "Renamed");
            assert_eq!(new.invites, old.invites);
            assert_eq!(new.attendees, old.attendees);
            assert_eq!(new.created_at, old.created_at);
        }
        assert_eq!(after[0].invites.len(), 1);
    }

    #[test]
    fn test_edit_with_image_replaces_it() {
        let store = store_with_users();
        store.create_event(ADA, details("Old"), image()).unwrap();
        let replacement = EncodedImage::from("data:image/gif;base64,R0lGOD==");

        let edited = store
            .edit_event(ADA, EventId(1), &details("Old"), Some(replacement.clone()))
            .unwrap();

        assert_eq!(edited.image, replacement);
    }

    #[test]
    fn test_edit_unknown_event_is_not_found() {
        let store = store_with_users();
        let err = store
            .edit_event(ADA, EventId(9), &details("x"), None)
            .unwrap_err();
        assert!(matches!(err, EventlyError::EventNotFound(EventId(9))));
    }

    #[test]
    fn test_edit_does_not_touch_invite_snapshots() {
        let store = store_with_users();
        let event = store.create_event(ADA, details("Old"), image()).unwrap();
        store.invite(ADA, BOB, Some(&event)).unwrap();

        store.edit_event(ADA, EventId(1), &details("New"), None).unwrap();

        assert_eq!(store.invites(BOB).unwrap()[0].event.name, "Old");
    }

    #[test]
    fn test_delete_preconditions_abort_without_asking() {
        let store = store_with_users();
        let mut event = store.create_event(ADA, details("One"), image()).unwrap();
        let writes = store.storage().write_count();

        let err = store
            .delete_event(ADA, None, |_| panic!("should not ask"))
            .unwrap_err();
        assert!(matches!(err, EventlyError::NoEventSelected));

        event.event_id = None;
        let err = store
            .delete_event(ADA, Some(&event), |_| panic!("should not ask"))
            .unwrap_err();
        assert!(matches!(err, EventlyError::MissingEventId));

        assert_eq!(store.storage().write_count(), writes);
        assert_eq!(store.created_events(ADA).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_cancelled_changes_nothing() {
        let store = store_with_users();
        let event = store.create_event(ADA, details("One"), image()).unwrap();
        let writes = store.storage().write_count();

        let outcome = store.delete_event(ADA, Some(&event), |_| false).unwrap();

        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(store.storage().write_count(), writes);
        assert_eq!(store.created_events(ADA).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_prunes_creator_but_leaves_invitee_snapshot() {
        let store = store_with_users();
        let event = store.create_event(ADA, details("One"), image()).unwrap();
        store.invite(ADA, BOB, Some(&event)).unwrap();
        store.rsvp(ADA, EventId(1)).unwrap();

        let outcome = store.delete_event(ADA, Some(&event), |_| true).unwrap();

        assert_eq!(
            outcome,
            DeleteOutcome::Deleted {
                event_id: EventId(1),
                removed: 1,
                dangling: vec![BOB.to_string()],
            }
        );
        let ada = store.user(ADA).unwrap();
        assert!(ada.created_events.is_empty());
        assert!(ada.rsvps.is_empty());

        // Known gap: the invitee keeps a snapshot of the deleted event
        let bob_invites = store.invites(BOB).unwrap();
        assert_eq!(bob_invites.len(), 1);
        assert_eq!(bob_invites[0].event.event_id, Some(EventId(1)));
    }

    #[test]
    fn test_delete_ignores_same_id_snapshots_of_other_creators() {
        let store = store_with_users();
        let adas = store.create_event(ADA, details("Ada's"), image()).unwrap();
        store.create_event(BOB, details("Bob's"), image()).unwrap();
        store.rsvp(BOB, EventId(1)).unwrap();

        let outcome = store.delete_event(ADA, Some(&adas), |_| true).unwrap();

        assert_eq!(
            outcome,
            DeleteOutcome::Deleted {
                event_id: EventId(1),
                removed: 1,
                dangling: vec![],
            }
        );
        assert_eq!(store.rsvps(BOB).unwrap().len(), 1);
    }

    #[test]
    fn test_rewrites_keep_unknown_user_keys() {
        let storage = MemoryStorage::new();
        storage
            .set_item(
                USERS_KEY,
                r#"[{"email":"ada@example.com","username":"ada","password":"hunter2","login":false,"createdEvents":[],"invites":[],"rsvps":[]}]"#,
            )
            .unwrap();
        let store = EventStore::new(storage);

        store.login(ADA).unwrap();
        store.create_event(ADA, details("One"), image()).unwrap();

        let blob = store.storage().get_item(USERS_KEY).unwrap().unwrap();
        let users: serde_json::Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(users[0]["password"], "hunter2");
        assert_eq!(users[0]["login"], true);
        assert_eq!(users[0]["createdEvents"][0]["name"], "One");
    }

    #[test]
    fn test_invite_writes_both_copies() {
        let store = store_with_users();
        let event = store.create_event(ADA, details("One"), image()).unwrap();
        let bob_before = store.user(BOB).unwrap();

        let outcome = store.invite(ADA, BOB, Some(&event)).unwrap();

        assert!(outcome.roster_updated);
        let bob = store.user(BOB).unwrap();
        assert_eq!(bob.invites.len(), 1);
        assert_eq!(bob.invites[0].inviter_by, "ada");
        assert_eq!(bob.invites[0].event.name, "One");

        let ada = store.user(ADA).unwrap();
        let roster = &ada.created_events[0].invites;
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].user, bob_before);
        assert_eq!(roster[0].inviter_id, ada.id);
    }

    #[test]
    fn test_invite_twice_is_rejected_and_unchanged() {
        let store = store_with_users();
        let event = store.create_event(ADA, details("One"), image()).unwrap();
        store.invite(ADA, BOB, Some(&event)).unwrap();
        let users_before = store.users().unwrap();
        let writes = store.storage().write_count();

        let err = store.invite(ADA, BOB, Some(&event)).unwrap_err();

        assert!(matches!(err, EventlyError::AlreadyInvited(EventId(1), _)));
        assert!(err.is_user_facing());
        assert_eq!(store.users().unwrap(), users_before);
        assert_eq!(store.storage().write_count(), writes);
    }

    #[test]
    fn test_invite_preconditions() {
        let store = store_with_users();
        let mut event = store.create_event(ADA, details("One"), image()).unwrap();

        let err = store.invite(ADA, "nobody@example.com", Some(&event)).unwrap_err();
        assert!(matches!(err, EventlyError::InviteeNotFound(_)));
        assert!(!err.is_user_facing());

        let err = store.invite(ADA, BOB, None).unwrap_err();
        assert!(matches!(err, EventlyError::NoEventSelected));

        event.event_id = None;
        let err = store.invite(ADA, BOB, Some(&event)).unwrap_err();
        assert!(matches!(err, EventlyError::MissingEventId));

        assert!(store.invites(BOB).unwrap().is_empty());
    }

    #[test]
    fn test_invite_email_check_skips_roster_when_already_listed() {
        let store = store_with_users();
        let event = store.create_event(ADA, details("One"), image()).unwrap();
        store.invite(ADA, BOB, Some(&event)).unwrap();

        // Bob drops the invite snapshot, so the eventId check passes again
        let mut users = store.users().unwrap();
        users[1].invites.clear();
        write_collection(store.storage(), USERS_KEY, &users).unwrap();

        let outcome = store.invite(ADA, BOB, Some(&event)).unwrap();

        assert!(!outcome.roster_updated);
        assert_eq!(store.user(ADA).unwrap().created_events[0].invites.len(), 1);
        assert_eq!(store.invites(BOB).unwrap().len(), 1);
    }

    #[test]
    fn test_invite_second_write_failure_is_partial() {
        let store = store_with_users();
        let event = store.create_event(ADA, details("One"), image()).unwrap();
        let failing = flaky(&store, 1);

        let err = failing.invite(ADA, BOB, Some(&event)).unwrap_err();

        assert!(matches!(err, EventlyError::InvitePartiallyApplied { .. }));
        assert_eq!(store.invites(BOB).unwrap().len(), 1);
        assert!(store.user(ADA).unwrap().created_events[0].invites.is_empty());
    }

    #[test]
    fn test_rsvp_from_invite_and_duplicate() {
        let store = store_with_users();
        let event = store.create_event(ADA, details("One"), image()).unwrap();
        store.invite(ADA, BOB, Some(&event)).unwrap();

        let entry = store.rsvp(BOB, EventId(1)).unwrap();
        assert_eq!(entry.name, "One");
        assert_eq!(entry.organization_name, "Rust Guild");
        assert_eq!(entry.category, "Workshop");
        assert_eq!(entry.created_by, "ada");
        assert_eq!(store.rsvps(BOB).unwrap(), vec![entry]);

        let err = store.rsvp(BOB, EventId(1)).unwrap_err();
        assert!(matches!(err, EventlyError::AlreadyRsvped(EventId(1))));
    }

    #[test]
    fn test_rsvp_unknown_event() {
        let store = store_with_users();
        let err = store.rsvp(CY, EventId(1)).unwrap_err();
        assert!(matches!(err, EventlyError::EventNotFound(_)));
    }

    #[test]
    fn test_rsvp_leaves_member_limit_and_attendees() {
        let store = store_with_users();
        store.create_event(ADA, details("One"), image()).unwrap();

        store.rsvp(ADA, EventId(1)).unwrap();

        let event = &store.created_events(ADA).unwrap()[0];
        assert_eq!(event.member_limit, 20);
        assert!(event.attendees.is_empty());
    }

    #[test]
    fn test_explore_collapses_shared_ids_across_users() {
        let store = store_with_users();
        store.create_event(ADA, details("Ada's"), image()).unwrap();
        store.create_event(BOB, details("Bob's"), image()).unwrap();

        let events = store.explore(&ExploreFilter::default()).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "Ada's");
    }

    #[test]
    fn test_add_duplicate_category_does_not_write() {
        let store = EventStore::new(MemoryStorage::new());
        store.add_category("Workshop").unwrap().unwrap();
        let writes = store.storage().write_count();

        assert!(store.add_category("Workshop").unwrap().is_none());

        assert_eq!(store.storage().write_count(), writes);
        assert_eq!(store.categories().unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_users_blob_is_reported() {
        let storage = MemoryStorage::new();
        storage.set_item(USERS_KEY, "not json").unwrap();
        let store = EventStore::new(storage);

        let err = store.create_event(ADA, details("One"), image()).unwrap_err();
        assert!(matches!(err, EventlyError::CorruptCollection { .. }));
    }
}
