pub mod account;
pub mod category;
pub mod create;
pub mod delete;
pub mod edit;
pub mod explore;
pub mod invite;
pub mod list;
pub mod rsvp;

use anyhow::Result;
use dialoguer::Input;
use evently_core::event::{Event, EventId};
use evently_core::evently::Evently;
use evently_core::user::User;

/// The logged-in user, or an error telling how to log in.
pub fn require_user(evently: &Evently) -> Result<User> {
    match evently.store().current_user()? {
        Some(user) => Ok(user),
        None => anyhow::bail!(
            "Not logged in.\n\n\
            Log in with:\n  \
            evently login <email>\n\n\
            Or create an account first:\n  \
            evently register <email> <username>"
        ),
    }
}

/// Look up one of `user`'s own events, the way the event list selects it.
pub fn own_event(user: &User, event_id: u64) -> Result<Event> {
    match user.created_event(EventId(event_id)) {
        Some(event) => Ok(event.clone()),
        None => anyhow::bail!("You have no event with id {}", event_id),
    }
}

/// Use the given value, or prompt for it.
pub fn value_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::<String>::new()
            .with_prompt(format!("  {}", prompt))
            .interact_text()?),
    }
}
