use anyhow::Result;
use evently_core::EventlyError;
use evently_core::event::EventId;
use evently_core::evently::Evently;
use owo_colors::OwoColorize;

use super::require_user;

pub fn run(evently: &Evently, event_id: u64) -> Result<()> {
    let user = require_user(evently)?;

    match evently.store().rsvp(&user.email, EventId(event_id)) {
        Ok(entry) => {
            println!("{}", "RSVP Successful!".green().bold());
            println!("  You have reserved your spot at {}", entry.name.bold());
            Ok(())
        }
        Err(EventlyError::AlreadyRsvped(_)) => {
            println!("{}", "You have already RSVPed to this event.".yellow());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
