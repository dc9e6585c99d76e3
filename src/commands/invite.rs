use anyhow::Result;
use evently_core::EventlyError;
use evently_core::evently::Evently;
use owo_colors::OwoColorize;

use super::{own_event, require_user};

pub fn run(evently: &Evently, event_id: u64, email: &str) -> Result<()> {
    let user = require_user(evently)?;
    let selected = own_event(&user, event_id)?;

    match evently.store().invite(&user.email, email, Some(&selected)) {
        Ok(outcome) => {
            println!("Event invited successfully to: {}", outcome.invitee.bold());
            if !outcome.roster_updated {
                println!(
                    "{}",
                    "  (already on the event's invite list, list left unchanged)".dimmed()
                );
            }
            Ok(())
        }
        Err(EventlyError::AlreadyInvited(..)) => {
            println!("{}", "This event is already invited to the invitee.".yellow());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
