use anyhow::Result;
use dialoguer::Confirm;
use evently_core::event::EventId;
use evently_core::evently::Evently;
use evently_core::store::DeleteOutcome;
use owo_colors::OwoColorize;

use super::require_user;

pub fn run(evently: &Evently, event_id: u64, force: bool) -> Result<()> {
    let user = require_user(evently)?;
    let selected = user.created_event(EventId(event_id)).cloned();

    let mut prompt_error = None;
    let outcome = evently.store().delete_event(&user.email, selected.as_ref(), |event| {
        if force {
            return true;
        }
        let answer = Confirm::new()
            .with_prompt(format!("Delete \"{}\"? This action cannot be undone.", event))
            .default(false)
            .interact();
        match answer {
            Ok(confirmed) => confirmed,
            Err(e) => {
                prompt_error = Some(e);
                false
            }
        }
    })?;

    if let Some(e) = prompt_error {
        return Err(e.into());
    }

    match outcome {
        DeleteOutcome::Cancelled => println!("{}", "Cancelled".dimmed()),
        DeleteOutcome::Deleted { dangling, .. } => {
            println!("{}", "Event Deleted!".green().bold());
            if !dangling.is_empty() {
                println!(
                    "  {} {}",
                    "Still in the invites/RSVPs of:".yellow(),
                    dangling.join(", ")
                );
            }
        }
    }

    Ok(())
}
