use anyhow::{Context, Result};
use evently_core::event::{EventDetails, EventId};
use evently_core::evently::Evently;
use evently_core::image;
use owo_colors::OwoColorize;

use super::{own_event, require_user};
use crate::EventArgs;
use crate::render::Render;

pub async fn run(evently: &Evently, event_id: u64, args: EventArgs) -> Result<()> {
    let user = require_user(evently)?;
    let current = own_event(&user, event_id)?;

    // Start from the current values, like a pre-filled edit form
    let details = EventDetails {
        name: args.name.unwrap_or(current.name),
        organization_name: args.organization.unwrap_or(current.organization_name),
        category: args.category.unwrap_or(current.category),
        description: args.description.unwrap_or(current.description),
        member_limit: args.member_limit.unwrap_or(current.member_limit),
        location: args.location.unwrap_or(current.location),
        date: args.date.unwrap_or(current.date),
        contact_number: args.contact.unwrap_or(current.contact_number),
    };

    let image = match args.image {
        Some(path) => Some(
            image::encode_file(&path)
                .await
                .context("An error occurred while updating the event")?,
        ),
        None => None,
    };

    let event = evently
        .store()
        .edit_event(&user.email, EventId(event_id), &details, image)
        .context("An error occurred while updating the event")?;

    println!("{}", "Event Updated!".green().bold());
    println!("  {}", event.render());

    if !event.invites.is_empty() {
        println!(
            "{}",
            format!(
                "  Note: {} invitee(s) keep the copy they were sent",
                event.invites.len()
            )
            .dimmed()
        );
    }
    Ok(())
}
