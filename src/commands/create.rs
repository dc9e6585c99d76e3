use anyhow::{Context, Result};
use evently_core::event::EventDetails;
use evently_core::evently::Evently;
use evently_core::image;
use owo_colors::OwoColorize;

use super::{require_user, value_or_prompt};
use crate::EventArgs;
use crate::render::Render;

pub async fn run(evently: &Evently, args: EventArgs) -> Result<()> {
    let user = require_user(evently)?;

    let category = match args.category {
        Some(c) => c,
        None => match evently.default_category() {
            Some(c) => c.to_string(),
            None => value_or_prompt(None, "Category")?,
        },
    };

    let member_limit = match args.member_limit {
        Some(n) => n,
        None => value_or_prompt(None, "Member limit")?
            .trim()
            .parse()
            .context("Member limit must be a positive number")?,
    };

    let details = EventDetails {
        name: value_or_prompt(args.name, "Event name")?,
        organization_name: value_or_prompt(args.organization, "Organization")?,
        category,
        description: value_or_prompt(args.description, "Description")?,
        member_limit,
        location: value_or_prompt(args.location, "Location")?,
        date: value_or_prompt(args.date, "Date (YYYY-MM-DD)")?,
        contact_number: value_or_prompt(args.contact, "Contact number")?,
    };

    // Validate before reading the image so a bad form fails fast
    details.validate()?;

    let image_path = match args.image {
        Some(path) => path,
        None => value_or_prompt(None, "Image file")?.into(),
    };
    let image = image::encode_file(&image_path)
        .await
        .context("An error occurred while creating the event")?;

    let event = evently
        .store()
        .create_event(&user.email, details, image)
        .context("An error occurred while creating the event")?;

    println!("{}", "Event Created!".green().bold());
    println!("  {}", event.render());
    Ok(())
}
