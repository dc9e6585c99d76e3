use anyhow::Result;
use evently_core::evently::Evently;
use owo_colors::OwoColorize;

use super::require_user;
use crate::render::Render;

pub fn events(evently: &Evently) -> Result<()> {
    let user = require_user(evently)?;

    if user.created_events.is_empty() {
        println!("{}", "No events yet. Create one with: evently create".dimmed());
        return Ok(());
    }

    for event in &user.created_events {
        println!("{}", event.render());
        for invitee in &event.invites {
            println!("     {} {}", "invited".dimmed(), invitee.user.email);
        }
    }
    Ok(())
}

pub fn invites(evently: &Evently) -> Result<()> {
    let user = require_user(evently)?;

    if user.invites.is_empty() {
        println!("{}", "No invites".dimmed());
        return Ok(());
    }

    for invite in &user.invites {
        println!("{}", invite.render());
    }
    Ok(())
}

pub fn rsvps(evently: &Evently) -> Result<()> {
    let user = require_user(evently)?;

    if user.rsvps.is_empty() {
        println!("{}", "No RSVPs yet".dimmed());
        return Ok(());
    }

    for rsvp in &user.rsvps {
        println!("{}", rsvp.render());
    }
    Ok(())
}
