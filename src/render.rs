//! Terminal rendering for evently-core types.

use evently_core::event::{Event, InvitedEvent, RsvpEntry};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

fn render_category(category: &str) -> String {
    if category.is_empty() {
        String::new()
    } else {
        format!("[{}]", category)
    }
}

fn render_id(event: &Event) -> String {
    match event.event_id {
        Some(id) => format!("#{}", id),
        None => "#?".to_string(),
    }
}

impl Render for Event {
    fn render(&self) -> String {
        format!(
            "{:>4} {} {} {} {}",
            render_id(self).dimmed(),
            self.date,
            self.name.bold(),
            render_category(&self.category).cyan(),
            format!("@ {} · {} · limit {}", self.location, self.organization_name, self.member_limit)
                .dimmed()
        )
    }
}

impl Render for InvitedEvent {
    fn render(&self) -> String {
        format!(
            "{} {}",
            self.event.render(),
            format!("(from {})", self.inviter_by).dimmed()
        )
    }
}

impl Render for RsvpEntry {
    fn render(&self) -> String {
        format!(
            "{:>4} {} {} {} {}",
            format!("#{}", self.event_id).dimmed(),
            self.date,
            self.name.bold(),
            render_category(&self.category).cyan(),
            format!("@ {} · {}", self.location, self.organization_name).dimmed()
        )
    }
}
