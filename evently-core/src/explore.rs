//! Read-only global feed of every user's created events.

use std::collections::HashSet;

use crate::date_range::DateRange;
use crate::event::Event;
use crate::user::User;

/// Category name that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, PartialEq)]
pub struct ExploreFilter {
    pub category: String,
    pub range: DateRange,
}

impl Default for ExploreFilter {
    fn default() -> Self {
        ExploreFilter {
            category: ALL_CATEGORIES.to_string(),
            range: DateRange::default(),
        }
    }
}

impl ExploreFilter {
    fn matches_category(&self, event: &Event) -> bool {
        if self.category == ALL_CATEGORIES {
            return true;
        }

        let category = event.category.trim();
        !category.is_empty() && category.to_lowercase() == self.category.trim().to_lowercase()
    }
}

/// Flatten every user's `createdEvents`, in user order.
pub fn aggregate(users: &[User]) -> Vec<Event> {
    users
        .iter()
        .flat_map(|u| u.created_events.iter().cloned())
        .collect()
}

/// Apply the category and date filters, then drop repeated event ids keeping
/// the first occurrence.
///
/// Event ids are only unique per creator, so two users' events sharing an id
/// collapse to whichever comes first.
pub fn filter_events(events: Vec<Event>, filter: &ExploreFilter) -> Vec<Event> {
    let mut seen = HashSet::new();

    events
        .into_iter()
        .filter(|e| filter.matches_category(e))
        .filter(|e| filter.range.contains(&e.date))
        .filter(|e| seen.insert(e.event_id))
        .collect()
}
