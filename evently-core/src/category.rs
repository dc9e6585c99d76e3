//! Event categories, persisted separately from users.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

impl Category {
    /// New category with a millisecond-timestamp id.
    pub fn new(name: &str) -> Self {
        Category {
            id: Utc::now().timestamp_millis().to_string(),
            name: name.to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Append a category named `name` unless it is blank or an exact
/// (case-sensitive) name match already exists. Returns the added category.
pub fn add(categories: &mut Vec<Category>, name: &str) -> Option<Category> {
    if name.trim().is_empty() || categories.iter().any(|c| c.name == name) {
        return None;
    }

    let category = Category::new(name);
    categories.push(category.clone());
    Some(category)
}
