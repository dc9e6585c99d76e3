//! Core types and storage for evently.
//!
//! - `EventStore`: create/edit/delete/invite/RSVP over a key-value `Storage`
//! - `explore` for the global, filtered event feed
//! - `Evently` for configuration and opening the on-disk store

pub mod category;
pub mod date_range;
pub mod error;
pub mod event;
pub mod evently;
pub mod evently_config;
pub mod explore;
pub mod image;
pub mod storage;
pub mod store;
pub mod user;

pub use error::{EventlyError, EventlyResult};
pub use store::{DeleteOutcome, EventStore, InviteOutcome};
