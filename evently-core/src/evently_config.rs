//! The `config.toml` that says where the event store lives.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EventlyError, EventlyResult};

static DEFAULT_DATA_PATH: &str = "~/.evently";

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

fn is_default_data_path(p: &PathBuf) -> bool {
    *p == default_data_path()
}

/// Both keys are optional; an empty file means the store sits in `~/.evently`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EventlyConfig {
    /// Directory holding the `users` and `categories` collections
    #[serde(default = "default_data_path", skip_serializing_if = "is_default_data_path")]
    pub data_dir: PathBuf,

    /// Category used by `create` when none is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_category: Option<String>,
}

impl Default for EventlyConfig {
    fn default() -> Self {
        EventlyConfig {
            data_dir: default_data_path(),
            default_category: None,
        }
    }
}

impl EventlyConfig {
    pub fn config_path() -> EventlyResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| EventlyError::Config("Could not determine config directory".into()))?
            .join("evently");

        Ok(config_dir.join("config.toml"))
    }

    pub fn save_to(&self, path: &Path) -> EventlyResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| EventlyError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| EventlyError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Starter file for first runs. Every key is present but commented, so
    /// loading it yields [`EventlyConfig::default`].
    pub fn create_default_config(path: &Path) -> EventlyResult<()> {
        let contents = format!(
            "\
# evently configuration

# Where the event store lives:
# data_dir = \"{}\"

# Category for new events when --category is omitted:
# default_category = \"Meetup\"
",
            DEFAULT_DATA_PATH
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EventlyError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| EventlyError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
