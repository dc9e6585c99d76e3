//! Entry point for front-ends: the loaded config and the file-backed store
//! under its `data_dir`.

use std::path::{Path, PathBuf};

use config::{Config, File};

use crate::error::{EventlyError, EventlyResult};
use crate::evently_config::EventlyConfig;
use crate::storage::FileStorage;
use crate::store::EventStore;

#[derive(Clone)]
pub struct Evently {
    config: EventlyConfig,
    config_path: PathBuf,
}

impl Evently {
    /// Read the per-user config file. A first run writes the commented
    /// starter file and then reads it like any other.
    pub fn load() -> EventlyResult<Self> {
        Self::load_from(&EventlyConfig::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> EventlyResult<Self> {
        if !config_path.exists() {
            EventlyConfig::create_default_config(config_path)?;
        }

        let config: EventlyConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()
            .map_err(|e| EventlyError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| EventlyError::Config(e.to_string()))?;

        Ok(Evently {
            config,
            config_path: config_path.to_path_buf(),
        })
    }

    pub fn config(&self) -> &EventlyConfig {
        &self.config
    }

    /// `data_dir` with `~` expanded; this is where `users.json` and
    /// `categories.json` live.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str =
            shellexpand::tilde(&self.config.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// `data_dir` exactly as configured, for user-facing messages.
    pub fn display_path(&self) -> PathBuf {
        self.config.data_dir.clone()
    }

    pub fn default_category(&self) -> Option<&str> {
        self.config.default_category.as_deref()
    }

    /// Remember `name` as the category `create` falls back to.
    pub fn set_default_category(&mut self, name: &str) -> EventlyResult<()> {
        self.config.default_category = Some(name.to_string());
        self.config.save_to(&self.config_path)
    }

    /// A store over [`Self::data_path`]. Nothing is read until the first call.
    pub fn store(&self) -> EventStore<FileStorage> {
        EventStore::new(FileStorage::new(self.data_path()))
    }
}
