//! Console settings.
//!
//! Layered the usual way: built in defaults, then an optional `hbnb.json`
//! (or `.toml`, `.yaml`) in the working directory, then `HBNB_*` environment
//! variables such as `HBNB_FILE_PATH=/tmp/objects.json`.

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;
use crate::persist::PersistenceMode;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Backing file for the registry.
    #[serde(default = "default_file_path")]
    pub file_path: PathBuf,
    /// Printed before each line is read from a terminal.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Keep everything in memory and never touch `file_path`.
    #[serde(default)]
    pub in_memory: bool,
}

fn default_file_path() -> PathBuf {
    PathBuf::from("file.json")
}

fn default_prompt() -> String {
    "(hbnb) ".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            file_path: default_file_path(),
            prompt: default_prompt(),
            in_memory: false,
        }
    }
}

impl Settings {
    /// Reads `hbnb.*` from the working directory plus the environment.
    pub fn load() -> Result<Self> {
        Self::load_from("hbnb")
    }

    /// Same as [`Settings::load`] with a different file stem.
    pub fn load_from(name: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(name).required(false))
            .add_source(Environment::with_prefix("HBNB"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn persistence_mode(&self) -> PersistenceMode {
        if self.in_memory {
            PersistenceMode::InMemory
        } else {
            PersistenceMode::File(self.file_path.clone())
        }
    }
}
