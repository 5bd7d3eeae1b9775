// used for the backing file
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::construct::StoredRecord;
use crate::error::{HbnbError, Result};

/// The whole backing file: `"<Kind>.<id>"` to the flat stored object, in
/// registry order.
pub type Snapshot = IndexMap<String, StoredRecord>;

/// Where the registry keeps its durable copy.
///
/// `InMemory` turns every write and read into a no-op, which is what tests
/// and benchmarks want. `File` is the normal console setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceMode {
    InMemory,
    File(PathBuf),
}

// ------------- Persistence -------------
#[derive(Debug)]
pub struct Persistor {
    mode: PersistenceMode,
}

impl Persistor {
    pub fn new(mode: PersistenceMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> &PersistenceMode {
        &self.mode
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.mode {
            PersistenceMode::InMemory => None,
            PersistenceMode::File(path) => Some(path),
        }
    }

    /// Overwrites the backing file with the given snapshot in a single write.
    /// There is no retry; a failed write is fatal for the caller.
    pub fn write_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        let Some(path) = self.path() else {
            return Ok(());
        };
        let bytes = serde_json::to_vec(snapshot)
            .map_err(|e| HbnbError::Persistence(format!("could not serialize snapshot: {e}")))?;
        fs::write(path, &bytes).map_err(|e| {
            HbnbError::Persistence(format!("could not write '{}': {e}", path.display()))
        })?;
        debug!(path = %path.display(), records = snapshot.len(), bytes = bytes.len(), "snapshot written");
        Ok(())
    }

    /// Reads the backing file. A missing file is not an error and yields
    /// `None`; anything unreadable or unparseable is.
    pub fn read_snapshot(&self) -> Result<Option<Snapshot>> {
        let Some(path) = self.path() else {
            return Ok(None);
        };
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "no backing file, starting empty");
                return Ok(None);
            }
            Err(e) => {
                return Err(HbnbError::Persistence(format!(
                    "could not read '{}': {e}",
                    path.display()
                )));
            }
        };
        let snapshot: Snapshot = serde_json::from_str(&text).map_err(|e| HbnbError::DataCorruption {
            message: format!("'{}' is not a valid snapshot: {e}", path.display()),
        })?;
        info!(path = %path.display(), records = snapshot.len(), "snapshot read");
        Ok(Some(snapshot))
    }
}
