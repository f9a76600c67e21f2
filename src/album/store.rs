use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{GridshotError, GridshotResult};
use crate::foundation::pixmap::Pixmap;

/// One ledger record mapping an artifact name to its stored file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Logical artifact name.
    pub name: String,
    /// File name within the album's storage area.
    pub file: String,
}

/// Storage contract for captured artifacts.
///
/// An album persists named pixmaps plus companion hierarchy dumps and records every
/// committed artifact in an append-only metadata ledger. An artifact and its ledger entry
/// are committed together or not at all: a failed write must leave no ledger entry
/// referencing a missing artifact. Ledger appends are serialized by the implementation so
/// concurrent sessions committing to the same album cannot interleave entries.
pub trait Album: Send {
    /// Persist `pixmap` under `name` and record it in the ledger.
    ///
    /// Returns the location of the stored artifact. The caller transfers ownership of the
    /// pixel content: it must not mutate the buffer after a successful put.
    fn put(&mut self, name: &str, pixmap: &Pixmap) -> GridshotResult<PathBuf>;

    /// Load a previously persisted pixmap by name.
    fn get(&self, name: &str) -> GridshotResult<Option<Pixmap>>;

    /// Persist a structural hierarchy dump for `name` as `<name>_dump.xml`.
    fn put_dump(&mut self, name: &str, dump: &[u8]) -> GridshotResult<PathBuf>;

    /// All ledger entries in commit order.
    fn entries(&self) -> GridshotResult<Vec<LedgerEntry>>;

    /// Ledger entries whose name contains `needle`.
    fn find(&self, needle: &str) -> GridshotResult<Vec<LedgerEntry>> {
        Ok(self
            .entries()?
            .into_iter()
            .filter(|e| e.name.contains(needle))
            .collect())
    }

    /// Force buffered ledger writes to durable storage.
    fn flush(&mut self) -> GridshotResult<()>;

    /// Delete the album's storage area.
    fn cleanup(&mut self) -> GridshotResult<()>;
}

/// File name of a stored pixel artifact.
pub(crate) fn pixels_file(name: &str) -> String {
    format!("{name}.png")
}

/// Ledger name and file name of a stored hierarchy dump.
pub(crate) fn dump_names(name: &str) -> (String, String) {
    (format!("{name}_dump"), format!("{name}_dump.xml"))
}

/// In-memory album for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemoryAlbum {
    artifacts: HashMap<String, Pixmap>,
    dumps: HashMap<String, Vec<u8>>,
    ledger: Vec<LedgerEntry>,
}

impl InMemoryAlbum {
    /// Create a new empty in-memory album.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow a stored hierarchy dump by base name, if any.
    pub fn dump(&self, name: &str) -> Option<&[u8]> {
        self.dumps.get(name).map(Vec::as_slice)
    }
}

impl Album for InMemoryAlbum {
    fn put(&mut self, name: &str, pixmap: &Pixmap) -> GridshotResult<PathBuf> {
        if name.is_empty() {
            return Err(GridshotError::storage("artifact name must be non-empty"));
        }
        let file = pixels_file(name);
        self.artifacts.insert(name.to_owned(), pixmap.clone());
        self.ledger.push(LedgerEntry {
            name: name.to_owned(),
            file: file.clone(),
        });
        Ok(PathBuf::from(file))
    }

    fn get(&self, name: &str) -> GridshotResult<Option<Pixmap>> {
        Ok(self.artifacts.get(name).cloned())
    }

    fn put_dump(&mut self, name: &str, dump: &[u8]) -> GridshotResult<PathBuf> {
        let (entry_name, file) = dump_names(name);
        self.dumps.insert(name.to_owned(), dump.to_vec());
        self.ledger.push(LedgerEntry {
            name: entry_name,
            file: file.clone(),
        });
        Ok(PathBuf::from(file))
    }

    fn entries(&self) -> GridshotResult<Vec<LedgerEntry>> {
        Ok(self.ledger.clone())
    }

    fn flush(&mut self) -> GridshotResult<()> {
        Ok(())
    }

    fn cleanup(&mut self) -> GridshotResult<()> {
        self.artifacts.clear();
        self.dumps.clear();
        self.ledger.clear();
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/album/store.rs"]
mod tests;
