use std::fs::{self, File, OpenOptions};
use std::io::{Cursor, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use tracing::debug;

use crate::album::store::{Album, LedgerEntry, dump_names, pixels_file};
use crate::foundation::error::{GridshotError, GridshotResult};
use crate::foundation::pixmap::Pixmap;

const LEDGER_FILE: &str = "metadata.jsonl";

/// Filesystem album: PNG artifacts plus a JSON-lines metadata ledger.
///
/// Artifact bytes are fully written before their ledger line is appended, so a failed
/// write never leaves a ledger entry pointing at a missing file. Ledger appends are
/// whole-line writes under an internal mutex.
pub struct FsAlbum {
    root: PathBuf,
    ledger: Mutex<File>,
}

impl FsAlbum {
    /// Open an album rooted at `root`, creating the directory and ledger as needed.
    pub fn open(root: impl Into<PathBuf>) -> GridshotResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| {
            GridshotError::storage(format!("create album dir {}: {e}", root.display()))
        })?;
        let ledger_path = root.join(LEDGER_FILE);
        let ledger = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&ledger_path)
            .map_err(|e| {
                GridshotError::storage(format!("open ledger {}: {e}", ledger_path.display()))
            })?;
        Ok(Self {
            root,
            ledger: Mutex::new(ledger),
        })
    }

    /// Album storage directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the metadata ledger file.
    pub fn metadata_path(&self) -> PathBuf {
        self.root.join(LEDGER_FILE)
    }

    fn write_file(&self, file_name: &str, bytes: &[u8]) -> GridshotResult<PathBuf> {
        let path = self.root.join(file_name);
        fs::write(&path, bytes)
            .map_err(|e| GridshotError::storage(format!("write {}: {e}", path.display())))?;
        Ok(path)
    }

    fn append_entry(&self, entry: &LedgerEntry) -> GridshotResult<()> {
        let mut line = serde_json::to_string(entry).context("encode ledger entry")?;
        line.push('\n');
        let mut ledger = self
            .ledger
            .lock()
            .map_err(|_| GridshotError::storage("album ledger lock poisoned"))?;
        ledger.write_all(line.as_bytes()).map_err(|e| {
            GridshotError::storage(format!("append ledger entry for {}: {e}", entry.name))
        })
    }
}

impl Album for FsAlbum {
    fn put(&mut self, name: &str, pixmap: &Pixmap) -> GridshotResult<PathBuf> {
        if name.is_empty() {
            return Err(GridshotError::storage("artifact name must be non-empty"));
        }

        let img =
            image::RgbaImage::from_raw(pixmap.width(), pixmap.height(), pixmap.to_rgba_bytes())
                .ok_or_else(|| {
                    GridshotError::storage("pixel payload does not match pixmap dimensions")
                })?;
        let mut png = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .context("encode album artifact")?;

        let file = pixels_file(name);
        let path = self.write_file(&file, &png)?;
        self.append_entry(&LedgerEntry {
            name: name.to_owned(),
            file,
        })?;
        debug!(name, path = %path.display(), "stored pixel artifact");
        Ok(path)
    }

    fn get(&self, name: &str) -> GridshotResult<Option<Pixmap>> {
        let path = self.root.join(pixels_file(name));
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(GridshotError::storage(format!(
                    "read {}: {e}",
                    path.display()
                )));
            }
        };
        let img = image::load_from_memory(&bytes)
            .context("decode album artifact")?
            .to_rgba8();
        let (width, height) = img.dimensions();
        Ok(Some(Pixmap::from_rgba_bytes(width, height, img.as_raw())?))
    }

    fn put_dump(&mut self, name: &str, dump: &[u8]) -> GridshotResult<PathBuf> {
        let (entry_name, file) = dump_names(name);
        let path = self.write_file(&file, dump)?;
        self.append_entry(&LedgerEntry {
            name: entry_name,
            file,
        })?;
        debug!(name, path = %path.display(), "stored hierarchy dump");
        Ok(path)
    }

    fn entries(&self) -> GridshotResult<Vec<LedgerEntry>> {
        let path = self.metadata_path();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(GridshotError::storage(format!(
                    "read ledger {}: {e}",
                    path.display()
                )));
            }
        };
        let mut entries = Vec::new();
        for line in contents.lines().filter(|l| !l.trim().is_empty()) {
            let entry: LedgerEntry = serde_json::from_str(line)
                .with_context(|| format!("parse ledger line {line:?}"))?;
            entries.push(entry);
        }
        Ok(entries)
    }

    fn flush(&mut self) -> GridshotResult<()> {
        let ledger = self
            .ledger
            .lock()
            .map_err(|_| GridshotError::storage("album ledger lock poisoned"))?;
        ledger
            .sync_all()
            .map_err(|e| GridshotError::storage(format!("sync ledger: {e}")))
    }

    fn cleanup(&mut self) -> GridshotResult<()> {
        match fs::remove_dir_all(&self.root) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(GridshotError::storage(format!(
                "remove album dir {}: {e}",
                self.root.display()
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/album/fs.rs"]
mod tests;
