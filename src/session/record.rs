use tracing::debug;

use crate::album::store::Album;
use crate::capture::engine::{self, CapturedTile};
use crate::capture::grid::{self, DEFAULT_TILE_SIZE};
use crate::foundation::error::{GridshotError, GridshotResult};
use crate::foundation::pixmap::Pixmap;
use crate::render::surface::{Renderer, Surface};
use crate::session::context::TestContext;
use crate::session::hierarchy::HierarchyDump;

/// Orchestrates captures against one album.
///
/// A session binds the album, the hierarchy dump integration, and the owning test's
/// identity, and carries the tiling knobs applied to every capture it starts. Each call to
/// [`CaptureSession::snap`] opens one [`RecordBuilder`], which either commits tiles to the
/// album or hands back a reconstructed pixmap for verification.
pub struct CaptureSession<A, S> {
    album: A,
    hierarchy: Box<dyn HierarchyDump<S>>,
    context: TestContext,
    tile_size: u32,
    tile_reconfigure: bool,
}

impl<A: Album, S: Surface> CaptureSession<A, S> {
    /// Create a session writing into `album` on behalf of the test identified by
    /// `context`.
    pub fn new(album: A, hierarchy: Box<dyn HierarchyDump<S>>, context: TestContext) -> Self {
        Self {
            album,
            hierarchy,
            context,
            tile_size: DEFAULT_TILE_SIZE,
            tile_reconfigure: false,
        }
    }

    /// Set the requested tile edge size for subsequent captures.
    ///
    /// The default is [`DEFAULT_TILE_SIZE`], which collapses every capture to a single
    /// full-surface tile.
    pub fn set_tile_size(&mut self, tile_size: u32) {
        self.tile_size = tile_size;
    }

    /// Enable or disable shrink-to-fit reallocation of boundary tiles.
    pub fn set_tile_reconfigure(&mut self, enabled: bool) {
        self.tile_reconfigure = enabled;
    }

    /// Begin one capture of `surface`.
    pub fn snap<'a, R: Renderer<S>>(
        &'a mut self,
        surface: &'a S,
        renderer: &'a mut R,
    ) -> RecordBuilder<'a, A, S, R> {
        RecordBuilder {
            album: &mut self.album,
            hierarchy: self.hierarchy.as_ref(),
            context: &self.context,
            surface,
            renderer,
            tile_size: self.tile_size,
            tile_reconfigure: self.tile_reconfigure,
            name: None,
            captured: None,
            reconstructed: None,
            recorded: false,
            failed: false,
        }
    }

    /// Borrow the session's album, for verification reads.
    pub fn album(&self) -> &A {
        &self.album
    }

    /// Mutably borrow the session's album.
    pub fn album_mut(&mut self) -> &mut A {
        &mut self.album
    }
}

/// One in-flight capture: `Building` until [`RecordBuilder::record`] commits it.
///
/// Capture work is lazy (nothing is rendered until [`RecordBuilder::bitmap`] or
/// [`RecordBuilder::record`] runs) and captured pixels are cached so repeated `bitmap()`
/// calls return equal data without re-rendering. After a commit no capture data is
/// accessible. There is no rollback or retry path for a failed commit: a failed
/// `record()` poisons the builder and every later call fails with an invalid-state
/// error.
pub struct RecordBuilder<'a, A, S, R> {
    album: &'a mut A,
    hierarchy: &'a dyn HierarchyDump<S>,
    context: &'a TestContext,
    surface: &'a S,
    renderer: &'a mut R,
    tile_size: u32,
    tile_reconfigure: bool,
    name: Option<String>,
    captured: Option<Vec<CapturedTile>>,
    reconstructed: Option<Pixmap>,
    recorded: bool,
    failed: bool,
}

impl<A, S, R> std::fmt::Debug for RecordBuilder<'_, A, S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordBuilder")
            .field("name", &self.name)
            .field("tile_size", &self.tile_size)
            .field("tile_reconfigure", &self.tile_reconfigure)
            .field("recorded", &self.recorded)
            .field("failed", &self.failed)
            .finish()
    }
}

impl<'a, A, S, R> RecordBuilder<'a, A, S, R>
where
    A: Album,
    S: Surface,
    R: Renderer<S>,
{
    /// Set the artifact base name.
    ///
    /// Validated immediately, before any rendering, against the allowed character set
    /// (ASCII letters, digits, underscore). The name must uniquely identify the artifact
    /// within the album.
    pub fn set_name(mut self, name: impl Into<String>) -> GridshotResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        self.name = Some(name);
        Ok(self)
    }

    /// Class of the test that owns this capture.
    pub fn test_class(&self) -> &str {
        self.context.test_class()
    }

    /// Name of the test that owns this capture.
    pub fn test_name(&self) -> &str {
        self.context.test_name()
    }

    /// Capture (if not already captured) and return the reconstructed full-surface
    /// pixmap for verification.
    ///
    /// Repeated pre-commit calls return the same cached pixels without re-rendering.
    /// Fails with an invalid-state error once the builder has been recorded, or after a
    /// failed `record()`.
    pub fn bitmap(&mut self) -> GridshotResult<&Pixmap> {
        if self.failed {
            return Err(GridshotError::invalid_state(
                "cannot access the capture bitmap after a failed record()",
            ));
        }
        if self.recorded {
            return Err(GridshotError::invalid_state(
                "cannot access the capture bitmap after record()",
            ));
        }
        if self.reconstructed.is_none() {
            self.ensure_captured()?;
            let tiles = match &self.captured {
                Some(tiles) => tiles,
                None => return Err(GridshotError::capture("capture produced no tiles")),
            };
            let full = engine::reconstruct(tiles, self.surface.width(), self.surface.height())?;
            self.reconstructed = Some(full);
        }
        match &self.reconstructed {
            Some(pixmap) => Ok(pixmap),
            None => Err(GridshotError::capture("capture produced no bitmap")),
        }
    }

    /// Commit the capture: persist every tile, write the hierarchy dump, and seal the
    /// builder.
    ///
    /// Tile artifacts follow the deterministic naming convention (tile (0, 0) keeps the
    /// base name, the rest append `_<col>_<row>`); the hierarchy dump lands as
    /// `<name>_dump.xml`. When no name was set, the identity from the session's
    /// [`TestContext`] supplies it. Any failure leaves the builder unusable: later
    /// `record()` or `bitmap()` calls fail with an invalid-state error instead of
    /// retrying the commit.
    #[tracing::instrument(skip_all)]
    pub fn record(&mut self) -> GridshotResult<()> {
        if self.failed {
            return Err(GridshotError::invalid_state(
                "cannot record() after a failed record()",
            ));
        }
        if self.recorded {
            return Err(GridshotError::invalid_state(
                "cannot record() again after record()",
            ));
        }

        let result = self.commit();
        if result.is_err() {
            self.failed = true;
            self.captured = None;
            self.reconstructed = None;
        }
        result
    }

    fn commit(&mut self) -> GridshotResult<()> {
        let name = match &self.name {
            Some(name) => name.clone(),
            None => self.context.default_artifact_name(),
        };
        validate_name(&name)?;

        self.ensure_captured()?;
        let tiles = match &self.captured {
            Some(tiles) => tiles,
            None => return Err(GridshotError::capture("capture produced no tiles")),
        };
        for tile in tiles {
            let tile_name = tile.spec.artifact_name(&name);
            self.album.put(&tile_name, &tile.pixmap)?;
        }
        let tile_count = tiles.len();

        let mut dump = Vec::new();
        self.hierarchy.dump(self.surface, &mut dump)?;
        self.album.put_dump(&name, &dump)?;
        self.album.flush()?;

        self.captured = None;
        self.reconstructed = None;
        self.recorded = true;
        debug!(name = %name, tiles = tile_count, "recorded capture");
        Ok(())
    }

    fn ensure_captured(&mut self) -> GridshotResult<()> {
        if self.captured.is_none() {
            let grid = grid::compute_grid(
                self.surface.width(),
                self.surface.height(),
                self.tile_size,
                self.tile_reconfigure,
            )?;
            let tiles = engine::capture_tiles(self.renderer, self.surface, &grid)?;
            self.captured = Some(tiles);
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> GridshotResult<()> {
    if name.is_empty() {
        return Err(GridshotError::invalid_name("artifact name must be non-empty"));
    }
    if let Some(c) = name
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && *c != '_')
    {
        return Err(GridshotError::invalid_name(format!(
            "artifact name {name:?} contains {c:?}; allowed are ASCII letters, digits, and underscore"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/session/record.rs"]
mod tests;
