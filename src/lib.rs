//! Gridshot captures pixel-accurate renderings of UI surfaces into persisted image
//! artifacts for screenshot regression testing.
//!
//! Surfaces that exceed practical single-allocation bitmap sizes are captured as a grid
//! of tiles: each tile is rendered independently with translated coordinates, boundary
//! tiles can optionally be shrunk to exactly fit the remaining surface area, and the full
//! image can be reconstructed from its tiles for pixel-exact verification against a
//! monolithic capture. The public API is session-oriented:
//!
//! - Implement [`Surface`] and [`Renderer`] for the thing being drawn
//! - Open an [`Album`] ([`FsAlbum`] persists PNGs plus a metadata ledger)
//! - Create a [`CaptureSession`], `snap` a surface, then [`RecordBuilder::record`] tiles
//!   into the album or read the reconstructed [`RecordBuilder::bitmap`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Album storage for captured artifacts.
pub mod album;
/// Tile geometry and the tiled capture engine.
pub mod capture;
/// Rendering capability traits and owner-thread hosting.
pub mod render;
/// Session-oriented capture API.
pub mod session;

pub use crate::foundation::error::{GridshotError, GridshotResult};
pub use crate::foundation::pixmap::{Pixmap, TRANSPARENT};

pub use crate::album::fs::FsAlbum;
pub use crate::album::store::{Album, InMemoryAlbum, LedgerEntry};
pub use crate::capture::engine::{CapturedTile, capture_tiles, reconstruct};
pub use crate::capture::grid::{DEFAULT_TILE_SIZE, TileSpec, compute_grid};
pub use crate::render::host::{HostSurface, SurfaceHost};
pub use crate::render::surface::{Renderer, Surface};
pub use crate::session::context::TestContext;
pub use crate::session::hierarchy::{HierarchyDump, NullHierarchy};
pub use crate::session::record::{CaptureSession, RecordBuilder};
