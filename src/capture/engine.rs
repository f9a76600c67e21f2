use tracing::{debug, trace};

use crate::capture::grid::TileSpec;
use crate::foundation::error::GridshotResult;
use crate::foundation::pixmap::Pixmap;
use crate::render::surface::{Renderer, Surface};

/// One captured tile: its grid geometry plus the rendered pixels.
#[derive(Clone, Debug)]
pub struct CapturedTile {
    /// Grid geometry of the tile.
    pub spec: TileSpec,
    /// Rendered pixels, sized to the spec's effective dimensions.
    pub pixmap: Pixmap,
}

/// Capture every tile of `grid` from `surface`.
///
/// Each tile gets a fresh transparent pixmap of its effective size, and the renderer is
/// invoked with the surface translated so the tile's `(left, top)` maps to buffer-local
/// `(0, 0)`. The target pixmap is the clip: for boundary tiles that overrun the surface
/// the renderer decides what the out-of-surface pixels hold. Tiles are rendered
/// sequentially; renderers are non-reentrant for a given surface.
pub fn capture_tiles<S, R>(
    renderer: &mut R,
    surface: &S,
    grid: &[TileSpec],
) -> GridshotResult<Vec<CapturedTile>>
where
    S: Surface,
    R: Renderer<S>,
{
    debug!(
        tiles = grid.len(),
        width = surface.width(),
        height = surface.height(),
        "capturing tile grid"
    );

    let mut tiles = Vec::with_capacity(grid.len());
    for spec in grid {
        let mut pixmap = Pixmap::new(spec.width, spec.height)?;
        renderer.render(surface, spec.left, spec.top, &mut pixmap)?;
        trace!(col = spec.col, row = spec.row, "captured tile");
        tiles.push(CapturedTile {
            spec: *spec,
            pixmap,
        });
    }
    Ok(tiles)
}

/// Reassemble a full-surface pixmap from captured tiles.
///
/// Every tile is blitted at its `(left, top)` offset; non-reconfigured boundary tiles that
/// overrun the surface are truncated to the full buffer's bounds. Reconstructing from
/// tiles is pixel-identical to a direct single-shot capture for every coordinate within
/// the true surface bounds, whichever reconfigure policy produced the tiles.
pub fn reconstruct(tiles: &[CapturedTile], width: u32, height: u32) -> GridshotResult<Pixmap> {
    let mut full = Pixmap::new(width, height)?;
    for tile in tiles {
        full.blit(&tile.pixmap, tile.spec.left, tile.spec.top);
    }
    Ok(full)
}

#[cfg(test)]
#[path = "../../tests/unit/capture/engine.rs"]
mod tests;
