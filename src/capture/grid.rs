use crate::foundation::error::{GridshotError, GridshotResult};

/// Requested tile size that disables tiling in practice.
///
/// With this sentinel every surface collapses to a single full-size tile.
pub const DEFAULT_TILE_SIZE: u32 = u32::MAX;

/// Geometry of one tile within a capture grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileSpec {
    /// Zero-based column index.
    pub col: u32,
    /// Zero-based row index.
    pub row: u32,
    /// Horizontal offset of the tile within the full surface.
    pub left: u32,
    /// Vertical offset of the tile within the full surface.
    pub top: u32,
    /// Effective tile width.
    pub width: u32,
    /// Effective tile height.
    pub height: u32,
}

impl TileSpec {
    /// Artifact name for this tile.
    ///
    /// Tile (0, 0) reuses the base name unsuffixed so single-tile captures keep their
    /// historical names; every other tile appends `_<col>_<row>` with zero-based decimal
    /// indices.
    pub fn artifact_name(&self, base: &str) -> String {
        if self.col == 0 && self.row == 0 {
            base.to_owned()
        } else {
            format!("{base}_{}_{}", self.col, self.row)
        }
    }
}

/// Compute the capture grid for a surface.
///
/// A tile size at least as large as both surface dimensions collapses the grid to a
/// single full-surface tile, whichever reconfigure policy is in force. Otherwise the grid
/// is `ceil(w / tile_size)` columns by `ceil(h / tile_size)` rows: interior tiles are
/// always exactly the requested tile size, and boundary tiles on the last column/row keep
/// that size too, overrunning the surface, unless `reconfigure` is set, in which case
/// they shrink to exactly the remaining area. When a dimension is an exact multiple of the
/// tile size there is no remainder and the flag changes nothing.
///
/// Tiles are enumerated per column left to right, each column top to bottom; the order
/// only matters for naming.
pub fn compute_grid(
    surface_width: u32,
    surface_height: u32,
    tile_size: u32,
    reconfigure: bool,
) -> GridshotResult<Vec<TileSpec>> {
    if surface_width == 0 || surface_height == 0 {
        return Err(GridshotError::capture(format!(
            "surface has no laid-out area ({surface_width}x{surface_height})"
        )));
    }
    if tile_size == 0 {
        return Err(GridshotError::capture("tile size must be positive"));
    }

    if tile_size >= surface_width.max(surface_height) {
        return Ok(vec![TileSpec {
            col: 0,
            row: 0,
            left: 0,
            top: 0,
            width: surface_width,
            height: surface_height,
        }]);
    }

    let cols = surface_width.div_ceil(tile_size);
    let rows = surface_height.div_ceil(tile_size);

    let mut grid = Vec::with_capacity((cols as usize) * (rows as usize));
    for col in 0..cols {
        let left = col * tile_size;
        let width = if reconfigure && col == cols - 1 {
            surface_width - left
        } else {
            tile_size
        };
        for row in 0..rows {
            let top = row * tile_size;
            let height = if reconfigure && row == rows - 1 {
                surface_height - top
            } else {
                tile_size
            };
            grid.push(TileSpec {
                col,
                row,
                left,
                top,
                width,
                height,
            });
        }
    }
    Ok(grid)
}

#[cfg(test)]
#[path = "../../tests/unit/capture/grid.rs"]
mod tests;
