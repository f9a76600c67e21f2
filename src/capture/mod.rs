//! Tile geometry and the tiled capture engine.
//!
//! Captures that exceed practical single-allocation bitmap sizes are split into a grid of
//! tiles, rendered independently, and reassembled for verification.

/// Per-tile rendering and full-surface reconstruction.
pub mod engine;
/// Tile grid geometry and the boundary-tile reconfiguration policy.
pub mod grid;
