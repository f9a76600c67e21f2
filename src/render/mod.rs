//! Rendering capability traits and owner-thread hosting.
//!
//! The crate never rasterizes anything itself: implementations of [`surface::Renderer`]
//! paint translated surface regions into pixmaps, one implementation per surface kind.

/// Owner-thread marshaling for surfaces that must render on the thread owning them.
pub mod host;
/// Surface and renderer capability traits.
pub mod surface;
