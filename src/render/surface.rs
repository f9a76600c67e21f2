use crate::foundation::error::GridshotResult;
use crate::foundation::pixmap::Pixmap;

/// A measured, laid-out drawable surface.
///
/// Layout happens outside this crate: by the time a surface reaches a capture session it
/// must know its pixel size. A 0x0 surface is treated as "not laid out" and fails capture
/// before any tile is allocated.
pub trait Surface {
    /// Laid-out width in pixels.
    fn width(&self) -> u32;

    /// Laid-out height in pixels.
    fn height(&self) -> u32;
}

/// Capability for painting one kind of surface into a pixmap.
///
/// There is one implementation per supported surface kind; the capture engine depends only
/// on this trait.
pub trait Renderer<S: Surface> {
    /// Paint the surface content visible in
    /// `[origin_x, origin_x + target.width()) x [origin_y, origin_y + target.height())`
    /// into `target` at local origin (0, 0).
    ///
    /// The target pixmap is the clip. Requested rectangles may extend beyond the surface's
    /// true bounds and implementations must tolerate that without failing; pixel values
    /// outside the true bounds are implementation-defined. Implementations are assumed
    /// non-reentrant for a given surface: tiles are rendered sequentially within one
    /// capture.
    fn render(
        &mut self,
        surface: &S,
        origin_x: u32,
        origin_y: u32,
        target: &mut Pixmap,
    ) -> GridshotResult<()>;
}
