use std::io::Write;

use crate::foundation::error::GridshotResult;

/// Writes a structural serialization of a surface.
///
/// Invoked once per committed capture; the output is persisted next to the pixel
/// artifacts as `<name>_dump.xml`. The serialization format is owned by the surface
/// integration, not by this crate.
pub trait HierarchyDump<S> {
    /// Serialize the structure of `surface` into `out`.
    fn dump(&self, surface: &S, out: &mut dyn Write) -> GridshotResult<()>;
}

/// Hierarchy dump that writes nothing, for surfaces with no structural description.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullHierarchy;

impl<S> HierarchyDump<S> for NullHierarchy {
    fn dump(&self, _surface: &S, _out: &mut dyn Write) -> GridshotResult<()> {
        Ok(())
    }
}
