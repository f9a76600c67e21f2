//! Session-oriented capture API.
//!
//! A [`record::CaptureSession`] binds an album, a hierarchy dump integration, and the
//! owning test's identity; each `snap` opens a one-shot [`record::RecordBuilder`].

/// Explicit test identity passed into sessions.
pub mod context;
/// Structural hierarchy dump contract.
pub mod hierarchy;
/// Capture sessions and the one-shot record builder.
pub mod record;
