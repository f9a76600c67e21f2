//! Album storage for captured artifacts.
//!
//! An album is a named collection of persisted artifacts plus their metadata ledger. The
//! capture core only talks to the [`store::Album`] trait; the filesystem implementation
//! here is the reference store.

/// Filesystem-backed album (PNG artifacts, JSON-lines ledger).
pub mod fs;
/// Album trait, ledger records, and the in-memory test album.
pub mod store;
