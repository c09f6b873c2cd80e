//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, ProcessRunner)
//! but are themselves concrete structs, not traits.

mod discovery;
mod dispatch;
mod manifest;

pub use discovery::DiscoveryService;
pub use dispatch::DispatchService;
pub use manifest::{ManifestService, SyncReport};
