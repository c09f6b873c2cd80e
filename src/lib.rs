//! Script launcher for packages shipping executable scripts.
//!
//! Two binaries share this library:
//! - `xsheel` discovers the package's scripts and runs one by name,
//!   passing arguments, stdio and exit status through.
//! - `xsheel-sync` rewrites the package manifest's command mapping
//!   from the same discovery.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
