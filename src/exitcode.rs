//! Exit codes used by the launcher
//!
//! Child exit codes are passed through unchanged; these cover the
//! launcher's own outcomes.

/// Successful termination
pub const OK: i32 = 0;

/// Usage error, unknown script, spawn failure, or I/O failure
pub const FAILURE: i32 = 1;

/// Child was terminated by a signal
pub const SIGNALED: i32 = 128;
