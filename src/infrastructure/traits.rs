//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::ffi::OsString;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

use crate::domain::RunOutcome;

/// Regular-file flag and permission bits of a path, symlinks followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub is_file: bool,
    /// POSIX permission bits (0 where the platform has none)
    pub mode: u32,
}

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Names of the direct entries of a directory, in listing order.
    ///
    /// Entries that cannot be read are left out.
    fn list_dir(&self, path: &Path) -> io::Result<Vec<OsString>>;

    /// Stat a path, following symlinks.
    fn stat(&self, path: &Path) -> io::Result<FileStat>;
}

/// Runs a program attached to the caller's terminal.
pub trait ProcessRunner: Send + Sync {
    /// Spawn `program` with `args`, inheriting stdin/stdout/stderr, and
    /// block until it terminates.
    fn run_inherited(&self, program: &Path, args: &[OsString]) -> RunOutcome;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        // Surface a missing or unreadable directory itself as an error;
        // individual entries that vanish mid-walk are skipped.
        std::fs::metadata(path)?;

        let names = WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_os_string())
            .collect();
        Ok(names)
    }

    fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let meta = std::fs::metadata(path)?;
        Ok(FileStat {
            is_file: meta.is_file(),
            mode: permission_bits(&meta),
        })
    }
}

#[cfg(unix)]
fn permission_bits(meta: &std::fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode()
}

#[cfg(not(unix))]
fn permission_bits(_meta: &std::fs::Metadata) -> u32 {
    0
}

/// Real process runner implementation.
#[derive(Debug, Default)]
pub struct RealProcessRunner;

impl ProcessRunner for RealProcessRunner {
    fn run_inherited(&self, program: &Path, args: &[OsString]) -> RunOutcome {
        // Command inherits stdio unless told otherwise.
        let status = match std::process::Command::new(program).args(args).status() {
            Ok(status) => status,
            Err(e) => return RunOutcome::spawn_failed(program, e),
        };

        if let Some(signal) = terminating_signal(&status) {
            return RunOutcome::Signaled(signal);
        }
        RunOutcome::Exited(status.code())
    }
}

#[cfg(unix)]
fn terminating_signal(status: &std::process::ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn terminating_signal(_status: &std::process::ExitStatus) -> Option<i32> {
    None
}
