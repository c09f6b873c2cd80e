//! Domain entities: core data structures

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::{collate, DomainError};

/// Validated bare script name.
///
/// Names are looked up in the discovered set only. A name carrying a path
/// separator could address files outside of it, so it is rejected before
/// any filesystem access happens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScriptName(String);

impl ScriptName {
    /// Validate a user supplied name.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if raw.is_empty() {
            return Err(DomainError::EmptyScriptName);
        }
        if raw.contains(|c| c == '/' || c == '\\') {
            return Err(DomainError::InvalidScriptName(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScriptName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Directory a candidate was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The package's scripts directory
    Scripts,
    /// The package root itself
    Root,
}

/// A runnable script discovered in the package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptEntry {
    /// File base name, used as the command name
    pub name: String,
    /// Location of the file (package root joined with its directory)
    pub path: PathBuf,
}

/// Discovered scripts, sorted by name.
///
/// Built fresh for every invocation; names are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptSet {
    entries: Vec<ScriptEntry>,
}

impl ScriptSet {
    /// Build a set from arbitrary entries, sorting them with [`collate`].
    ///
    /// Callers are expected to hand in unique names; the merge rule
    /// (later directory wins) is applied before this point.
    pub fn from_entries(mut entries: Vec<ScriptEntry>) -> Self {
        entries.sort_by(|a, b| collate(&a.name, &b.name));
        Self { entries }
    }

    /// Find a script by exact name.
    pub fn get(&self, name: &str) -> Option<&ScriptEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScriptEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ScriptSet {
    type Item = &'a ScriptEntry;
    type IntoIter = std::slice::Iter<'a, ScriptEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Result of running a script to completion.
///
/// Spawning, waiting and signal detection collapse into this one value so
/// callers only decide on an exit code.
#[derive(Debug)]
pub enum RunOutcome {
    /// Child exited normally; `None` if the platform reported no code
    Exited(Option<i32>),
    /// Child was terminated by a signal
    Signaled(i32),
    /// Child could not be started
    SpawnFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl RunOutcome {
    pub fn spawn_failed(path: &Path, source: std::io::Error) -> Self {
        Self::SpawnFailed {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Exit code the launcher should terminate with.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Exited(Some(code)) => *code,
            RunOutcome::Exited(None) => crate::exitcode::FAILURE,
            RunOutcome::Signaled(_) => crate::exitcode::SIGNALED,
            RunOutcome::SpawnFailed { .. } => crate::exitcode::FAILURE,
        }
    }
}
