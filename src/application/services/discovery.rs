//! Script discovery service
//!
//! Scans the package's scripts directory and the package root for runnable
//! files.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::config::DiscoverySettings;
use crate::domain::{is_executable, Scope, ScriptEntry, ScriptFilter, ScriptSet};
use crate::infrastructure::traits::FileSystem;

/// Service for discovering executable scripts in a package.
pub struct DiscoveryService {
    fs: Arc<dyn FileSystem>,
    filter: ScriptFilter,
    scripts_dir: String,
}

impl DiscoveryService {
    /// Create a new discovery service.
    pub fn new(fs: Arc<dyn FileSystem>, settings: &DiscoverySettings) -> Self {
        Self {
            fs,
            filter: settings.filter(),
            scripts_dir: settings.scripts_dir.clone(),
        }
    }

    /// Directories to scan, in scan order. Later directories win on name clashes.
    pub fn candidate_dirs(&self, root: &Path) -> [(PathBuf, Scope); 2] {
        [
            (root.join(&self.scripts_dir), Scope::Scripts),
            (root.to_path_buf(), Scope::Root),
        ]
    }

    /// Discover all runnable scripts below `root`.
    ///
    /// Never fails: missing directories and entries that cannot be
    /// stat'ed are skipped.
    #[instrument(skip(self))]
    pub fn discover(&self, root: &Path) -> ScriptSet {
        let mut found: HashMap<String, PathBuf> = HashMap::new();

        for (dir, scope) in self.candidate_dirs(root) {
            if !self.fs.is_dir(&dir) {
                debug!("discover: skipping missing dir {}", dir.display());
                continue;
            }
            let names = match self.fs.list_dir(&dir) {
                Ok(names) => names,
                Err(e) => {
                    debug!("discover: cannot list {}: {}", dir.display(), e);
                    continue;
                }
            };

            for raw in names {
                let Some(name) = raw.to_str() else {
                    debug!("discover: skipping non UTF-8 name {:?}", raw);
                    continue;
                };
                if !self.filter.admits(name, scope) {
                    continue;
                }

                let path = dir.join(name);
                match self.fs.stat(&path) {
                    Ok(stat) if stat.is_file && is_executable(stat.mode) => {
                        if let Some(previous) = found.insert(name.to_string(), path) {
                            debug!(
                                "discover: {} overrides {}",
                                dir.join(name).display(),
                                previous.display()
                            );
                        }
                    }
                    Ok(_) => {}
                    Err(e) => debug!("discover: cannot stat {}: {}", path.display(), e),
                }
            }
        }

        debug!("discover: found {} scripts", found.len());
        ScriptSet::from_entries(
            found
                .into_iter()
                .map(|(name, path)| ScriptEntry { name, path })
                .collect(),
        )
    }
}
