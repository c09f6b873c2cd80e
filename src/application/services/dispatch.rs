//! Script dispatch service
//!
//! Resolves a user supplied name against a fresh discovery and runs the
//! matching script with inherited stdio.

use std::ffi::OsString;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::services::DiscoveryService;
use crate::application::ApplicationResult;
use crate::domain::{DomainError, RunOutcome, ScriptEntry, ScriptName, ScriptSet};
use crate::infrastructure::traits::ProcessRunner;

/// Service for looking up and running scripts by name.
pub struct DispatchService {
    discovery: Arc<DiscoveryService>,
    runner: Arc<dyn ProcessRunner>,
}

impl DispatchService {
    /// Create a new dispatch service.
    pub fn new(discovery: Arc<DiscoveryService>, runner: Arc<dyn ProcessRunner>) -> Self {
        Self { discovery, runner }
    }

    /// All scripts currently available below `root`.
    pub fn list(&self, root: &Path) -> ScriptSet {
        self.discovery.discover(root)
    }

    /// Resolve a validated name to a discovered script.
    pub fn resolve(&self, root: &Path, name: &ScriptName) -> ApplicationResult<ScriptEntry> {
        let scripts = self.discovery.discover(root);
        scripts
            .get(name.as_str())
            .cloned()
            .ok_or_else(|| DomainError::UnknownScript(name.to_string()).into())
    }

    /// Run the script called `name` with `args`, blocking until it terminates.
    ///
    /// A script that cannot be started is reported through the returned
    /// outcome, not as an error.
    #[instrument(skip(self, args))]
    pub fn run(
        &self,
        root: &Path,
        name: &ScriptName,
        args: &[OsString],
    ) -> ApplicationResult<RunOutcome> {
        let entry = self.resolve(root, name)?;
        info!("run: {} -> {}", entry.name, entry.path.display());
        debug!("run: args={:?}", args);

        let outcome = self.runner.run_inherited(&entry.path, args);
        debug!("run: outcome={:?}", outcome);
        Ok(outcome)
    }
}
