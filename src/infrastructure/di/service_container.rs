//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{DiscoveryService, DispatchService, ManifestService};
use crate::config::Settings;
use crate::infrastructure::traits::{
    FileSystem, ProcessRunner, RealFileSystem, RealProcessRunner,
};

/// Container holding all application services.
pub struct ServiceContainer {
    pub dispatch: DispatchService,
    pub manifest: ManifestService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem), Arc::new(RealProcessRunner))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        let discovery = Arc::new(DiscoveryService::new(fs.clone(), &settings.discovery));
        let dispatch = DispatchService::new(discovery.clone(), runner);
        let manifest = ManifestService::new(fs, discovery, settings.manifest);

        Self {
            dispatch,
            manifest,
        }
    }
}
