//! Manifest synchronization service
//!
//! Rewrites the command mapping of the package manifest from a fresh
//! discovery. Everything else in the manifest is left as it was.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use crate::application::services::DiscoveryService;
use crate::application::{ApplicationResult, PathContext};
use crate::config::ManifestSettings;
use crate::domain::DomainError;
use crate::infrastructure::traits::FileSystem;
use crate::util::path::relative_slash_path;

/// Result of planning or performing a sync.
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// Manifest file location
    pub path: PathBuf,
    /// Command mapping in manifest order, dispatcher entry first
    pub entries: Vec<(String, String)>,
    /// Rendered manifest content
    pub content: String,
    /// Whether `content` differs from what is on disk
    pub changed: bool,
}

/// Service for regenerating the manifest's command mapping.
pub struct ManifestService {
    fs: Arc<dyn FileSystem>,
    discovery: Arc<DiscoveryService>,
    settings: ManifestSettings,
}

impl ManifestService {
    /// Create a new manifest service.
    pub fn new(
        fs: Arc<dyn FileSystem>,
        discovery: Arc<DiscoveryService>,
        settings: ManifestSettings,
    ) -> Self {
        Self {
            fs,
            discovery,
            settings,
        }
    }

    pub fn manifest_path(&self, root: &Path) -> PathBuf {
        root.join(&self.settings.file)
    }

    /// The command mapping for the current package state.
    ///
    /// The dispatcher's own entry comes first; discovered scripts follow in
    /// name order with root-relative, forward-slash paths. A script named
    /// like the dispatcher replaces its path but keeps the first slot.
    pub fn command_entries(&self, root: &Path) -> Vec<(String, String)> {
        let mut entries = vec![(
            self.settings.command_name.clone(),
            self.settings.command_path.clone(),
        )];

        for script in &self.discovery.discover(root) {
            let rel = relative_slash_path(root, &script.path);
            match entries.iter_mut().find(|(name, _)| *name == script.name) {
                Some(existing) => existing.1 = rel,
                None => entries.push((script.name.clone(), rel)),
            }
        }
        entries
    }

    /// Render `current` manifest content with the mapping field replaced.
    pub fn render(
        &self,
        manifest: &Path,
        current: &str,
        entries: &[(String, String)],
    ) -> ApplicationResult<String> {
        let mut doc: Value =
            serde_json::from_str(current).with_path_context("parse manifest", manifest)?;

        let object = doc
            .as_object_mut()
            .ok_or_else(|| DomainError::InvalidManifest(manifest.to_path_buf()))?;

        let mapping: Map<String, Value> = entries
            .iter()
            .map(|(name, path)| (name.clone(), Value::String(path.clone())))
            .collect();
        object.insert(self.settings.field.clone(), Value::Object(mapping));

        let mut rendered =
            serde_json::to_string_pretty(&doc).with_path_context("serialize manifest", manifest)?;
        rendered.push('\n');
        Ok(rendered)
    }

    /// Compute the new manifest without writing it.
    #[instrument(skip(self))]
    pub fn plan(&self, root: &Path) -> ApplicationResult<SyncReport> {
        let path = self.manifest_path(root);
        let current = self
            .fs
            .read_to_string(&path)
            .with_path_context("read manifest", &path)?;

        let entries = self.command_entries(root);
        debug!("plan: {} command entries", entries.len());
        let content = self.render(&path, &current, &entries)?;
        let changed = content != current;

        Ok(SyncReport {
            path,
            entries,
            content,
            changed,
        })
    }

    /// Regenerate and persist the manifest.
    ///
    /// An unchanged manifest is not rewritten.
    #[instrument(skip(self))]
    pub fn sync(&self, root: &Path) -> ApplicationResult<SyncReport> {
        let report = self.plan(root)?;
        if report.changed {
            self.fs
                .write(&report.path, &report.content)
                .with_path_context("write manifest", &report.path)?;
            info!("sync: wrote {}", report.path.display());
        } else {
            info!("sync: {} unchanged", report.path.display());
        }
        Ok(report)
    }
}
