//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/xsheel/xsheel.toml`
//! 3. Local config: `<package_root>/.xsheel.toml`
//! 4. Environment variables: `XSHEEL_*` prefix

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::ScriptFilter;

/// Packaging and metadata files that are never scripts.
pub const DEFAULT_DENYLIST: &[&str] = &[
    "README.md",
    "package.json",
    "package-lock.json",
    "pnpm-lock.yaml",
    "yarn.lock",
    "AGENTS.md",
    "node_modules",
];

/// Root-level names holding the launcher and its maintenance tool.
pub const DEFAULT_ROOT_EXCLUDES: &[&str] = &["bin", "tools"];

/// Script discovery configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DiscoverySettings {
    /// Scripts directory relative to the package root
    pub scripts_dir: String,
    /// Exact file names never listed
    pub denylist: Vec<String>,
    /// Names additionally excluded in the package root
    pub root_excludes: Vec<String>,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            scripts_dir: "scripts".into(),
            denylist: DEFAULT_DENYLIST.iter().map(|s| s.to_string()).collect(),
            root_excludes: DEFAULT_ROOT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Raw discovery config for intermediate parsing (arrays are Option to detect "not specified").
///
/// Used during layered config merging to distinguish between:
/// - `None` → field not specified, inherit from base
/// - `Some([])` → explicit empty array
/// - `Some([...])` → explicit values to merge
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDiscoverySettings {
    pub scripts_dir: Option<String>,
    pub denylist: Option<Vec<String>>,
    pub root_excludes: Option<Vec<String>>,
}

impl DiscoverySettings {
    pub fn filter(&self) -> ScriptFilter {
        ScriptFilter::new(self.denylist.clone(), self.root_excludes.clone())
    }

    /// Merge arrays with union semantics and negation support.
    ///
    /// - Items from overlay are added to base
    /// - Items prefixed with `!` remove the corresponding item from the result
    /// - Duplicates are de-duplicated
    ///
    /// # Examples
    /// ```ignore
    /// merge_array(&["a", "b"], &["c"])       // → ["a", "b", "c"]
    /// merge_array(&["a", "b"], &["!a", "c"]) // → ["b", "c"]
    /// ```
    pub fn merge_array(base: &[String], overlay: &[String]) -> Vec<String> {
        let mut result: HashSet<String> = base.iter().cloned().collect();

        for pattern in overlay {
            if let Some(negated) = pattern.strip_prefix('!') {
                result.remove(negated);
            } else {
                result.insert(pattern.clone());
            }
        }

        // Convert to sorted Vec for deterministic output
        let mut vec: Vec<String> = result.into_iter().collect();
        vec.sort();
        vec
    }

    /// Merge overlay config onto self (base).
    ///
    /// - Scalar options: overlay wins if Some, otherwise keep base
    /// - Arrays: union merge with negation support (if overlay specified)
    pub fn merge(&self, overlay: &RawDiscoverySettings) -> Self {
        Self {
            scripts_dir: overlay
                .scripts_dir
                .clone()
                .unwrap_or_else(|| self.scripts_dir.clone()),
            denylist: overlay
                .denylist
                .as_ref()
                .map(|o| Self::merge_array(&self.denylist, o))
                .unwrap_or_else(|| self.denylist.clone()),
            root_excludes: overlay
                .root_excludes
                .as_ref()
                .map(|o| Self::merge_array(&self.root_excludes, o))
                .unwrap_or_else(|| self.root_excludes.clone()),
        }
    }

    /// Apply global config onto defaults.
    ///
    /// Unlike `merge()`, arrays use REPLACE semantics here: a global config
    /// that names a denylist defines the whole baseline.
    pub fn apply_global(&self, global: &RawDiscoverySettings) -> Self {
        Self {
            scripts_dir: global
                .scripts_dir
                .clone()
                .unwrap_or_else(|| self.scripts_dir.clone()),
            denylist: global
                .denylist
                .clone()
                .unwrap_or_else(|| self.denylist.clone()),
            root_excludes: global
                .root_excludes
                .clone()
                .unwrap_or_else(|| self.root_excludes.clone()),
        }
    }
}

/// Manifest configuration for the sync tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ManifestSettings {
    /// Manifest file relative to the package root
    pub file: String,
    /// Top-level field holding the command mapping
    pub field: String,
    /// Command name of the dispatcher itself
    pub command_name: String,
    /// Dispatcher path relative to the package root
    pub command_path: String,
}

impl Default for ManifestSettings {
    fn default() -> Self {
        Self {
            file: "package.json".into(),
            field: "bin".into(),
            command_name: "xsheel".into(),
            command_path: "bin/xsheel".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawManifestSettings {
    pub file: Option<String>,
    pub field: Option<String>,
    pub command_name: Option<String>,
    pub command_path: Option<String>,
}

impl ManifestSettings {
    /// Overlay wins per field if specified.
    fn merge(&self, overlay: &RawManifestSettings) -> Self {
        Self {
            file: overlay.file.clone().unwrap_or_else(|| self.file.clone()),
            field: overlay.field.clone().unwrap_or_else(|| self.field.clone()),
            command_name: overlay
                .command_name
                .clone()
                .unwrap_or_else(|| self.command_name.clone()),
            command_path: overlay
                .command_path
                .clone()
                .unwrap_or_else(|| self.command_path.clone()),
        }
    }
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub discovery: RawDiscoverySettings,
    pub manifest: RawManifestSettings,
}

/// Unified configuration for xsheel.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub discovery: DiscoverySettings,
    pub manifest: ManifestSettings,
}

/// Get the XDG config directory for xsheel.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "xsheel").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("xsheel.toml"))
}

/// Get the path to the local config file in a package root.
pub fn local_config_path(root: &Path) -> PathBuf {
    root.join(".xsheel.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Load settings for a package root from the real environment.
    pub fn load(root: &Path) -> Result<Self, ApplicationError> {
        Self::load_with(root, global_config_path().as_deref(), None)
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `root` - Package root holding the optional local config
    /// * `global` - Global config file, skipped if absent
    /// * `env` - Environment override; `None` reads the process environment
    ///
    /// # Array Merge Semantics
    /// - Defaults → Global: REPLACE (global defines the real baseline)
    /// - Global → Local: UNION with negation support
    /// - Any → Env vars: REPLACE (explicit user override)
    pub fn load_with(
        root: &Path,
        global: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global {
            if global_path.exists() {
                let raw = load_raw_settings(global_path)?;
                current = Self {
                    discovery: current.discovery.apply_global(&raw.discovery),
                    manifest: current.manifest.merge(&raw.manifest),
                };
            }
        }

        let local_path = local_config_path(root);
        if local_path.exists() {
            let raw = load_raw_settings(&local_path)?;
            current = Self {
                discovery: current.discovery.merge(&raw.discovery),
                manifest: current.manifest.merge(&raw.manifest),
            };
        }

        Self::apply_env_overrides(current, env)
    }

    /// Apply XSHEEL_* environment variables as explicit overrides.
    ///
    /// Env vars replace values (not merge) - they are explicit user overrides.
    fn apply_env_overrides(
        mut settings: Self,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("XSHEEL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("discovery.denylist")
                    .with_list_parse_key("discovery.root_excludes")
                    .source(env),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("discovery.scripts_dir") {
            settings.discovery.scripts_dir = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("discovery.denylist") {
            settings.discovery.denylist = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("discovery.root_excludes") {
            settings.discovery.root_excludes = val;
        }
        if let Ok(val) = config.get_string("manifest.file") {
            settings.manifest.file = val;
        }
        if let Ok(val) = config.get_string("manifest.field") {
            settings.manifest.field = val;
        }
        if let Ok(val) = config.get_string("manifest.command_name") {
            settings.manifest.command_name = val;
        }
        if let Ok(val) = config.get_string("manifest.command_path") {
            settings.manifest.command_path = val;
        }

        Ok(settings)
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
