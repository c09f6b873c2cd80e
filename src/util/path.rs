use std::path::{Path, PathBuf};

/// Package root for an executable installed as `<root>/bin/<exe>`.
pub fn package_root_of(exe: &Path) -> Option<PathBuf> {
    exe.parent().and_then(Path::parent).map(Path::to_path_buf)
}

/// `path` relative to `root`, using `/` as separator on every platform.
///
/// Falls back to `path` itself when no relative form exists.
pub fn relative_slash_path(root: &Path, path: &Path) -> String {
    let rel = pathdiff::diff_paths(path, root).unwrap_or_else(|| path.to_path_buf());
    normalize_path_separator(&rel.to_string_lossy())
}

// Helper function for cross-platform path comparison
pub fn normalize_path_separator(s: &str) -> String {
    s.replace('\\', "/")
}
