use serde::{Deserialize, Serialize};
use specforge_core::paths;
use std::path::{Path, PathBuf};

/// Tool configuration written by `configure-project-root`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    pub target_project_root: PathBuf,
}

impl ToolConfig {
    pub fn load(dir: &Path) -> Option<ToolConfig> {
        let path = paths::config_path(dir);
        let data = std::fs::read_to_string(path).ok()?;
        serde_yaml::from_str(&data).ok()
    }
}

/// Resolve the working root.
///
/// Priority:
/// 1. `--root` flag / `SPECFORGE_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` for a `.specforge/config.yaml`; follow its
///    `target_project_root`
/// 3. Walk upward from `cwd` looking for a `specs/` directory
/// 4. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut dir = cwd.clone();
    loop {
        if let Some(config) = ToolConfig::load(&dir) {
            if config.target_project_root.is_absolute() {
                return config.target_project_root;
            }
            return dir.join(config.target_project_root);
        }
        match dir.parent() {
            Some(p) => dir = p.to_path_buf(),
            None => break,
        }
    }

    let mut dir = cwd.clone();
    loop {
        if dir.join(paths::SPECS_DIR).is_dir() {
            return dir;
        }
        match dir.parent() {
            Some(p) => dir = p.to_path_buf(),
            None => break,
        }
    }

    cwd
}
