use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const SPECS_DIR: &str = "specs";
pub const MEMORY_DIR: &str = "memory";

pub const PROJECT_MEMORY_FILE: &str = "memory/project_memory.md";
pub const CONSTITUTIONAL_MEMORY_FILE: &str = "memory/constitutional_memory.md";

pub const CONFIG_DIR: &str = ".specforge";
pub const CONFIG_FILE: &str = ".specforge/config.yaml";

/// First document of the Discovery set; its presence marks a project
/// directory as having a Discovery baseline.
pub const DISCOVERY_BASELINE: &str = "BACKLOG.md";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn specs_root(root: &Path) -> PathBuf {
    root.join(SPECS_DIR)
}

pub fn memory_dir(root: &Path) -> PathBuf {
    root.join(MEMORY_DIR)
}

pub fn project_memory_path(root: &Path) -> PathBuf {
    root.join(PROJECT_MEMORY_FILE)
}

pub fn constitutional_memory_path(root: &Path) -> PathBuf {
    root.join(CONSTITUTIONAL_MEMORY_FILE)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

// ---------------------------------------------------------------------------
// Project directory names
// ---------------------------------------------------------------------------

static PROJECT_DIR_RE: OnceLock<Regex> = OnceLock::new();

fn project_dir_re() -> &'static Regex {
    PROJECT_DIR_RE.get_or_init(|| Regex::new(r"^(\d{3})-([a-z0-9][a-z0-9\-]*)$").unwrap())
}

/// Parse a `NNN-slug` directory name into its sequence number and slug.
pub fn parse_project_dir_name(name: &str) -> Option<(u32, &str)> {
    let caps = project_dir_re().captures(name)?;
    let seq: u32 = caps.get(1)?.as_str().parse().ok()?;
    Some((seq, caps.get(2)?.as_str()))
}

/// Format a sequence number and slug into the canonical directory name.
pub fn project_dir_name(sequence_number: u32, slug: &str) -> String {
    format!("{sequence_number:03}-{slug}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
