//! Cross-session project memory.
//!
//! Two human-readable files under `memory/`:
//! - `project_memory.md` — the single active project's record, YAML
//!   frontmatter plus a rendered summary body, overwritten whole on save.
//! - `constitutional_memory.md` — append-only compliance log across all
//!   projects ever run.
//!
//! The record is a resume hint, not a hidden dependency: every orchestrator
//! call takes identity and project info explicitly. No locking — a single
//! invoking process is assumed.

use crate::error::Result;
use crate::identity::ProjectIdentity;
use crate::io;
use crate::paths;
use crate::project::ProjectInfo;
use crate::steps::WorkflowStep;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// MemoryRecord
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRecord {
    #[serde(default = "default_version")]
    pub version: u32,
    pub identity: ProjectIdentity,
    pub info: ProjectInfo,
    pub current_step: Option<WorkflowStep>,
    #[serde(default)]
    pub completed_steps: Vec<WorkflowStep>,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub compliance_notes: Vec<String>,
}

fn default_version() -> u32 {
    1
}

impl MemoryRecord {
    pub fn new(identity: ProjectIdentity, info: ProjectInfo) -> Self {
        Self {
            version: 1,
            identity,
            info,
            current_step: None,
            completed_steps: Vec::new(),
            last_updated: Utc::now(),
            compliance_notes: Vec::new(),
        }
    }

    /// Record a successful step: set the position, add to the completed set,
    /// append the compliance note.
    pub fn complete_step(&mut self, step: WorkflowStep, note: String) {
        self.current_step = Some(step);
        if !self.completed_steps.contains(&step) {
            self.completed_steps.push(step);
        }
        self.compliance_notes.push(note);
        self.last_updated = Utc::now();
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

pub struct MemoryStore {
    root: PathBuf,
}

impl MemoryStore {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Load the active project record, `None` if no memory file exists yet.
    pub fn load(&self) -> Result<Option<MemoryRecord>> {
        let path = paths::project_memory_path(&self.root);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        let Some(frontmatter) = extract_frontmatter(&content) else {
            return Ok(None);
        };
        let record: MemoryRecord = serde_yaml::from_str(frontmatter)?;
        Ok(Some(record))
    }

    /// Overwrite `project_memory.md` with the record (frontmatter) and a
    /// rendered summary body.
    pub fn save(&self, record: &MemoryRecord) -> Result<()> {
        let path = paths::project_memory_path(&self.root);
        let mut out = String::new();
        let _ = writeln!(out, "---");
        out.push_str(&serde_yaml::to_string(record)?);
        let _ = writeln!(out, "---");
        let _ = writeln!(out);
        let _ = writeln!(out, "# Project Memory");
        let _ = writeln!(out);
        let _ = writeln!(out, "Active project: {}", record.identity.dir_name());
        let _ = writeln!(
            out,
            "Current step: {}",
            record
                .current_step
                .map(|s| s.as_str())
                .unwrap_or("not started")
        );
        let _ = writeln!(
            out,
            "Completed steps: {}",
            if record.completed_steps.is_empty() {
                "none".to_string()
            } else {
                record
                    .completed_steps
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        );
        io::atomic_write(&path, out.as_bytes())
    }

    /// Append one timestamped entry to the constitutional log, creating the
    /// file with a title on first use.
    pub fn append_note(&self, project: &str, note: &str) -> Result<()> {
        let path = paths::constitutional_memory_path(&self.root);
        if !path.exists() {
            io::atomic_write(&path, b"# Constitutional Memory\n\n")?;
        }
        let stamp = Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        io::append_text(&path, &format!("- [{stamp}] {project}: {note}\n"))
    }
}

/// Extract the YAML between the first pair of `---` delimiters.
fn extract_frontmatter(content: &str) -> Option<&str> {
    let rest = content.strip_prefix("---")?;
    let rest = rest
        .strip_prefix('\n')
        .or_else(|| rest.strip_prefix("\r\n"))?;
    let end = rest.find("\n---")?;
    Some(&rest[..end])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(dir: &Path) -> MemoryRecord {
        let identity = ProjectIdentity {
            sequence_number: 1,
            slug: "recipe-app".into(),
            directory_path: dir.join("specs/001-recipe-app"),
        };
        MemoryRecord::new(identity, ProjectInfo::with_defaults("Recipe app"))
    }

    #[test]
    fn load_missing_is_none() {
        let dir = TempDir::new().unwrap();
        let store = MemoryStore::new(dir.path());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = MemoryStore::new(dir.path());
        let mut rec = record(dir.path());
        rec.complete_step(WorkflowStep::Discovery, "step 1 done".into());
        store.save(&rec).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.identity, rec.identity);
        assert_eq!(loaded.current_step, Some(WorkflowStep::Discovery));
        assert_eq!(loaded.completed_steps, vec![WorkflowStep::Discovery]);
        assert_eq!(loaded.compliance_notes, vec!["step 1 done".to_string()]);
        assert_eq!(loaded.info.name, "Recipe app");
    }

    #[test]
    fn save_overwrites_whole_record() {
        let dir = TempDir::new().unwrap();
        let store = MemoryStore::new(dir.path());
        let mut rec = record(dir.path());
        store.save(&rec).unwrap();

        rec.complete_step(WorkflowStep::Discovery, "n1".into());
        rec.complete_step(WorkflowStep::Sparc, "n2".into());
        store.save(&rec).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.completed_steps.len(), 2);
    }

    #[test]
    fn complete_step_is_idempotent_in_completed_set() {
        let dir = TempDir::new().unwrap();
        let mut rec = record(dir.path());
        rec.complete_step(WorkflowStep::Discovery, "first run".into());
        rec.complete_step(WorkflowStep::Discovery, "re-run".into());
        assert_eq!(rec.completed_steps, vec![WorkflowStep::Discovery]);
        assert_eq!(rec.compliance_notes.len(), 2);
    }

    #[test]
    fn body_mentions_active_project() {
        let dir = TempDir::new().unwrap();
        let store = MemoryStore::new(dir.path());
        store.save(&record(dir.path())).unwrap();
        let text =
            std::fs::read_to_string(dir.path().join("memory/project_memory.md")).unwrap();
        assert!(text.contains("001-recipe-app"));
        assert!(text.contains("# Project Memory"));
    }

    #[test]
    fn constitutional_log_appends_across_projects() {
        let dir = TempDir::new().unwrap();
        let store = MemoryStore::new(dir.path());
        store.append_note("001-a", "step 1 done").unwrap();
        store.append_note("002-b", "step 1 done").unwrap();
        let log = std::fs::read_to_string(
            dir.path().join("memory/constitutional_memory.md"),
        )
        .unwrap();
        assert!(log.starts_with("# Constitutional Memory"));
        assert!(log.contains("001-a"));
        assert!(log.contains("002-b"));
    }
}
