use crate::error::{ForgeError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Maximum slug length derived from a project description.
const MAX_SLUG_LEN: usize = 50;

/// The numbered, slugified directory identity assigned to a project.
/// Immutable once created; Steps 2-4 only ever read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectIdentity {
    pub sequence_number: u32,
    pub slug: String,
    pub directory_path: PathBuf,
}

impl ProjectIdentity {
    /// Canonical `NNN-slug` directory name.
    pub fn dir_name(&self) -> String {
        paths::project_dir_name(self.sequence_number, &self.slug)
    }
}

/// Derive a filesystem-safe slug from a free-text description: lowercase,
/// non-alphanumeric runs collapsed to single hyphens, capped at 50 chars.
pub fn slugify(description: &str) -> String {
    let mut slug = String::new();
    let mut pending_hyphen = false;
    for ch in description.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug.truncate(MAX_SLUG_LEN);
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("untitled-project");
    }
    slug
}

/// Resolve a fresh identity for `description` against the existing contents
/// of `specs_root`: next sequence number is `max(NNN) + 1` over all
/// `NNN-*` subdirectories (1 if none exist).
///
/// Does not create the directory. Single-process only — no cross-process
/// allocation guarantee for the sequence number.
pub fn resolve(description: &str, specs_root: &Path) -> Result<ProjectIdentity> {
    if description.trim().is_empty() {
        return Err(ForgeError::InvalidDescription);
    }

    let mut max_seq = 0u32;
    if specs_root.is_dir() {
        for entry in std::fs::read_dir(specs_root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name();
            if let Some((seq, _)) = paths::parse_project_dir_name(&name.to_string_lossy()) {
                max_seq = max_seq.max(seq);
            }
        }
    }

    let sequence_number = max_seq + 1;
    let slug = slugify(description);
    let directory_path = specs_root.join(paths::project_dir_name(sequence_number, &slug));

    Ok(ProjectIdentity {
        sequence_number,
        slug,
        directory_path,
    })
}

/// Parse an existing project directory back into its identity without
/// allocating a new sequence number.
pub fn resolve_existing(path: &Path) -> Result<ProjectIdentity> {
    let not_found = || ForgeError::ProjectNotFound(path.display().to_string());

    if !path.is_dir() {
        return Err(not_found());
    }
    let name = path.file_name().ok_or_else(not_found)?.to_string_lossy();
    let (sequence_number, slug) = paths::parse_project_dir_name(&name).ok_or_else(not_found)?;

    Ok(ProjectIdentity {
        sequence_number,
        slug: slug.to_string(),
        directory_path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn slugify_basics() {
        assert_eq!(slugify("Foo Bar"), "foo-bar");
        assert_eq!(slugify("Recipe sharing app"), "recipe-sharing-app");
        assert_eq!(slugify("  lots   of---punctuation!!  "), "lots-of-punctuation");
    }

    #[test]
    fn slugify_empty_falls_back() {
        assert_eq!(slugify("!!!"), "untitled-project");
        assert_eq!(slugify(""), "untitled-project");
    }

    #[test]
    fn slugify_caps_length() {
        let long = "word ".repeat(40);
        let slug = slugify(&long);
        assert!(slug.len() <= 50);
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn resolve_on_empty_specs_yields_one() {
        let dir = TempDir::new().unwrap();
        let id = resolve("Foo Bar", dir.path()).unwrap();
        assert_eq!(id.sequence_number, 1);
        assert_eq!(id.slug, "foo-bar");
        assert_eq!(id.directory_path, dir.path().join("001-foo-bar"));
    }

    #[test]
    fn resolve_skips_gaps_with_max_plus_one() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("001-x")).unwrap();
        std::fs::create_dir_all(dir.path().join("003-y")).unwrap();
        let id = resolve("next one", dir.path()).unwrap();
        assert_eq!(id.sequence_number, 4);
    }

    #[test]
    fn resolve_ignores_non_matching_entries() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("002-real")).unwrap();
        std::fs::create_dir_all(dir.path().join("notes")).unwrap();
        std::fs::write(dir.path().join("005-a-file-not-a-dir"), b"x").unwrap();
        let id = resolve("another", dir.path()).unwrap();
        assert_eq!(id.sequence_number, 3);
    }

    #[test]
    fn resolve_missing_specs_root_is_fine() {
        let dir = TempDir::new().unwrap();
        let id = resolve("brand new", &dir.path().join("specs")).unwrap();
        assert_eq!(id.sequence_number, 1);
    }

    #[test]
    fn resolve_rejects_empty_description() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            resolve("   ", dir.path()),
            Err(ForgeError::InvalidDescription)
        ));
    }

    #[test]
    fn resolve_existing_parses_dir_name() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("012-recipe-app");
        std::fs::create_dir_all(&project).unwrap();
        let id = resolve_existing(&project).unwrap();
        assert_eq!(id.sequence_number, 12);
        assert_eq!(id.slug, "recipe-app");
        assert_eq!(id.dir_name(), "012-recipe-app");
    }

    #[test]
    fn resolve_existing_rejects_missing_or_misnamed() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            resolve_existing(&dir.path().join("nope")),
            Err(ForgeError::ProjectNotFound(_))
        ));

        let misnamed = dir.path().join("not-numbered");
        std::fs::create_dir_all(&misnamed).unwrap();
        assert!(matches!(
            resolve_existing(&misnamed),
            Err(ForgeError::ProjectNotFound(_))
        ));
    }
}
