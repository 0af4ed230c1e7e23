//! Per-document generation: template skeleton + project record + optional
//! assistant content, written into the resolved project directory.

use crate::error::Result;
use crate::identity::ProjectIdentity;
use crate::io;
use crate::project::ProjectInfo;
use crate::templates::{self, DocumentSpec};
use std::path::PathBuf;

/// Seam between document generation and the external assistant tooling.
///
/// `None` means "no usable content" for any reason — tool missing, timeout,
/// non-zero exit, empty output — and always routes to the deterministic
/// fallback. Implementations make exactly one attempt per call.
pub trait ContentProvider {
    fn generate(&self, prompt: &str) -> Option<String>;
}

/// Null provider: every document renders from the fallback templates.
pub struct NoAssistant;

impl ContentProvider for NoAssistant {
    fn generate(&self, _prompt: &str) -> Option<String> {
        None
    }
}

/// Ephemeral rendered document. Written once, never read back.
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    pub path: PathBuf,
    pub content: String,
}

/// Render one document. Assistant output that does not carry the template's
/// full header set is discarded wholesale in favour of the fallback, so the
/// structural contract holds regardless of content provenance.
pub fn render(
    spec: &DocumentSpec,
    info: &ProjectInfo,
    identity: &ProjectIdentity,
    provider: &dyn ContentProvider,
) -> GeneratedDocument {
    let content = if spec.requires_ai {
        let prompt = templates::build_prompt(spec.template, info);
        match provider.generate(&prompt) {
            Some(text) if templates::has_required_headers(spec.template, &text) => text,
            Some(_) => {
                tracing::debug!(
                    template = ?spec.template,
                    "assistant output missing required headers, using fallback"
                );
                templates::render_fallback(spec.template, info)
            }
            None => templates::render_fallback(spec.template, info),
        }
    } else {
        templates::render_fallback(spec.template, info)
    };

    GeneratedDocument {
        path: identity.directory_path.join(spec.relative_path),
        content,
    }
}

/// Write the document, creating parent directories, overwriting any prior
/// content at that path.
pub fn write_document(doc: &GeneratedDocument) -> Result<()> {
    io::atomic_write(&doc.path, doc.content.as_bytes())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::TemplateId;
    use tempfile::TempDir;

    struct FixedProvider(&'static str);

    impl ContentProvider for FixedProvider {
        fn generate(&self, _prompt: &str) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    fn identity(dir: &TempDir) -> ProjectIdentity {
        ProjectIdentity {
            sequence_number: 1,
            slug: "recipe-app".into(),
            directory_path: dir.path().join("001-recipe-app"),
        }
    }

    fn spec() -> DocumentSpec {
        DocumentSpec {
            relative_path: "BACKLOG.md",
            template: TemplateId::Backlog,
            requires_ai: true,
        }
    }

    #[test]
    fn no_assistant_uses_fallback() {
        let dir = TempDir::new().unwrap();
        let info = ProjectInfo::with_defaults("Recipe app");
        let doc = render(&spec(), &info, &identity(&dir), &NoAssistant);
        assert!(templates::has_required_headers(TemplateId::Backlog, &doc.content));
        assert_eq!(doc.path, dir.path().join("001-recipe-app/BACKLOG.md"));
    }

    #[test]
    fn assistant_output_with_headers_is_kept() {
        let dir = TempDir::new().unwrap();
        let info = ProjectInfo::with_defaults("Recipe app");
        let provider = FixedProvider(
            "## Overview\nai text\n## Epics\n## User Stories\n## Prioritization\n",
        );
        let doc = render(&spec(), &info, &identity(&dir), &provider);
        assert!(doc.content.contains("ai text"));
    }

    #[test]
    fn assistant_output_missing_headers_falls_back() {
        let dir = TempDir::new().unwrap();
        let info = ProjectInfo::with_defaults("Recipe app");
        let provider = FixedProvider("free-form reply with no headers at all");
        let doc = render(&spec(), &info, &identity(&dir), &provider);
        assert!(!doc.content.contains("free-form reply"));
        assert!(templates::has_required_headers(TemplateId::Backlog, &doc.content));
    }

    #[test]
    fn static_template_never_calls_provider() {
        struct Panics;
        impl ContentProvider for Panics {
            fn generate(&self, _prompt: &str) -> Option<String> {
                panic!("provider must not be called for requires_ai=false");
            }
        }
        let dir = TempDir::new().unwrap();
        let info = ProjectInfo::with_defaults("Recipe app");
        let static_spec = DocumentSpec {
            relative_path: "constitutional_validation.md",
            template: TemplateId::ConstitutionalValidation,
            requires_ai: false,
        };
        let doc = render(&static_spec, &info, &identity(&dir), &Panics);
        assert!(doc.content.contains("Constitutional Checklist"));
    }

    #[test]
    fn write_document_creates_parents_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let info = ProjectInfo::with_defaults("Recipe app");
        let nested = DocumentSpec {
            relative_path: "sparc/SPARC_SPECIFICATION.md",
            template: TemplateId::SparcSpecification,
            requires_ai: false,
        };
        let doc = render(&nested, &info, &identity(&dir), &NoAssistant);
        write_document(&doc).unwrap();
        assert!(doc.path.exists());

        let second = GeneratedDocument {
            path: doc.path.clone(),
            content: "replaced".into(),
        };
        write_document(&second).unwrap();
        assert_eq!(std::fs::read_to_string(&doc.path).unwrap(), "replaced");
    }
}
