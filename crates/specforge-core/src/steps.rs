//! Step orchestration: the four fixed workflow steps, their document lists,
//! and the run loop that threads identity, project record, and assistant
//! provider through document generation.
//!
//! Steps only ever move forward (Discovery → SPARC → Context → PACT).
//! Re-running a step overwrites its documents in place; there is no rollback
//! of documents already written when a later one fails.

use crate::error::{ForgeError, Result};
use crate::generator::{self, ContentProvider, GeneratedDocument};
use crate::identity::{self, ProjectIdentity};
use crate::io;
use crate::memory::{MemoryRecord, MemoryStore};
use crate::paths;
use crate::project::ProjectInfo;
use crate::templates::{DocumentSpec, TemplateId};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// WorkflowStep
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStep {
    Discovery,
    Sparc,
    Context,
    Pact,
}

impl WorkflowStep {
    /// All steps in execution order.
    pub fn all() -> &'static [WorkflowStep] {
        &[Self::Discovery, Self::Sparc, Self::Context, Self::Pact]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discovery => "discovery",
            Self::Sparc => "sparc",
            Self::Context => "context",
            Self::Pact => "pact",
        }
    }

    /// 1-based step number as used by the `enhance-step-N` commands.
    pub fn number(&self) -> u8 {
        match self {
            Self::Discovery => 1,
            Self::Sparc => 2,
            Self::Context => 3,
            Self::Pact => 4,
        }
    }

    pub fn from_number(n: u8) -> Option<WorkflowStep> {
        match n {
            1 => Some(Self::Discovery),
            2 => Some(Self::Sparc),
            3 => Some(Self::Context),
            4 => Some(Self::Pact),
            _ => None,
        }
    }

    /// The fixed, ordered document list this step generates.
    pub fn documents(&self) -> &'static [DocumentSpec] {
        match self {
            Self::Discovery => DISCOVERY_DOCS,
            Self::Sparc => SPARC_DOCS,
            Self::Context => CONTEXT_DOCS,
            Self::Pact => PACT_DOCS,
        }
    }
}

const DISCOVERY_DOCS: &[DocumentSpec] = &[
    DocumentSpec {
        relative_path: "BACKLOG.md",
        template: TemplateId::Backlog,
        requires_ai: true,
    },
    DocumentSpec {
        relative_path: "IMPLEMENTATION_GUIDE.md",
        template: TemplateId::ImplementationGuide,
        requires_ai: true,
    },
    DocumentSpec {
        relative_path: "RISK_ASSESSMENT.md",
        template: TemplateId::RiskAssessment,
        requires_ai: true,
    },
    DocumentSpec {
        relative_path: "FILE_OUTLINE.md",
        template: TemplateId::FileOutline,
        requires_ai: true,
    },
    DocumentSpec {
        relative_path: "constitutional_validation.md",
        template: TemplateId::ConstitutionalValidation,
        requires_ai: false,
    },
    DocumentSpec {
        relative_path: "clarification_needed.md",
        template: TemplateId::ClarificationNeeded,
        requires_ai: false,
    },
];

const SPARC_DOCS: &[DocumentSpec] = &[
    DocumentSpec {
        relative_path: "sparc/SPARC_SPECIFICATION.md",
        template: TemplateId::SparcSpecification,
        requires_ai: true,
    },
    DocumentSpec {
        relative_path: "sparc/SPARC_PSEUDOCODE.md",
        template: TemplateId::SparcPseudocode,
        requires_ai: true,
    },
    DocumentSpec {
        relative_path: "sparc/SPARC_ARCHITECTURE.md",
        template: TemplateId::SparcArchitecture,
        requires_ai: true,
    },
    DocumentSpec {
        relative_path: "sparc/SPARC_REFINEMENT.md",
        template: TemplateId::SparcRefinement,
        requires_ai: true,
    },
    DocumentSpec {
        relative_path: "sparc/SPARC_COMPLETION.md",
        template: TemplateId::SparcCompletion,
        requires_ai: true,
    },
];

const CONTEXT_DOCS: &[DocumentSpec] = &[
    DocumentSpec {
        relative_path: ".github/copilot-instructions.md",
        template: TemplateId::CopilotInstructions,
        requires_ai: true,
    },
    DocumentSpec {
        relative_path: "expert_files/domain_expert.md",
        template: TemplateId::DomainExpert,
        requires_ai: true,
    },
    DocumentSpec {
        relative_path: "expert_files/technical_expert.md",
        template: TemplateId::TechnicalExpert,
        requires_ai: true,
    },
    DocumentSpec {
        relative_path: "agent_coordination.md",
        template: TemplateId::AgentCoordination,
        requires_ai: false,
    },
];

const PACT_DOCS: &[DocumentSpec] = &[
    DocumentSpec {
        relative_path: "AGENT_ECOSYSTEM_DESIGN.md",
        template: TemplateId::AgentEcosystemDesign,
        requires_ai: true,
    },
    DocumentSpec {
        relative_path: "COORDINATION_STRATEGY.md",
        template: TemplateId::CoordinationStrategy,
        requires_ai: true,
    },
    DocumentSpec {
        relative_path: "COMMUNICATION_PROTOCOLS.md",
        template: TemplateId::CommunicationProtocols,
        requires_ai: false,
    },
    DocumentSpec {
        relative_path: "TESTING_STRATEGY.md",
        template: TemplateId::TestingStrategy,
        requires_ai: true,
    },
];

// ---------------------------------------------------------------------------
// Running steps
// ---------------------------------------------------------------------------

/// Generate the fixed document set for one step, strictly in declared order.
///
/// Discovery creates the project directory. Later steps require an existing
/// directory holding the Discovery baseline; otherwise nothing is written
/// and [`ForgeError::MissingProject`] is returned.
pub fn run_step(
    step: WorkflowStep,
    identity: &ProjectIdentity,
    info: &ProjectInfo,
    provider: &dyn ContentProvider,
) -> Result<Vec<GeneratedDocument>> {
    if step == WorkflowStep::Discovery {
        io::ensure_dir(&identity.directory_path)?;
    } else {
        let baseline = identity.directory_path.join(paths::DISCOVERY_BASELINE);
        if !identity.directory_path.is_dir() || !baseline.is_file() {
            return Err(ForgeError::MissingProject {
                step: step.as_str().to_string(),
                path: identity.directory_path.display().to_string(),
            });
        }
    }

    let mut written = Vec::with_capacity(step.documents().len());
    for spec in step.documents() {
        let doc = generator::render(spec, info, identity, provider);
        generator::write_document(&doc)?;
        tracing::debug!(path = %doc.path.display(), "wrote document");
        written.push(doc);
    }
    Ok(written)
}

/// Run one step and record the outcome in the memory store: overwrite the
/// active-project record and append a compliance note to the constitutional
/// log.
pub fn run_step_with_memory(
    root: &Path,
    step: WorkflowStep,
    identity: &ProjectIdentity,
    info: &ProjectInfo,
    provider: &dyn ContentProvider,
) -> Result<Vec<GeneratedDocument>> {
    let docs = run_step(step, identity, info, provider)?;

    let store = MemoryStore::new(root);
    // Match on number and slug: the same project may be addressed through
    // different (relative vs absolute) directory paths across invocations.
    let mut record = match store.load()? {
        Some(existing)
            if existing.identity.sequence_number == identity.sequence_number
                && existing.identity.slug == identity.slug =>
        {
            existing
        }
        _ => MemoryRecord::new(identity.clone(), info.clone()),
    };
    let note = format!(
        "step {} ({}) generated {} documents with the constitutional checklist applied",
        step.number(),
        step.as_str(),
        docs.len()
    );
    record.complete_step(step, note.clone());
    store.save(&record)?;
    store.append_note(&identity.dir_name(), &note)?;

    Ok(docs)
}

/// Resolve a fresh identity for `description`, then run all four steps in
/// order, aborting on the first unrecoverable failure. Memory is updated
/// after each successful step.
pub fn run_all(
    root: &Path,
    description: &str,
    info: &ProjectInfo,
    provider: &dyn ContentProvider,
) -> Result<ProjectIdentity> {
    let identity = identity::resolve(description, &paths::specs_root(root))?;
    for step in WorkflowStep::all() {
        run_step_with_memory(root, *step, &identity, info, provider)?;
    }
    Ok(identity)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
