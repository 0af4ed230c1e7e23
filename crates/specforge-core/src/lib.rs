//! Core document-generation and project-state pipeline for `specforge`:
//! project identity resolution, the discovery questionnaire, template
//! rendering with optional assistant enrichment, step orchestration, and
//! the persistent memory store.

pub mod error;
pub mod generator;
pub mod identity;
pub mod io;
pub mod memory;
pub mod paths;
pub mod project;
pub mod questionnaire;
pub mod steps;
pub mod templates;

pub use error::{ForgeError, Result};
pub use generator::{ContentProvider, GeneratedDocument, NoAssistant};
pub use identity::ProjectIdentity;
pub use memory::{MemoryRecord, MemoryStore};
pub use project::ProjectInfo;
pub use steps::WorkflowStep;
pub use templates::TemplateId;
