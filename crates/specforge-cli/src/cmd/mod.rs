pub mod configure;
pub mod enhance;
pub mod start;

use anyhow::bail;
use assistant_agent::{Assistant, AssistantClient};
use clap::Args;
use specforge_core::generator::{ContentProvider, NoAssistant};
use specforge_core::questionnaire::Answers;
use specforge_core::{GeneratedDocument, ProjectIdentity};
use std::path::Path;

/// Questionnaire answers supplied as flags; any present flag suppresses the
/// corresponding prompt.
#[derive(Args, Debug, Default)]
pub struct AnswerFlags {
    /// Project name
    #[arg(long)]
    pub name: Option<String>,

    /// Target audience
    #[arg(long)]
    pub target_audience: Option<String>,

    /// Tech stack (menu value or custom text)
    #[arg(long)]
    pub tech_stack: Option<String>,

    /// Architecture style (monolithic, microservices, serverless, hybrid)
    #[arg(long)]
    pub architecture: Option<String>,

    /// Development approach (agile, test_driven, behavior_driven, waterfall)
    #[arg(long)]
    pub development_approach: Option<String>,

    /// Coordination level (solo, small_team, multi_team)
    #[arg(long)]
    pub coordination: Option<String>,

    /// Timeline
    #[arg(long)]
    pub timeline: Option<String>,

    /// Compliance requirements, comma-separated
    #[arg(long)]
    pub compliance: Option<String>,

    /// Quality requirements
    #[arg(long)]
    pub quality: Option<String>,
}

impl AnswerFlags {
    pub fn to_answers(&self) -> Answers {
        Answers {
            name: self.name.clone(),
            target_audience: self.target_audience.clone(),
            tech_stack: self.tech_stack.clone(),
            architecture_style: self.architecture.clone(),
            development_approach: self.development_approach.clone(),
            coordination_level: self.coordination.clone(),
            timeline: self.timeline.clone(),
            compliance_requirements: self.compliance.clone(),
            quality_requirements: self.quality.clone(),
        }
    }
}

/// Build the content provider for the requested assistant. No flag means
/// fallback rendering for everything; an unknown name is a user error.
pub fn provider_for(ai: Option<&str>) -> anyhow::Result<Box<dyn ContentProvider>> {
    let Some(name) = ai else {
        return Ok(Box::new(NoAssistant));
    };
    let Some(assistant) = Assistant::parse(name) else {
        bail!("unknown assistant '{name}': expected copilot, claude, or gemini");
    };
    let client = AssistantClient::new(assistant)?;
    if !client.is_available() {
        tracing::debug!(
            assistant = assistant.as_str(),
            "assistant unavailable, documents will use fallback templates"
        );
    }
    Ok(Box::new(AssistantProvider(client)))
}

struct AssistantProvider(AssistantClient);

impl ContentProvider for AssistantProvider {
    fn generate(&self, prompt: &str) -> Option<String> {
        self.0.generate(prompt)
    }
}

/// Console/JSON report for a completed step.
pub fn report_step(
    root: &Path,
    step_label: &str,
    identity: &ProjectIdentity,
    docs: &[GeneratedDocument],
    json: bool,
) -> anyhow::Result<()> {
    if json {
        let paths: Vec<String> = docs
            .iter()
            .map(|d| d.path.display().to_string())
            .collect();
        return crate::output::print_json(&serde_json::json!({
            "project": identity.dir_name(),
            "directory": identity.directory_path,
            "step": step_label,
            "documents": paths,
        }));
    }

    println!(
        "{} complete for {} ({})",
        step_label,
        identity.dir_name(),
        identity.directory_path.display()
    );
    for doc in docs {
        let shown = doc
            .path
            .strip_prefix(root)
            .unwrap_or(doc.path.as_path());
        println!("  created: {}", shown.display());
    }
    Ok(())
}
