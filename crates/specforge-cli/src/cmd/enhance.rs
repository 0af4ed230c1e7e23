use super::{provider_for, report_step, AnswerFlags};
use anyhow::{bail, Context};
use specforge_core::{identity, paths, steps, MemoryStore, ProjectIdentity, ProjectInfo, WorkflowStep};
use std::path::Path;

/// `enhance-step-1` — Discovery only. With `--existing-project`, project
/// info is reconstructed from memory (or the directory name) instead of
/// prompting.
#[allow(clippy::too_many_arguments)]
pub fn step1(
    root: &Path,
    description: Option<&str>,
    existing_project: bool,
    project_path: Option<&Path>,
    ai: Option<&str>,
    defaults: bool,
    answers: &AnswerFlags,
    json: bool,
) -> anyhow::Result<()> {
    let provider = provider_for(ai)?;

    let (identity, info) = if existing_project {
        let path = project_path
            .context("--existing-project requires --project-path")?;
        let identity = identity::resolve_existing(path)?;
        let info = reconstruct_info(root, &identity)?;
        (identity, info)
    } else {
        let description = match description {
            Some(d) if !d.trim().is_empty() => d,
            _ => bail!("a project description is required unless --existing-project is set"),
        };
        let identity = match project_path {
            Some(path) => identity::resolve_existing(path)?,
            None => identity::resolve(description, &paths::specs_root(root))?,
        };
        let info = super::start::collect_info(description, defaults, answers)?;
        (identity, info)
    };

    let docs = steps::run_step_with_memory(
        root,
        WorkflowStep::Discovery,
        &identity,
        &info,
        provider.as_ref(),
    )?;
    report_step(root, "Step 1 (discovery)", &identity, &docs, json)
}

/// `enhance-step-2|3|4` — run one later step against an existing project
/// directory. Fails before writing anything if the Discovery baseline is
/// missing.
pub fn step_n(
    root: &Path,
    n: u8,
    project_path: &Path,
    ai: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let step = WorkflowStep::from_number(n).with_context(|| format!("no step numbered {n}"))?;
    let provider = provider_for(ai)?;

    let identity = identity::resolve_existing(project_path)?;
    let info = reconstruct_info(root, &identity)?;

    let docs = steps::run_step_with_memory(root, step, &identity, &info, provider.as_ref())?;
    report_step(
        root,
        &format!("Step {} ({})", step.number(), step.as_str()),
        &identity,
        &docs,
        json,
    )
}

/// Rebuild project info for an already-resolved project: prefer the memory
/// record when it matches, otherwise derive defaults from the slug.
fn reconstruct_info(root: &Path, identity: &ProjectIdentity) -> anyhow::Result<ProjectInfo> {
    let store = MemoryStore::new(root);
    if let Some(record) = store.load()? {
        if record.identity.sequence_number == identity.sequence_number
            && record.identity.slug == identity.slug
        {
            return Ok(record.info);
        }
    }
    Ok(ProjectInfo::with_defaults(&identity.slug.replace('-', " ")))
}
