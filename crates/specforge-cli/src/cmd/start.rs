use super::{provider_for, report_step, AnswerFlags};
use specforge_core::{identity, paths, questionnaire, steps, ProjectInfo, WorkflowStep};
use std::io::IsTerminal;
use std::path::Path;

/// `start` — discovery questionnaire plus the Step-1 document set for a new
/// project.
pub fn run(
    root: &Path,
    description: &str,
    ai: Option<&str>,
    defaults: bool,
    answers: &AnswerFlags,
    json: bool,
) -> anyhow::Result<()> {
    let provider = provider_for(ai)?;
    let info = collect_info(description, defaults, answers)?;

    let identity = identity::resolve(description, &paths::specs_root(root))?;
    let docs = steps::run_step_with_memory(
        root,
        WorkflowStep::Discovery,
        &identity,
        &info,
        provider.as_ref(),
    )?;

    report_step(root, "Step 1 (discovery)", &identity, &docs, json)
}

/// `project-start-enhanced` — all four steps in order with default answers.
pub fn run_all(root: &Path, description: &str, ai: Option<&str>, json: bool) -> anyhow::Result<()> {
    let provider = provider_for(ai)?;
    let info = ProjectInfo::with_defaults(description);

    let identity = steps::run_all(root, description, &info, provider.as_ref())?;

    if json {
        return crate::output::print_json(&serde_json::json!({
            "project": identity.dir_name(),
            "directory": identity.directory_path,
            "steps": WorkflowStep::all()
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>(),
        }));
    }

    println!(
        "All steps complete for {} ({})",
        identity.dir_name(),
        identity.directory_path.display()
    );
    for step in WorkflowStep::all() {
        println!(
            "  step {} ({}): {} documents",
            step.number(),
            step.as_str(),
            step.documents().len()
        );
    }
    Ok(())
}

/// Run the questionnaire against real stdin/stdout. Interactive only when
/// stdin is a terminal and `--defaults` was not passed.
pub fn collect_info(
    description: &str,
    defaults: bool,
    answers: &AnswerFlags,
) -> anyhow::Result<ProjectInfo> {
    let interactive = !defaults && std::io::stdin().is_terminal();
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    let info = questionnaire::collect(
        description,
        interactive,
        &answers.to_answers(),
        &mut input,
        &mut output,
    )?;
    Ok(info)
}
