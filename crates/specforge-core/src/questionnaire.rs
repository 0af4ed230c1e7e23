//! Sequential prompt/response collector for project discovery.
//!
//! Each question resolves in priority order: preset answer (from a CLI
//! flag) > interactive prompt > default. Generic over the input/output
//! streams so tests can script an entire session.

use crate::error::{ForgeError, Result};
use crate::project::{
    ArchitectureStyle, ChoiceField, CoordinationLevel, DevelopmentApproach, ProjectInfo, TechStack,
};
use std::io::{BufRead, Write};

/// Preset answers supplied via flags. Any `Some` value suppresses the
/// corresponding prompt.
#[derive(Debug, Clone, Default)]
pub struct Answers {
    pub name: Option<String>,
    pub target_audience: Option<String>,
    pub tech_stack: Option<String>,
    pub architecture_style: Option<String>,
    pub development_approach: Option<String>,
    pub coordination_level: Option<String>,
    pub timeline: Option<String>,
    pub compliance_requirements: Option<String>,
    pub quality_requirements: Option<String>,
}

/// Run the fixed question sequence and return a fully populated record.
/// Never touches the filesystem.
pub fn collect<R: BufRead, W: Write>(
    description: &str,
    interactive: bool,
    answers: &Answers,
    input: &mut R,
    output: &mut W,
) -> Result<ProjectInfo> {
    if description.trim().is_empty() {
        return Err(ForgeError::InvalidDescription);
    }
    let defaults = ProjectInfo::with_defaults(description);

    let name = free_text(
        "Project name",
        &defaults.name,
        answers.name.as_deref(),
        interactive,
        input,
        output,
    )?;

    let target_audience = free_text(
        "Target audience",
        &defaults.target_audience,
        answers.target_audience.as_deref(),
        interactive,
        input,
        output,
    )?;

    let tech_stack = tech_stack_question(
        answers.tech_stack.as_deref(),
        interactive,
        input,
        output,
    )?;

    let architecture_style = choice_question::<ArchitectureStyle, _, _>(
        "Architecture style",
        defaults.architecture_style,
        answers.architecture_style.as_deref(),
        interactive,
        input,
        output,
    )?;

    let development_approach = choice_question::<DevelopmentApproach, _, _>(
        "Development approach",
        defaults.development_approach,
        answers.development_approach.as_deref(),
        interactive,
        input,
        output,
    )?;

    let coordination_level = choice_question::<CoordinationLevel, _, _>(
        "Team coordination level",
        defaults.coordination_level,
        answers.coordination_level.as_deref(),
        interactive,
        input,
        output,
    )?;

    let timeline = free_text(
        "Timeline",
        &defaults.timeline,
        answers.timeline.as_deref(),
        interactive,
        input,
        output,
    )?;

    let compliance_raw = free_text(
        "Compliance requirements (comma-separated, blank for none)",
        "",
        answers.compliance_requirements.as_deref(),
        interactive,
        input,
        output,
    )?;
    let compliance_requirements: Vec<String> = compliance_raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let quality_requirements = free_text(
        "Quality requirements",
        &defaults.quality_requirements,
        answers.quality_requirements.as_deref(),
        interactive,
        input,
        output,
    )?;

    Ok(ProjectInfo {
        name,
        description: description.trim().to_string(),
        target_audience,
        tech_stack,
        architecture_style,
        development_approach,
        coordination_level,
        timeline,
        compliance_requirements,
        quality_requirements,
    })
}

// ---------------------------------------------------------------------------
// Question kinds
// ---------------------------------------------------------------------------

fn free_text<R: BufRead, W: Write>(
    question: &str,
    default: &str,
    preset: Option<&str>,
    interactive: bool,
    input: &mut R,
    output: &mut W,
) -> Result<String> {
    if let Some(value) = preset {
        let value = value.trim();
        if !value.is_empty() {
            return Ok(value.to_string());
        }
    }
    if !interactive {
        return Ok(default.to_string());
    }
    loop {
        if default.is_empty() {
            write!(output, "{question}: ")?;
        } else {
            write!(output, "{question} [{default}]: ")?;
        }
        output.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(default.to_string());
        };
        let line = line.trim();
        if line.is_empty() {
            if default.is_empty() && question_requires_value(question) {
                writeln!(output, "A value is required.")?;
                continue;
            }
            return Ok(default.to_string());
        }
        return Ok(line.to_string());
    }
}

// Only the name question has no usable default when its default is blank;
// everything else treats blank-with-empty-default as "none".
fn question_requires_value(question: &str) -> bool {
    question == "Project name"
}

fn choice_question<T: ChoiceField, R: BufRead, W: Write>(
    question: &str,
    default: T,
    preset: Option<&str>,
    interactive: bool,
    input: &mut R,
    output: &mut W,
) -> Result<T> {
    if let Some(value) = preset {
        return T::parse(value.trim()).ok_or_else(|| ForgeError::InvalidChoice {
            field: T::FIELD.to_string(),
            value: value.to_string(),
            expected: T::choices(),
        });
    }
    if !interactive {
        return Ok(default);
    }
    let items = T::all();
    loop {
        writeln!(output, "{question}:")?;
        for (i, item) in items.iter().enumerate() {
            writeln!(output, "  {}) {}", i + 1, item.label())?;
        }
        write!(output, "Choose 1-{} [{}]: ", items.len(), default.as_str())?;
        output.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(default);
        };
        let line = line.trim();
        if line.is_empty() {
            return Ok(default);
        }
        match line.parse::<usize>() {
            Ok(n) if n >= 1 && n <= items.len() => return Ok(items[n - 1]),
            _ => writeln!(output, "Please enter a number between 1 and {}.", items.len())?,
        }
    }
}

fn tech_stack_question<R: BufRead, W: Write>(
    preset: Option<&str>,
    interactive: bool,
    input: &mut R,
    output: &mut W,
) -> Result<TechStack> {
    if let Some(value) = preset {
        let value = value.trim();
        if value.is_empty() {
            return Err(ForgeError::InvalidChoice {
                field: "tech_stack".to_string(),
                value: value.to_string(),
                expected: "a stack name or custom text".to_string(),
            });
        }
        return Ok(TechStack::parse(value));
    }
    if !interactive {
        return Ok(TechStack::WebFullstack);
    }
    let known = TechStack::known();
    loop {
        writeln!(output, "Tech stack:")?;
        for (i, item) in known.iter().enumerate() {
            writeln!(output, "  {}) {}", i + 1, item.label())?;
        }
        writeln!(output, "  {}) Custom — describe your own", known.len() + 1)?;
        write!(output, "Choose 1-{} [1]: ", known.len() + 1)?;
        output.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(TechStack::WebFullstack);
        };
        let line = line.trim();
        if line.is_empty() {
            return Ok(TechStack::WebFullstack);
        }
        match line.parse::<usize>() {
            Ok(n) if n >= 1 && n <= known.len() => return Ok(known[n - 1].clone()),
            Ok(n) if n == known.len() + 1 => loop {
                write!(output, "Describe the stack: ")?;
                output.flush()?;
                let Some(text) = read_line(input)? else {
                    return Ok(TechStack::WebFullstack);
                };
                let text = text.trim();
                if !text.is_empty() {
                    return Ok(TechStack::Custom(text.to_string()));
                }
                writeln!(output, "A description is required for a custom stack.")?;
            },
            _ => writeln!(
                output,
                "Please enter a number between 1 and {}.",
                known.len() + 1
            )?,
        }
    }
}

/// Returns `None` on EOF so prompt loops terminate on scripted input.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let n = input.read_line(&mut line)?;
    if n == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(description: &str, interactive: bool, answers: &Answers, script: &str) -> Result<ProjectInfo> {
        let mut input = Cursor::new(script.to_string());
        let mut output = Vec::new();
        collect(description, interactive, answers, &mut input, &mut output)
    }

    #[test]
    fn non_interactive_uses_defaults() {
        let info = run("Recipe sharing app", false, &Answers::default(), "").unwrap();
        assert_eq!(info.name, "Recipe sharing app");
        assert_eq!(info.tech_stack, TechStack::WebFullstack);
        assert_eq!(info.architecture_style, ArchitectureStyle::Monolithic);
        assert!(info.compliance_requirements.is_empty());
    }

    #[test]
    fn presets_win_without_prompting() {
        let answers = Answers {
            name: Some("Cookbook".into()),
            tech_stack: Some("rust_systems".into()),
            architecture_style: Some("serverless".into()),
            compliance_requirements: Some("gdpr, soc2".into()),
            ..Default::default()
        };
        let info = run("Recipe app", false, &answers, "").unwrap();
        assert_eq!(info.name, "Cookbook");
        assert_eq!(info.tech_stack, TechStack::RustSystems);
        assert_eq!(info.architecture_style, ArchitectureStyle::Serverless);
        assert_eq!(info.compliance_requirements, vec!["gdpr", "soc2"]);
    }

    #[test]
    fn invalid_preset_choice_errors() {
        let answers = Answers {
            architecture_style: Some("pyramid".into()),
            ..Default::default()
        };
        let err = run("App", false, &answers, "").unwrap_err();
        assert!(matches!(err, ForgeError::InvalidChoice { .. }));
    }

    #[test]
    fn custom_tech_stack_preset() {
        let answers = Answers {
            tech_stack: Some("haskell + nix".into()),
            ..Default::default()
        };
        let info = run("App", false, &answers, "").unwrap();
        assert_eq!(info.tech_stack, TechStack::Custom("haskell + nix".into()));
    }

    #[test]
    fn interactive_blank_input_takes_defaults() {
        // One blank line per question.
        let script = "\n".repeat(9);
        let info = run("My app", true, &Answers::default(), &script).unwrap();
        assert_eq!(info.name, "My app");
        assert_eq!(info.development_approach, DevelopmentApproach::Agile);
    }

    #[test]
    fn interactive_out_of_range_reprompts() {
        // name, audience, then tech stack: "9" (invalid), "abc" (invalid),
        // "3" (rust_systems); blanks for the rest.
        let script = "\n\n9\nabc\n3\n\n\n\n\n\n";
        let info = run("My app", true, &Answers::default(), script).unwrap();
        assert_eq!(info.tech_stack, TechStack::RustSystems);
    }

    #[test]
    fn interactive_custom_stack_flow() {
        // Tech stack menu: "5" selects custom, blank re-prompts, then text.
        let script = "\n\n5\n\nembedded C\n\n\n\n\n\n";
        let info = run("My app", true, &Answers::default(), script).unwrap();
        assert_eq!(info.tech_stack, TechStack::Custom("embedded C".into()));
    }

    #[test]
    fn empty_description_rejected() {
        let err = run("  ", false, &Answers::default(), "").unwrap_err();
        assert!(matches!(err, ForgeError::InvalidDescription));
    }

    #[test]
    fn interactive_choice_number_selects() {
        // architecture question is 4th; pick microservices (2).
        let script = "\n\n\n2\n\n\n\n\n\n";
        let info = run("My app", true, &Answers::default(), script).unwrap();
        assert_eq!(info.architecture_style, ArchitectureStyle::Microservices);
    }
}
