mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::AnswerFlags;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "specforge",
    about = "Documentation scaffolding CLI — generate spec trees from a short project description",
    version,
    propagate_version = true
)]
struct Cli {
    /// Working root (default: configured target project root or auto-detect)
    #[arg(long, global = true, env = "SPECFORGE_ROOT")]
    root: Option<PathBuf>,

    /// Verbose diagnostics, including assistant fallback events
    #[arg(long, global = true)]
    debug: bool,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new project: discovery questionnaire + Step-1 document set
    Start {
        description: String,

        /// AI assistant to enrich content (copilot, claude, gemini)
        #[arg(long)]
        ai: Option<String>,

        /// Skip all prompts and use defaults
        #[arg(long)]
        defaults: bool,

        #[command(flatten)]
        answers: AnswerFlags,
    },

    /// Run Step 1 (Discovery) only
    #[command(name = "enhance-step-1")]
    EnhanceStep1 {
        description: Option<String>,

        /// Reconstruct project info from an existing project instead of prompting
        #[arg(long)]
        existing_project: bool,

        /// Existing project directory (specs/NNN-name) to target
        #[arg(long)]
        project_path: Option<PathBuf>,

        #[arg(long)]
        ai: Option<String>,

        #[arg(long)]
        defaults: bool,

        #[command(flatten)]
        answers: AnswerFlags,
    },

    /// Run Step 2 (SPARC) against an existing project
    #[command(name = "enhance-step-2")]
    EnhanceStep2 {
        #[arg(long)]
        project_path: PathBuf,

        #[arg(long)]
        ai: Option<String>,
    },

    /// Run Step 3 (Context) against an existing project
    #[command(name = "enhance-step-3")]
    EnhanceStep3 {
        #[arg(long)]
        project_path: PathBuf,

        #[arg(long)]
        ai: Option<String>,
    },

    /// Run Step 4 (PACT) against an existing project
    #[command(name = "enhance-step-4")]
    EnhanceStep4 {
        #[arg(long)]
        project_path: PathBuf,

        #[arg(long)]
        ai: Option<String>,
    },

    /// Run all four steps in order, using default answers
    #[command(name = "project-start-enhanced")]
    ProjectStartEnhanced {
        description: String,

        #[arg(long)]
        ai: Option<String>,
    },

    /// Record a target project root for subsequent invocations
    #[command(name = "configure-project-root")]
    ConfigureProjectRoot { path: Option<PathBuf> },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Start {
            description,
            ai,
            defaults,
            answers,
        } => cmd::start::run(&root, &description, ai.as_deref(), defaults, &answers, cli.json),
        Commands::EnhanceStep1 {
            description,
            existing_project,
            project_path,
            ai,
            defaults,
            answers,
        } => cmd::enhance::step1(
            &root,
            description.as_deref(),
            existing_project,
            project_path.as_deref(),
            ai.as_deref(),
            defaults,
            &answers,
            cli.json,
        ),
        Commands::EnhanceStep2 { project_path, ai } => {
            cmd::enhance::step_n(&root, 2, &project_path, ai.as_deref(), cli.json)
        }
        Commands::EnhanceStep3 { project_path, ai } => {
            cmd::enhance::step_n(&root, 3, &project_path, ai.as_deref(), cli.json)
        }
        Commands::EnhanceStep4 { project_path, ai } => {
            cmd::enhance::step_n(&root, 4, &project_path, ai.as_deref(), cli.json)
        }
        Commands::ProjectStartEnhanced { description, ai } => {
            cmd::start::run_all(&root, &description, ai.as_deref(), cli.json)
        }
        Commands::ConfigureProjectRoot { path } => cmd::configure::run(path.as_deref()),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
