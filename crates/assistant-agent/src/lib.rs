//! `assistant-agent` — uniform driver for external AI assistant CLIs.
//!
//! Detects whether an assistant is reachable (executable on PATH for
//! `claude`/`gemini`, editor-session env signals for Copilot), then invokes
//! it as a subprocess with the prompt on stdin under a 60-second timeout.
//! Every failure class degrades to `None` so callers can fall back to
//! deterministic template rendering.

pub mod client;
pub mod error;
pub mod probe;

pub use client::{AssistantClient, GENERATE_TIMEOUT};
pub use error::AgentError;

/// The assistants this tool knows how to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assistant {
    Copilot,
    Claude,
    Gemini,
    None,
}

impl Assistant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Copilot => "copilot",
            Self::Claude => "claude",
            Self::Gemini => "gemini",
            Self::None => "none",
        }
    }

    pub fn parse(s: &str) -> Option<Assistant> {
        match s {
            "copilot" => Some(Self::Copilot),
            "claude" => Some(Self::Claude),
            "gemini" => Some(Self::Gemini),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    /// The executable to invoke, if this assistant has one. Copilot is
    /// editor-integrated and has no subprocess form.
    pub fn command(&self) -> Option<&'static str> {
        match self {
            Self::Claude => Some("claude"),
            Self::Gemini => Some("gemini"),
            Self::Copilot | Self::None => None,
        }
    }

    /// Arguments that put the tool in single-shot, plain-output mode, with
    /// the prompt arriving on stdin.
    pub fn prompt_args(&self) -> &'static [&'static str] {
        match self {
            Self::Claude => &["--print"],
            Self::Gemini => &[],
            Self::Copilot | Self::None => &[],
        }
    }
}
