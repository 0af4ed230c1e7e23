//! Assistant availability probing. Each probe runs once, at client
//! construction; the result is cached for the client's lifetime.

use crate::Assistant;
use std::time::Duration;
use tokio::process::Command;

/// Bound on the `--version` sanity check. Generation calls get their own,
/// longer timeout.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Environment variables that signal an editor-integrated Copilot session.
const COPILOT_ENV_SIGNALS: &[&str] = &["GITHUB_COPILOT_TOKEN", "VSCODE_PID", "COPILOT_AGENT"];

/// Probe whether `assistant` can be invoked from this process.
pub async fn probe(assistant: Assistant) -> bool {
    match assistant {
        Assistant::None => false,
        Assistant::Copilot => editor_session_signals(std::env::vars()),
        Assistant::Claude | Assistant::Gemini => {
            let Some(command) = assistant.command() else {
                return false;
            };
            if which::which(command).is_err() {
                return false;
            }
            version_ok(command).await
        }
    }
}

/// Copilot has no standalone executable to probe; availability means the
/// process is running inside an editor session that exposes it.
pub fn editor_session_signals(vars: impl Iterator<Item = (String, String)>) -> bool {
    for (key, value) in vars {
        if COPILOT_ENV_SIGNALS.contains(&key.as_str()) && !value.is_empty() {
            return true;
        }
        if key == "TERM_PROGRAM" && value == "vscode" {
            return true;
        }
    }
    false
}

/// Run `<command> --version` as a sanity check that the executable on PATH
/// actually responds.
async fn version_ok(command: &str) -> bool {
    let mut cmd = Command::new(command);
    cmd.arg("--version")
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .kill_on_drop(true);

    match tokio::time::timeout(PROBE_TIMEOUT, async {
        cmd.status().await
    })
    .await
    {
        Ok(Ok(status)) => status.success(),
        Ok(Err(e)) => {
            tracing::debug!(command, error = %e, "version probe failed to spawn");
            false
        }
        Err(_) => {
            tracing::debug!(command, "version probe timed out");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Iterator<Item = (String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn copilot_signals_detected() {
        assert!(editor_session_signals(vars(&[("TERM_PROGRAM", "vscode")])));
        assert!(editor_session_signals(vars(&[("VSCODE_PID", "1234")])));
        assert!(editor_session_signals(vars(&[(
            "GITHUB_COPILOT_TOKEN",
            "tok"
        )])));
    }

    #[test]
    fn copilot_signals_absent() {
        assert!(!editor_session_signals(vars(&[])));
        assert!(!editor_session_signals(vars(&[("TERM_PROGRAM", "iterm")])));
        assert!(!editor_session_signals(vars(&[("VSCODE_PID", "")])));
    }

    #[tokio::test]
    async fn none_is_never_available() {
        assert!(!probe(Assistant::None).await);
    }

    #[tokio::test]
    async fn version_check_handles_missing_executable() {
        assert!(!version_ok("definitely-not-a-real-assistant-binary").await);
    }
}
