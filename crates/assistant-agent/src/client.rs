//! Blocking facade over a single-threaded tokio runtime that drives the
//! external assistant subprocess.

use crate::error::{AgentError, Result};
use crate::{probe, Assistant};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Bound on one generation call. No retry: one invocation attempt per
/// document.
pub const GENERATE_TIMEOUT: Duration = Duration::from_secs(60);

/// A handle to one assistant. Availability is probed once at construction
/// and cached; [`AssistantClient::generate`] degrades to `None` on every
/// failure class instead of erroring.
pub struct AssistantClient {
    assistant: Assistant,
    available: bool,
    runtime: tokio::runtime::Runtime,
}

impl AssistantClient {
    pub fn new(assistant: Assistant) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| AgentError::Runtime(e.to_string()))?;
        let available = runtime.block_on(probe::probe(assistant));
        tracing::debug!(assistant = assistant.as_str(), available, "probed assistant");
        Ok(Self {
            assistant,
            available,
            runtime,
        })
    }

    pub fn assistant(&self) -> Assistant {
        self.assistant
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Invoke the assistant once with `prompt`. Returns `None` when the
    /// assistant is unavailable or the call times out, exits non-zero, or
    /// produces empty output — the caller falls back to template rendering.
    pub fn generate(&self, prompt: &str) -> Option<String> {
        if !self.available {
            return None;
        }
        // Copilot is editor-integrated: detectable, not invokable as a
        // subprocess. Its content always comes from the fallback renderer.
        let command = self.assistant.command()?;

        match self.runtime.block_on(invoke(
            command,
            self.assistant.prompt_args(),
            prompt,
            GENERATE_TIMEOUT,
        )) {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::debug!(
                    assistant = self.assistant.as_str(),
                    error = %e,
                    "assistant call failed, falling back"
                );
                None
            }
        }
    }
}

/// Spawn `<command> <args...>` with the prompt on stdin and capture stdout,
/// the whole exchange bounded by `timeout`.
///
/// The stdin write must sit inside the timed section: a child that never
/// reads its input leaves the pipe full once the prompt exceeds the OS
/// buffer, and an unbounded `write_all` would hang there forever.
async fn invoke(
    command: &str,
    args: &[&str],
    prompt: &str,
    timeout: Duration,
) -> Result<String> {
    let mut cmd = Command::new(command);
    cmd.args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd.spawn()?;
    let stdin = child.stdin.take();

    let exchange = async {
        if let Some(mut stdin) = stdin {
            stdin.write_all(prompt.as_bytes()).await?;
            // Drop closes stdin and signals end of input.
        }
        child.wait_with_output().await
    };

    let output = match tokio::time::timeout(timeout, exchange).await {
        Ok(result) => result?,
        Err(_) => return Err(AgentError::Timeout(timeout.as_secs())),
    };

    if !output.status.success() {
        return Err(AgentError::Failed {
            status: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let text = String::from_utf8_lossy(&output.stdout).to_string();
    if text.trim().is_empty() {
        return Err(AgentError::EmptyOutput);
    }
    Ok(text)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn invoke_captures_stdout() {
        let text = invoke("cat", &[], "hello from the prompt", GENERATE_TIMEOUT)
            .await
            .unwrap();
        assert_eq!(text, "hello from the prompt");
    }

    #[tokio::test]
    async fn invoke_missing_executable_is_io_error() {
        let err = invoke(
            "definitely-not-a-real-assistant-binary",
            &[],
            "x",
            GENERATE_TIMEOUT,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AgentError::Io(_)));
    }

    #[tokio::test]
    async fn invoke_nonzero_exit_is_failure() {
        let err = invoke("false", &[], "x", GENERATE_TIMEOUT).await.unwrap_err();
        assert!(matches!(err, AgentError::Failed { .. }));
    }

    #[tokio::test]
    async fn invoke_empty_output_is_rejected() {
        let err = invoke("true", &[], "x", GENERATE_TIMEOUT).await.unwrap_err();
        assert!(matches!(err, AgentError::EmptyOutput));
    }

    #[tokio::test]
    async fn invoke_slow_child_times_out() {
        let err = invoke("sleep", &["5"], "x", Duration::from_millis(200))
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::Timeout(_)));
    }

    #[tokio::test]
    async fn stalled_reader_with_large_prompt_times_out() {
        // The child never reads stdin, so a prompt well past the OS pipe
        // buffer blocks the write itself. The timeout must still fire.
        let prompt = "x".repeat(1 << 20);
        let err = invoke("sleep", &["5"], &prompt, Duration::from_millis(200))
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::Timeout(_)));
    }

    #[test]
    fn client_for_none_is_unavailable() {
        let client = AssistantClient::new(Assistant::None).unwrap();
        assert!(!client.is_available());
        assert_eq!(client.generate("prompt"), None);
    }

    #[test]
    fn client_for_missing_binary_degrades_to_none() {
        // Unless a real `gemini` binary is installed and responding, this
        // client must construct fine and generate nothing.
        let client = AssistantClient::new(Assistant::Gemini).unwrap();
        if !client.is_available() {
            assert_eq!(client.generate("prompt"), None);
        }
    }
}
