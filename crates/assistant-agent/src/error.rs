use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("assistant timed out after {0} seconds")]
    Timeout(u64),

    #[error("assistant exited with status {status}: {stderr}")]
    Failed { status: i32, stderr: String },

    #[error("assistant produced no output")]
    EmptyOutput,

    #[error("failed to build async runtime: {0}")]
    Runtime(String),
}

pub type Result<T> = std::result::Result<T, AgentError>;
