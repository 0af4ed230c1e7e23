use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForgeError {
    #[error("project description must not be empty")]
    InvalidDescription,

    #[error("project not found at {0}: expected a specs/NNN-name directory")]
    ProjectNotFound(String),

    #[error("missing Discovery baseline for step '{step}' in {path}: run enhance-step-1 first")]
    MissingProject { step: String, path: String },

    #[error("invalid value '{value}' for {field}: expected one of {expected}")]
    InvalidChoice {
        field: String,
        value: String,
        expected: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, ForgeError>;
