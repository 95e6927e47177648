use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutogenError {
    #[error("unknown action '{name}' (available: {available})")]
    UnknownAction { name: String, available: String },

    #[error("invalid action name '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidActionName(String),

    #[error("action '{name}' matches more than one script: {candidates}")]
    AmbiguousScript { name: String, candidates: String },

    #[error("tool not found on PATH: {0}")]
    ToolNotFound(String),

    #[error("failed to start '{program}': {reason}")]
    Spawn { program: String, reason: String },

    #[error("'{program}' exited with status {code}")]
    StepFailed { program: String, code: i32 },

    #[error("version file {0} is empty")]
    EmptyVersion(String),

    #[error("package source missing: {0}")]
    MissingSource(String),

    #[error("failed to copy {path}: {reason}")]
    Copy { path: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl AutogenError {
    /// Process exit code this error maps to.
    pub fn exit_code(&self) -> i32 {
        match self {
            AutogenError::StepFailed { code, .. } => *code,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, AutogenError>;
