use std::path::PathBuf;

/// Failure while reading or validating a model artifact.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{name}: {reason}")]
    Invalid { name: String, reason: String },
}

impl ArtifactError {
    pub fn invalid(name: &str, reason: impl Into<String>) -> Self {
        ArtifactError::Invalid {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
