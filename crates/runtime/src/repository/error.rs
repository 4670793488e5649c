use std::path::PathBuf;

/// Failures raised by sample and artifact repositories.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("io failure on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode sample log entry")]
    SampleEncode(#[source] bincode::Error),

    #[error("failed to decode sample log entry at offset {offset}")]
    SampleDecode {
        offset: u64,
        #[source]
        source: bincode::Error,
    },

    #[error("failed to serialize model artifact: {0}")]
    ArtifactEncode(String),

    #[error("failed to parse model artifact {path}: {message}")]
    ArtifactDecode { path: PathBuf, message: String },
}

impl RepositoryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
