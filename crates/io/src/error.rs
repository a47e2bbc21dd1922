use std::path::PathBuf;

use potflow_fields::FieldError;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write output: {0}")]
    Write(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("element {index} ({kind}): {reason}")]
    InvalidElement {
        index: usize,
        kind: &'static str,
        reason: String,
    },
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
    #[error(transparent)]
    Field(#[from] FieldError),
}
