use potflow_domain::DomainError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] DomainError),
    #[error("r2 floor must be finite and positive, got {0}")]
    InvalidR2Floor(f64),
    #[error("result shape {result:?} does not match grid shape {grid:?}")]
    GridMismatch {
        result: (usize, usize),
        grid: (usize, usize),
    },
}
