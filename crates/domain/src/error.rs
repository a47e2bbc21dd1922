#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("shape mismatch: X is {x_shape:?}, Y is {y_shape:?}")]
    ShapeMismatch {
        x_shape: (usize, usize),
        y_shape: (usize, usize),
    },
    #[error("ragged rows in {array}: row {row} has {got} columns, expected {expected}")]
    RaggedRows {
        array: &'static str,
        row: usize,
        expected: usize,
        got: usize,
    },
    #[error("{array} length mismatch: expected {expected}, got {got}")]
    LengthMismatch {
        array: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("grid of {rows}x{cols} nodes overflows the address space")]
    TooLarge { rows: usize, cols: usize },
}
