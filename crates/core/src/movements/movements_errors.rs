use thiserror::Error;

/// Errors specific to ledger movements.
#[derive(Error, Debug)]
pub enum MovementError {
    #[error("Movement not found: {0}")]
    NotFound(String),

    #[error("Invalid movement kind: {0}")]
    InvalidKind(String),

    #[error("Invalid movement data: {0}")]
    InvalidData(String),
}
