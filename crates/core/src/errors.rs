//! Core error types for the Moneybook application.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use chrono::ParseError as ChronoParseError;
use serde::Serialize;
use thiserror::Error;

use crate::movements::MovementError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the bookkeeping engine.
///
/// Every failure aborts the surrounding ledger operation as a whole; there is
/// no partial-success mode.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Movement error: {0}")]
    Movement(#[from] MovementError),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    /// A balance or net effect left the representable decimal range.
    #[error("Arithmetic overflow: {0}")]
    ArithmeticOverflow(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Stable, machine-readable classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    Validation,
    MovementNotFound,
    AccountNotFound,
    PersistenceFailure,
    InvalidMovementKind,
    ConstraintViolation,
    Configuration,
    ArithmeticOverflow,
    Unexpected,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "VALIDATION",
            ErrorKind::MovementNotFound => "MOVEMENT_NOT_FOUND",
            ErrorKind::AccountNotFound => "ACCOUNT_NOT_FOUND",
            ErrorKind::PersistenceFailure => "PERSISTENCE_FAILURE",
            ErrorKind::InvalidMovementKind => "INVALID_MOVEMENT_KIND",
            ErrorKind::ConstraintViolation => "CONSTRAINT_VIOLATION",
            ErrorKind::Configuration => "CONFIGURATION",
            ErrorKind::ArithmeticOverflow => "ARITHMETIC_OVERFLOW",
            ErrorKind::Unexpected => "UNEXPECTED",
        }
    }
}

impl Error {
    /// Classifies the error for callers that branch on the failure kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Database(DatabaseError::ForeignKeyViolation(_))
            | Error::Database(DatabaseError::UniqueViolation(_)) => ErrorKind::ConstraintViolation,
            Error::Database(_) => ErrorKind::PersistenceFailure,
            Error::Validation(_) => ErrorKind::Validation,
            Error::Movement(MovementError::NotFound(_)) => ErrorKind::MovementNotFound,
            Error::Movement(MovementError::InvalidKind(_)) => ErrorKind::InvalidMovementKind,
            Error::Movement(MovementError::InvalidData(_)) => ErrorKind::Validation,
            Error::AccountNotFound(_) => ErrorKind::AccountNotFound,
            Error::ConstraintViolation(_) => ErrorKind::ConstraintViolation,
            Error::InvalidConfigValue(_) => ErrorKind::Configuration,
            Error::ArithmeticOverflow(_) => ErrorKind::ArithmeticOverflow,
            Error::Unexpected(_) => ErrorKind::Unexpected,
        }
    }
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint was violated.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// A database transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
