//! SQLite storage implementation for Moneybook.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `moneybook-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for accounts, balances, movements and settings
//! - The atomic ledger scope used by the ledger service
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The core crate is database-agnostic and works with traits.
//!
//! ```text
//!          core (domain)
//!                │
//!                ▼
//!    storage-sqlite (this crate)
//!                │
//!                ▼
//!            SQLite DB
//! ```
//!
//! Reads go through the connection pool. All writes go through a single writer
//! actor that runs each job inside `BEGIN IMMEDIATE`, so ledger operations are
//! serialized and either fully committed or fully rolled back.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod accounts;
pub mod balances;
pub mod ledger;
pub mod movements;
pub mod settings;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use accounts::AccountRepository;
pub use balances::BalanceRepository;
pub use ledger::{SqliteLedgerExecutor, SqliteLedgerScope};
pub use movements::MovementRepository;
pub use settings::SettingsRepository;

// Re-export from moneybook-core for convenience
pub use moneybook_core::errors::{DatabaseError, Error, Result};
