//! # Camp Registry Database Crate
//!
//! This crate is the record store: it persists campers, activities and
//! signups in SQLite and owns the relational rules between them.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** all SQL lives here. The rest of the application sees typed
//!   records from `core-types` and the [`DbError`] taxonomy.
//! - **Explicit units of work:** every operation runs inside a [`UnitOfWork`]
//!   obtained from [`DbRepository::begin`]. Nothing is written until
//!   [`UnitOfWork::commit`] is called; dropping the unit of work rolls back.
//! - **Integrity in the schema:** foreign keys, cascades and range checks are
//!   declared in the migrations, so a write that slips past validation is still
//!   refused and surfaces as [`DbError::IntegrityViolation`].
//!
//! ## Public API
//!
//! - `connect` / `connect_in_memory`: build the connection pool.
//! - `run_migrations`: apply the embedded schema migrations.
//! - `DbRepository`: holds the pool and opens units of work.
//! - `DbError`: the error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, connect_in_memory, run_migrations};
pub use error::DbError;
pub use repository::{DbRepository, UnitOfWork};
