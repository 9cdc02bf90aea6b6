//! # Restoration Database Crate
//!
//! The application-specific interface to PostgreSQL.
//!
//! ## Architectural Principles
//!
//! - **Two schemas:** tables live in an internal schema; the API only reads
//!   through compatibility views in a separate API-facing schema. Pooled
//!   connections put the API schema first on their `search_path`.
//! - **Parameterized statements:** every query is a [`SqlStatement`], text with
//!   `$n` placeholders plus the typed values bound to them. Values are never
//!   spliced into the SQL text.
//! - **Forward-only migrations:** [`migrations`] holds ordered, run-once steps.
//!   Their `down` scripts are empty; mistakes are fixed by a later migration.
//!
//! ## Public API
//!
//! - `connect` / `connect_lazy`: build the connection pool.
//! - `run_migrations`: apply every pending migration in version order.
//! - `DbRepository`: the data access methods used by the HTTP handlers.
//! - `SchemaContext`: the validated pair of schema names.
//! - `DbError`: connection and migration failures. Query failures are
//!   reported as `core_types::ApiError`.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod migrations;
pub mod queries;
pub mod repository;
pub mod schema;
pub mod sql;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, connect_lazy, PoolSettings};
pub use error::DbError;
pub use migrations::run_migrations;
pub use repository::DbRepository;
pub use schema::SchemaContext;
pub use sql::{SqlBuilder, SqlParam, SqlStatement};
