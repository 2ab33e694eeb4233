//! Data storage layer
//!
//! Provides the store behind the catalog:
//! - `sqlite` - embedded SQLite service (schema, migrations, repositories)
//! - `types` - row, input, and filter types shared with the domain layer
//! - `error` - error taxonomy for store operations

pub mod error;
pub mod sqlite;
pub mod types;

pub use error::StoreError;
pub use sqlite::SqliteService;
