//! Database layer - connection pool and query executors
//!
//! The controller only sees [`QueryExecutor`]. Two implementations:
//!
//! - [`PgExecutor`] over a sqlx `PgPool`, every value bound as a parameter
//! - [`InMemoryExecutor`] for tests and `serve --in-memory`

pub mod pool;
pub mod executor;
pub mod postgres;
pub mod memory;

pub use pool::create_pool;
pub use executor::{DbError, QueryExecutor};
pub use postgres::PgExecutor;
pub use memory::InMemoryExecutor;
