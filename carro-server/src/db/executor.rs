//! Query executor trait (testable seam between controller and store)

use async_trait::async_trait;

use crate::models::{CarChanges, CarRecord, NewCar};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Parameterized access to the `carro` table.
///
/// Connections are taken from a pool per call and released when the call
/// returns; nothing is held across operations.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Every row, in whatever order the store returns them.
    async fn fetch_all(&self) -> Result<Vec<CarRecord>, DbError>;

    /// The row with this id, if any.
    async fn fetch_one(&self, id: i64) -> Result<Option<CarRecord>, DbError>;

    /// Insert a row and return the id the store assigned.
    async fn insert(&self, car: &NewCar) -> Result<i64, DbError>;

    /// Delete by id, returning the number of rows removed.
    async fn delete(&self, id: i64) -> Result<u64, DbError>;

    /// Overwrite the given fields, returning the number of rows matched.
    async fn update(&self, id: i64, changes: &CarChanges) -> Result<u64, DbError>;

    /// Check the store answers at all. Stores without a connection always do.
    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }
}
