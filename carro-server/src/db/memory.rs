//! In-memory executor
//!
//! Ids start at 1 and are never reused. Rows are returned in id order.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{DbError, QueryExecutor};
use crate::models::{CarChanges, CarRecord, NewCar};

#[derive(Default)]
struct Table {
    rows: BTreeMap<i64, CarRecord>,
    last_id: i64,
}

/// Executor holding rows in process memory
#[derive(Default)]
pub struct InMemoryExecutor {
    table: RwLock<Table>,
}

impl InMemoryExecutor {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QueryExecutor for InMemoryExecutor {
    async fn fetch_all(&self) -> Result<Vec<CarRecord>, DbError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn fetch_one(&self, id: i64) -> Result<Option<CarRecord>, DbError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, car: &NewCar) -> Result<i64, DbError> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let id = table.last_id;
        table.rows.insert(id, car.clone().into_record(id));
        Ok(id)
    }

    async fn delete(&self, id: i64) -> Result<u64, DbError> {
        let removed = self.table.write().await.rows.remove(&id);
        Ok(u64::from(removed.is_some()))
    }

    async fn update(&self, id: i64, changes: &CarChanges) -> Result<u64, DbError> {
        let mut table = self.table.write().await;
        let Some(car) = table.rows.get_mut(&id) else {
            return Ok(0);
        };
        if let Some(brand) = &changes.brand {
            car.brand = brand.clone();
        }
        if let Some(model) = &changes.model {
            car.model = model.clone();
        }
        if let Some(year) = changes.year {
            car.year = year;
        }
        if let Some(color) = &changes.color {
            car.color = color.clone();
        }
        if let Some(price) = changes.price {
            car.price = price;
        }
        Ok(1)
    }
}
