//! PostgreSQL executor
//!
//! Table layout lives in `sql/schema.sql`. Column names are fixed here;
//! values always travel as bind parameters.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{DbError, QueryExecutor};
use crate::models::{CarChanges, CarRecord, NewCar};

const SELECT_ALL: &str = "SELECT id, brand, model, year, color, price FROM carro";
const SELECT_ONE: &str = "SELECT id, brand, model, year, color, price FROM carro WHERE id = $1";

/// Executor backed by a sqlx connection pool
#[derive(Clone)]
pub struct PgExecutor {
    pool: PgPool,
}

impl PgExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueryExecutor for PgExecutor {
    async fn fetch_all(&self) -> Result<Vec<CarRecord>, DbError> {
        let cars = sqlx::query_as::<_, CarRecord>(SELECT_ALL)
            .fetch_all(&self.pool)
            .await?;
        Ok(cars)
    }

    async fn fetch_one(&self, id: i64) -> Result<Option<CarRecord>, DbError> {
        let car = sqlx::query_as::<_, CarRecord>(SELECT_ONE)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(car)
    }

    async fn insert(&self, car: &NewCar) -> Result<i64, DbError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO carro (brand, model, year, color, price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&car.brand)
        .bind(&car.model)
        .bind(car.year)
        .bind(&car.color)
        .bind(car.price)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn delete(&self, id: i64) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM carro WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn update(&self, id: i64, changes: &CarChanges) -> Result<u64, DbError> {
        let mut query = build_update(id, changes);
        let result = query.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// `UPDATE carro SET <col> = $n, ... WHERE id = $m` for the present fields.
///
/// Callers must not pass empty changes.
fn build_update(id: i64, changes: &CarChanges) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::<Postgres>::new("UPDATE carro SET ");
    let mut set = query.separated(", ");
    if let Some(brand) = &changes.brand {
        set.push("brand = ").push_bind_unseparated(brand.clone());
    }
    if let Some(model) = &changes.model {
        set.push("model = ").push_bind_unseparated(model.clone());
    }
    if let Some(year) = changes.year {
        set.push("year = ").push_bind_unseparated(year);
    }
    if let Some(color) = &changes.color {
        set.push("color = ").push_bind_unseparated(color.clone());
    }
    if let Some(price) = changes.price {
        set.push("price = ").push_bind_unseparated(price);
    }
    query.push(" WHERE id = ").push_bind(id);
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_pool;

    #[test]
    fn update_binds_only_present_fields() {
        let changes = CarChanges {
            color: Some("blue".into()),
            price: Some(9.5),
            ..Default::default()
        };
        let query = build_update(3, &changes);
        assert_eq!(
            query.sql(),
            "UPDATE carro SET color = $1, price = $2 WHERE id = $3"
        );
    }

    // Run with: DATABASE_URL=postgres://... cargo test -p carro-server -- --ignored

    async fn executor() -> PgExecutor {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        sqlx::raw_sql(include_str!("../../sql/schema.sql"))
            .execute(&pool)
            .await
            .expect("schema setup failed");
        PgExecutor::new(pool)
    }

    fn corolla() -> NewCar {
        NewCar {
            brand: "Toyota".into(),
            model: "Corolla".into(),
            year: 2020,
            color: "red".into(),
            price: 15000.5,
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn insert_then_fetch() {
        let db = executor().await;
        let id = db.insert(&corolla()).await.unwrap();
        assert!(id > 0);

        let car = db.fetch_one(id).await.unwrap().expect("row missing");
        assert_eq!(car, corolla().into_record(id));
        assert!(db.fetch_all().await.unwrap().iter().any(|c| c.id == id));

        assert_eq!(db.delete(id).await.unwrap(), 1);
        assert!(db.fetch_one(id).await.unwrap().is_none());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn partial_update_leaves_other_columns() {
        let db = executor().await;
        let id = db.insert(&corolla()).await.unwrap();

        let changes = CarChanges {
            color: Some("blue".into()),
            ..Default::default()
        };
        assert_eq!(db.update(id, &changes).await.unwrap(), 1);

        let car = db.fetch_one(id).await.unwrap().unwrap();
        assert_eq!(car.color, "blue");
        assert_eq!(car.model, "Corolla");

        db.delete(id).await.unwrap();
        assert_eq!(db.update(id, &changes).await.unwrap(), 0);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn ping_reaches_database() {
        executor().await.ping().await.unwrap();
    }
}
