//! Car record controller
//!
//! Turns requests into executor calls and executor results into records or
//! [`ApiError`]s. Input is validated before the store is touched. Store
//! errors are not retried.

use std::sync::Arc;

use chrono::{Datelike, Utc};
use serde_json::{Map, Value};

use crate::db::{DbError, QueryExecutor};
use crate::http::ApiError;
use crate::models::{
    parse_id, validate, CarChanges, CarRecord, NewCar, Schema, ValidationError, CREATE_SCHEMA,
    UPDATE_SCHEMA,
};

/// Not-found messages, one per operation that looks a row up by id.
const GET_NOT_FOUND: &str = "Carro no encontrado.";
const DELETE_NOT_FOUND: &str = "Carro no eliminado.";
const UPDATE_NOT_FOUND: &str = "Carro no encontrado";

/// Operations exposed by the controller, each with its own store-failure
/// message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    List,
    Get,
    Create,
    Delete,
    Update,
}

impl Operation {
    fn failed(self, source: DbError) -> ApiError {
        let message = match self {
            Self::List => "Hubo un error al obtener los carros.",
            Self::Get => "Hubo un error al obtener el carro.",
            Self::Delete => "Hubo un error al eliminar el carro.",
            Self::Create | Self::Update => "Algo fue mal",
        };
        ApiError::Store { message, source }
    }
}

/// Controller for the `carro` resource
#[derive(Clone)]
pub struct CarController {
    executor: Arc<dyn QueryExecutor>,
}

impl CarController {
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self { executor }
    }

    /// Whether the backing store answers.
    pub async fn ping(&self) -> Result<(), DbError> {
        self.executor.ping().await
    }

    /// All stored cars.
    pub async fn list(&self) -> Result<Vec<CarRecord>, ApiError> {
        self.executor
            .fetch_all()
            .await
            .map_err(|e| Operation::List.failed(e))
    }

    /// The car named by a route parameter.
    pub async fn get(&self, raw_id: &str) -> Result<CarRecord, ApiError> {
        let id = parse_id(raw_id).ok_or_else(|| not_found(GET_NOT_FOUND))?;
        self.executor
            .fetch_one(id)
            .await
            .map_err(|e| Operation::Get.failed(e))?
            .ok_or_else(|| not_found(GET_NOT_FOUND))
    }

    /// Insert a car and echo the submitted fields with the new id.
    pub async fn create(&self, body: &Value) -> Result<CarRecord, ApiError> {
        let fields = checked(body, &CREATE_SCHEMA)?;
        let car = NewCar::from_fields(fields)?;
        let id = self
            .executor
            .insert(&car)
            .await
            .map_err(|e| Operation::Create.failed(e))?;

        tracing::debug!(id, "car created");
        Ok(car.into_record(id))
    }

    /// Remove the car named by a route parameter.
    pub async fn delete(&self, raw_id: &str) -> Result<(), ApiError> {
        let id = parse_id(raw_id).ok_or_else(|| not_found(DELETE_NOT_FOUND))?;
        let affected = self
            .executor
            .delete(id)
            .await
            .map_err(|e| Operation::Delete.failed(e))?;
        if affected == 0 {
            return Err(not_found(DELETE_NOT_FOUND));
        }

        tracing::debug!(id, "car deleted");
        Ok(())
    }

    /// Overwrite the supplied fields and return the row as stored.
    ///
    /// Zero-valued fields are dropped before the update. When nothing is left
    /// to write the row is only re-read.
    pub async fn update(&self, raw_id: &str, body: &Value) -> Result<CarRecord, ApiError> {
        let op = Operation::Update;
        let fields = checked(body, &UPDATE_SCHEMA)?;
        let changes = CarChanges::from_fields(fields);
        let id = parse_id(raw_id).ok_or_else(|| not_found(UPDATE_NOT_FOUND))?;

        if changes.is_empty() {
            tracing::debug!(id, "no truthy fields in update, re-reading only");
        } else {
            let affected = self
                .executor
                .update(id, &changes)
                .await
                .map_err(|e| op.failed(e))?;
            if affected == 0 {
                return Err(not_found(UPDATE_NOT_FOUND));
            }
        }

        self.executor
            .fetch_one(id)
            .await
            .map_err(|e| op.failed(e))?
            .ok_or_else(|| not_found(UPDATE_NOT_FOUND))
    }
}

/// Validate a request body, keeping only the first violation.
fn checked<'a>(body: &'a Value, schema: &Schema) -> Result<&'a Map<String, Value>, ValidationError> {
    let fields = body.as_object().ok_or(ValidationError::NotAnObject)?;
    match validate(fields, schema, current_year()).into_iter().next() {
        Some(first) => Err(first),
        None => Ok(fields),
    }
}

fn not_found(message: &'static str) -> ApiError {
    ApiError::NotFound { message }
}

fn current_year() -> i64 {
    i64::from(Utc::now().year())
}
