//! Car record and the inputs that create or change one

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

use super::rules::{integer_value, numeric_value, Schema, CREATE_SCHEMA, UPDATE_SCHEMA};
use super::ValidationError;

/// A stored car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CarRecord {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub price: f64,
}

/// Fields for a car that does not exist yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewCar {
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub price: f64,
}

impl NewCar {
    /// Build from an input object that already passed the create rules.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, ValidationError> {
        Ok(Self {
            brand: required(text(fields, "brand"), "brand")?,
            model: required(text(fields, "model"), "model")?,
            year: required(year(fields, "year"), "year")?,
            color: required(text(fields, "color"), "color")?,
            price: required(number(fields, &CREATE_SCHEMA, "price"), "price")?,
        })
    }

    /// Attach the id the store assigned.
    pub fn into_record(self, id: i64) -> CarRecord {
        CarRecord {
            id,
            brand: self.brand,
            model: self.model,
            year: self.year,
            color: self.color,
            price: self.price,
        }
    }
}

/// Fields to overwrite on an existing car
///
/// Only truthy values are carried, judged on the value as sent: numeric
/// zero is dropped, so `{"price": 0}` leaves the stored price untouched,
/// while the non-empty string `"0"` is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarChanges {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub color: Option<String>,
    pub price: Option<f64>,
}

impl CarChanges {
    /// Build from an input object that already passed the update rules.
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        let truthy: Map<String, Value> = fields
            .iter()
            .filter(|(_, v)| is_truthy(v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Self {
            brand: text(&truthy, "brand"),
            model: text(&truthy, "model"),
            year: year(&truthy, "year"),
            color: text(&truthy, "color"),
            price: number(&truthy, &UPDATE_SCHEMA, "price"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.brand.is_none()
            && self.model.is_none()
            && self.year.is_none()
            && self.color.is_none()
            && self.price.is_none()
    }
}

/// Interpret a route parameter as a car id.
///
/// Anything that is not a base-10 integer cannot name a stored car.
pub fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::Required { field })
}

fn text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key)?.as_str().map(str::to_owned)
}

fn year(fields: &Map<String, Value>, key: &str) -> Option<i32> {
    integer_value(fields.get(key)?).and_then(|n| i32::try_from(n).ok())
}

/// Numeric field, numeric strings included, rounded to the rule's precision.
fn number(fields: &Map<String, Value>, schema: &Schema, key: &str) -> Option<f64> {
    let n = numeric_value(fields.get(key)?)?;
    Some(schema.rule(key).map_or(n, |rule| rule.round(n)))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
