//! Domain models with validation at construction
//!
//! Request bodies are checked against a declarative rule table before any
//! typed value is built from them.

pub mod validation;
pub mod rules;
pub mod car;

pub use validation::ValidationError;
pub use rules::{validate, Schema, CREATE_SCHEMA, UPDATE_SCHEMA};
pub use car::{parse_id, CarChanges, CarRecord, NewCar};
