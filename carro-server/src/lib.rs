//! carro-server: HTTP-to-SQL adapter for car records
//!
//! Exposes list, get, create, partial update and delete on `/carro`,
//! backed by a single `carro` table behind a [`db::QueryExecutor`].

pub mod controller;
pub mod db;
pub mod http;
pub mod models;

pub use controller::CarController;
pub use http::{run_server, ServerConfig};
