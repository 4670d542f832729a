//! Car endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::http::server::AppState;
use crate::models::CarRecord;

/// GET /carro - list all cars
async fn list_cars(State(state): State<Arc<AppState>>) -> Result<Json<Vec<CarRecord>>, ApiError> {
    Ok(Json(state.controller.list().await?))
}

/// GET /carro/{id} - get a single car
async fn get_car(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CarRecord>, ApiError> {
    Ok(Json(state.controller.get(&id).await?))
}

/// POST /carro - create a car, answering 200 with the echoed fields
async fn create_car(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody,
) -> Result<Json<CarRecord>, ApiError> {
    Ok(Json(state.controller.create(&body).await?))
}

/// PATCH|PUT /carro/{id} - partial update, answering with the stored row
async fn update_car(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Json<CarRecord>, ApiError> {
    Ok(Json(state.controller.update(&id, &body).await?))
}

/// DELETE /carro/{id}
async fn delete_car(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.controller.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Car routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/carro", get(list_cars).post(create_car))
        .route(
            "/carro/{id}",
            get(get_car)
                .patch(update_car)
                .put(update_car)
                .delete(delete_car),
        )
}
