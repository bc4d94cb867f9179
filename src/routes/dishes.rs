use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;

use crate::catalog::{self, CreateDish, UpdateDish};
use crate::db::models::Dish;
use crate::error::AppResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dishes", get(list).post(create))
        .route("/dishes/{id}", get(get_by_id).put(update).delete(remove))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    category: Option<String>,
}

/// POST /dishes
async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateDish>,
) -> AppResult<(StatusCode, Json<Dish>)> {
    let dish = catalog::create(&state.db, payload)?;
    Ok((StatusCode::CREATED, Json(dish)))
}

/// GET /dishes?category=meat|fish
async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Dish>>> {
    let dishes = catalog::list(&state.db, query.category.as_deref())?;
    Ok(Json(dishes))
}

/// GET /dishes/{id}
async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Dish>> {
    Ok(Json(catalog::get(&state.db, id)?))
}

/// PUT /dishes/{id}
async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateDish>,
) -> AppResult<Json<Dish>> {
    Ok(Json(catalog::update(&state.db, id, payload)?))
}

/// DELETE /dishes/{id}
async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    catalog::delete(&state.db, id)?;
    Ok(Json(serde_json::json!({ "message": "Dish deleted successfully." })))
}
