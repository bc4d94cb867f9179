use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;

use crate::db::models::{Reservation, ReservationType};
use crate::error::{AppError, AppResult};
use crate::extractors::AuthUser;
use crate::reservations::{ReservationDraft, ReservationPatch};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reservations", get(list).post(create))
        .route(
            "/reservations/{id}",
            get(get_by_id).put(update).delete(remove),
        )
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// POST /reservations
async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(draft): Json<ReservationDraft>,
) -> AppResult<(StatusCode, Json<Reservation>)> {
    let new = draft.finalize()?;
    let reservation = state.reservations.create(user.user_id, new).await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// GET /reservations?type=table|sunbed
async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Reservation>>> {
    let kind = match query.kind.as_deref().filter(|t| !t.is_empty()) {
        Some(raw) => Some(ReservationType::parse(raw).ok_or_else(|| {
            AppError::Validation("Type query parameter must be 'table' or 'sunbed'.".into())
        })?),
        None => None,
    };

    let reservations = state.reservations.list(user.user_id, kind).await?;
    Ok(Json(reservations))
}

/// GET /reservations/{id}
async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.reservations.get(id, user.user_id).await?;
    Ok(Json(reservation))
}

/// PUT /reservations/{id}
async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(patch): Json<ReservationPatch>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.reservations.update(id, user.user_id, patch).await?;
    Ok(Json(reservation))
}

/// DELETE /reservations/{id}
async fn remove(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    state.reservations.delete(id, user.user_id).await?;
    Ok(Json(serde_json::json!({
        "message": "Reservation deleted successfully."
    })))
}
