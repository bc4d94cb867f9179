use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;

use crate::auth::credentials;
use crate::error::AppResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

/// POST /auth/register
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let registered = credentials::register(
        &state.db,
        req.name.as_deref().unwrap_or(""),
        req.email.as_deref().unwrap_or(""),
        req.password.as_deref().unwrap_or(""),
    )?;

    let body = serde_json::json!({
        "message": "User registered successfully.",
        "userId": registered.user_id,
        "name": registered.name,
        "email": registered.email,
    });
    Ok((StatusCode::CREATED, Json(body)))
}

/// POST /auth/login
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<Value>> {
    let logged_in = credentials::login(
        &state.db,
        &state.tokens,
        req.email.as_deref().unwrap_or(""),
        req.password.as_deref().unwrap_or(""),
    )?;

    let body = serde_json::json!({
        "message": "Login successful.",
        "token": logged_in.token,
        "user": logged_in.user,
    });
    Ok(Json(body))
}

/// POST /auth/logout
///
/// Tokens are stateless, so there is nothing to revoke server-side.
async fn logout() -> Json<Value> {
    Json(serde_json::json!({
        "message": "Logout successful. Please delete your token on the client side."
    }))
}
