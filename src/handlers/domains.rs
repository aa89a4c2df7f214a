use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct RegisterDomainRequest {
    pub hostname: String,
    pub slug: String,
}

/// POST /api/domains - register a custom domain for a tenant.
/// The record starts `pending`; activation follows verification.
pub async fn domain_register(
    State(state): State<AppState>,
    Json(body): Json<RegisterDomainRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let domain = state
        .domains
        .register_domain(&body.hostname, &body.slug)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": domain })),
    ))
}

/// GET /api/domains - list every domain record.
pub async fn domain_list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let domains = state.domains.list_domains().await?;
    Ok(Json(json!({ "success": true, "data": domains })))
}

/// POST /api/domains/:hostname/activate
pub async fn domain_activate(
    State(state): State<AppState>,
    Path(hostname): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let domain = state.domains.activate_domain(&hostname).await?;
    Ok(Json(json!({ "success": true, "data": domain })))
}

/// DELETE /api/domains/:hostname - revoke the binding (soft state, the row
/// stays behind with `revoked` status).
pub async fn domain_revoke(
    State(state): State<AppState>,
    Path(hostname): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let domain = state.domains.revoke_domain(&hostname).await?;
    Ok(Json(json!({ "success": true, "data": domain })))
}
