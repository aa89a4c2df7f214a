use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;

/// GET {landing_route}/:slug - serve a tenant's landing page.
///
/// Requests land here directly (platform URLs) or through the routing
/// middleware's rewrite (subdomains and custom domains).
pub async fn landing_get(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, ApiError> {
    render_landing(&state, &slug, "/").await
}

/// GET {landing_route}/:slug/*path - deep links keep working on custom
/// domains because the rewrite preserves the original path as a suffix.
pub async fn landing_get_nested(
    State(state): State<AppState>,
    Path((slug, path)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    render_landing(&state, &slug, &format!("/{}", path)).await
}

async fn render_landing(
    state: &AppState,
    slug: &str,
    path: &str,
) -> Result<Json<Value>, ApiError> {
    let landing = state
        .store
        .find_landing(slug)
        .await?
        .filter(|landing| landing.published)
        .ok_or_else(|| {
            ApiError::not_found(format!("No landing page configured for '{}'", slug))
        })?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "slug": landing.slug,
            "display_name": landing.display_name,
            "path": path,
        }
    })))
}
