use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Json},
    routing::{delete, get, post},
    Router,
};
use serde_json::{json, Value};
use tower::Layer;
use tower_http::{cors::CorsLayer, normalize_path::NormalizePathLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::database::store::DomainStore;
use crate::handlers::{domains, landing};
use crate::middleware::tenant_routing::tenant_routing_middleware;
use crate::routing::resolver::DomainResolver;
use crate::services::domain_service::DomainService;

/// Shared per-process state handed to handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    pub config: &'static AppConfig,
    pub store: Arc<dyn DomainStore>,
    pub resolver: Arc<DomainResolver>,
    pub domains: DomainService,
}

impl AppState {
    pub fn new(config: &'static AppConfig, store: Arc<dyn DomainStore>) -> Self {
        let resolver = Arc::new(DomainResolver::new(
            store.clone(),
            Duration::from_secs(config.routing.cache_ttl_secs),
        ));
        let domains = DomainService::new(store.clone());

        Self {
            config,
            store,
            resolver,
            domains,
        }
    }
}

/// Build the gateway router.
///
/// The tenant-routing middleware must see the request before path routing
/// happens (it rewrites the URI), so it wraps the routed service instead of
/// being a plain route layer; the outer router only delegates to the
/// wrapped stack. Trailing-slash normalization sits between the two: a
/// rewrite of `/` produces `/landing/<slug>/`, which must still match the
/// slug route.
pub fn app(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(landing_routes(&state))
        .merge(domain_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let normalized = NormalizePathLayer::trim_trailing_slash().layer(routes);
    let gateway =
        middleware::from_fn_with_state(state, tenant_routing_middleware).layer(normalized);

    Router::new().fallback_service(gateway)
}

fn landing_routes(state: &AppState) -> Router<AppState> {
    let root = state.config.routing.landing_route.trim_end_matches('/');

    Router::new()
        .route(&format!("{}/:slug", root), get(landing::landing_get))
        .route(
            &format!("{}/:slug/*path", root),
            get(landing::landing_get_nested),
        )
}

fn domain_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/domains",
            post(domains::domain_register).get(domains::domain_list),
        )
        .route(
            "/api/domains/:hostname/activate",
            post(domains::domain_activate),
        )
        .route("/api/domains/:hostname", delete(domains::domain_revoke))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Landing Gateway",
            "version": version,
            "description": "Multi-tenant landing page gateway (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "landing": "/landing/:slug (public, rewrite target)",
                "domains": "/api/domains (management)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "store": "ok"
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "store unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "store_error": e.to_string()
                }
            })),
        ),
    }
}
