use axum::{
    extract::{Request, State},
    http::{header::HOST, uri::PathAndQuery, Uri},
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::routing::classifier::{classify, HostClass};
use crate::routing::resolver::Resolution;
use crate::routing::rewrite::rewrite_path;
use crate::services::domain_service::validate_slug;

/// Header a trusted fronting proxy may set after doing its own resolution.
pub const PROXY_SLUG_HEADER: &str = "x-custom-domain-slug";

/// How a request came to address a landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedVia {
    Subdomain,
    CustomDomain,
    ProxyHeader,
}

/// Inserted into request extensions when the middleware rewrites a request.
#[derive(Debug, Clone)]
pub struct ResolvedLanding {
    pub slug: String,
    pub via: ResolvedVia,
}

/// Classify the request's hostname, resolve custom domains through the
/// store, and rewrite tenant traffic onto the landing route.
///
/// Never fails the request: every branch ends in `next.run`, and any
/// failure along the way degrades to pass-through so the platform's normal
/// routing (including its 404) takes over.
pub async fn tenant_routing_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let routing = &state.config.routing;

    let host = request
        .headers()
        .get(HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::to_owned)
        .or_else(|| request.uri().host().map(str::to_owned))
        .unwrap_or_default();

    let resolved = if let Some(slug) = trusted_proxy_slug(&request, routing.trust_proxy_slug_header)
    {
        Some((slug, ResolvedVia::ProxyHeader))
    } else {
        match classify(&host, &routing.base_domain) {
            HostClass::Platform => None,
            HostClass::TenantSubdomain(slug) => Some((slug, ResolvedVia::Subdomain)),
            HostClass::CustomCandidate(hostname) => {
                match state.resolver.resolve(&hostname).await {
                    Resolution::Found(slug) => Some((slug, ResolvedVia::CustomDomain)),
                    Resolution::NotFound => None,
                }
            }
        }
    };

    if let Some((slug, via)) = resolved {
        if let Some(new_path) = rewrite_path(request.uri().path(), &routing.landing_route, &slug) {
            if apply_rewrite(&mut request, &new_path) {
                tracing::debug!(host = %host, slug = %slug, path = %new_path, "rewrote request to landing route");
                request.extensions_mut().insert(ResolvedLanding { slug, via });
            }
        }
    }

    next.run(request).await
}

/// The proxy header is honored only when configured as trusted and only
/// when its value is syntactically a slug.
fn trusted_proxy_slug(request: &Request, trusted: bool) -> Option<String> {
    if !trusted {
        return None;
    }
    let slug = request.headers().get(PROXY_SLUG_HEADER)?.to_str().ok()?;
    validate_slug(slug).ok()?;
    Some(slug.to_string())
}

/// Swap the request path, keeping the query string. Returns false when the
/// rewritten value does not form a valid URI, in which case the request
/// passes through unchanged.
fn apply_rewrite(request: &mut Request, new_path: &str) -> bool {
    let path_and_query = match request.uri().query() {
        Some(q) => format!("{}?{}", new_path, q),
        None => new_path.to_string(),
    };

    let pq: PathAndQuery = match path_and_query.parse() {
        Ok(pq) => pq,
        Err(e) => {
            tracing::warn!(path = %path_and_query, error = %e, "rewrite produced invalid path, passing through");
            return false;
        }
    };

    let mut parts = request.uri().clone().into_parts();
    parts.path_and_query = Some(pq);
    match Uri::from_parts(parts) {
        Ok(uri) => {
            *request.uri_mut() = uri;
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "rewrite produced invalid uri, passing through");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http;

    #[test]
    fn rewrite_preserves_query_string() {
        let mut request: Request = http::Request::builder()
            .uri("/pricing?utm=reel")
            .body(Body::empty())
            .unwrap();

        assert!(apply_rewrite(&mut request, "/landing/art0x/pricing"));
        assert_eq!(request.uri().path(), "/landing/art0x/pricing");
        assert_eq!(request.uri().query(), Some("utm=reel"));
    }

    #[test]
    fn proxy_slug_requires_trust_and_valid_syntax() {
        let request: Request = http::Request::builder()
            .uri("/")
            .header(PROXY_SLUG_HEADER, "art0x")
            .body(Body::empty())
            .unwrap();

        assert_eq!(trusted_proxy_slug(&request, false), None);
        assert_eq!(
            trusted_proxy_slug(&request, true),
            Some("art0x".to_string())
        );

        let bad: Request = http::Request::builder()
            .uri("/")
            .header(PROXY_SLUG_HEADER, "../etc/passwd")
            .body(Body::empty())
            .unwrap();
        assert_eq!(trusted_proxy_slug(&bad, true), None);
    }
}
