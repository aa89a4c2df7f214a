use std::sync::Arc;

use thiserror::Error;
use tracing::info;
use url::Host;

use crate::config;
use crate::database::models::domain::{DomainStatus, TenantDomain};
use crate::database::store::{DomainStore, StoreError};
use crate::routing::classifier::normalize_host;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("invalid hostname: {0}")]
    InvalidHostname(String),

    #[error("invalid slug: {0}")]
    InvalidSlug(String),

    #[error("hostname already registered: {0}")]
    AlreadyExists(String),

    #[error("no domain record for: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Lifecycle operations over tenant custom-domain records.
#[derive(Clone)]
pub struct DomainService {
    store: Arc<dyn DomainStore>,
}

impl DomainService {
    pub fn new(store: Arc<dyn DomainStore>) -> Self {
        Self { store }
    }

    /// Register `hostname` for the tenant `slug`.
    ///
    /// Records start `pending` until verification completes out of band;
    /// only activation makes them resolvable.
    pub async fn register_domain(
        &self,
        hostname: &str,
        slug: &str,
    ) -> Result<TenantDomain, DomainError> {
        let hostname = validate_hostname(hostname)?;
        validate_slug(slug)?;

        let domain = self
            .store
            .insert_domain(&hostname, slug)
            .await
            .map_err(|e| match e {
                StoreError::DuplicateHostname(h) => DomainError::AlreadyExists(h),
                other => DomainError::Store(other),
            })?;

        info!(hostname = %domain.hostname, slug = %domain.slug, "registered custom domain");
        Ok(domain)
    }

    /// Mark a hostname active after external verification succeeded.
    pub async fn activate_domain(&self, hostname: &str) -> Result<TenantDomain, DomainError> {
        self.transition(hostname, DomainStatus::Active).await
    }

    /// Revoke a hostname binding. The routing cache may keep serving the
    /// old binding for up to one TTL window.
    pub async fn revoke_domain(&self, hostname: &str) -> Result<TenantDomain, DomainError> {
        self.transition(hostname, DomainStatus::Revoked).await
    }

    async fn transition(
        &self,
        hostname: &str,
        status: DomainStatus,
    ) -> Result<TenantDomain, DomainError> {
        let hostname = normalize_host(hostname);
        let domain = self
            .store
            .set_domain_status(&hostname, status)
            .await?
            .ok_or_else(|| DomainError::NotFound(hostname.clone()))?;

        info!(hostname = %domain.hostname, status = %domain.status, "domain status changed");
        Ok(domain)
    }

    pub async fn list_domains(&self) -> Result<Vec<TenantDomain>, DomainError> {
        Ok(self.store.list_domains().await?)
    }
}

/// Normalize and validate an externally-owned hostname.
///
/// Hostnames under the platform base domain are rejected: those route as
/// subdomains, and a record for them would shadow the classifier.
fn validate_hostname(raw: &str) -> Result<String, DomainError> {
    let host = normalize_host(raw);
    if host.is_empty() || !host.contains('.') {
        return Err(DomainError::InvalidHostname(raw.to_string()));
    }

    // IP addresses are not custom domains.
    match Host::parse(&host) {
        Ok(Host::Domain(_)) => {}
        _ => return Err(DomainError::InvalidHostname(raw.to_string())),
    }

    let base = &config::config().routing.base_domain;
    if host == *base || host.ends_with(&format!(".{}", base)) {
        return Err(DomainError::InvalidHostname(format!(
            "{} is a platform hostname",
            raw
        )));
    }

    Ok(host)
}

/// Slugs are single path-safe labels.
pub(crate) fn validate_slug(slug: &str) -> Result<(), DomainError> {
    let valid = !slug.is_empty()
        && slug.len() <= 63
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(DomainError::InvalidSlug(slug.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hostname_is_normalized_on_validation() {
        assert_eq!(
            validate_hostname("MyDomain.EXAMPLE:443").unwrap(),
            "mydomain.example"
        );
    }

    #[test]
    fn platform_hostnames_are_rejected() {
        assert!(validate_hostname("creator0x.com").is_err());
        assert!(validate_hostname("art0x.creator0x.com").is_err());
    }

    #[test]
    fn bare_labels_and_ips_are_rejected() {
        assert!(validate_hostname("localhost").is_err());
        assert!(validate_hostname("").is_err());
        assert!(validate_hostname("192.168.0.1").is_err());
    }

    #[test]
    fn slug_syntax() {
        assert!(validate_slug("art0x").is_ok());
        assert!(validate_slug("my-page_1").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("has space").is_err());
        assert!(validate_slug("dot.ted").is_err());
    }
}
